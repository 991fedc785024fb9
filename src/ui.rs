pub fn render_index(date_from: &str, date_to: &str, default_user: Option<u64>) -> String {
    let user = default_user.map(|id| id.to_string()).unwrap_or_default();
    INDEX_HTML
        .replace("{{FROM}}", date_from)
        .replace("{{TO}}", date_to)
        .replace("{{USER}}", &user)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Diary Dashboard</title>
  <style>
    :root {
      --bg-1: #f4f1ea;
      --ink: #2b2a28;
      --accent: #5b6ee1;
      --accent-2: #2f4858;
      --card: #ffffff;
      --line: rgba(47, 72, 88, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg-1);
      color: var(--ink);
      font-family: "Trebuchet MS", "Segoe UI", sans-serif;
      display: grid;
      place-items: start center;
      padding: 28px 16px 48px;
    }

    .app {
      width: min(960px, 100%);
      display: grid;
      gap: 18px;
    }

    h1 {
      margin: 0;
      font-size: 1.8rem;
      color: var(--accent-2);
    }

    .card {
      background: var(--card);
      border: 1px solid var(--line);
      border-radius: 14px;
      padding: 18px;
    }

    .filters {
      display: flex;
      flex-wrap: wrap;
      align-items: end;
      gap: 14px;
    }

    .filters label {
      display: grid;
      gap: 4px;
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.08em;
      color: #8b857d;
    }

    .filters input {
      border: 1px solid var(--line);
      border-radius: 8px;
      padding: 8px 10px;
      font-size: 0.95rem;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 22px;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
    }

    button:disabled {
      opacity: 0.5;
      cursor: wait;
    }

    .chips {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
    }

    .chip {
      border: 2px solid currentColor;
      border-radius: 999px;
      padding: 5px 12px;
      font-size: 0.85rem;
      font-weight: 600;
      cursor: pointer;
      background: white;
      opacity: 0.35;
      user-select: none;
    }

    .chip.active {
      opacity: 1;
    }

    #chart {
      width: 100%;
      display: block;
    }

    .axis-band {
      stroke: var(--line);
    }

    .axis-label {
      fill: #7a746d;
      font-size: 11px;
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .notes h4 {
      margin: 0 0 8px;
      color: var(--accent-2);
    }

    .notes p {
      margin: 4px 0;
      padding: 8px 10px;
      background: rgba(91, 110, 225, 0.08);
      border-radius: 8px;
    }

    .notes .empty {
      background: none;
      color: #8b857d;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Diary Dashboard</h1>
    </header>

    <section class="card filters">
      <label>User
        <input id="user" type="number" value="{{USER}}" placeholder="user id" />
      </label>
      <label>From
        <input id="date-from" type="date" value="{{FROM}}" />
      </label>
      <label>To
        <input id="date-to" type="date" value="{{TO}}" />
      </label>
      <button id="submit" type="button">Show</button>
    </section>

    <section class="card">
      <div id="chips" class="chips"></div>
    </section>

    <section class="card">
      <svg id="chart" aria-label="Statistics chart" role="img"></svg>
      <div class="status" id="status">Chart will appear here.</div>
    </section>

    <section class="card notes" id="notes" hidden>
      <h4 id="notes-title"></h4>
      <div id="notes-body"></div>
    </section>
  </main>

  <script>
    const userEl = document.getElementById('user');
    const fromEl = document.getElementById('date-from');
    const toEl = document.getElementById('date-to');
    const submitEl = document.getElementById('submit');
    const chipsEl = document.getElementById('chips');
    const chartEl = document.getElementById('chart');
    const statusEl = document.getElementById('status');
    const notesEl = document.getElementById('notes');
    const notesTitleEl = document.getElementById('notes-title');
    const notesBodyEl = document.getElementById('notes-body');

    let payload = null;

    const setStatus = (message, type) => {
      statusEl.textContent = message || '';
      statusEl.dataset.type = type || '';
    };

    const post = async (url, body) => {
      const res = await fetch(url, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(body)
      });
      if (!res.ok) {
        throw new Error(await res.text() || 'request failed');
      }
      return res.json();
    };

    const renderChips = () => {
      chipsEl.innerHTML = '';
      payload.types.forEach((type) => {
        const chip = document.createElement('div');
        chip.className = 'chip' + (type.selected ? ' active' : '');
        chip.style.color = type.color;
        chip.textContent = type.name;
        chip.addEventListener('click', async () => {
          const selected = payload.types
            .filter((t) => (t.id === type.id ? !t.selected : t.selected))
            .map((t) => t.id);
          try {
            payload = await post('/api/selection', { type_ids: selected });
            render();
          } catch (err) {
            setStatus(err.message, 'error');
          }
        });
        chipsEl.appendChild(chip);
      });
    };

    const WIDTH = 920;
    const PAD_LEFT = 64;
    const PAD_RIGHT = 16;
    const PAD_BOTTOM = 26;

    const svgEl = (name, attrs) => {
      const el = document.createElementNS('http://www.w3.org/2000/svg', name);
      Object.entries(attrs).forEach(([key, value]) => el.setAttribute(key, value));
      return el;
    };

    const xPos = (labels, date) => {
      const index = labels.indexOf(date);
      if (index === -1) return null;
      const step = labels.length > 1 ? (WIDTH - PAD_LEFT - PAD_RIGHT) / (labels.length - 1) : 0;
      return PAD_LEFT + index * step;
    };

    const yPos = (axis, value) => {
      if (axis.min !== undefined && axis.max !== undefined) {
        const span = axis.max - axis.min || 1;
        return axis.offset + axis.height - ((value - axis.min) / span) * axis.height;
      }
      if (axis.labels && axis.labels.length === 2) {
        return value > 0
          ? axis.offset + axis.height * 0.28
          : axis.offset + axis.height * 0.72;
      }
      return axis.offset + axis.height * 0.5;
    };

    const renderChart = () => {
      chartEl.innerHTML = '';
      notesEl.hidden = true;

      if (!payload.chart) {
        chartEl.setAttribute('height', 0);
        setStatus(payload.message || 'Chart will appear here.');
        return;
      }
      setStatus(payload.message || '');

      const { labels, series } = payload.chart;
      const { axes, total_height } = payload.axes;
      const height = total_height + PAD_BOTTOM;
      chartEl.setAttribute('viewBox', `0 0 ${WIDTH} ${height}`);
      chartEl.setAttribute('height', height);

      axes.forEach((axis) => {
        chartEl.appendChild(svgEl('line', {
          class: 'axis-band',
          x1: PAD_LEFT, y1: axis.offset + axis.height,
          x2: WIDTH - PAD_RIGHT, y2: axis.offset + axis.height
        }));
        const names = axis.labels
          || [axis.max, axis.min].map((v) => String(v));
        names.forEach((name, i) => {
          const y = axis.labels
            ? yPos(axis, axis.labels.length === 2 ? (i === 0 ? 1 : 0) : 0)
            : axis.offset + (i === 0 ? 12 : axis.height - 4);
          chartEl.appendChild(Object.assign(svgEl('text', {
            class: 'axis-label', x: PAD_LEFT - 10, y: y + 4, 'text-anchor': 'end'
          }), { textContent: name }));
        });
      });

      const every = labels.length > 14 ? Math.ceil(labels.length / 14) : 1;
      labels.forEach((label, index) => {
        if (index % every !== 0) return;
        chartEl.appendChild(Object.assign(svgEl('text', {
          class: 'axis-label',
          x: xPos(labels, label),
          y: total_height + 18,
          'text-anchor': 'middle'
        }), { textContent: label.slice(5) }));
      });

      series.forEach((entry, seriesIndex) => {
        const axis = axes.find((a) => a.id === entry.axis);
        if (!axis) return;
        const coords = entry.points
          .map((point, pointIndex) => ({
            point, pointIndex, x: xPos(labels, point.date), y: yPos(axis, point.value)
          }))
          .filter((c) => c.x !== null);

        if (entry.show_line && coords.length > 1) {
          const path = coords
            .map((c, i) => `${i === 0 ? 'M' : 'L'} ${c.x.toFixed(1)} ${c.y.toFixed(1)}`)
            .join(' ');
          chartEl.appendChild(svgEl('path', {
            d: path, fill: 'none', stroke: entry.color, 'stroke-width': 2.5
          }));
        }

        coords.forEach((c) => {
          const dot = svgEl('circle', {
            cx: c.x, cy: c.y, r: 4.5,
            fill: entry.color, stroke: 'white', 'stroke-width': 1.5,
            cursor: 'pointer'
          });
          dot.appendChild(Object.assign(
            svgEl('title', {}),
            { textContent: `${entry.label}: ${c.point.value}` }
          ));
          dot.addEventListener('click', () => showNotes(seriesIndex, c.pointIndex));
          chartEl.appendChild(dot);
        });
      });
    };

    const showNotes = async (seriesIndex, pointIndex) => {
      try {
        const result = await post('/api/point', { series: seriesIndex, point: pointIndex });
        if (!result.date) return;
        notesTitleEl.textContent = `Notes for ${result.date}`;
        notesBodyEl.innerHTML = '';
        if (result.notes.length === 0) {
          const p = document.createElement('p');
          p.className = 'empty';
          p.textContent = 'No notes that day.';
          notesBodyEl.appendChild(p);
        }
        result.notes.forEach((note) => {
          const p = document.createElement('p');
          p.textContent = note;
          notesBodyEl.appendChild(p);
        });
        notesEl.hidden = false;
      } catch (err) {
        setStatus(err.message, 'error');
      }
    };

    const render = () => {
      renderChips();
      renderChart();
    };

    const refresh = async () => {
      setStatus('Loading...');
      submitEl.disabled = true;
      try {
        payload = await post('/api/refresh', {
          user: userEl.value ? Number(userEl.value) : null,
          date_from: fromEl.value || null,
          date_to: toEl.value || null
        });
        render();
      } catch (err) {
        setStatus(err.message, 'error');
      } finally {
        submitEl.disabled = false;
      }
    };

    submitEl.addEventListener('click', refresh);

    fetch('/api/chart')
      .then((res) => res.json())
      .then((initial) => {
        payload = initial;
        render();
      })
      .catch(() => setStatus('Unable to load state', 'error'));
  </script>
</body>
</html>
"#;
