use crate::catalog::TypeSelection;
use crate::models::{
    ChartModel, ChartPoint, DateRange, MetricType, NoteIndex, Series, StatisticRecord,
};
use crate::normalize::date_key;
use chrono::{Duration, NaiveDate};

// Labels come from day-stepping over the submitted range, never from the
// record dates, so the time axis stays continuous however sparse the data.
pub fn date_span(range: &DateRange) -> Vec<NaiveDate> {
    let mut days = Vec::with_capacity(range.num_days().max(0) as usize);
    let mut current = range.from;
    while current <= range.to {
        days.push(current);
        current += Duration::days(1);
    }
    days
}

pub fn assemble(
    range: &DateRange,
    catalog: &[MetricType],
    records: &[StatisticRecord],
    selection: &TypeSelection,
) -> Option<ChartModel> {
    if records.is_empty() {
        return None;
    }

    let labels = date_span(range).into_iter().map(date_key).collect();
    let series = catalog
        .iter()
        .filter(|entry| selection.contains(&entry.id))
        .map(|entry| Series {
            type_id: entry.id.clone(),
            label: entry.name.clone(),
            axis: entry.axis.axis_id(),
            color: entry.color.clone(),
            show_line: entry.show_line,
            points: records
                .iter()
                .filter(|record| record.type_id == entry.id)
                .map(|record| ChartPoint {
                    date: date_key(record.date),
                    value: record.value,
                })
                .collect(),
        })
        .collect();

    Some(ChartModel { labels, series })
}

pub fn point_date(model: &ChartModel, series_index: usize, point_index: usize) -> Option<&str> {
    model
        .series
        .get(series_index)?
        .points
        .get(point_index)
        .map(|point| point.date.as_str())
}

pub fn notes_for<'a>(index: &'a NoteIndex, key: &str) -> &'a [String] {
    index.get(key).map(Vec::as_slice).unwrap_or(&[])
}
