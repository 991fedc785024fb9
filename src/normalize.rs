use crate::models::{NoteIndex, StatisticRecord};
use crate::sources::{BasicPayload, BinaryPayload, CustomPayload, NotesPayload};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::debug;

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// Source timestamps may carry sub-day precision; everything collapses to
// the calendar day before grouping.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(moment) = DateTime::parse_from_rfc3339(raw) {
        return Some(moment.date_naive());
    }
    if let Ok(moment) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(moment.date());
    }
    if let Ok(moment) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(moment.date());
    }
    None
}

pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;
    for ch in name.chars().flat_map(char::to_lowercase) {
        if let Some(mapped) = transliterate(ch) {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push_str(mapped);
        } else if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch);
        } else {
            pending_separator = true;
        }
    }
    slug
}

fn transliterate(ch: char) -> Option<&'static str> {
    let mapped = match ch {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' | 'ё' | 'э' => "e",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "c",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ъ' | 'ь' => "",
        'ы' => "y",
        'ю' => "yu",
        'я' => "ya",
        _ => return None,
    };
    Some(mapped)
}

pub fn basic_records(payload: &BasicPayload) -> Vec<StatisticRecord> {
    let mut records = Vec::new();
    for (raw_date, entries) in &payload.user_statments {
        let Some(date) = parse_day(raw_date) else {
            debug!("skipping basic entries with unreadable date {raw_date}");
            continue;
        };
        for entry in entries {
            if entry.name.trim().is_empty() {
                continue;
            }
            records.push(StatisticRecord {
                date,
                type_id: format!("basic_{}", entry.type_id),
                value: entry.estimation,
            });
        }
    }
    records
}

pub fn custom_records(payload: &CustomPayload) -> Vec<StatisticRecord> {
    let mut records = Vec::new();
    for (raw_date, entries) in &payload.user_costume_statments {
        let Some(date) = parse_day(raw_date) else {
            debug!("skipping custom entries with unreadable date {raw_date}");
            continue;
        };
        for entry in entries {
            let slug = slugify(&entry.name);
            if slug.is_empty() {
                continue;
            }
            records.push(StatisticRecord {
                date,
                type_id: format!("custom_{slug}"),
                value: entry.estimation,
            });
        }
    }
    records
}

pub fn binary_records(payload: &BinaryPayload) -> Vec<StatisticRecord> {
    let mut records = Vec::new();
    for (raw_date, entries) in &payload.binary_answer {
        let Some(date) = parse_day(raw_date) else {
            debug!("skipping binary entries with unreadable date {raw_date}");
            continue;
        };
        for entry in entries {
            let slug = slugify(&entry.name);
            if slug.is_empty() {
                continue;
            }
            records.push(StatisticRecord {
                date,
                type_id: format!("binary_{slug}"),
                value: if entry.answer { 1.0 } else { 0.0 },
            });
        }
    }
    records
}

pub fn note_records(payload: &NotesPayload) -> (Vec<StatisticRecord>, NoteIndex) {
    let mut records = Vec::new();
    let mut index = NoteIndex::new();
    for (raw_date, entries) in &payload.notes {
        let Some(date) = parse_day(raw_date) else {
            debug!("skipping notes with unreadable date {raw_date}");
            continue;
        };
        let texts: Vec<String> = entries.iter().map(|entry| entry.note.clone()).collect();
        records.push(StatisticRecord {
            date,
            type_id: "note".to_string(),
            value: texts.len() as f64,
        });
        index.insert(date_key(date), texts);
    }
    (records, index)
}
