use crate::axes::AxisLayout;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AxisKind {
    Numeric,
    Binary { slug: String },
    Notes,
}

impl AxisKind {
    pub fn axis_id(&self) -> String {
        match self {
            AxisKind::Numeric => "y".to_string(),
            AxisKind::Binary { slug } => format!("binary:{slug}"),
            AxisKind::Notes => "notes".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricType {
    pub id: String,
    pub name: String,
    pub color: String,
    pub axis: AxisKind,
    pub show_line: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatisticRecord {
    pub date: NaiveDate,
    pub type_id: String,
    pub value: f64,
}

pub type NoteIndex = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn num_days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartPoint {
    pub date: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Series {
    pub type_id: String,
    pub label: String,
    pub axis: String,
    pub color: String,
    pub show_line: bool,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartModel {
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RangePayload {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TypeEntry {
    pub id: String,
    pub name: String,
    pub color: String,
    pub axis: String,
    pub selected: bool,
}

#[derive(Debug, Serialize)]
pub struct ChartPayload {
    pub range: Option<RangePayload>,
    pub types: Vec<TypeEntry>,
    pub axes: AxisLayout,
    pub chart: Option<ChartModel>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub user: Option<u64>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    pub type_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct PointRequest {
    pub series: usize,
    pub point: usize,
}

#[derive(Debug, Serialize)]
pub struct NotesResponse {
    pub date: Option<String>,
    pub notes: Vec<String>,
}
