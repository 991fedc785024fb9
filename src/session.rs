use crate::axes::{self, AxisLayout};
use crate::catalog::{self, TypeSelection};
use crate::chart;
use crate::models::{
    ChartModel, ChartPayload, DateRange, MetricType, NoteIndex, RangePayload, StatisticRecord,
    TypeEntry,
};
use crate::normalize::{self, date_key};
use crate::sources::SourceBundle;

pub const NO_DATA_MESSAGE: &str = "no statistics in the selected period";

#[derive(Debug, Default)]
pub struct Session {
    pub range: Option<DateRange>,
    pub records: Vec<StatisticRecord>,
    pub catalog: Vec<MetricType>,
    pub notes: NoteIndex,
    pub selection: TypeSelection,
    pub layout: AxisLayout,
    pub chart: Option<ChartModel>,
    pub message: Option<String>,
}

impl Session {
    // Every field except the selection is replaced wholesale, so a reader
    // never sees a catalog referencing records from another fetch.
    pub fn apply_fetch(&mut self, range: DateRange, bundle: &SourceBundle) {
        let mut candidates = Vec::new();
        let mut records = Vec::new();
        let mut notes = NoteIndex::new();

        if !bundle.basic.is_empty() {
            candidates.extend(catalog::basic_candidates(&bundle.basic.statement_types));
            records.extend(normalize::basic_records(&bundle.basic));
        }
        if !bundle.custom.is_empty() {
            candidates.extend(catalog::custom_candidates(
                &bundle.custom.costume_statements_names,
            ));
            records.extend(normalize::custom_records(&bundle.custom));
        }
        if !bundle.binary.is_empty() {
            candidates.extend(catalog::binary_candidates(
                &bundle.binary.binary_answer_names,
            ));
            records.extend(normalize::binary_records(&bundle.binary));
        }
        if !bundle.notes.is_empty() {
            let (note_records, note_index) = normalize::note_records(&bundle.notes);
            candidates.push(catalog::note_sentinel());
            records.extend(note_records);
            notes = note_index;
        }

        self.range = Some(range);
        self.catalog = catalog::build_catalog(candidates, &records);
        self.records = records;
        self.notes = notes;
        self.selection.reconcile(&self.catalog);
        self.layout = axes::layout_axes(&self.catalog);
        self.rebuild_chart();
        self.message = if self.records.is_empty() {
            Some(NO_DATA_MESSAGE.to_string())
        } else {
            None
        };
    }

    pub fn set_selection(&mut self, type_ids: impl IntoIterator<Item = String>) {
        self.selection = TypeSelection::Chosen(type_ids.into_iter().collect());
        self.rebuild_chart();
    }

    fn rebuild_chart(&mut self) {
        self.chart = match &self.range {
            Some(range) => chart::assemble(range, &self.catalog, &self.records, &self.selection),
            None => None,
        };
    }

    pub fn payload(&self) -> ChartPayload {
        ChartPayload {
            range: self.range.map(|range| RangePayload {
                from: date_key(range.from),
                to: date_key(range.to),
            }),
            types: self
                .catalog
                .iter()
                .map(|entry| TypeEntry {
                    id: entry.id.clone(),
                    name: entry.name.clone(),
                    color: entry.color.clone(),
                    axis: entry.axis.axis_id(),
                    selected: self.selection.contains(&entry.id),
                })
                .collect(),
            axes: self.layout.clone(),
            chart: self.chart.clone(),
            message: self.message.clone(),
        }
    }
}
