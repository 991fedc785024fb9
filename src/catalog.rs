use crate::color::{self, SourceCategory};
use crate::models::{AxisKind, MetricType, StatisticRecord};
use crate::normalize::slugify;
use crate::sources::BasicTypeDecl;
use rustc_hash::FxHashSet;
use std::collections::BTreeSet;

pub fn basic_candidates(declared: &[BasicTypeDecl]) -> Vec<MetricType> {
    declared
        .iter()
        .filter(|decl| !decl.name.trim().is_empty())
        .filter(|decl| decl.visible.unwrap_or(true))
        .map(|decl| MetricType {
            id: format!("basic_{}", decl.type_id),
            name: decl.name.clone(),
            color: color::assign_color(SourceCategory::Basic, &decl.name, decl.color.as_deref(), 0),
            axis: AxisKind::Numeric,
            show_line: true,
        })
        .collect()
}

pub fn custom_candidates(names: &[String]) -> Vec<MetricType> {
    let mut seen_index = 0;
    let mut candidates = Vec::with_capacity(names.len());
    for name in names {
        let slug = slugify(name);
        if slug.is_empty() {
            continue;
        }
        candidates.push(MetricType {
            id: format!("custom_{slug}"),
            name: name.clone(),
            color: color::assign_color(SourceCategory::Custom, name, None, seen_index),
            axis: AxisKind::Numeric,
            show_line: true,
        });
        seen_index += 1;
    }
    candidates
}

pub fn binary_candidates(names: &[String]) -> Vec<MetricType> {
    let mut seen_index = 0;
    let mut candidates = Vec::with_capacity(names.len());
    for name in names {
        let slug = slugify(name);
        if slug.is_empty() {
            continue;
        }
        candidates.push(MetricType {
            id: format!("binary_{slug}"),
            name: name.clone(),
            color: color::assign_color(SourceCategory::Binary, name, None, seen_index),
            axis: AxisKind::Binary { slug },
            show_line: false,
        });
        seen_index += 1;
    }
    candidates
}

pub fn note_sentinel() -> MetricType {
    MetricType {
        id: "note".to_string(),
        name: "Notes".to_string(),
        color: color::NOTE_COLOR.to_string(),
        axis: AxisKind::Notes,
        show_line: false,
    }
}

// Declared order is preserved; a declared type with nothing to plot in the
// active range never reaches the legend or the axis layout.
pub fn build_catalog(candidates: Vec<MetricType>, records: &[StatisticRecord]) -> Vec<MetricType> {
    let observed: FxHashSet<&str> = records.iter().map(|r| r.type_id.as_str()).collect();
    let mut seen_ids = FxHashSet::default();
    candidates
        .into_iter()
        .filter(|candidate| observed.contains(candidate.id.as_str()))
        .filter(|candidate| seen_ids.insert(candidate.id.clone()))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypeSelection {
    #[default]
    Unset,
    Chosen(BTreeSet<String>),
}

impl TypeSelection {
    // Seeds "everything selected" exactly once; a user's narrowed set, and
    // a deliberately cleared set, both survive later re-fetches.
    pub fn reconcile(&mut self, catalog: &[MetricType]) {
        if *self == TypeSelection::Unset && !catalog.is_empty() {
            *self = TypeSelection::Chosen(catalog.iter().map(|t| t.id.clone()).collect());
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        match self {
            TypeSelection::Unset => false,
            TypeSelection::Chosen(ids) => ids.contains(id),
        }
    }
}
