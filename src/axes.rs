use crate::models::{AxisKind, MetricType};
use serde::Serialize;

pub const UNIT_HEIGHT: u32 = 28;
pub const MIN_PLOT_HEIGHT: u32 = 260;

const NUMERIC_WEIGHT: u32 = 10;
const BINARY_WEIGHT: u32 = 1;
const NOTES_WEIGHT: u32 = 1;

pub const NUMERIC_MIN: f64 = 0.0;
pub const NUMERIC_MAX: f64 = 10.0;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AxisDef {
    pub id: String,
    pub weight: u32,
    pub offset: u32,
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AxisLayout {
    pub total_height: u32,
    pub axes: Vec<AxisDef>,
}

impl Default for AxisLayout {
    fn default() -> Self {
        Self {
            total_height: MIN_PLOT_HEIGHT,
            axes: Vec::new(),
        }
    }
}

struct AxisSlot {
    id: String,
    weight: u32,
    scale: Option<(f64, f64)>,
    labels: Option<Vec<String>>,
}

// Axes stack top to bottom: the shared numeric scale, then one band per
// binary metric in catalog order, then notes. Axis presence follows the
// full catalog, not the current selection.
pub fn layout_axes(catalog: &[MetricType]) -> AxisLayout {
    let has_numeric = catalog.iter().any(|t| t.axis == AxisKind::Numeric);
    let has_notes = catalog.iter().any(|t| t.axis == AxisKind::Notes);
    let mut binary_slugs: Vec<&str> = Vec::new();
    for entry in catalog {
        if let AxisKind::Binary { slug } = &entry.axis {
            if !binary_slugs.contains(&slug.as_str()) {
                binary_slugs.push(slug);
            }
        }
    }

    let mut slots = Vec::new();
    if has_numeric {
        slots.push(AxisSlot {
            id: "y".to_string(),
            weight: NUMERIC_WEIGHT,
            scale: Some((NUMERIC_MIN, NUMERIC_MAX)),
            labels: None,
        });
    }
    let stacked = binary_slugs.len() > 1;
    for (ordinal, slug) in binary_slugs.iter().enumerate() {
        let labels = if stacked {
            vec![
                format!("yes ({})", ordinal + 1),
                format!("no ({})", ordinal + 1),
            ]
        } else {
            vec!["yes".to_string(), "no".to_string()]
        };
        slots.push(AxisSlot {
            id: format!("binary:{slug}"),
            weight: BINARY_WEIGHT,
            scale: None,
            labels: Some(labels),
        });
    }
    if has_notes {
        slots.push(AxisSlot {
            id: "notes".to_string(),
            weight: NOTES_WEIGHT,
            scale: None,
            labels: Some(vec!["notes".to_string()]),
        });
    }

    let weight_sum: u32 = slots.iter().map(|slot| slot.weight).sum();
    if weight_sum == 0 {
        return AxisLayout::default();
    }

    let total_height = MIN_PLOT_HEIGHT.max(weight_sum * UNIT_HEIGHT);
    let mut axes = Vec::with_capacity(slots.len());
    let mut offset = 0;
    let last = slots.len() - 1;
    for (index, slot) in slots.into_iter().enumerate() {
        // The last band absorbs the integer-division remainder.
        let height = if index == last {
            total_height - offset
        } else {
            total_height * slot.weight / weight_sum
        };
        axes.push(AxisDef {
            id: slot.id,
            weight: slot.weight,
            offset,
            height,
            min: slot.scale.map(|(min, _)| min),
            max: slot.scale.map(|(_, max)| max),
            labels: slot.labels,
        });
        offset += height;
    }

    AxisLayout { total_height, axes }
}
