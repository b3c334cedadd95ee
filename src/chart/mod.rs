//! Chart projection of stored records.
//!
//! [`build_chart`] turns the record history into a line-chart payload: one
//! label per record (its `startedAt`) and one styled dataset per plotted
//! feature. The projection is pure and recomputed on every read.

use serde::{Deserialize, Serialize};

use crate::store::FeatureRecord;

pub mod style;

pub use style::{palette_color, DatasetStyle, StyleTable, LINE_STYLE, PALETTE};

/// Feature plotted as one dataset series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartField {
    F0,
    Rms,
    Centroid,
}

impl ChartField {
    /// Plotted fields in dataset order. Order fixes each series' color.
    pub const ALL: [ChartField; 3] = [ChartField::F0, ChartField::Rms, ChartField::Centroid];

    pub fn label(self) -> &'static str {
        match self {
            ChartField::F0 => "f0",
            ChartField::Rms => "rms",
            ChartField::Centroid => "centroid",
        }
    }

    pub fn value(self, record: &FeatureRecord) -> f64 {
        match self {
            ChartField::F0 => record.f0,
            ChartField::Rms => record.rms,
            ChartField::Centroid => record.centroid,
        }
    }
}

/// One series: field name, presentation, and values aligned with the labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    #[serde(flatten)]
    pub style: DatasetStyle,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDescription {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartDescription {
    /// Styled datasets for `fields` with no data points yet.
    pub fn empty(fields: &[ChartField]) -> Self {
        let datasets = fields
            .iter()
            .enumerate()
            .map(|(index, field)| Dataset {
                label: field.label().to_string(),
                style: LINE_STYLE.resolve(index),
                data: Vec::new(),
            })
            .collect();

        Self {
            labels: Vec::new(),
            datasets,
        }
    }

    fn push_record(&mut self, fields: &[ChartField], record: &FeatureRecord) {
        self.labels.push(record.started_at.clone());
        for (dataset, field) in self.datasets.iter_mut().zip(fields) {
            dataset.data.push(field.value(record));
        }
    }
}

/// Project `records` onto the standard `f0`, `rms`, `centroid` chart.
pub fn build_chart(records: &[FeatureRecord]) -> ChartDescription {
    build_chart_with_fields(&ChartField::ALL, records)
}

pub fn build_chart_with_fields(
    fields: &[ChartField],
    records: &[FeatureRecord],
) -> ChartDescription {
    let mut chart = ChartDescription::empty(fields);
    chart.labels.reserve(records.len());
    for dataset in &mut chart.datasets {
        dataset.data.reserve(records.len());
    }

    for record in records {
        chart.push_record(fields, record);
    }
    chart
}
