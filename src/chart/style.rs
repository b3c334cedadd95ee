//! Fixed line-chart presentation for dataset series.
//!
//! Every dataset shares one style table; only the colors that point at the
//! palette differ, and those are picked by dataset position.

use serde::{Deserialize, Serialize};

/// Series colors in assignment order: green, blue, purple, grey, red,
/// orange, yellow.
pub const PALETTE: [&str; 7] = [
    "rgb(75, 192, 192)",
    "rgb(54, 162, 235)",
    "rgb(153, 102, 255)",
    "rgb(231,233,237)",
    "rgb(255, 99, 132)",
    "rgb(255, 159, 64)",
    "rgb(255, 205, 86)",
];

/// Palette color for the dataset at `index`. Wraps past the last entry.
pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Where a style color comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// The series color for the dataset's position
    Series,
    Fixed(&'static str),
}

impl Color {
    fn resolve(self, index: usize) -> String {
        match self {
            Color::Series => palette_color(index).to_string(),
            Color::Fixed(value) => value.to_string(),
        }
    }
}

/// Declarative style definition shared by every dataset.
#[derive(Debug, Clone, Copy)]
pub struct StyleTable {
    pub fill: bool,
    pub line_tension: f64,
    pub background_color: Color,
    pub border_color: Color,
    pub border_cap_style: &'static str,
    pub border_dash_offset: f64,
    pub border_join_style: &'static str,
    pub point_border_color: Color,
    pub point_background_color: Color,
    pub point_border_width: u32,
    pub point_hover_radius: u32,
    pub point_hover_background_color: Color,
    pub point_hover_border_width: u32,
    pub point_hover_border_color: Color,
    pub point_radius: u32,
    pub point_hit_radius: u32,
}

pub const LINE_STYLE: StyleTable = StyleTable {
    fill: false,
    line_tension: 0.1,
    background_color: Color::Series,
    border_color: Color::Series,
    border_cap_style: "butt",
    border_dash_offset: 0.0,
    border_join_style: "miter",
    point_border_color: Color::Series,
    point_background_color: Color::Fixed("#fff"),
    point_border_width: 1,
    point_hover_radius: 5,
    point_hover_background_color: Color::Series,
    point_hover_border_width: 2,
    point_hover_border_color: Color::Fixed("rgba(220,220,220,1)"),
    point_radius: 1,
    point_hit_radius: 10,
};

impl StyleTable {
    /// Concrete style for the dataset at `index`.
    pub fn resolve(&self, index: usize) -> DatasetStyle {
        DatasetStyle {
            fill: self.fill,
            line_tension: self.line_tension,
            background_color: self.background_color.resolve(index),
            border_color: self.border_color.resolve(index),
            border_cap_style: self.border_cap_style.to_string(),
            border_dash: Vec::new(),
            border_dash_offset: self.border_dash_offset,
            border_join_style: self.border_join_style.to_string(),
            point_border_color: self.point_border_color.resolve(index),
            point_background_color: self.point_background_color.resolve(index),
            point_border_width: self.point_border_width,
            point_hover_radius: self.point_hover_radius,
            point_hover_background_color: self.point_hover_background_color.resolve(index),
            point_hover_border_width: self.point_hover_border_width,
            point_hover_border_color: self.point_hover_border_color.resolve(index),
            point_radius: self.point_radius,
            point_hit_radius: self.point_hit_radius,
        }
    }
}

/// Serialized presentation attributes of one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetStyle {
    pub fill: bool,
    pub line_tension: f64,
    pub background_color: String,
    pub border_color: String,
    pub border_cap_style: String,
    pub border_dash: Vec<String>,
    pub border_dash_offset: f64,
    pub border_join_style: String,
    pub point_border_color: String,
    pub point_background_color: String,
    pub point_border_width: u32,
    pub point_hover_radius: u32,
    pub point_hover_background_color: String,
    pub point_hover_border_width: u32,
    pub point_hover_border_color: String,
    pub point_radius: u32,
    pub point_hit_radius: u32,
}
