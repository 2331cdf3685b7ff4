//! Chart specification types
//!
//! Serializes to the figure JSON that plotly.js draws (`{data, layout}`).
//! Only the attributes the dashboard sets are modelled.

use serde::Serialize;

/// Plotly's default qualitative palette
pub const PALETTE: [&str; 10] = [
    "#636efa", "#EF553B", "#00cc96", "#ab63fa", "#FFA15A", "#19d3f3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

/// Color for the n-th series
pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Format used for x values; plotly parses it as a date axis
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A complete figure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl ChartSpec {
    pub fn new(layout: Layout) -> Self {
        Self {
            data: Vec::new(),
            layout,
        }
    }

    /// Line traces, in drawing order
    pub fn lines(&self) -> impl Iterator<Item = &LineTrace> {
        self.data.iter().filter_map(|t| match t {
            Trace::Scatter(line) => Some(line),
            _ => None,
        })
    }

    /// Map traces, in drawing order
    pub fn markers(&self) -> impl Iterator<Item = &MapTrace> {
        self.data.iter().filter_map(|t| match t {
            Trace::Scattermapbox(map) => Some(map),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter(LineTrace),
    Scattermapbox(MapTrace),
}

/// One line of a time-series chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineTrace {
    pub name: String,
    pub mode: &'static str,
    pub legendgroup: String,
    pub x: Vec<String>,
    pub y: Vec<Option<f64>>,
    pub line: LineStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: &'static str,
}

/// One group of site markers on the map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapTrace {
    pub name: String,
    pub mode: &'static str,
    pub legendgroup: String,
    pub lat: Vec<Option<f64>>,
    pub lon: Vec<Option<f64>>,
    pub hovertext: Vec<String>,
    pub marker: Marker,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Text,
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapbox: Option<Mapbox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<LayoutMeta>,
}

impl Layout {
    pub fn titled(title: impl Into<String>, height: u32) -> Self {
        Self {
            title: Text::new(title),
            height,
            legend: None,
            xaxis: None,
            yaxis: None,
            mapbox: None,
            meta: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    pub text: String,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    /// "h" or "v"
    pub orientation: &'static str,
    pub title: Text,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Text,
}

impl Axis {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Text::new(title),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mapbox {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accesstoken: Option<String>,
    pub style: &'static str,
    pub center: LatLon,
    pub zoom: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

/// Dashboard-specific annotations carried in `layout.meta`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutMeta {
    /// Every distinct unit among the plotted rows, when more than one
    pub units: Vec<String>,
}
