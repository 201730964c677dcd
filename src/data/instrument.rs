use serde::{Deserialize, Serialize};

use crate::data::datetime::deserialize_timestamps;

/// The three fixed sensors flown on every orbit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instrument {
    /// Ion mass analyser (heatmap).
    Ima,
    /// Electron spectrometer (heatmap).
    Els,
    /// Magnetometer (three-axis lines).
    Mag,
}

impl Instrument {
    /// Top-to-bottom panel order.
    pub const ALL: [Instrument; 3] = [Instrument::Ima, Instrument::Els, Instrument::Mag];

    pub fn short_name(&self) -> &'static str {
        match self {
            Instrument::Ima => "IMA",
            Instrument::Els => "ELS",
            Instrument::Mag => "MAG",
        }
    }

    pub fn panel_index(&self) -> usize {
        *self as usize
    }
}

/// Channel × time counts stored row-major: `values[row * cols + col]`,
/// one row per energy/mass channel, one column per timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spectrogram {
    pub rows: usize,
    pub cols: usize,
    pub values: Vec<f64>,
}

impl Spectrogram {
    pub fn new(rows: usize, cols: usize, values: Vec<f64>) -> Self {
        Self { rows, cols, values }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.values.get(row * self.cols + col).copied()
    }
}

/// Three-axis vector field samples, one per timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl VectorSeries {
    pub fn is_empty(&self) -> bool {
        self.x.is_empty() && self.y.is_empty() && self.z.is_empty()
    }

    pub fn axes(&self) -> [&[f64]; 3] {
        [&self.x, &self.y, &self.z]
    }

    pub fn magnitude(&self) -> Vec<f64> {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.z)
            .map(|((x, y), z)| (x * x + y * y + z * z).sqrt())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeriesData {
    Spectrogram(Spectrogram),
    Vector(VectorSeries),
}

/// One instrument's samples for one orbit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentSeries {
    #[serde(deserialize_with = "deserialize_timestamps")]
    pub timestamps: Vec<f64>,
    pub data: SeriesData,
}

impl InstrumentSeries {
    pub fn spectrogram(timestamps: Vec<f64>, spec: Spectrogram) -> Self {
        Self {
            timestamps,
            data: SeriesData::Spectrogram(spec),
        }
    }

    pub fn vector(timestamps: Vec<f64>, field: VectorSeries) -> Self {
        Self {
            timestamps,
            data: SeriesData::Vector(field),
        }
    }

    /// First and last finite timestamps.
    pub fn time_range(&self) -> Option<(f64, f64)> {
        let first = self.timestamps.iter().copied().find(|t| t.is_finite())?;
        let last = self.timestamps.iter().rev().copied().find(|t| t.is_finite())?;
        Some((first.min(last), first.max(last)))
    }
}

/// Everything the archive holds for one orbit. Any instrument may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrbitBundle {
    #[serde(default, rename = "IMA", skip_serializing_if = "Option::is_none")]
    pub ima: Option<InstrumentSeries>,
    #[serde(default, rename = "ELS", skip_serializing_if = "Option::is_none")]
    pub els: Option<InstrumentSeries>,
    #[serde(default, rename = "MAG", skip_serializing_if = "Option::is_none")]
    pub mag: Option<InstrumentSeries>,
}

impl OrbitBundle {
    pub fn series(&self, instrument: Instrument) -> Option<&InstrumentSeries> {
        match instrument {
            Instrument::Ima => self.ima.as_ref(),
            Instrument::Els => self.els.as_ref(),
            Instrument::Mag => self.mag.as_ref(),
        }
    }

    pub fn with(mut self, instrument: Instrument, series: InstrumentSeries) -> Self {
        match instrument {
            Instrument::Ima => self.ima = Some(series),
            Instrument::Els => self.els = Some(series),
            Instrument::Mag => self.mag = Some(series),
        }
        self
    }
}
