use std::path::PathBuf;

use clap::Parser;

use crate::data::instrument::Instrument;
use crate::state::region::OrbitId;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "boundmark")]
#[command(about = "Page through orbit passes and mark plasma boundary crossings")]
pub struct Cli {
    /// Instrument archive (JSON object keyed by orbit number)
    #[arg(long, short)]
    pub data: PathBuf,

    /// Navigable orbit list (JSON array). Defaults to every orbit in the archive.
    #[arg(long)]
    pub orbits: Option<PathBuf>,

    /// Annotation store, created on first save
    #[arg(long, short, default_value = "annotations.json")]
    pub annotations: PathBuf,

    /// Orbit to open first
    #[arg(long)]
    pub orbit: Option<OrbitId>,

    /// Start with no boundary type selected; clicks only place free markers
    #[arg(long)]
    pub inspect: bool,
}

impl Cli {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            start_orbit: self.orbit,
            inspect: self.inspect,
            limits: PanelLimits::default(),
        }
    }
}

/// Fixed y-axis range of each panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLimits {
    pub ima: (f64, f64),
    pub els: (f64, f64),
    pub mag: (f64, f64),
}

impl Default for PanelLimits {
    fn default() -> Self {
        Self {
            ima: (0.0, 96.0),
            els: (0.0, 128.0),
            mag: (-40.0, 40.0),
        }
    }
}

impl PanelLimits {
    pub fn get(&self, instrument: Instrument) -> (f64, f64) {
        match instrument {
            Instrument::Ima => self.ima,
            Instrument::Els => self.els,
            Instrument::Mag => self.mag,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub start_orbit: Option<OrbitId>,
    pub inspect: bool,
    pub limits: PanelLimits,
}
