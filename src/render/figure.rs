use std::sync::Arc;

use crate::config::PanelLimits;
use crate::data::instrument::{Instrument, OrbitBundle};
use crate::processing::validity::Validity;
use crate::render::markers::MarkerLine;
use crate::render::plot_interaction::TimeView;
use crate::state::region::OrbitId;

/// What the three stacked panels currently show.
#[derive(Debug, Clone, Default)]
pub enum FigureContent {
    #[default]
    Empty,
    /// Orbit selected but nothing drawable: fetch failed or every panel invalid.
    NoData { orbit: OrbitId },
    Orbit {
        orbit: OrbitId,
        bundle: Arc<OrbitBundle>,
        validity: Validity,
    },
}

impl FigureContent {
    pub fn orbit(&self) -> Option<OrbitId> {
        match self {
            FigureContent::Empty => None,
            FigureContent::NoData { orbit } | FigureContent::Orbit { orbit, .. } => Some(*orbit),
        }
    }

    /// Union of the time ranges of the drawable instruments.
    pub fn time_span(&self) -> Option<(f64, f64)> {
        let FigureContent::Orbit {
            bundle, validity, ..
        } = self
        else {
            return None;
        };
        Instrument::ALL
            .iter()
            .filter(|i| validity.get(**i))
            .filter_map(|i| bundle.series(*i).and_then(|s| s.time_range()))
            .reduce(|(a0, a1), (b0, b1)| (a0.min(b0), a1.max(b1)))
    }
}

/// Drawing capability the controllers talk to. Every render and marker call
/// goes through an explicit handle owned by the session.
pub trait PlotSurface {
    /// Replace the panel contents and reset the time axis.
    fn render(&mut self, content: FigureContent);

    /// Add a vertical line spanning all three panels.
    fn draw_marker(&mut self, marker: MarkerLine);

    /// Remove every marker currently drawn. Returns how many there were.
    fn erase_markers(&mut self) -> usize;

    fn set_title(&mut self, title: String);

    /// Ask for the overlay to be repainted before the next event.
    fn redraw(&mut self);
}

/// Retained figure state painted each frame by the orbit panel.
#[derive(Debug, Clone)]
pub struct Figure {
    pub title: String,
    pub content: FigureContent,
    pub markers: Vec<MarkerLine>,
    pub view: TimeView,
    pub limits: PanelLimits,
    /// Screen rect of the last painted frame, used to crop exports.
    pub frame_rect: Option<egui::Rect>,
    redraw_pending: bool,
}

impl Figure {
    pub fn new(limits: PanelLimits) -> Self {
        Self {
            title: String::new(),
            content: FigureContent::Empty,
            markers: Vec::new(),
            view: TimeView::default(),
            limits,
            frame_rect: None,
            redraw_pending: false,
        }
    }

    /// Consume a pending redraw request.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_pending)
    }

    #[cfg(test)]
    pub fn free_marker(&self) -> Option<&MarkerLine> {
        self.markers.iter().find(|m| m.is_free())
    }

    pub fn has_data(&self) -> bool {
        matches!(self.content, FigureContent::Orbit { .. })
    }
}

impl PlotSurface for Figure {
    fn render(&mut self, content: FigureContent) {
        self.view.reset(content.time_span());
        self.content = content;
    }

    fn draw_marker(&mut self, marker: MarkerLine) {
        self.markers.push(marker);
    }

    fn erase_markers(&mut self) -> usize {
        let erased = self.markers.len();
        self.markers.clear();
        erased
    }

    fn set_title(&mut self, title: String) {
        self.title = title;
    }

    fn redraw(&mut self) {
        self.redraw_pending = true;
    }
}
