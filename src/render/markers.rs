use egui::Color32;

use crate::render::figure::PlotSurface;
use crate::render::theme::Theme;
use crate::state::boundary::BoundaryType;
use crate::state::region::{OrbitId, Region};

/// Line pattern of a vertical marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dash {
    Solid,
    Dashed,
    DashDot,
}

impl Dash {
    /// Repeating (drawn, gap) lengths in points. Empty means one solid stroke.
    fn pattern(&self) -> &'static [(f32, f32)] {
        match self {
            Dash::Solid => &[],
            Dash::Dashed => &[(7.0, 4.0)],
            Dash::DashDot => &[(7.0, 3.0), (1.5, 3.0)],
        }
    }
}

/// One of the 8 fixed boundary marker styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerStyle {
    pub color: [u8; 3],
    pub dash: Dash,
}

const MAGENTA: [u8; 3] = [255, 0, 255];
const GREEN: [u8; 3] = [0, 160, 0];
const CYAN: [u8; 3] = [0, 200, 220];
const YELLOW: [u8; 3] = [230, 200, 0];

/// Indexed by canonical boundary position: each colour pairs a dashed "pre"
/// line with a solid "post" line.
pub const BOUNDARY_STYLES: [MarkerStyle; 8] = [
    MarkerStyle { color: MAGENTA, dash: Dash::Dashed },
    MarkerStyle { color: MAGENTA, dash: Dash::Solid },
    MarkerStyle { color: GREEN, dash: Dash::Dashed },
    MarkerStyle { color: GREEN, dash: Dash::Solid },
    MarkerStyle { color: CYAN, dash: Dash::Dashed },
    MarkerStyle { color: CYAN, dash: Dash::Solid },
    MarkerStyle { color: YELLOW, dash: Dash::Dashed },
    MarkerStyle { color: YELLOW, dash: Dash::Solid },
];

pub fn boundary_style(boundary: BoundaryType) -> MarkerStyle {
    BOUNDARY_STYLES[boundary.index() % BOUNDARY_STYLES.len()]
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarkerKind {
    /// Unlabelled inspection line, not persisted.
    Free(Dash),
    /// A stored crossing.
    Boundary(BoundaryType),
}

/// Vertical line spanning all three panels at `time`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerLine {
    pub time: f64,
    pub kind: MarkerKind,
}

impl MarkerLine {
    pub fn free(time: f64, dash: Dash) -> Self {
        Self {
            time,
            kind: MarkerKind::Free(dash),
        }
    }

    pub fn boundary(time: f64, boundary: BoundaryType) -> Self {
        Self {
            time,
            kind: MarkerKind::Boundary(boundary),
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self.kind, MarkerKind::Free(_))
    }

    pub fn appearance(&self, theme: &Theme) -> (Color32, Dash) {
        match self.kind {
            MarkerKind::Free(dash) => (theme.foreground(), dash),
            MarkerKind::Boundary(boundary) => {
                let style = boundary_style(boundary);
                let [r, g, b] = style.color;
                (Color32::from_rgb(r, g, b), style.dash)
            }
        }
    }
}

/// Draw every stored crossing of `orbit`. Returns how many were drawn.
pub fn draw_annotations(region: &Region, orbit: OrbitId, surface: &mut dyn PlotSurface) -> usize {
    let mut drawn = 0;
    for (time, boundary) in region.entries_for(orbit) {
        surface.draw_marker(MarkerLine::boundary(time, boundary));
        drawn += 1;
    }
    drawn
}

/// Split a vertical run from `top` to `bottom` into the drawn pieces of `dash`.
pub fn dash_segments(top: f32, bottom: f32, dash: Dash) -> Vec<(f32, f32)> {
    let pattern = dash.pattern();
    if pattern.is_empty() || bottom <= top {
        return vec![(top, bottom)];
    }
    let mut pieces = Vec::new();
    let mut y = top;
    'outer: loop {
        for &(on, off) in pattern {
            if y >= bottom {
                break 'outer;
            }
            pieces.push((y, (y + on).min(bottom)));
            y += on + off;
        }
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styles_pair_dashed_and_solid_per_colour() {
        for pair in BOUNDARY_STYLES.chunks(2) {
            assert_eq!(pair[0].color, pair[1].color);
            assert_eq!(pair[0].dash, Dash::Dashed);
            assert_eq!(pair[1].dash, Dash::Solid);
        }
        assert_eq!(boundary_style(BoundaryType::InboundPreBowShock), BOUNDARY_STYLES[0]);
        assert_eq!(boundary_style(BoundaryType::OutboundPostIcb), BOUNDARY_STYLES[7]);
    }

    #[test]
    fn solid_is_one_piece() {
        assert_eq!(dash_segments(0.0, 50.0, Dash::Solid), vec![(0.0, 50.0)]);
    }

    #[test]
    fn dashed_pieces_stay_inside_the_run() {
        let pieces = dash_segments(10.0, 40.0, Dash::Dashed);
        assert_eq!(pieces, vec![(10.0, 17.0), (21.0, 28.0), (32.0, 39.0)]);
    }

    #[test]
    fn dash_dot_alternates_lengths() {
        let pieces = dash_segments(0.0, 20.0, Dash::DashDot);
        assert_eq!(pieces[0], (0.0, 7.0));
        assert_eq!(pieces[1], (10.0, 11.5));
        assert_eq!(pieces[2], (14.5, 20.0));
    }

    #[test]
    fn free_markers_follow_the_theme() {
        let marker = MarkerLine::free(5.0, Dash::DashDot);
        assert_eq!(marker.appearance(&Theme::Light), (Color32::BLACK, Dash::DashDot));
        assert!(marker.is_free());
    }
}
