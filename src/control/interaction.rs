use crate::error::Result;
use crate::render::figure::PlotSurface;
use crate::render::markers::{draw_annotations, Dash, MarkerLine};
use crate::state::boundary::{catalog, BoundaryType};
use crate::state::cursor::Cursor;
use crate::state::region::{OrbitId, Region};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Other,
}

/// Pointer click already converted from screen x to a timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Click {
    pub time: f64,
    pub button: MouseButton,
}

impl Click {
    pub fn new(time: f64, button: MouseButton) -> Self {
        Self { time, button }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// No type selected: a transient line was placed.
    FreeMarker(Dash),
    Added(BoundaryType, f64),
    Removed(BoundaryType, f64),
    /// Right click on an entry that holds no crossings.
    NothingToRemove(BoundaryType),
    /// The entry already holds the maximum number of crossings.
    Rejected(BoundaryType),
    /// Button with no meaning while a type is selected.
    Ignored,
}

impl ClickOutcome {
    pub fn mutated_store(&self) -> bool {
        matches!(self, ClickOutcome::Added(..) | ClickOutcome::Removed(..))
    }
}

/// Resolves clicks into store edits or free markers according to the
/// boundary type cursor.
#[derive(Debug, Clone)]
pub struct InteractionController {
    types: Cursor<BoundaryType>,
}

impl InteractionController {
    /// Type cursor over the canonical catalog, starting at its first entry.
    pub fn new() -> Result<Self> {
        Ok(Self {
            types: Cursor::over(catalog())?,
        })
    }

    /// Type cursor without a mapping: clicks never touch the store.
    pub fn unselected() -> Result<Self> {
        Ok(Self {
            types: Cursor::new(0, BoundaryType::ALL.len())?,
        })
    }

    pub fn current_type(&self) -> Option<BoundaryType> {
        self.types.get_mapping().copied()
    }

    pub fn next_type(&mut self) {
        self.types.increment();
    }

    pub fn prev_type(&mut self) {
        self.types.decrement();
    }

    pub fn title(&self, orbit: OrbitId) -> String {
        let label = self.current_type().map_or("none", |t| t.label());
        format!("Orbit {orbit} ({label})")
    }

    pub fn handle_click(
        &self,
        orbit: OrbitId,
        click: Click,
        region: &mut Region,
        surface: &mut dyn PlotSurface,
    ) -> ClickOutcome {
        surface.erase_markers();

        let outcome = match self.current_type() {
            None => {
                let dash = match click.button {
                    MouseButton::Left => Dash::Dashed,
                    MouseButton::Right => Dash::Solid,
                    MouseButton::Other => Dash::DashDot,
                };
                surface.draw_marker(MarkerLine::free(click.time, dash));
                ClickOutcome::FreeMarker(dash)
            }
            Some(boundary) => match click.button {
                MouseButton::Left => match region.add(orbit, boundary, click.time) {
                    Ok(()) => ClickOutcome::Added(boundary, click.time),
                    Err(e) => {
                        tracing::warn!("{e}");
                        ClickOutcome::Rejected(boundary)
                    }
                },
                MouseButton::Right => match region.remove_last(orbit, boundary) {
                    Some(time) => ClickOutcome::Removed(boundary, time),
                    None => ClickOutcome::NothingToRemove(boundary),
                },
                MouseButton::Other => ClickOutcome::Ignored,
            },
        };
        tracing::debug!("Click at {} on orbit {orbit}: {outcome:?}", click.time);

        draw_annotations(region, orbit, surface);
        surface.redraw();
        outcome
    }

    /// Remove the current type's most recent crossing and redraw the
    /// stored markers. `None` when unselected or nothing was stored.
    pub fn delete_last(
        &self,
        orbit: OrbitId,
        region: &mut Region,
        surface: &mut dyn PlotSurface,
    ) -> Option<f64> {
        let boundary = self.current_type()?;
        let removed = region.remove_last(orbit, boundary);
        surface.erase_markers();
        draw_annotations(region, orbit, surface);
        surface.redraw();
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PanelLimits;
    use crate::render::figure::Figure;
    use crate::render::markers::MarkerKind;
    use crate::state::region::MAX_CROSSINGS;

    fn figure() -> Figure {
        Figure::new(PanelLimits::default())
    }

    #[test]
    fn starts_on_first_canonical_type() {
        let controller = InteractionController::new().unwrap();
        assert_eq!(controller.current_type(), Some(BoundaryType::InboundPreBowShock));
        assert_eq!(controller.title(2996), "Orbit 2996 (inbound pre bow shock)");
    }

    #[test]
    fn type_cursor_wraps_both_ways() {
        let mut controller = InteractionController::new().unwrap();
        controller.prev_type();
        assert_eq!(controller.current_type(), Some(BoundaryType::OutboundPostIcb));
        controller.next_type();
        controller.next_type();
        assert_eq!(controller.current_type(), Some(BoundaryType::InboundPostBowShock));
    }

    #[test]
    fn unselected_clicks_place_one_free_marker() {
        let controller = InteractionController::unselected().unwrap();
        let mut region = Region::new();
        let mut figure = figure();

        let outcome = controller.handle_click(1, Click::new(5.0, MouseButton::Left), &mut region, &mut figure);
        assert_eq!(outcome, ClickOutcome::FreeMarker(Dash::Dashed));
        let outcome = controller.handle_click(1, Click::new(6.0, MouseButton::Right), &mut region, &mut figure);
        assert_eq!(outcome, ClickOutcome::FreeMarker(Dash::Solid));
        let outcome = controller.handle_click(1, Click::new(7.0, MouseButton::Other), &mut region, &mut figure);
        assert_eq!(outcome, ClickOutcome::FreeMarker(Dash::DashDot));

        assert!(region.is_empty());
        assert_eq!(figure.markers, vec![MarkerLine::free(7.0, Dash::DashDot)]);
        assert_eq!(controller.title(1), "Orbit 1 (none)");
    }

    #[test]
    fn unselected_clicks_keep_stored_markers_visible() {
        let controller = InteractionController::unselected().unwrap();
        let mut region = Region::new();
        region.add(1, BoundaryType::OutboundPreIcb, 3.0).unwrap();
        let mut figure = figure();
        controller.handle_click(1, Click::new(5.0, MouseButton::Left), &mut region, &mut figure);
        assert_eq!(figure.markers.len(), 2);
        assert!(figure
            .markers
            .iter()
            .any(|m| m.kind == MarkerKind::Boundary(BoundaryType::OutboundPreIcb)));
    }

    #[test]
    fn selected_clicks_edit_the_store_and_drop_free_markers() {
        let mut controller = InteractionController::new().unwrap();
        controller.next_type();
        let mut region = Region::new();
        let mut figure = figure();
        figure.draw_marker(MarkerLine::free(1.0, Dash::Dashed));

        let outcome = controller.handle_click(9, Click::new(42.0, MouseButton::Left), &mut region, &mut figure);
        assert_eq!(outcome, ClickOutcome::Added(BoundaryType::InboundPostBowShock, 42.0));
        assert!(outcome.mutated_store());
        assert_eq!(figure.markers, vec![MarkerLine::boundary(42.0, BoundaryType::InboundPostBowShock)]);

        let outcome = controller.handle_click(9, Click::new(0.0, MouseButton::Right), &mut region, &mut figure);
        assert_eq!(outcome, ClickOutcome::Removed(BoundaryType::InboundPostBowShock, 42.0));
        assert!(figure.markers.is_empty());
        assert!(region.is_empty());

        let outcome = controller.handle_click(9, Click::new(0.0, MouseButton::Right), &mut region, &mut figure);
        assert_eq!(outcome, ClickOutcome::NothingToRemove(BoundaryType::InboundPostBowShock));
        assert!(!outcome.mutated_store());

        let outcome = controller.handle_click(9, Click::new(0.0, MouseButton::Other), &mut region, &mut figure);
        assert_eq!(outcome, ClickOutcome::Ignored);
    }

    #[test]
    fn fifth_crossing_is_rejected() {
        let controller = InteractionController::new().unwrap();
        let mut region = Region::new();
        let mut figure = figure();
        for i in 0..MAX_CROSSINGS {
            controller.handle_click(3, Click::new(i as f64, MouseButton::Left), &mut region, &mut figure);
        }
        let outcome = controller.handle_click(3, Click::new(99.0, MouseButton::Left), &mut region, &mut figure);
        assert_eq!(outcome, ClickOutcome::Rejected(BoundaryType::InboundPreBowShock));
        assert_eq!(figure.markers.len(), MAX_CROSSINGS);
    }

    #[test]
    fn delete_last_pops_current_type_only() {
        let mut controller = InteractionController::new().unwrap();
        let mut region = Region::new();
        region.add(5, BoundaryType::InboundPreBowShock, 1.0).unwrap();
        region.add(5, BoundaryType::InboundPostBowShock, 2.0).unwrap();
        region.add(5, BoundaryType::InboundPostBowShock, 3.0).unwrap();
        let mut figure = figure();

        controller.next_type();
        assert_eq!(controller.delete_last(5, &mut region, &mut figure), Some(3.0));
        assert_eq!(figure.markers.len(), 2);
        assert_eq!(region.crossings(5, BoundaryType::InboundPreBowShock), &[1.0]);

        let unselected = InteractionController::unselected().unwrap();
        assert_eq!(unselected.delete_last(5, &mut region, &mut figure), None);
    }
}
