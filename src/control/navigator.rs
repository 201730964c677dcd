use crate::data::archive::{normalize_orbit_list, DataSource};
use crate::error::{Error, Result};
use crate::processing::validity::{check_validity, Validity};
use crate::render::figure::{FigureContent, PlotSurface};
use crate::render::markers::draw_annotations;
use crate::state::cursor::Cursor;
use crate::state::region::{OrbitId, Region};

/// Current-orbit cursor plus the fetch → validate → render sequence that
/// follows every move.
#[derive(Debug, Clone)]
pub struct OrbitNavigator {
    cursor: Cursor<OrbitId>,
}

impl OrbitNavigator {
    /// Orbits are sorted and deduplicated. An empty list is an `EmptyRange` error.
    pub fn new(orbits: Vec<OrbitId>) -> Result<Self> {
        Ok(Self {
            cursor: Cursor::over(normalize_orbit_list(orbits))?,
        })
    }

    pub fn current(&self) -> OrbitId {
        // The mapping is attached in `new` and covers every position.
        self.cursor.get_mapping().copied().unwrap_or_default()
    }

    pub fn position(&self) -> usize {
        self.cursor.get()
    }

    pub fn orbits(&self) -> &[OrbitId] {
        self.cursor.labels()
    }

    pub fn goto_index(&mut self, index: usize) -> Result<()> {
        self.cursor.set(index)
    }

    /// Position the cursor on `orbit`; `NoSuchOrbit` when it is not in the list.
    pub fn goto_orbit(&mut self, orbit: OrbitId) -> Result<()> {
        let index = self
            .cursor
            .position_of(&orbit)
            .ok_or(Error::NoSuchOrbit(orbit))?;
        self.cursor.set(index)
    }

    pub fn next(&mut self) {
        self.cursor.increment();
    }

    pub fn prev(&mut self) {
        self.cursor.decrement();
    }

    /// Fetch the current orbit, render whatever is drawable, redraw its
    /// stored crossings and retitle the figure.
    ///
    /// An orbit the source does not have renders as "no data" and is not an
    /// error. Any other fetch failure also leaves a "no data" figure behind
    /// but is returned so the caller can report it.
    pub fn show(
        &self,
        source: &dyn DataSource,
        region: &Region,
        title: String,
        surface: &mut dyn PlotSurface,
    ) -> Result<Validity> {
        let orbit = self.current();
        let fetched = source.fetch(orbit);

        let (content, validity, failure) = match fetched {
            Ok(bundle) => {
                let validity = check_validity(&bundle);
                tracing::info!(
                    "Orbit {orbit}: {} of 3 panels drawable",
                    validity.count()
                );
                let content = if validity.any() {
                    FigureContent::Orbit {
                        orbit,
                        bundle,
                        validity,
                    }
                } else {
                    FigureContent::NoData { orbit }
                };
                (content, validity, None)
            }
            Err(e) if e.is_absence() => {
                tracing::warn!("{e}");
                (FigureContent::NoData { orbit }, Validity::default(), None)
            }
            Err(e) => {
                tracing::error!("Fetching orbit {orbit} failed: {e}");
                (FigureContent::NoData { orbit }, Validity::default(), Some(e))
            }
        };

        surface.render(content);
        surface.erase_markers();
        draw_annotations(region, orbit, surface);
        surface.set_title(title);
        surface.redraw();

        match failure {
            Some(e) => Err(e),
            None => Ok(validity),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::PanelLimits;
    use crate::data::archive::SpecArchive;
    use crate::data::instrument::{Instrument, InstrumentSeries, OrbitBundle, VectorSeries};
    use crate::render::figure::Figure;
    use crate::state::boundary::BoundaryType;

    struct Broken;

    impl DataSource for Broken {
        fn fetch(&self, orbit: OrbitId) -> Result<Arc<OrbitBundle>> {
            Err(Error::io(
                format!("orbit-{orbit}.json"),
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            ))
        }

        fn orbit_ids(&self) -> Vec<OrbitId> {
            Vec::new()
        }
    }

    fn mag_bundle() -> OrbitBundle {
        OrbitBundle::default().with(
            Instrument::Mag,
            InstrumentSeries::vector(
                vec![10.0, 20.0, 30.0],
                VectorSeries {
                    x: vec![1.0, 2.0, 3.0],
                    y: vec![0.0; 3],
                    z: vec![0.0; 3],
                },
            ),
        )
    }

    #[test]
    fn orbits_are_sorted_and_cursor_wraps() {
        let mut nav = OrbitNavigator::new(vec![3010, 2001, 2996]).unwrap();
        assert_eq!(nav.orbits(), &[2001, 2996, 3010]);
        assert_eq!(nav.current(), 2001);
        nav.prev();
        assert_eq!(nav.current(), 3010);
        nav.next();
        nav.next();
        assert_eq!(nav.current(), 2996);
    }

    #[test]
    fn empty_orbit_list_is_rejected() {
        assert!(matches!(
            OrbitNavigator::new(Vec::new()),
            Err(Error::EmptyRange { .. })
        ));
    }

    #[test]
    fn goto_orbit_by_number() {
        let mut nav = OrbitNavigator::new(vec![2001, 2996, 3010]).unwrap();
        nav.goto_orbit(3010).unwrap();
        assert_eq!(nav.position(), 2);
        assert!(matches!(nav.goto_orbit(4000), Err(Error::NoSuchOrbit(4000))));
        assert_eq!(nav.current(), 3010);
        assert!(matches!(nav.goto_index(3), Err(Error::OutOfRange { .. })));
    }

    #[test]
    fn show_renders_valid_orbit_with_its_markers() {
        let archive = SpecArchive::from_bundles([(2996, mag_bundle())]);
        let mut region = Region::new();
        region.add(2996, BoundaryType::InboundPreIcb, 15.0).unwrap();
        region.add(2001, BoundaryType::InboundPreIcb, 99.0).unwrap();

        let mut nav = OrbitNavigator::new(vec![2001, 2996]).unwrap();
        nav.goto_orbit(2996).unwrap();
        let mut figure = Figure::new(PanelLimits::default());
        let validity = nav
            .show(&archive, &region, "Orbit 2996 (x)".into(), &mut figure)
            .unwrap();

        assert!(validity.mag && !validity.ima);
        assert!(figure.has_data());
        assert_eq!(figure.markers.len(), 1);
        assert_eq!(figure.markers[0].time, 15.0);
        assert_eq!(figure.title, "Orbit 2996 (x)");
        assert!(figure.take_redraw());
    }

    #[test]
    fn absent_orbit_renders_placeholder_without_error() {
        let archive = SpecArchive::from_bundles([(2996, mag_bundle())]);
        let nav = OrbitNavigator::new(vec![2001, 2996]).unwrap();
        let mut figure = Figure::new(PanelLimits::default());
        let validity = nav
            .show(&archive, &Region::new(), "t".into(), &mut figure)
            .unwrap();
        assert!(!validity.any());
        assert!(matches!(figure.content, FigureContent::NoData { orbit: 2001 }));
        assert!(!figure.view.has_axis());
    }

    #[test]
    fn genuine_fetch_failures_are_returned_after_placeholder() {
        let nav = OrbitNavigator::new(vec![7]).unwrap();
        let mut figure = Figure::new(PanelLimits::default());
        let err = nav
            .show(&Broken, &Region::new(), "t".into(), &mut figure)
            .unwrap_err();
        assert!(!err.is_absence());
        assert!(matches!(figure.content, FigureContent::NoData { orbit: 7 }));
    }
}
