use crate::config::SessionConfig;
use crate::control::interaction::{Click, ClickOutcome, InteractionController};
use crate::control::navigator::OrbitNavigator;
use crate::data::archive::DataSource;
use crate::data::persistence::AnnotationPersistence;
use crate::error::Result;
use crate::render::figure::{Figure, PlotSurface};
use crate::state::boundary::BoundaryType;
use crate::state::region::{OrbitId, Region};

/// Discrete commands from the command bar and the keyboard.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    NextOrbit,
    PrevOrbit,
    NextType,
    PrevType,
    DeleteLast,
    SubmitComment(String),
    Save,
}

/// Everything one annotation session owns: the store, both cursors, the
/// collaborators and the figure handle passed to every draw call.
pub struct Session {
    region: Region,
    navigator: OrbitNavigator,
    controller: InteractionController,
    source: Box<dyn DataSource>,
    persistence: Box<dyn AnnotationPersistence>,
    figure: Figure,
    dirty: bool,
    /// Startup problem worth showing once the window is up.
    notice: Option<String>,
}

impl Session {
    /// Load the stored annotations and show the starting orbit.
    pub fn new(
        source: Box<dyn DataSource>,
        persistence: Box<dyn AnnotationPersistence>,
        orbits: Vec<OrbitId>,
        config: &SessionConfig,
    ) -> Result<Self> {
        let region = persistence.load()?.unwrap_or_default();
        let mut navigator = OrbitNavigator::new(orbits)?;
        if let Some(orbit) = config.start_orbit {
            if let Err(e) = navigator.goto_orbit(orbit) {
                tracing::warn!("Cannot start at orbit {orbit}: {e}");
            }
        }
        let controller = if config.inspect {
            InteractionController::unselected()?
        } else {
            InteractionController::new()?
        };

        let mut session = Self {
            region,
            navigator,
            controller,
            source,
            persistence,
            figure: Figure::new(config.limits),
            dirty: false,
            notice: None,
        };
        // The navigator has already rendered the placeholder, so a broken
        // first orbit is reported rather than fatal.
        if let Err(e) = session.show_current() {
            tracing::error!("Cannot show orbit {}: {e}", session.current_orbit());
            session.notice = Some(e.to_string());
        }
        Ok(session)
    }

    pub fn execute(&mut self, command: Command) -> Result<()> {
        tracing::debug!("Command {command:?}");
        match command {
            Command::NextOrbit => {
                self.navigator.next();
                self.show_current()
            }
            Command::PrevOrbit => {
                self.navigator.prev();
                self.show_current()
            }
            Command::NextType => {
                self.controller.next_type();
                self.retitle();
                Ok(())
            }
            Command::PrevType => {
                self.controller.prev_type();
                self.retitle();
                Ok(())
            }
            Command::DeleteLast => {
                let orbit = self.current_orbit();
                if self
                    .controller
                    .delete_last(orbit, &mut self.region, &mut self.figure)
                    .is_some()
                {
                    self.dirty = true;
                }
                Ok(())
            }
            Command::SubmitComment(text) => {
                let orbit = self.current_orbit();
                if self.region.set_comment(orbit, &text) {
                    tracing::info!("Comment for orbit {orbit} updated");
                    self.dirty = true;
                }
                self.save()
            }
            Command::Save => self.save(),
        }
    }

    pub fn click(&mut self, click: Click) -> ClickOutcome {
        let orbit = self.current_orbit();
        let outcome = self
            .controller
            .handle_click(orbit, click, &mut self.region, &mut self.figure);
        if outcome.mutated_store() {
            self.dirty = true;
        }
        outcome
    }

    pub fn save(&mut self) -> Result<()> {
        self.persistence.save(&self.region)?;
        self.dirty = false;
        Ok(())
    }

    /// Save only when something changed since the last save.
    pub fn save_if_dirty(&mut self) -> Result<bool> {
        if !self.dirty {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    pub fn current_orbit(&self) -> OrbitId {
        self.navigator.current()
    }

    pub fn current_type(&self) -> Option<BoundaryType> {
        self.controller.current_type()
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn navigator(&self) -> &OrbitNavigator {
        &self.navigator
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    pub fn figure_mut(&mut self) -> &mut Figure {
        &mut self.figure
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    fn show_current(&mut self) -> Result<()> {
        let title = self.controller.title(self.current_orbit());
        self.navigator
            .show(self.source.as_ref(), &self.region, title, &mut self.figure)?;
        Ok(())
    }

    fn retitle(&mut self) {
        self.figure.set_title(self.controller.title(self.current_orbit()));
        self.figure.redraw();
    }
}
