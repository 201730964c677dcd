#[cfg(test)]
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;

use crate::data::instrument::OrbitBundle;
use crate::error::{Error, Result};
use crate::state::region::OrbitId;

/// Read-only source of per-orbit instrument bundles.
pub trait DataSource {
    /// Bundle for `orbit`, or `Error::NoSuchOrbit` when the source has none.
    fn fetch(&self, orbit: OrbitId) -> Result<Arc<OrbitBundle>>;

    /// Every orbit the source can serve, ascending.
    fn orbit_ids(&self) -> Vec<OrbitId>;
}

/// Instrument archive held in memory: a JSON object keyed by orbit number.
#[derive(Debug, Default)]
pub struct SpecArchive {
    orbits: BTreeMap<OrbitId, Arc<OrbitBundle>>,
    #[cfg(test)]
    fetches: RefCell<Vec<OrbitId>>,
}

impl SpecArchive {
    pub fn open(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let orbits: BTreeMap<OrbitId, OrbitBundle> =
            serde_json::from_str(&text).map_err(|e| Error::parse(path, e))?;
        tracing::info!("Loaded {} orbits from {:?}", orbits.len(), path);
        Ok(Self::from_bundles(orbits))
    }

    pub fn from_bundles(orbits: impl IntoIterator<Item = (OrbitId, OrbitBundle)>) -> Self {
        Self {
            orbits: orbits
                .into_iter()
                .map(|(id, bundle)| (id, Arc::new(bundle)))
                .collect(),
            #[cfg(test)]
            fetches: RefCell::new(Vec::new()),
        }
    }

    /// Orbit ids requested so far, in request order.
    #[cfg(test)]
    pub fn fetch_log(&self) -> Vec<OrbitId> {
        self.fetches.borrow().clone()
    }
}

impl DataSource for SpecArchive {
    fn fetch(&self, orbit: OrbitId) -> Result<Arc<OrbitBundle>> {
        #[cfg(test)]
        self.fetches.borrow_mut().push(orbit);
        tracing::debug!("Fetching orbit {orbit}");
        self.orbits
            .get(&orbit)
            .cloned()
            .ok_or(Error::NoSuchOrbit(orbit))
    }

    fn orbit_ids(&self) -> Vec<OrbitId> {
        self.orbits.keys().copied().collect()
    }
}

impl<S: DataSource + ?Sized> DataSource for Rc<S> {
    fn fetch(&self, orbit: OrbitId) -> Result<Arc<OrbitBundle>> {
        (**self).fetch(orbit)
    }

    fn orbit_ids(&self) -> Vec<OrbitId> {
        (**self).orbit_ids()
    }
}

/// Load the navigable orbit list (a JSON array of orbit numbers).
/// The result is sorted ascending without duplicates.
pub fn load_orbit_list(path: &Path) -> Result<Vec<OrbitId>> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let orbits: Vec<OrbitId> = serde_json::from_str(&text).map_err(|e| Error::parse(path, e))?;
    Ok(normalize_orbit_list(orbits))
}

pub fn normalize_orbit_list(mut orbits: Vec<OrbitId>) -> Vec<OrbitId> {
    orbits.sort_unstable();
    orbits.dedup();
    orbits
}
