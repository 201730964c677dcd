use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::state::boundary::BoundaryType;

pub type OrbitId = u32;

/// Crossings expected per boundary type and orbit. `add` refuses a fifth.
pub const MAX_CROSSINGS: usize = 4;

/// Qualitative confidence attached to a boundary entry. Nothing in the
/// interactive flow writes it; it arrives with imported annotation files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossingFlag {
    Clear,
    Uncertain,
    Ambiguous,
}

impl CrossingFlag {
    pub fn label(&self) -> &'static str {
        match self {
            CrossingFlag::Clear => "clear",
            CrossingFlag::Uncertain => "uncertain",
            CrossingFlag::Ambiguous => "ambiguous",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundaryEntry {
    /// Unix seconds, most recent last.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub crossings: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<CrossingFlag>,
}

impl BoundaryEntry {
    pub fn is_empty(&self) -> bool {
        self.crossings.is_empty() && self.flag.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrbitAnnotations {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub boundaries: BTreeMap<BoundaryType, BoundaryEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl OrbitAnnotations {
    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty() && self.comment.is_none()
    }
}

/// Annotation store: orbit → boundary type → crossings, plus one comment per
/// orbit. Empty entries and orbits are pruned on every mutation, so whatever
/// is present is worth persisting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Region {
    orbits: BTreeMap<OrbitId, OrbitAnnotations>,
}

impl Region {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a crossing time onto the (orbit, type) stack.
    pub fn add(&mut self, orbit: OrbitId, boundary: BoundaryType, time: f64) -> Result<()> {
        let entry = self
            .orbits
            .entry(orbit)
            .or_default()
            .boundaries
            .entry(boundary)
            .or_default();
        if entry.crossings.len() >= MAX_CROSSINGS {
            return Err(Error::EntryFull {
                orbit,
                label: boundary.label(),
                limit: MAX_CROSSINGS,
            });
        }
        entry.crossings.push(time);
        Ok(())
    }

    /// Pop the most recent crossing. `None` when there was nothing to remove.
    pub fn remove_last(&mut self, orbit: OrbitId, boundary: BoundaryType) -> Option<f64> {
        let annotations = self.orbits.get_mut(&orbit)?;
        let entry = annotations.boundaries.get_mut(&boundary)?;
        let removed = entry.crossings.pop();
        if entry.is_empty() {
            annotations.boundaries.remove(&boundary);
        }
        self.prune(orbit);
        removed
    }

    /// Replace the orbit's comment with `text` as given. Blank text clears it.
    /// Returns whether the stored comment changed.
    pub fn set_comment(&mut self, orbit: OrbitId, text: &str) -> bool {
        if text.trim().is_empty() {
            let changed = self
                .orbits
                .get_mut(&orbit)
                .and_then(|a| a.comment.take())
                .is_some();
            self.prune(orbit);
            return changed;
        }
        let annotations = self.orbits.entry(orbit).or_default();
        if annotations.comment.as_deref() == Some(text) {
            return false;
        }
        annotations.comment = Some(text.to_string());
        true
    }

    pub fn set_flag(&mut self, orbit: OrbitId, boundary: BoundaryType, flag: Option<CrossingFlag>) {
        match flag {
            Some(flag) => {
                self.orbits
                    .entry(orbit)
                    .or_default()
                    .boundaries
                    .entry(boundary)
                    .or_default()
                    .flag = Some(flag);
            }
            None => {
                if let Some(annotations) = self.orbits.get_mut(&orbit) {
                    if let Some(entry) = annotations.boundaries.get_mut(&boundary) {
                        entry.flag = None;
                        if entry.is_empty() {
                            annotations.boundaries.remove(&boundary);
                        }
                    }
                }
                self.prune(orbit);
            }
        }
    }

    /// Every stored crossing of the orbit as `(time, type)`, grouped by type in
    /// canonical order, each type's crossings in insertion order.
    pub fn entries_for(&self, orbit: OrbitId) -> impl Iterator<Item = (f64, BoundaryType)> + '_ {
        self.orbits
            .get(&orbit)
            .into_iter()
            .flat_map(|a| a.boundaries.iter())
            .flat_map(|(&boundary, entry)| entry.crossings.iter().map(move |&t| (t, boundary)))
    }

    pub fn crossings(&self, orbit: OrbitId, boundary: BoundaryType) -> &[f64] {
        self.orbits
            .get(&orbit)
            .and_then(|a| a.boundaries.get(&boundary))
            .map(|e| e.crossings.as_slice())
            .unwrap_or(&[])
    }

    pub fn flag(&self, orbit: OrbitId, boundary: BoundaryType) -> Option<CrossingFlag> {
        self.orbits
            .get(&orbit)
            .and_then(|a| a.boundaries.get(&boundary))
            .and_then(|e| e.flag)
    }

    pub fn comment(&self, orbit: OrbitId) -> Option<&str> {
        self.orbits.get(&orbit).and_then(|a| a.comment.as_deref())
    }

    pub fn orbit_ids(&self) -> impl Iterator<Item = OrbitId> + '_ {
        self.orbits.keys().copied()
    }

    pub fn annotated_orbits(&self) -> usize {
        self.orbits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orbits.is_empty()
    }

    /// Drop empty entries and orbits, e.g. after loading a hand-edited file.
    pub fn normalize(&mut self) {
        for annotations in self.orbits.values_mut() {
            annotations.boundaries.retain(|_, entry| !entry.is_empty());
            if annotations
                .comment
                .as_deref()
                .is_some_and(|c| c.trim().is_empty())
            {
                annotations.comment = None;
            }
        }
        self.orbits.retain(|_, a| !a.is_empty());
    }

    fn prune(&mut self, orbit: OrbitId) {
        if self.orbits.get(&orbit).is_some_and(|a| a.is_empty()) {
            self.orbits.remove(&orbit);
        }
    }
}
