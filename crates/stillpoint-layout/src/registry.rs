#![forbid(unsafe_code)]

//! Section registry and the layout-probe collaborator contract.
//!
//! The registry pairs the fixed [`SectionList`] with a [`LayoutProbe`] that
//! answers "where is this section right now?". Bounds are never cached: every
//! call goes back to the probe, because layout can reflow between scroll
//! events.
//!
//! # Failure Modes
//!
//! - Unknown identifier, or a section the probe reports as not mounted:
//!   [`RegistryError::NotFound`].

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::section::{BoundsError, Section, SectionBounds, SectionId, SectionList};

/// Content-rendering collaborator: reports the current extent of a mounted
/// section, or `None` when it is not currently mounted.
pub trait LayoutProbe {
    fn measure(&self, id: &SectionId) -> Option<SectionBounds>;
}

impl<P: LayoutProbe + ?Sized> LayoutProbe for Rc<P> {
    fn measure(&self, id: &SectionId) -> Option<SectionBounds> {
        (**self).measure(id)
    }
}

impl<P: LayoutProbe + ?Sized> LayoutProbe for &P {
    fn measure(&self, id: &SectionId) -> Option<SectionBounds> {
        (**self).measure(id)
    }
}

/// Registry lookup failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The identifier is unknown or its section is not currently mounted.
    NotFound(SectionId),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "section `{id}` is not mounted"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Current bounds of every mounted section, keyed by identifier.
pub type BoundsSnapshot = FxHashMap<SectionId, SectionBounds>;

/// Ordered sections plus a live view of their bounds.
#[derive(Debug)]
pub struct SectionRegistry<P> {
    sections: SectionList,
    probe: P,
}

impl<P: LayoutProbe> SectionRegistry<P> {
    #[must_use]
    pub fn new(sections: SectionList, probe: P) -> Self {
        Self { sections, probe }
    }

    /// Sections in registry order.
    #[must_use]
    pub fn list_sections(&self) -> &[Section] {
        self.sections.as_slice()
    }

    #[must_use]
    pub fn section_list(&self) -> &SectionList {
        &self.sections
    }

    #[must_use]
    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Current bounds of one section.
    pub fn bounds_of(&self, id: &str) -> Result<SectionBounds, RegistryError> {
        let section = self
            .sections
            .get(id)
            .ok_or_else(|| RegistryError::NotFound(SectionId::new(id)))?;
        self.probe
            .measure(&section.id)
            .ok_or_else(|| RegistryError::NotFound(section.id.clone()))
    }

    /// Measure every registered section once. Unmounted sections are omitted.
    #[must_use]
    pub fn snapshot_bounds(&self) -> BoundsSnapshot {
        let mut snapshot =
            BoundsSnapshot::with_capacity_and_hasher(self.sections.len(), Default::default());
        for section in self.sections.as_slice() {
            if let Some(bounds) = self.probe.measure(&section.id) {
                snapshot.insert(section.id.clone(), bounds);
            }
        }
        snapshot
    }
}

/// Host-fed [`LayoutProbe`]: the embedding page pushes a measurement whenever
/// a section mounts or reflows, and removes it on unmount.
#[derive(Debug, Default)]
pub struct MeasuredLayout {
    mounted: RefCell<FxHashMap<SectionId, SectionBounds>>,
}

impl MeasuredLayout {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest measurement for a section, mounting it if needed.
    pub fn update(
        &self,
        id: impl Into<SectionId>,
        top: f64,
        height: f64,
    ) -> Result<(), BoundsError> {
        let bounds = SectionBounds::new(top, height)?;
        self.mounted.borrow_mut().insert(id.into(), bounds);
        Ok(())
    }

    /// Forget a section. Returns `true` if it was mounted.
    pub fn unmount(&self, id: &str) -> bool {
        self.mounted.borrow_mut().remove(id).is_some()
    }

    /// Forget every section (page teardown).
    pub fn clear(&self) {
        self.mounted.borrow_mut().clear();
    }

    #[must_use]
    pub fn mounted_count(&self) -> usize {
        self.mounted.borrow().len()
    }
}

impl LayoutProbe for MeasuredLayout {
    fn measure(&self, id: &SectionId) -> Option<SectionBounds> {
        self.mounted.borrow().get(id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> SectionRegistry<MeasuredLayout> {
        let layout = MeasuredLayout::new();
        layout.update("hero", 0.0, 800.0).unwrap();
        layout.update("about", 800.0, 900.0).unwrap();
        SectionRegistry::new(
            SectionList::new(["hero", "about", "contact"]).unwrap(),
            layout,
        )
    }

    #[test]
    fn list_sections_is_stable_and_ordered() {
        let reg = registry();
        let first: Vec<(&str, usize)> = reg
            .list_sections()
            .iter()
            .map(|s| (s.id.as_str(), s.order))
            .collect();
        assert_eq!(first, vec![("hero", 0), ("about", 1), ("contact", 2)]);
        for (index, section) in reg.list_sections().iter().enumerate() {
            assert_eq!(section.order, index);
        }
        assert_eq!(reg.list_sections(), reg.list_sections());
        reg.probe().unmount("hero");
        assert_eq!(reg.list_sections().len(), 3, "unmounting does not reorder or drop");
    }

    #[test]
    fn clear_unmounts_everything() {
        let reg = registry();
        reg.probe().clear();
        assert_eq!(reg.probe().mounted_count(), 0);
        assert!(reg.snapshot_bounds().is_empty());
        assert_eq!(reg.list_sections().len(), 3);
    }

    #[test]
    fn bounds_of_mounted_section() {
        let reg = registry();
        assert_eq!(
            reg.bounds_of("about"),
            Ok(SectionBounds {
                top: 800.0,
                height: 900.0
            })
        );
    }

    #[test]
    fn unknown_and_unmounted_are_not_found() {
        let reg = registry();
        assert_eq!(
            reg.bounds_of("contact"),
            Err(RegistryError::NotFound(SectionId::new("contact")))
        );
        assert_eq!(
            reg.bounds_of("pricing"),
            Err(RegistryError::NotFound(SectionId::new("pricing")))
        );
    }

    #[test]
    fn measurements_of_unregistered_ids_are_ignored() {
        let reg = registry();
        reg.probe().update("footer", 5000.0, 100.0).unwrap();
        assert!(reg.bounds_of("footer").is_err());
        assert!(!reg.snapshot_bounds().contains_key("footer"));
    }

    #[test]
    fn bounds_are_not_cached() {
        let reg = registry();
        reg.probe().update("about", 820.0, 880.0).unwrap();
        assert_eq!(reg.bounds_of("about").map(|b| b.top), Ok(820.0));
        assert!(reg.probe().unmount("about"));
        assert!(reg.bounds_of("about").is_err());
        assert!(!reg.probe().unmount("about"));
    }

    #[test]
    fn snapshot_omits_unmounted() {
        let reg = registry();
        let snap = reg.snapshot_bounds();
        assert_eq!(snap.len(), 2);
        assert!(snap.contains_key("hero"));
        assert!(!snap.contains_key("contact"));
    }

    #[test]
    fn invalid_measurement_is_rejected_and_not_stored() {
        let layout = MeasuredLayout::new();
        assert!(layout.update("hero", 0.0, -5.0).is_err());
        assert_eq!(layout.mounted_count(), 0);
    }
}
