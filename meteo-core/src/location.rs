//! In-memory registry of named locations.

use crate::{
    error::{EntryKind, MeteoError, Result},
    model::Location,
};

/// Ordered collection of locations. Keeps insertion order and allows duplicate names.
#[derive(Debug, Clone, Default)]
pub struct LocationRegistry {
    locations: Vec<Location>,
}

impl LocationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, location: Location) {
        self.locations.push(location);
    }

    /// Remove every location called `name`, returning how many were dropped.
    ///
    /// Leaves the registry untouched and returns `NotFound` when nothing matches.
    pub fn remove(&mut self, name: &str) -> Result<usize> {
        let before = self.locations.len();
        self.locations.retain(|loc| loc.name() != name);

        match before - self.locations.len() {
            0 => Err(MeteoError::not_found(EntryKind::Location, name)),
            removed => Ok(removed),
        }
    }

    /// All locations in insertion order, or `None` when the registry is empty.
    ///
    /// The slice can be iterated any number of times.
    pub fn list(&self) -> Option<&[Location]> {
        if self.locations.is_empty() { None } else { Some(self.locations.as_slice()) }
    }

    /// First location registered under `name`.
    pub fn find(&self, name: &str) -> Result<&Location> {
        self.locations
            .iter()
            .find(|loc| loc.name() == name)
            .ok_or_else(|| MeteoError::not_found(EntryKind::Location, name))
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

impl FromIterator<Location> for LocationRegistry {
    fn from_iter<I: IntoIterator<Item = Location>>(iter: I) -> Self {
        Self { locations: iter.into_iter().collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(registry: &LocationRegistry) -> Vec<&str> {
        registry.list().unwrap_or_default().iter().map(Location::name).collect()
    }

    #[test]
    fn list_preserves_insertion_order() {
        let mut registry = LocationRegistry::new();
        registry.add(Location::new("CityA", 35.0, -78.0));
        registry.add(Location::new("CityB", 40.7, -74.0));
        registry.add(Location::new("CityC", 51.5, -0.1));

        let listed = registry.list().expect("three locations");
        assert_eq!(listed.len(), 3);
        assert_eq!(names(&registry), ["CityA", "CityB", "CityC"]);
    }

    #[test]
    fn empty_registry_lists_nothing() {
        let registry = LocationRegistry::new();
        assert!(registry.list().is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn listing_can_be_walked_twice() {
        let registry: LocationRegistry =
            [Location::new("A", 1.0, 2.0), Location::new("B", 3.0, 4.0)].into_iter().collect();

        let listed = registry.list().expect("non-empty");
        let first: Vec<_> = listed.iter().map(Location::name).collect();
        let second: Vec<_> = listed.iter().map(Location::name).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn removing_unknown_name_reports_not_found() {
        let mut registry = LocationRegistry::new();
        registry.add(Location::new("CityA", 35.0, -78.0));

        let err = registry.remove("Nowhere").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(names(&registry), ["CityA"]);
    }

    #[test]
    fn removing_duplicate_name_drops_every_occurrence() {
        let mut registry = LocationRegistry::new();
        registry.add(Location::new("Twin", 1.0, 1.0));
        registry.add(Location::new("Other", 2.0, 2.0));
        registry.add(Location::new("Twin", 3.0, 3.0));

        assert_eq!(registry.remove("Twin").unwrap(), 2);
        assert_eq!(names(&registry), ["Other"]);
    }

    #[test]
    fn remove_matches_names_exactly() {
        let mut registry = LocationRegistry::new();
        registry.add(Location::new("CityA", 35.0, -78.0));

        assert!(registry.remove("citya").is_err());
        assert!(registry.remove("City").is_err());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn find_returns_first_match() {
        let mut registry = LocationRegistry::new();
        registry.add(Location::new("Twin", 1.0, 1.0));
        registry.add(Location::new("Twin", 3.0, 3.0));

        assert_eq!(registry.find("Twin").unwrap().latitude(), 1.0);
        assert!(registry.find("Missing").unwrap_err().is_not_found());
    }
}
