//! Container registry.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::Arc;

use drydock_common::{ClientError, ClientResult, ContainerId};

use crate::client::ContainerSummary;
use crate::container::Container;

/// The set of running simulated containers, keyed by ID.
///
/// Entries are shared references supplied by the caller and are returned
/// as-is. Iteration is in ascending ID order.
#[derive(Debug, Default)]
pub struct ContainerRegistry {
    containers: BTreeMap<ContainerId, Arc<Container>>,
}

impl ContainerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a container.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AlreadyExists`] if the ID is taken. The
    /// registry is left unchanged.
    pub fn insert(&mut self, container: Arc<Container>) -> ClientResult<()> {
        match self.containers.entry(container.id.clone()) {
            Entry::Occupied(entry) => Err(ClientError::AlreadyExists {
                id: entry.key().to_string(),
            }),
            Entry::Vacant(entry) => {
                entry.insert(container);
                Ok(())
            }
        }
    }

    /// Remove a container and return it.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if no container has this ID.
    pub fn remove(&mut self, id: &str) -> ClientResult<Arc<Container>> {
        self.containers
            .remove(id)
            .ok_or_else(|| ClientError::NotFound { id: id.to_string() })
    }

    /// Look up a container.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if no container has this ID.
    pub fn get(&self, id: &str) -> ClientResult<Arc<Container>> {
        self.containers
            .get(id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound { id: id.to_string() })
    }

    /// Summaries of every registered container.
    #[must_use]
    pub fn summaries(&self) -> Vec<ContainerSummary> {
        self.containers
            .values()
            .map(|container| ContainerSummary::from(container.as_ref()))
            .collect()
    }

    /// Check if a container exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.containers.contains_key(id)
    }

    /// Number of registered containers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    /// Returns true if no containers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container(id: &str) -> Arc<Container> {
        Arc::new(Container::new(id))
    }

    #[test]
    fn insert_and_get() {
        let mut registry = ContainerRegistry::new();
        let web = container("web");
        registry.insert(Arc::clone(&web)).unwrap();

        let found = registry.get("web").unwrap();
        assert!(Arc::ptr_eq(&found, &web));
        assert!(registry.contains("web"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicate_insert_keeps_original() {
        let mut registry = ContainerRegistry::new();
        let first = container("web");
        registry.insert(Arc::clone(&first)).unwrap();

        let err = registry.insert(container("web")).unwrap_err();
        assert_eq!(err, ClientError::AlreadyExists { id: "web".into() });
        assert_eq!(registry.len(), 1);
        assert!(Arc::ptr_eq(&registry.get("web").unwrap(), &first));
    }

    #[test]
    fn remove_missing() {
        let mut registry = ContainerRegistry::new();
        registry.insert(container("a")).unwrap();

        let err = registry.remove("b").unwrap_err();
        assert_eq!(err, ClientError::NotFound { id: "b".into() });
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn remove_returns_entry() {
        let mut registry = ContainerRegistry::new();
        registry.insert(container("a")).unwrap();

        let removed = registry.remove("a").unwrap();
        assert_eq!(removed.id.as_str(), "a");
        assert!(registry.is_empty());
        assert!(registry.get("a").unwrap_err().is_not_found());
    }

    #[test]
    fn summaries_are_sorted_by_id() {
        let mut registry = ContainerRegistry::new();
        for id in ["c", "a", "b"] {
            registry.insert(container(id)).unwrap();
        }

        let ids: Vec<_> = registry
            .summaries()
            .into_iter()
            .map(|summary| summary.id.to_string())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
