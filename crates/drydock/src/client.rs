//! Container client interface.
//!
//! [`ContainerClient`] is the capability set code under test depends on.
//! A real engine client and [`SimulatedRuntime`](crate::SimulatedRuntime)
//! both implement it, so one can be swapped for the other.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use drydock_common::{ClientResult, ContainerId};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::container::Container;
use crate::runtime::ContainerEvent;

/// Operations a container engine client provides.
#[async_trait]
pub trait ContainerClient: Send + Sync {
    /// Register a channel that receives every subsequent lifecycle event.
    async fn add_event_listener(&self, listener: mpsc::Sender<ContainerEvent>) -> ClientResult<()>;

    /// Look up a container by ID.
    async fn inspect_container(&self, id: &str) -> ClientResult<Arc<Container>>;

    /// List containers.
    async fn list_containers(
        &self,
        options: &ListContainersOptions,
    ) -> ClientResult<Vec<ContainerSummary>>;
}

/// Options for [`ContainerClient::list_containers`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListContainersOptions {
    /// Include stopped containers.
    pub all: bool,
    /// Maximum number of containers to return.
    pub limit: Option<usize>,
    /// Include container sizes.
    pub size: bool,
    /// Filters by key, e.g. `label` or `status`.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub filters: HashMap<String, Vec<String>>,
}

impl ListContainersOptions {
    /// Include stopped containers.
    #[must_use]
    pub const fn all(mut self) -> Self {
        self.all = true;
        self
    }

    /// Limit the number of results.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Add a filter value.
    #[must_use]
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.entry(key.into()).or_default().push(value.into());
        self
    }
}

/// Summary of a container as returned by a list call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContainerSummary {
    /// Container ID.
    #[serde(rename = "Id")]
    pub id: ContainerId,
    /// Container names.
    pub names: Vec<String>,
    /// Image the container was created from.
    pub image: String,
    /// Creation time.
    pub created: DateTime<Utc>,
    /// Short state string, `running` or `exited`.
    pub state: String,
    /// Labels.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,
}

impl From<&Container> for ContainerSummary {
    fn from(container: &Container) -> Self {
        let state = if container.state.running {
            "running"
        } else {
            "exited"
        };

        Self {
            id: container.id.clone(),
            names: vec![container.name.clone()],
            image: container.image.clone(),
            created: container.created,
            state: state.to_string(),
            labels: container.config.labels.clone(),
        }
    }
}
