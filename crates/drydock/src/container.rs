//! Container descriptor.
//!
//! The runtime treats a [`Container`] as an opaque value keyed by its ID:
//! it is stored and handed back unchanged. The fields mirror what an
//! engine's inspect endpoint returns so code under test has something
//! realistic to read.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use drydock_common::ContainerId;
use serde::{Deserialize, Serialize};

/// A container descriptor as returned by inspect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Container {
    /// Container ID.
    #[serde(rename = "Id")]
    pub id: ContainerId,
    /// Container name, with the engine's leading slash.
    pub name: String,
    /// Image the container was created from.
    pub image: String,
    /// Creation time.
    pub created: DateTime<Utc>,
    /// Runtime state.
    pub state: ContainerState,
    /// Configuration the container was created with.
    pub config: ContainerConfig,
}

/// Runtime state of a container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContainerState {
    /// Whether the container is running.
    pub running: bool,
    /// Process ID of the container init process.
    pub pid: u32,
    /// Time the container was started.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
}

/// Container configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContainerConfig {
    /// Hostname inside the container.
    pub hostname: String,
    /// Environment variables in `KEY=value` form.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<String>,
    /// Labels.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,
}

impl Container {
    /// Create a running container descriptor with the given ID.
    ///
    /// The name defaults to `/<short id>` and the hostname to the short ID.
    #[must_use]
    pub fn new(id: impl Into<ContainerId>) -> Self {
        let id = id.into();
        let now = Utc::now();
        let short = id.short().to_string();

        Self {
            name: format!("/{short}"),
            image: String::new(),
            created: now,
            state: ContainerState {
                running: true,
                pid: 0,
                started_at: Some(now),
            },
            config: ContainerConfig {
                hostname: short,
                ..ContainerConfig::default()
            },
            id,
        }
    }

    /// Create a running container descriptor with a random ID.
    #[must_use]
    pub fn generate() -> Self {
        Self::new(ContainerId::generate())
    }

    /// Set the container name. A leading slash is added if missing.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.name = if name.starts_with('/') {
            name
        } else {
            format!("/{name}")
        };
        self
    }

    /// Set the image reference.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Add a label.
    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.labels.insert(key.into(), value.into());
        self
    }

    /// Add an environment variable.
    #[must_use]
    pub fn with_env(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.config
            .env
            .push(format!("{}={}", key.as_ref(), value.as_ref()));
        self
    }

    /// Set the init process ID.
    #[must_use]
    pub const fn with_pid(mut self, pid: u32) -> Self {
        self.state.pid = pid;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_container_defaults() {
        let container = Container::new("0123456789abcdef0123");
        assert_eq!(container.id.as_str(), "0123456789abcdef0123");
        assert_eq!(container.name, "/0123456789ab");
        assert_eq!(container.config.hostname, "0123456789ab");
        assert!(container.state.running);
        assert_eq!(container.state.started_at, Some(container.created));
    }

    #[test]
    fn builder_pattern() {
        let container = Container::new("web")
            .with_name("frontend")
            .with_image("nginx:1.27")
            .with_label("role", "edge")
            .with_env("PORT", "8080")
            .with_pid(4242);

        assert_eq!(container.name, "/frontend");
        assert_eq!(container.image, "nginx:1.27");
        assert_eq!(container.config.labels.get("role").map(String::as_str), Some("edge"));
        assert_eq!(container.config.env, vec!["PORT=8080".to_string()]);
        assert_eq!(container.state.pid, 4242);
    }

    #[test]
    fn name_keeps_existing_slash() {
        let container = Container::new("a").with_name("/already");
        assert_eq!(container.name, "/already");
    }

    #[test]
    fn serializes_with_engine_field_names() {
        let container = Container::new("abc").with_image("busybox");
        let json = serde_json::to_value(&container).unwrap();

        assert_eq!(json["Id"], "abc");
        assert_eq!(json["Image"], "busybox");
        assert_eq!(json["State"]["Running"], true);
        assert_eq!(json["Config"]["Hostname"], "abc");
        assert!(json["Config"].get("Labels").is_none());

        let back: Container = serde_json::from_value(json).unwrap();
        assert_eq!(back, container);
    }
}
