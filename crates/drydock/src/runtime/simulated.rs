//! Simulated runtime facade.

use std::sync::Arc;

use async_trait::async_trait;
use drydock_common::{ClientError, ClientResult};
use tokio::sync::{Mutex, mpsc};
use tokio_stream::wrappers::ReceiverStream;

use super::config::RuntimeConfig;
use super::events::{ContainerEvent, EventBroadcaster, EventStatus};
use super::fault::FaultSwitch;
use super::registry::ContainerRegistry;
use crate::client::{ContainerClient, ContainerSummary, ListContainersOptions};
use crate::container::Container;

/// Registry and subscribers, guarded together.
#[derive(Debug, Default)]
struct RuntimeState {
    registry: ContainerRegistry,
    broadcaster: EventBroadcaster,
}

/// An in-memory container runtime.
///
/// Every operation runs as one critical section over the registry and the
/// subscriber list, including event delivery, so concurrent callers are
/// serialized. The failure switch is checked first in every operation and
/// masks every other error.
///
/// Add and remove first wait for a free slot on each subscriber in turn,
/// then commit the change and deliver the event to all of them at once. A
/// subscriber that never drains its channel will eventually block every add
/// and remove. Cancelling a blocked add or remove leaves the registry and
/// every subscriber untouched.
#[derive(Debug)]
pub struct SimulatedRuntime {
    config: RuntimeConfig,
    fault: FaultSwitch,
    state: Mutex<RuntimeState>,
}

impl Default for SimulatedRuntime {
    fn default() -> Self {
        Self::with_config(RuntimeConfig::default())
    }
}

impl SimulatedRuntime {
    /// Create an empty runtime with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty runtime with the given configuration.
    #[must_use]
    pub fn with_config(config: RuntimeConfig) -> Self {
        Self {
            fault: FaultSwitch::new(config.failure_mode),
            state: Mutex::new(RuntimeState::default()),
            config,
        }
    }

    /// Runtime configuration.
    #[must_use]
    pub const fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Make every subsequent operation fail with a server error, or stop doing so.
    ///
    /// Operations already in progress are not affected.
    pub fn set_failure_mode(&self, enabled: bool) {
        if self.fault.set(enabled) != enabled {
            tracing::info!(enabled, "Failure mode changed");
        }
    }

    /// Returns true if failure mode is enabled.
    #[must_use]
    pub fn failure_mode(&self) -> bool {
        self.fault.is_enabled()
    }

    /// Register a container and emit a `start` event to every subscriber.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::ServerError`](drydock_common::ClientError::ServerError)
    /// in failure mode, or [`ClientError::AlreadyExists`](drydock_common::ClientError::AlreadyExists)
    /// if the ID is already registered.
    pub async fn add_container(&self, container: Arc<Container>) -> ClientResult<()> {
        let mut guard = self.state.lock().await;
        self.fault.check()?;
        let state = &mut *guard;

        if state.registry.contains(container.id.as_str()) {
            return Err(ClientError::AlreadyExists {
                id: container.id.to_string(),
            });
        }

        let delivery = state.broadcaster.reserve().await;
        let event = ContainerEvent::for_container(&container, EventStatus::Start);
        state.registry.insert(container)?;
        tracing::debug!(container_id = %event.id, "Added container");

        if delivery.send(event) {
            state.broadcaster.prune_closed();
        }
        Ok(())
    }

    /// Unregister a container and emit a `die` event to every subscriber.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::ServerError`](drydock_common::ClientError::ServerError)
    /// in failure mode, or [`ClientError::NotFound`](drydock_common::ClientError::NotFound)
    /// if the ID is not registered.
    pub async fn remove_container(&self, id: &str) -> ClientResult<()> {
        let mut guard = self.state.lock().await;
        self.fault.check()?;
        let state = &mut *guard;

        let event = ContainerEvent::for_container(&*state.registry.get(id)?, EventStatus::Die);

        let delivery = state.broadcaster.reserve().await;
        state.registry.remove(id)?;
        tracing::debug!(container_id = %event.id, "Removed container");

        if delivery.send(event) {
            state.broadcaster.prune_closed();
        }
        Ok(())
    }

    /// Create a channel sized by the configured listener capacity, register
    /// it and return the receiving end.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::ServerError`](drydock_common::ClientError::ServerError)
    /// in failure mode.
    pub async fn subscribe(&self) -> ClientResult<mpsc::Receiver<ContainerEvent>> {
        let (sender, receiver) = mpsc::channel(self.config.listener_capacity);
        self.add_event_listener(sender).await?;
        Ok(receiver)
    }

    /// Like [`subscribe`](Self::subscribe), wrapped as a stream.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::ServerError`](drydock_common::ClientError::ServerError)
    /// in failure mode.
    pub async fn subscribe_stream(&self) -> ClientResult<ReceiverStream<ContainerEvent>> {
        self.subscribe().await.map(ReceiverStream::new)
    }

    /// Number of registered containers, regardless of failure mode.
    pub async fn container_count(&self) -> usize {
        self.state.lock().await.registry.len()
    }

    /// Number of registered event listeners, regardless of failure mode.
    pub async fn listener_count(&self) -> usize {
        self.state.lock().await.broadcaster.len()
    }
}

#[async_trait]
impl ContainerClient for SimulatedRuntime {
    async fn add_event_listener(&self, listener: mpsc::Sender<ContainerEvent>) -> ClientResult<()> {
        let mut state = self.state.lock().await;
        self.fault.check()?;

        state.broadcaster.subscribe(listener);
        tracing::debug!(listeners = state.broadcaster.len(), "Added event listener");
        Ok(())
    }

    async fn inspect_container(&self, id: &str) -> ClientResult<Arc<Container>> {
        let state = self.state.lock().await;
        self.fault.check()?;

        state.registry.get(id)
    }

    async fn list_containers(
        &self,
        _options: &ListContainersOptions,
    ) -> ClientResult<Vec<ContainerSummary>> {
        let state = self.state.lock().await;
        self.fault.check()?;

        Ok(state.registry.summaries())
    }
}
