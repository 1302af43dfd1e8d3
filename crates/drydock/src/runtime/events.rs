//! Lifecycle event definitions and broadcaster.

use std::fmt;

use chrono::Utc;
use drydock_common::ContainerId;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::container::Container;

/// Lifecycle event status.
///
/// The simulated runtime emits [`Start`](Self::Start) when a container is
/// added and [`Die`](Self::Die) when it is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    /// Container created.
    Create,
    /// Container started.
    Start,
    /// Container process exited.
    Die,
    /// Container stopped.
    Stop,
    /// Container killed.
    Kill,
    /// Container deleted.
    Destroy,
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Start => write!(f, "start"),
            Self::Die => write!(f, "die"),
            Self::Stop => write!(f, "stop"),
            Self::Kill => write!(f, "kill"),
            Self::Destroy => write!(f, "destroy"),
        }
    }
}

/// A container lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerEvent {
    /// ID of the affected container.
    pub id: ContainerId,
    /// What happened.
    pub status: EventStatus,
    /// Image the container was created from.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub from: String,
    /// Unix timestamp in seconds.
    pub time: i64,
}

impl ContainerEvent {
    /// Create an event stamped with the current time.
    #[must_use]
    pub fn new(id: impl Into<ContainerId>, status: EventStatus) -> Self {
        Self {
            id: id.into(),
            status,
            from: String::new(),
            time: Utc::now().timestamp(),
        }
    }

    /// Create an event for a container, carrying its image.
    #[must_use]
    pub fn for_container(container: &Container, status: EventStatus) -> Self {
        Self {
            from: container.image.clone(),
            ..Self::new(container.id.clone(), status)
        }
    }
}

/// Ordered list of event subscribers.
///
/// Events are delivered to subscribers one at a time, in registration
/// order. A subscriber with a full buffer blocks delivery to everyone
/// after it.
#[derive(Debug, Default)]
pub struct EventBroadcaster {
    listeners: Vec<mpsc::Sender<ContainerEvent>>,
}

impl EventBroadcaster {
    /// Create a broadcaster with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a subscriber. The same channel may be added more than once.
    pub fn subscribe(&mut self, listener: mpsc::Sender<ContainerEvent>) {
        self.listeners.push(listener);
    }

    /// Number of subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns true if there are no subscribers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Reserve one buffer slot on every subscriber, in registration order.
    ///
    /// Nothing is delivered until [`Delivery::send`] is called, and
    /// dropping the future or the returned [`Delivery`] gives every slot
    /// back. A channel registered `k` times needs capacity of at least `k`.
    pub async fn reserve(&self) -> Delivery<'_> {
        let mut permits = Vec::with_capacity(self.listeners.len());
        let mut closed = false;

        for listener in &self.listeners {
            match listener.reserve().await {
                Ok(permit) => permits.push(permit),
                Err(_) => closed = true,
            }
        }

        Delivery { permits, closed }
    }

    /// Drop subscribers whose receiver has gone away. Returns how many were removed.
    pub fn prune_closed(&mut self) -> usize {
        let before = self.listeners.len();
        self.listeners.retain(|listener| !listener.is_closed());
        let removed = before - self.listeners.len();
        if removed > 0 {
            tracing::trace!(removed, "Pruned closed event listeners");
        }
        removed
    }
}

/// Reserved slots for delivering one event to every live subscriber.
#[derive(Debug)]
pub struct Delivery<'a> {
    permits: Vec<mpsc::Permit<'a, ContainerEvent>>,
    closed: bool,
}

impl Delivery<'_> {
    /// Send the event through every reserved slot, in registration order.
    ///
    /// Returns true if a closed subscriber was skipped and the list should
    /// be pruned.
    #[must_use]
    pub fn send(self, event: ContainerEvent) -> bool {
        for permit in self.permits {
            tracing::trace!(
                container_id = %event.id,
                status = %event.status,
                "Delivering event"
            );
            permit.send(event.clone());
        }
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn publish(broadcaster: &mut EventBroadcaster, event: ContainerEvent) {
        if broadcaster.reserve().await.send(event) {
            broadcaster.prune_closed();
        }
    }

    #[test]
    fn status_display() {
        assert_eq!(EventStatus::Start.to_string(), "start");
        assert_eq!(EventStatus::Die.to_string(), "die");
        assert_eq!(EventStatus::Destroy.to_string(), "destroy");
    }

    #[test]
    fn event_serialization() {
        let event = ContainerEvent {
            id: ContainerId::new("abc"),
            status: EventStatus::Start,
            from: "nginx:latest".to_string(),
            time: 1_700_000_000,
        };

        insta::assert_snapshot!(
            serde_json::to_string(&event).unwrap(),
            @r#"{"id":"abc","status":"start","from":"nginx:latest","time":1700000000}"#
        );
    }

    #[test]
    fn event_carries_image() {
        let container = Container::new("abc").with_image("redis:7");
        let event = ContainerEvent::for_container(&container, EventStatus::Die);
        assert_eq!(event.id.as_str(), "abc");
        assert_eq!(event.status, EventStatus::Die);
        assert_eq!(event.from, "redis:7");
    }

    #[tokio::test]
    async fn publish_in_registration_order() {
        let mut broadcaster = EventBroadcaster::new();
        let (tx, mut rx) = mpsc::channel(4);
        broadcaster.subscribe(tx.clone());
        broadcaster.subscribe(tx);

        publish(&mut broadcaster, ContainerEvent::new("a", EventStatus::Start)).await;
        publish(&mut broadcaster, ContainerEvent::new("a", EventStatus::Die)).await;

        let statuses: Vec<_> = std::iter::from_fn(|| rx.try_recv().ok())
            .map(|event| event.status)
            .collect();
        assert_eq!(
            statuses,
            vec![
                EventStatus::Start,
                EventStatus::Start,
                EventStatus::Die,
                EventStatus::Die
            ]
        );
    }

    #[tokio::test]
    async fn dropped_reservation_delivers_nothing() {
        let mut broadcaster = EventBroadcaster::new();
        let (tx, mut rx) = mpsc::channel(1);
        broadcaster.subscribe(tx);

        let delivery = broadcaster.reserve().await;
        drop(delivery);
        assert!(rx.try_recv().is_err());

        publish(&mut broadcaster, ContainerEvent::new("a", EventStatus::Start)).await;
        assert_eq!(rx.try_recv().unwrap().id.as_str(), "a");
    }

    #[tokio::test]
    async fn closed_listeners_are_pruned() {
        let mut broadcaster = EventBroadcaster::new();
        let (dead_tx, dead_rx) = mpsc::channel(1);
        let (live_tx, mut live_rx) = mpsc::channel(1);
        broadcaster.subscribe(dead_tx);
        broadcaster.subscribe(live_tx);
        drop(dead_rx);

        publish(&mut broadcaster, ContainerEvent::new("a", EventStatus::Start)).await;

        assert_eq!(broadcaster.len(), 1);
        assert_eq!(live_rx.recv().await.unwrap().status, EventStatus::Start);
    }
}
