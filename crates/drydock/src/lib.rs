//! # Drydock
//!
//! Drydock is an in-memory simulated container runtime for testing code
//! that drives a container engine's API, without a daemon present.
//!
//! ## Features
//!
//! - **Container registry**: add, remove, inspect and list simulated containers
//! - **Event stream**: ordered `start`/`die` lifecycle events fanned out to every subscriber
//! - **Fault injection**: force every operation to fail with a server error
//! - **Drop-in client**: [`SimulatedRuntime`] implements [`ContainerClient`]
//!
//! ## Usage
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use drydock::{Container, ContainerClient, SimulatedRuntime};
//!
//! # async fn example() -> drydock_common::ClientResult<()> {
//! let runtime = SimulatedRuntime::new();
//! let mut events = runtime.subscribe().await?;
//!
//! runtime
//!     .add_container(Arc::new(Container::new("web").with_image("nginx:latest")))
//!     .await?;
//!
//! let event = events.recv().await;
//! let web = runtime.inspect_container("web").await?;
//!
//! runtime.set_failure_mode(true);
//! assert!(runtime.inspect_container("web").await.is_err());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod client;
pub mod container;
pub mod runtime;

pub use client::{ContainerClient, ContainerSummary, ListContainersOptions};
pub use container::{Container, ContainerConfig, ContainerState};
pub use drydock_common::{ClientError, ClientResult, ContainerId};
pub use runtime::{ContainerEvent, EventStatus, RuntimeConfig, SimulatedRuntime};
