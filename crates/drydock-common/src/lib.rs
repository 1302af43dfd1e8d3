//! # drydock-common
//!
//! Shared types for the Drydock simulated container runtime.
//!
//! This crate provides:
//! - The client error contract returned by every runtime operation
//! - Container identifiers

#![warn(missing_docs)]

pub mod error;
pub mod id;

pub use error::{ClientError, ClientResult};
pub use id::ContainerId;
