//! Platform abstraction layer
//!
//! Host-facing plumbing that never touches the simulation directly:
//! - Input: raw key/touch events to edge-triggered logical actions

pub mod input;

pub use input::{Action, InputLatch, Key};
