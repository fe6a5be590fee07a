//! Application layer for Taskpad.
//!
//! This crate provides the mutation coordinators that pair each remote
//! store call with its precise local-state reconciliation, and the shared
//! UI status state (banners, busy flags) they drive.

pub mod coordinator;
pub mod status;

#[cfg(test)]
mod coordinator_test;

pub use coordinator::TaskCoordinator;
pub use status::{Action, Banner, SharedStatus, SUCCESS_BANNER_TTL};
