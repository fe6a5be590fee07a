//! HTTP client layer for Taskpad.
//!
//! Provides `HttpRemoteStore`, the reqwest-backed implementation of the
//! `RemoteStore` trait from `taskpad-core`.

pub mod http_store;

pub use http_store::{HttpRemoteStore, API_URL_ENV};
