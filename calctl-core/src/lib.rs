//! Core logic for calctl.
//!
//! This crate holds everything that does not touch the network directly:
//! - credential caching and the OAuth token lifecycle (`credential`, `auth`)
//! - time parsing into the remote wire format (`time`)
//! - calendar selection and the five event operations (`selector`, `operations`)
//! - the prompt-driven session that ties them together (`session`)
//!
//! The remote calendar service and the OAuth token endpoint are reached through
//! the [`remote::CalendarService`] and [`auth::OAuthClient`] traits, implemented
//! by the `calctl` binary.

pub mod app_config;
pub mod auth;
pub mod console;
pub mod credential;
pub mod error;
pub mod operations;
pub mod remote;
pub mod selector;
pub mod session;
pub mod settings;
pub mod time;

#[cfg(test)]
mod testing;

pub use error::{CalctlError, CalctlResult};
