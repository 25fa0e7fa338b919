//! Nomado presentation layer.
//!
//! The crate is a small hexagon: `domain` owns records, category rules, and
//! the ports; `outbound` adapts the backend HTTP API and session storage;
//! `inbound::ui` renders components into a [`inbound::ui::Document`] and
//! wires form submissions.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::FrontendSettings;
