//! Inbound adapters (driving side of the hexagon).
//!
//! The page UI lives under [`ui`]: components translate user interactions
//! into domain service calls and render results into a document model.

pub mod ui;
