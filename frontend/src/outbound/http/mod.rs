//! HTTP outbound adapters.
//!
//! This module provides the reqwest implementation of the `TravelApi` port.

mod client;
mod dto;

pub use client::HttpTravelApi;
