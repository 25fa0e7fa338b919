//! Outbound adapters (driven side of the hexagon).
//!
//! Adapters implement domain ports on top of concrete infrastructure: the
//! backend HTTP API via `reqwest` and session storage via `cap-std`.

pub mod http;
pub mod storage;
