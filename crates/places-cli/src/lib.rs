//! CLI library components for the PLACES client.

pub mod logging;
pub mod output;
