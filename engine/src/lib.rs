// Engine library root: the indicator pipeline and viewport autoscale core.

pub mod config;
pub mod data;
pub mod dataset;
pub mod error;
pub mod indicators;
pub mod session;
pub mod viewport;
