//! Interactive timeline scheduling: calendar math, row layout, windowed
//! rendering support, double-booking detection and optimistic drag/resize
//! commits. The egui front end lives in the binary.

pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod model;
