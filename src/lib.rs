//! Chess tournament standings.
//!
//! Computes individual, team and overall podiums from chess-results.com
//! final-ranking exports, for one tournament or a series of them.

pub mod analysis;
pub mod config;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod output;
pub mod pipeline;
