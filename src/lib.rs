//! Particle swarm optimization over continuous landscapes.
//!
//! One generic core handles single-objective (`Swarm<1>`) and two-objective
//! (`Swarm<2>`) minimization. Each generation evaluates every particle, tracks
//! personal and swarm bests, then moves every particle towards them.

pub mod core;
pub mod optimization;
pub mod stats;

pub use self::core::*;
pub use optimization::*;
pub use stats::{Logbook, LogbookRecord, Statistics};
