pub mod particle;
mod swarm;
pub mod traits;

pub use particle::{Particle, Snapshot};
pub use swarm::{Phase, Swarm};
pub use traits::{GenerationObserver, GenerationReport, NoopObserver, SwarmResult};
