pub mod callback;
pub mod problem;
pub mod solvers;

pub use callback::{print_population, IterationResult, LogbookCallback};
pub use problem::{FnObjective, Himmelblau, Objective, Rastrigin, Schwefel};
pub use solvers::{GenerationObserver, GenerationReport, NoopObserver, Particle, Phase, Snapshot};
pub use solvers::{Swarm, SwarmResult};
