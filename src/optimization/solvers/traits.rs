use super::particle::{Particle, Snapshot};

/// Read-only view of the swarm after a generation's update phase
///
/// Particle fitness is the value evaluated during this generation, positions are
/// already moved.
pub struct GenerationReport<'a, const M: usize> {
    /// 1-based generation number
    pub generation: u32,
    /// Particle evaluations so far
    pub evaluations: usize,
    pub particles: &'a [Particle<M>],
    pub global_best: &'a [Option<Snapshot<M>>; M],
}

impl<const M: usize> GenerationReport<'_, M> {
    /// Fitness of every evaluated particle on objective `k`, in population order
    pub fn fitness_values(&self, k: usize) -> Vec<f64> {
        self.particles
            .iter()
            .filter_map(|p| p.fitness().map(|f| f[k]))
            .collect()
    }
}

/// Callback interface for generation progress
pub trait GenerationObserver<const M: usize> {
    /// Called once per generation; an error aborts the run
    fn on_generation(&mut self, report: &GenerationReport<'_, M>) -> Result<(), String>;
}

/// Observer that ignores every generation
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl<const M: usize> GenerationObserver<M> for NoopObserver {
    fn on_generation(&mut self, _report: &GenerationReport<'_, M>) -> Result<(), String> {
        Ok(())
    }
}

/// Outcome of a completed run
#[derive(Clone, Debug)]
pub struct SwarmResult<const M: usize> {
    pub generations: u32,
    pub evaluations: usize,
    /// Swarm best per objective at the end of the last generation
    pub best: [Option<Snapshot<M>>; M],
}

impl<const M: usize> SwarmResult<M> {
    pub fn best(&self, k: usize) -> Option<&Snapshot<M>> {
        self.best.get(k).and_then(Option::as_ref)
    }
}
