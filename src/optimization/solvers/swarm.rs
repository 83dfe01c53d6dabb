use super::particle::{improves, Particle, Snapshot};
use super::traits::{GenerationObserver, GenerationReport, SwarmResult};
use crate::core::{validate_config, Result, SwarmConfig, SwarmError};
use crate::optimization::problem::Objective;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

/// Where the swarm stands within the current generation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Population created, nothing evaluated
    Initialized,
    /// Fitness assigned for the current generation
    Evaluating,
    /// Personal and swarm bests updated
    Tracking,
    /// Particles moved; ready for the next generation
    Updating,
    /// All generations done
    Terminated,
}

/// A population of particles minimizing `M` objectives
///
/// Each generation runs evaluate, track, update in that order and never interleaves
/// them, so every particle in a generation is pulled towards the same swarm best.
pub struct Swarm<const M: usize, R = StdRng> {
    config: SwarmConfig,
    particles: Vec<Particle<M>>,
    global_best: [Option<Snapshot<M>>; M],
    generation: u32,
    evaluations: usize,
    phase: Phase,
    rng: R,
}

impl<const M: usize> Swarm<M, StdRng> {
    /// Seeded from `config.seed` when present, from entropy otherwise
    pub fn from_config(config: SwarmConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(config, rng)
    }

    pub fn seeded(config: SwarmConfig, seed: u64) -> Result<Self> {
        Self::new(config, StdRng::seed_from_u64(seed))
    }
}

impl<const M: usize, R: Rng> Swarm<M, R> {
    /// Validate `config` and draw the initial population, in insertion order
    pub fn new(config: SwarmConfig, mut rng: R) -> Result<Self> {
        validate_config(&config)?;
        check_arity::<M>()?;

        let particles = (0..config.population_size)
            .map(|_| Particle::random(&mut rng, config.dimensions, config.position, config.velocity))
            .collect();

        Ok(Self::assemble(config, particles, rng))
    }

    /// Start from a given population instead of a random one
    ///
    /// The population must match `config.population_size` and `config.dimensions`.
    pub fn with_particles(config: SwarmConfig, particles: Vec<Particle<M>>, rng: R) -> Result<Self> {
        validate_config(&config)?;
        check_arity::<M>()?;

        if particles.len() != config.population_size {
            return Err(SwarmError::Config(format!(
                "expected {} particles, got {}",
                config.population_size,
                particles.len()
            )));
        }
        if let Some((index, particle)) = particles
            .iter()
            .enumerate()
            .find(|(_, p)| p.dimensions() != config.dimensions)
        {
            return Err(SwarmError::Config(format!(
                "particle {} has {} dimensions, expected {}",
                index,
                particle.dimensions(),
                config.dimensions
            )));
        }

        Ok(Self::assemble(config, particles, rng))
    }

    fn assemble(config: SwarmConfig, particles: Vec<Particle<M>>, rng: R) -> Self {
        Self {
            config,
            particles,
            global_best: std::array::from_fn(|_| None),
            generation: 0,
            evaluations: 0,
            phase: Phase::Initialized,
            rng,
        }
    }

    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }

    /// Population in insertion order
    pub fn particles(&self) -> &[Particle<M>] {
        &self.particles
    }

    pub fn global_best(&self, k: usize) -> Option<&Snapshot<M>> {
        self.global_best.get(k).and_then(Option::as_ref)
    }

    pub fn global_bests(&self) -> &[Option<Snapshot<M>>; M] {
        &self.global_best
    }

    /// Completed generations
    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    fn expect_phase(&self, expected: Phase) -> Result<()> {
        if self.phase != expected {
            return Err(SwarmError::Phase {
                expected,
                found: self.phase,
            });
        }
        Ok(())
    }

    /// Evaluate every particle on every objective
    ///
    /// The first failing or non-finite objective value aborts the phase. Particles before the
    /// failing one keep the fitness assigned in this call, and the phase stays where it was, so
    /// a retry re-evaluates the whole population.
    pub fn evaluate(&mut self, objectives: &[&dyn Objective; M]) -> Result<()> {
        let expected = if self.generation == 0 {
            Phase::Initialized
        } else {
            Phase::Updating
        };
        self.expect_phase(expected)?;

        let generation = self.generation + 1;
        for (index, particle) in self.particles.iter_mut().enumerate() {
            let mut fitness = [0.0; M];
            for (k, objective) in objectives.iter().enumerate() {
                let evaluation_error = |reason: String| SwarmError::Evaluation {
                    generation,
                    particle: index,
                    objective: k,
                    reason: format!("{}: {}", objective.name(), reason),
                };

                let value = objective.cost(particle.position()).map_err(evaluation_error)?;
                if !value.is_finite() {
                    return Err(evaluation_error(format!("non-finite value {}", value)));
                }
                fitness[k] = value;
            }
            particle.assign_fitness(fitness);
        }

        self.evaluations += self.particles.len();
        self.phase = Phase::Evaluating;
        Ok(())
    }

    /// Update personal bests, then scan the population for the swarm bests
    ///
    /// With `reset_per_generation` the swarm bests are cleared first, so they describe this
    /// generation only. Personal bests are never reset. Ties keep the earlier particle.
    pub fn track_bests(&mut self) -> Result<()> {
        self.expect_phase(Phase::Evaluating)?;

        if self.config.reset_per_generation {
            self.global_best = std::array::from_fn(|_| None);
        }

        for (index, particle) in self.particles.iter_mut().enumerate() {
            particle.track_personal_best();

            let Some(fitness) = particle.fitness() else {
                continue;
            };
            for (k, best) in self.global_best.iter_mut().enumerate() {
                if improves(fitness, best.as_ref(), k) {
                    trace!(objective = k, particle = index, fitness = fitness[k], "new swarm best");
                    *best = particle.snapshot();
                }
            }
        }

        self.phase = Phase::Tracking;
        Ok(())
    }

    /// Move every particle towards the bests captured by [`Swarm::track_bests`]
    pub fn update(&mut self) -> Result<()> {
        self.expect_phase(Phase::Tracking)?;

        let (phi1, phi2) = (self.config.phi1, self.config.phi2);
        for particle in self.particles.iter_mut() {
            particle.update(&self.global_best, phi1, phi2, &mut self.rng)?;
        }

        self.generation += 1;
        self.phase = if self.generation >= self.config.generation_count {
            Phase::Terminated
        } else {
            Phase::Updating
        };

        debug!(
            generation = self.generation,
            best = ?self.best_fitness(),
            "generation complete"
        );
        Ok(())
    }

    /// Run one full generation
    pub fn step(&mut self, objectives: &[&dyn Objective; M]) -> Result<()> {
        self.evaluate(objectives)?;
        self.track_bests()?;
        self.update()
    }

    /// Run the remaining generations, reporting each one to `observer`
    pub fn run(
        &mut self,
        objectives: &[&dyn Objective; M],
        observer: &mut dyn GenerationObserver<M>,
    ) -> Result<SwarmResult<M>> {
        let names: Vec<&str> = objectives.iter().map(|o| o.name()).collect();
        info!(
            objectives = ?names,
            population = self.particles.len(),
            generations = self.config.generation_count,
            reset_per_generation = self.config.reset_per_generation,
            "starting swarm"
        );

        while self.phase != Phase::Terminated {
            self.step(objectives)?;
            observer
                .on_generation(&self.report())
                .map_err(SwarmError::Observer)?;
        }

        info!(
            generations = self.generation,
            evaluations = self.evaluations,
            best = ?self.best_fitness(),
            "swarm finished"
        );
        Ok(self.result())
    }

    pub fn report(&self) -> GenerationReport<'_, M> {
        GenerationReport {
            generation: self.generation,
            evaluations: self.evaluations,
            particles: &self.particles,
            global_best: &self.global_best,
        }
    }

    pub fn result(&self) -> SwarmResult<M> {
        SwarmResult {
            generations: self.generation,
            evaluations: self.evaluations,
            best: self.global_best.clone(),
        }
    }

    /// Swarm best fitness per objective, `None` where unset
    fn best_fitness(&self) -> [Option<f64>; M] {
        std::array::from_fn(|k| self.global_best[k].as_ref().map(|b| b.objective(k)))
    }
}

fn check_arity<const M: usize>() -> Result<()> {
    if M == 0 {
        return Err(SwarmError::Config("at least one objective is required".into()));
    }
    Ok(())
}
