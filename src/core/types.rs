use super::constraints::validate_config;
use super::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ===== BOUNDS =====

/// Closed interval applied uniformly to every dimension
///
/// `min <= max` is a precondition; [`validate_config`] rejects anything else.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Saturate `value` to the nearest bound
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }
}

// ===== SWARM CONFIGURATION =====

/// Everything the generational loop needs. No field has a default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SwarmConfig {
    /// Problem dimensionality
    pub dimensions: usize,
    /// Position bounds, shared by every dimension
    pub position: Bounds,
    /// Velocity bounds, shared by every dimension
    pub velocity: Bounds,
    pub population_size: usize,
    pub generation_count: u32,
    /// Clear the swarm best before every generation instead of keeping it across generations
    pub reset_per_generation: bool,
    /// Upper bound of the random pull towards personal bests
    pub phi1: f64,
    /// Upper bound of the random pull towards swarm bests
    pub phi2: f64,
    /// Seed for a reproducible run; entropy-seeded when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SwarmConfig {
    /// Single-objective Schwefel run: speed [-1, 1], position [-500, 500]
    pub fn schwefel() -> Self {
        Self {
            dimensions: 2,
            position: Bounds::new(-500.0, 500.0),
            velocity: Bounds::new(-1.0, 1.0),
            population_size: 25,
            generation_count: 250,
            reset_per_generation: false,
            phi1: 2.0,
            phi2: 2.0,
            seed: None,
        }
    }

    /// Two-objective Himmelblau + Rastrigin run: speed [-0.5, 0.5], position [-5, 5]
    pub fn himmelblau_rastrigin() -> Self {
        Self {
            position: Bounds::new(-5.0, 5.0),
            velocity: Bounds::new(-0.5, 0.5),
            ..Self::schwefel()
        }
    }

    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    pub fn with_generation_count(mut self, count: u32) -> Self {
        self.generation_count = count;
        self
    }

    pub fn with_reset_per_generation(mut self, reset: bool) -> Self {
        self.reset_per_generation = reset;
        self
    }

    pub fn with_phi(mut self, phi1: f64, phi2: f64) -> Self {
        self.phi1 = phi1;
        self.phi2 = phi2;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load and validate a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: SwarmConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_config(self)
    }
}
