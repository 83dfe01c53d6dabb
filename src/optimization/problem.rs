//! Objective interface and the benchmark landscapes the swarm is run against.
//!
//! Objectives are pure, deterministic functions of a position. The swarm never inspects
//! them beyond calling [`Objective::cost`].

use std::f64::consts::PI;

/// A scalar objective to minimize
pub trait Objective {
    /// Short display name used in logs and errors
    fn name(&self) -> &str;

    /// Evaluate the objective at `position`
    fn cost(&self, position: &[f64]) -> Result<f64, String>;
}

/// Wraps a closure as an [`Objective`]
pub struct FnObjective<F> {
    name: String,
    func: F,
}

impl<F> FnObjective<F>
where
    F: Fn(&[f64]) -> Result<f64, String>,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Objective for FnObjective<F>
where
    F: Fn(&[f64]) -> Result<f64, String>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn cost(&self, position: &[f64]) -> Result<f64, String> {
        (self.func)(position)
    }
}

// ===== BENCHMARK LANDSCAPES =====

/// Schwefel function. Global minimum 0 at `x_i = 420.968746...`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Schwefel;

impl Schwefel {
    pub const OPTIMUM: f64 = 420.968_746_359_982_0;
}

impl Objective for Schwefel {
    fn name(&self) -> &str {
        "schwefel"
    }

    fn cost(&self, position: &[f64]) -> Result<f64, String> {
        let n = position.len() as f64;
        let sum: f64 = position.iter().map(|x| x * x.abs().sqrt().sin()).sum();
        Ok(418.982_887_272_433_9 * n - sum)
    }
}

/// Himmelblau function, two dimensions only. Four global minima of value 0, one at (3, 2).
#[derive(Clone, Copy, Debug, Default)]
pub struct Himmelblau;

impl Objective for Himmelblau {
    fn name(&self) -> &str {
        "himmelblau"
    }

    fn cost(&self, position: &[f64]) -> Result<f64, String> {
        match position {
            [x, y] => Ok((x * x + y - 11.0).powi(2) + (x + y * y - 7.0).powi(2)),
            _ => Err(format!(
                "Himmelblau is defined in 2 dimensions, got {}",
                position.len()
            )),
        }
    }
}

/// Rastrigin function. Global minimum 0 at the origin.
#[derive(Clone, Copy, Debug, Default)]
pub struct Rastrigin;

impl Objective for Rastrigin {
    fn name(&self) -> &str {
        "rastrigin"
    }

    fn cost(&self, position: &[f64]) -> Result<f64, String> {
        let n = position.len() as f64;
        Ok(10.0 * n
            + position
                .iter()
                .map(|x| x * x - 10.0 * (2.0 * PI * x).cos())
                .sum::<f64>())
    }
}
