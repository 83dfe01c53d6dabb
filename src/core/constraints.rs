use super::error::{Result, SwarmError};
use super::types::{Bounds, SwarmConfig};

/// Check a single bounds pair
///
/// Both ends must be finite, `min <= max`, and the width must fit in an `f64`.
fn validate_bounds(name: &str, bounds: &Bounds) -> Result<()> {
    if !bounds.min.is_finite() || !bounds.max.is_finite() {
        return Err(SwarmError::Config(format!(
            "{} bounds must be finite, got [{}, {}]",
            name, bounds.min, bounds.max
        )));
    }
    if bounds.min > bounds.max {
        return Err(SwarmError::Config(format!(
            "{} minimum {} is greater than maximum {}",
            name, bounds.min, bounds.max
        )));
    }
    if !bounds.width().is_finite() {
        return Err(SwarmError::Config(format!(
            "{} bounds [{}, {}] are too wide to sample",
            name, bounds.min, bounds.max
        )));
    }
    Ok(())
}

fn validate_weight(name: &str, phi: f64) -> Result<()> {
    if !phi.is_finite() || phi < 0.0 {
        return Err(SwarmError::Config(format!(
            "{} must be a finite non-negative weight, got {}",
            name, phi
        )));
    }
    Ok(())
}

/// Validate a swarm configuration
///
/// Fails fast on the first violated precondition, nothing is coerced.
pub fn validate_config(config: &SwarmConfig) -> Result<()> {
    if config.dimensions == 0 {
        return Err(SwarmError::Config("dimensions must be positive".into()));
    }
    if config.population_size == 0 {
        return Err(SwarmError::Config("population size must be positive".into()));
    }
    if config.generation_count == 0 {
        return Err(SwarmError::Config("generation count must be positive".into()));
    }

    validate_bounds("position", &config.position)?;
    validate_bounds("velocity", &config.velocity)?;
    validate_weight("phi1", config.phi1)?;
    validate_weight("phi2", config.phi2)?;

    Ok(())
}
