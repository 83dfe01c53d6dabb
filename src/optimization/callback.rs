use super::solvers::particle::Particle;
use super::solvers::traits::{GenerationObserver, GenerationReport};
use crate::stats::{Logbook, Statistics};

/// Swarm best of one generation
#[derive(Debug, Clone)]
pub struct IterationResult {
    pub generation: u32,
    /// Best position per objective
    pub params: Vec<Vec<f64>>,
    /// Best fitness per objective
    pub costs: Vec<f64>,
}

/// Callback that fills a logbook and keeps the swarm-best history of a run
pub struct LogbookCallback<const M: usize> {
    verbose: bool,
    logbook: Logbook,
    history: Vec<IterationResult>,
}

impl<const M: usize> LogbookCallback<M> {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            logbook: Logbook::new(M),
            history: Vec::new(),
        }
    }

    pub fn logbook(&self) -> &Logbook {
        &self.logbook
    }

    /// Get generation history
    pub fn history(&self) -> &[IterationResult] {
        &self.history
    }

    /// Print the final swarm bests, the population and the best-fitness history
    pub fn print_summary(&self, particles: &[Particle<M>]) {
        println!("\n{}", "=".repeat(80));
        println!("OPTIMIZATION SUMMARY");
        println!("{}", "=".repeat(80));

        println!("Total Generations: {}", self.history.len());
        if let Some(record) = self.logbook.records().last() {
            println!("Total Evaluations: {}", record.evals);
        }

        if let Some(last) = self.history.last() {
            for (k, (params, cost)) in last.params.iter().zip(&last.costs).enumerate() {
                println!(
                    "\nBest for objective {}: {:.6e} at {}",
                    k + 1,
                    cost,
                    format_position(params)
                );
            }
        }

        print_population("Final population", particles);

        println!("\nGeneration History:");
        let header: String = (1..=M).map(|k| format!(" {:<16}", format!("Best {}", k))).collect();
        println!("{:<8}{}", "Gen", header);
        println!("{}", "-".repeat(8 + 17 * M));
        for result in &self.history {
            let costs: String = result.costs.iter().map(|c| format!(" {:<16.6e}", c)).collect();
            println!("{:<8}{}", result.generation, costs);
        }

        println!("\n{}\n", "=".repeat(80));
    }
}

impl<const M: usize> GenerationObserver<M> for LogbookCallback<M> {
    fn on_generation(&mut self, report: &GenerationReport<'_, M>) -> Result<(), String> {
        let mut stats = Vec::with_capacity(M);
        for k in 0..M {
            let column = report.fitness_values(k);
            let summary = Statistics::compute(&column)
                .ok_or_else(|| format!("No fitness values in generation {}", report.generation))?;
            stats.push(summary);
        }
        self.logbook.record(report.generation, report.particles.len(), &stats);

        let mut params = Vec::with_capacity(M);
        let mut costs = Vec::with_capacity(M);
        for (k, best) in report.global_best.iter().enumerate() {
            let best = best
                .as_ref()
                .ok_or_else(|| format!("No swarm best for objective {}", k + 1))?;
            params.push(best.position().to_vec());
            costs.push(best.objective(k));
        }
        self.history.push(IterationResult {
            generation: report.generation,
            params,
            costs,
        });

        if self.verbose {
            let lines = self.logbook.stream();
            if !lines.is_empty() {
                println!("{}", lines);
            }
        }

        Ok(())
    }
}

/// Print one line per particle with its position and latest fitness
pub fn print_population<const M: usize>(label: &str, particles: &[Particle<M>]) {
    println!("\n{} ({} particles):", label, particles.len());
    for (i, particle) in particles.iter().enumerate() {
        let fitness = match particle.fitness() {
            Some(values) => values
                .iter()
                .map(|v| format!("{:.6e}", v))
                .collect::<Vec<_>>()
                .join(", "),
            None => "-".to_string(),
        };
        println!("  {:>3}  {:<40} {}", i, format_position(particle.position()), fitness);
    }
}

fn format_position(position: &[f64]) -> String {
    let coords: Vec<String> = position.iter().map(|x| format!("{:.4}", x)).collect();
    format!("({})", coords.join(", "))
}
