use crate::core::{Bounds, Result, SwarmError};
use rand::Rng;

/// Copy of a particle's position and fitness, taken when it was best
///
/// Fields are private so a snapshot never changes after it is taken.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot<const M: usize> {
    position: Vec<f64>,
    fitness: [f64; M],
}

impl<const M: usize> Snapshot<M> {
    pub fn position(&self) -> &[f64] {
        &self.position
    }

    pub fn fitness(&self) -> &[f64; M] {
        &self.fitness
    }

    /// Fitness on objective `k`
    pub fn objective(&self, k: usize) -> f64 {
        self.fitness[k]
    }
}

/// One swarm member, minimizing `M` objectives
///
/// `Particle<1>` keeps one personal best, `Particle<2>` keeps one per objective and
/// lets both pull on its velocity.
#[derive(Clone, Debug)]
pub struct Particle<const M: usize> {
    position: Vec<f64>,
    velocity: Vec<f64>,
    position_bounds: Bounds,
    velocity_bounds: Bounds,
    fitness: Option<[f64; M]>,
    personal_best: [Option<Snapshot<M>>; M],
}

impl<const M: usize> Particle<M> {
    /// Draw a particle uniformly within the bounds
    ///
    /// Each position component comes from `position_bounds`, each velocity component from
    /// `velocity_bounds`. Bounds must satisfy `min <= max`.
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        dimensions: usize,
        position_bounds: Bounds,
        velocity_bounds: Bounds,
    ) -> Self {
        let position = (0..dimensions)
            .map(|_| rng.gen_range(position_bounds.min..=position_bounds.max))
            .collect();
        let velocity = (0..dimensions)
            .map(|_| rng.gen_range(velocity_bounds.min..=velocity_bounds.max))
            .collect();

        Self {
            position,
            velocity,
            position_bounds,
            velocity_bounds,
            fitness: None,
            personal_best: std::array::from_fn(|_| None),
        }
    }

    /// Build a particle at a known position and velocity
    pub fn new(
        position: Vec<f64>,
        velocity: Vec<f64>,
        position_bounds: Bounds,
        velocity_bounds: Bounds,
    ) -> Result<Self> {
        if position.len() != velocity.len() {
            return Err(SwarmError::Config(format!(
                "position has {} dimensions but velocity has {}",
                position.len(),
                velocity.len()
            )));
        }

        Ok(Self {
            position,
            velocity,
            position_bounds,
            velocity_bounds,
            fitness: None,
            personal_best: std::array::from_fn(|_| None),
        })
    }

    pub fn dimensions(&self) -> usize {
        self.position.len()
    }

    pub fn position(&self) -> &[f64] {
        &self.position
    }

    pub fn velocity(&self) -> &[f64] {
        &self.velocity
    }

    pub fn position_bounds(&self) -> Bounds {
        self.position_bounds
    }

    pub fn velocity_bounds(&self) -> Bounds {
        self.velocity_bounds
    }

    /// Fitness from the latest evaluation, `None` before the first one
    pub fn fitness(&self) -> Option<&[f64; M]> {
        self.fitness.as_ref()
    }

    pub fn personal_best(&self, k: usize) -> Option<&Snapshot<M>> {
        self.personal_best.get(k).and_then(Option::as_ref)
    }

    pub fn personal_bests(&self) -> &[Option<Snapshot<M>>; M] {
        &self.personal_best
    }

    /// Store the fitness of the current position
    pub fn assign_fitness(&mut self, fitness: [f64; M]) {
        self.fitness = Some(fitness);
    }

    /// Snapshot of the current position and fitness
    pub fn snapshot(&self) -> Option<Snapshot<M>> {
        self.fitness.map(|fitness| Snapshot {
            position: self.position.clone(),
            fitness,
        })
    }

    /// Replace each personal best the current fitness strictly improves on
    ///
    /// Objectives are tracked independently. Returns which ones were replaced; an
    /// unevaluated particle replaces nothing.
    pub fn track_personal_best(&mut self) -> [bool; M] {
        let mut improved = [false; M];
        let Some(fitness) = self.fitness else {
            return improved;
        };

        for (k, best) in self.personal_best.iter_mut().enumerate() {
            if improves(&fitness, best.as_ref(), k) {
                *best = Some(Snapshot {
                    position: self.position.clone(),
                    fitness,
                });
                improved[k] = true;
            }
        }

        improved
    }

    /// Move the particle one step
    ///
    /// Per dimension and per objective `k`, the velocity gains
    /// `U(0, phi1) * (personal_k - x) + U(0, phi2) * (global_k - x)`, with a fresh draw for
    /// every term. Velocity is then clamped, added to the position, and the position clamped.
    ///
    /// Both weights must be non-negative.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        global_best: &[Option<Snapshot<M>>; M],
        phi1: f64,
        phi2: f64,
        rng: &mut R,
    ) -> Result<()> {
        let mut personal = Vec::with_capacity(M);
        for (k, best) in self.personal_best.iter().enumerate() {
            personal.push(best.as_ref().ok_or(SwarmError::NotEvaluated { objective: k })?);
        }
        let mut global = Vec::with_capacity(M);
        for (k, best) in global_best.iter().enumerate() {
            global.push(best.as_ref().ok_or(SwarmError::NoGlobalBest { objective: k })?);
        }

        for i in 0..self.position.len() {
            let x = self.position[i];
            let mut pull = 0.0;
            for k in 0..M {
                let r_personal = rng.gen_range(0.0..=phi1);
                let r_global = rng.gen_range(0.0..=phi2);
                pull += r_personal * (personal[k].position[i] - x)
                    + r_global * (global[k].position[i] - x);
            }

            let velocity = self.velocity_bounds.clamp(self.velocity[i] + pull);
            self.velocity[i] = velocity;
            self.position[i] = self.position_bounds.clamp(x + velocity);
        }

        Ok(())
    }
}

/// Strict improvement on objective `k`; an unset best is always improved on
#[inline]
pub(crate) fn improves<const M: usize>(
    fitness: &[f64; M],
    best: Option<&Snapshot<M>>,
    k: usize,
) -> bool {
    best.is_none_or(|b| fitness[k] < b.fitness[k])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bounds() -> (Bounds, Bounds) {
        (Bounds::new(-10.0, 10.0), Bounds::new(-1.0, 1.0))
    }

    fn evaluated(position: Vec<f64>, velocity: Vec<f64>, fitness: f64) -> Particle<1> {
        let (pb, vb) = bounds();
        let mut particle = Particle::new(position, velocity, pb, vb).unwrap();
        particle.assign_fitness([fitness]);
        particle.track_personal_best();
        particle
    }

    #[test]
    fn random_particles_start_inside_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let (pb, vb) = bounds();
        for _ in 0..100 {
            let particle: Particle<2> = Particle::random(&mut rng, 3, pb, vb);
            assert_eq!(particle.dimensions(), 3);
            assert_eq!(particle.velocity().len(), 3);
            assert!(particle.position().iter().all(|&x| pb.contains(x)));
            assert!(particle.velocity().iter().all(|&v| vb.contains(v)));
            assert!(particle.fitness().is_none());
            assert!(particle.personal_best(0).is_none());
            assert!(particle.personal_best(1).is_none());
        }
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let (pb, vb) = bounds();
        assert!(Particle::<1>::new(vec![0.0, 1.0], vec![0.0], pb, vb).is_err());
    }

    #[test]
    fn personal_best_only_moves_on_strict_improvement() {
        let mut particle = evaluated(vec![1.0, 1.0], vec![0.0, 0.0], 5.0);
        let first = particle.personal_best(0).unwrap().clone();

        particle.position = vec![2.0, 2.0];
        particle.assign_fitness([5.0]);
        assert_eq!(particle.track_personal_best(), [false]);
        assert_eq!(particle.personal_best(0), Some(&first));

        particle.assign_fitness([4.0]);
        assert_eq!(particle.track_personal_best(), [true]);
        assert_eq!(particle.personal_best(0).unwrap().position(), &[2.0, 2.0]);
        assert_eq!(particle.personal_best(0).unwrap().objective(0), 4.0);
    }

    #[test]
    fn objectives_are_tracked_independently() {
        let (pb, vb) = bounds();
        let mut particle: Particle<2> = Particle::new(vec![0.0, 0.0], vec![0.0, 0.0], pb, vb).unwrap();
        particle.assign_fitness([3.0, 3.0]);
        assert_eq!(particle.track_personal_best(), [true, true]);

        particle.position = vec![1.0, 0.0];
        particle.assign_fitness([1.0, 9.0]);
        assert_eq!(particle.track_personal_best(), [true, false]);

        assert_eq!(particle.personal_best(0).unwrap().position(), &[1.0, 0.0]);
        assert_eq!(particle.personal_best(1).unwrap().position(), &[0.0, 0.0]);
        assert_eq!(particle.personal_best(1).unwrap().fitness(), &[3.0, 3.0]);
    }

    #[test]
    fn snapshot_does_not_follow_the_live_particle() {
        let mut particle = evaluated(vec![1.0, -1.0], vec![0.5, 0.5], 2.0);
        let snapshot = particle.snapshot().unwrap();

        particle.position[0] = 9.0;
        particle.position[1] = 9.0;

        assert_eq!(snapshot.position(), &[1.0, -1.0]);
        assert_eq!(particle.personal_best(0).unwrap().position(), &[1.0, -1.0]);
    }

    #[test]
    fn update_requires_tracked_bests() {
        let mut rng = StdRng::seed_from_u64(1);
        let (pb, vb) = bounds();
        let mut particle: Particle<1> = Particle::random(&mut rng, 2, pb, vb);
        let global = [None];
        let err = particle.update(&global, 2.0, 2.0, &mut rng).unwrap_err();
        assert!(matches!(err, SwarmError::NotEvaluated { objective: 0 }));

        particle.assign_fitness([1.0]);
        particle.track_personal_best();
        let err = particle.update(&global, 2.0, 2.0, &mut rng).unwrap_err();
        assert!(matches!(err, SwarmError::NoGlobalBest { objective: 0 }));
    }

    #[test]
    fn zero_weights_keep_velocity_constant() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut particle = evaluated(vec![0.0, 0.0], vec![0.75, -0.25], 1.0);
        let global = [particle.snapshot()];

        let mut previous = particle.position().to_vec();
        for _ in 0..8 {
            particle.update(&global, 0.0, 0.0, &mut rng).unwrap();
            assert_eq!(particle.velocity(), &[0.75, -0.25]);
            assert!(particle.position()[0] >= previous[0]);
            previous = particle.position().to_vec();
        }
        assert_eq!(particle.position(), &[6.0, -2.0]);

        for _ in 0..10 {
            particle.update(&global, 0.0, 0.0, &mut rng).unwrap();
        }
        assert_eq!(particle.position()[0], 10.0);
    }

    #[test]
    fn velocity_saturates_at_its_bound() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut particle = evaluated(vec![-9.0, -9.0], vec![1.0, 1.0], 1.0);
        let (pb, vb) = bounds();
        let mut leader = Particle::<1>::new(vec![9.0, 9.0], vec![0.0, 0.0], pb, vb).unwrap();
        leader.assign_fitness([0.0]);
        let global = [leader.snapshot()];

        particle.update(&global, 2.0, 2.0, &mut rng).unwrap();
        assert_eq!(particle.velocity(), &[1.0, 1.0]);
        assert_eq!(particle.position(), &[-8.0, -8.0]);
    }

    #[test]
    fn update_stays_within_bounds() {
        let mut rng = StdRng::seed_from_u64(5);
        let (pb, vb) = bounds();
        let mut particle: Particle<2> = Particle::random(&mut rng, 2, pb, vb);
        particle.assign_fitness([1.0, 2.0]);
        particle.track_personal_best();

        let mut far = Particle::<2>::new(vec![10.0, -10.0], vec![0.0, 0.0], pb, vb).unwrap();
        far.assign_fitness([0.0, 0.0]);
        let global = [far.snapshot(), far.snapshot()];

        for _ in 0..200 {
            particle.update(&global, 2.0, 2.0, &mut rng).unwrap();
            assert!(particle.position().iter().all(|&x| pb.contains(x)));
            assert!(particle.velocity().iter().all(|&v| vb.contains(v)));
        }
    }

    fn snapshot(position: Vec<f64>) -> Option<Snapshot<2>> {
        Some(Snapshot {
            position,
            fitness: [0.0, 0.0],
        })
    }

    #[test]
    fn both_objectives_pull_in_draw_order() {
        let wide = Bounds::new(-100.0, 100.0);
        let mut particle: Particle<2> =
            Particle::new(vec![0.0, 0.0], vec![0.5, -0.5], wide, wide).unwrap();
        particle.assign_fitness([1.0, 1.0]);
        particle.personal_best = [snapshot(vec![1.0, 2.0]), snapshot(vec![-3.0, 4.0])];
        let global = [snapshot(vec![5.0, -1.0]), snapshot(vec![-2.0, -6.0])];
        let (phi1, phi2) = (1.5, 2.5);

        let mut replay = StdRng::seed_from_u64(21);
        let mut expected = Vec::new();
        for (i, v) in [0.5, -0.5].into_iter().enumerate() {
            let p1 = [1.0, 2.0][i];
            let g1 = [5.0, -1.0][i];
            let p2 = [-3.0, 4.0][i];
            let g2 = [-2.0, -6.0][i];

            let mut pull = 0.0;
            let (r_p1, r_g1): (f64, f64) =
                (replay.gen_range(0.0..=phi1), replay.gen_range(0.0..=phi2));
            pull += r_p1 * p1 + r_g1 * g1;
            let (r_p2, r_g2): (f64, f64) =
                (replay.gen_range(0.0..=phi1), replay.gen_range(0.0..=phi2));
            pull += r_p2 * p2 + r_g2 * g2;
            expected.push(v + pull);
        }

        let mut rng = StdRng::seed_from_u64(21);
        particle.update(&global, phi1, phi2, &mut rng).unwrap();
        assert_eq!(particle.velocity(), expected.as_slice());
        assert_eq!(particle.position(), expected.as_slice());
    }

    #[test]
    fn second_objective_alone_moves_the_particle() {
        let wide = Bounds::new(-100.0, 100.0);
        let mut particle: Particle<2> =
            Particle::new(vec![1.0, 1.0], vec![0.0, 0.0], wide, wide).unwrap();
        particle.assign_fitness([1.0, 1.0]);
        particle.personal_best = [snapshot(vec![1.0, 1.0]), snapshot(vec![4.0, 4.0])];
        let global = [snapshot(vec![1.0, 1.0]), snapshot(vec![6.0, 6.0])];

        let mut rng = StdRng::seed_from_u64(4);
        particle.update(&global, 2.0, 2.0, &mut rng).unwrap();
        assert!(particle.velocity().iter().all(|&v| v > 0.0));
        assert!(particle.position().iter().all(|&x| x > 1.0));
    }
}
