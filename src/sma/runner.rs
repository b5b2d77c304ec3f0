//! SMA iteration loop.

use super::config::{PositionInit, SmaConfig};
use crate::error::{OptimizeError, Result};
use crate::objective::{evaluate_batch, Objective};
use crate::optimizer::{Direction, GlobalBest, History, Optimizer, RunSummary};
use crate::random::create_rng;
use crate::space::SearchSpace;
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, info};

/// Slime-mold-inspired optimizer.
///
/// Each agent moves by
///
/// ```text
/// delta = c1·r1·(best − x) + c2·(2·r2 − 1)
/// x    += w·delta
/// ```
///
/// with `r1, r2 ~ U[0, 1]` drawn per agent and per dimension, then clamped
/// into the bounds. This is a simplified update after Li et al. (2020),
/// "Slime mould algorithm: A new method for stochastic optimization".
pub struct SlimeMold {
    config: SmaConfig,
    space: SearchSpace,
    rng: StdRng,
    objective: Option<Arc<dyn Objective>>,
    w: f64,
    positions: Vec<Vec<f64>>,
    fitness: Vec<f64>,
    best: GlobalBest,
    history: History,
    fitness_history: Vec<f64>,
}

impl SlimeMold {
    /// Validates `config` and places the agents.
    pub fn new(config: SmaConfig) -> Result<Self> {
        config.validate()?;
        let space = config.space()?;
        let mut rng = create_rng(config.seed);

        let positions: Vec<Vec<f64>> = match config.position_init {
            PositionInit::Uniform => (0..config.population_size)
                .map(|_| space.sample(&mut rng))
                .collect(),
            PositionInit::Zero => {
                let mut origin = vec![0.0; config.dim];
                space.clamp(&mut origin);
                vec![origin; config.population_size]
            }
        };

        debug!(
            agents = config.population_size,
            dim = config.dim,
            seed = config.seed,
            init = ?config.position_init,
            "SMA initialized"
        );

        Ok(Self {
            w: config.inertia_decay.map_or(config.w, |d| d.w_start),
            fitness: vec![config.direction.worst(); config.population_size],
            best: GlobalBest::new(config.dim, config.direction),
            config,
            space,
            rng,
            objective: None,
            positions,
            history: History::new(),
            fitness_history: Vec::new(),
        })
    }

    pub fn config(&self) -> &SmaConfig {
        &self.config
    }

    /// Current inertia weight.
    pub fn inertia(&self) -> f64 {
        self.w
    }

    /// Fitness of each agent from the latest evaluation.
    pub fn fitness(&self) -> &[f64] {
        &self.fitness
    }

    /// Moves every agent one step toward the current best without
    /// evaluating the objective.
    ///
    /// Useful for stepping through the dynamics by hand; `optimize` uses
    /// the same update.
    pub fn update_positions(&mut self) {
        self.positions = self.advance();
    }

    fn advance(&mut self) -> Vec<Vec<f64>> {
        let (c1, c2, w) = (self.config.c1, self.config.c2, self.w);
        let mut positions = self.positions.clone();
        for x in positions.iter_mut() {
            for (d, xd) in x.iter_mut().enumerate() {
                let r1: f64 = self.rng.random();
                let r2: f64 = self.rng.random();
                let delta = c1 * r1 * (self.best.position[d] - *xd) + c2 * (2.0 * r2 - 1.0);
                *xd += w * delta;
            }
            self.space.clamp(x);
        }
        positions
    }
}

impl Optimizer for SlimeMold {
    fn set_objective(&mut self, objective: Box<dyn Objective>) {
        self.objective = Some(Arc::from(objective));
    }

    fn optimize(&mut self, iterations: Option<usize>) -> Result<RunSummary> {
        let objective = self
            .objective
            .clone()
            .ok_or(OptimizeError::ObjectiveNotSet)?;
        let total = iterations.unwrap_or(self.config.max_iterations);
        if let Some(decay) = &self.config.inertia_decay {
            decay.check_budget(total)?;
        }
        let n = self.config.population_size;
        let direction = self.config.direction;
        debug!(iterations = total, "SMA run started");

        self.fitness = evaluate_batch(objective.as_ref(), &self.positions, self.config.parallel)?;
        self.best.offer_all(&self.positions, &self.fitness, direction);
        let mut evaluations = n;

        self.fitness_history.push(self.best.fitness);
        if self.config.record_history {
            self.history.record(&self.positions);
        }

        for t in 0..total {
            if let Some(decay) = &self.config.inertia_decay {
                self.w = decay.weight_at(t, total);
            }

            let positions = self.advance();
            let fitness = evaluate_batch(objective.as_ref(), &positions, self.config.parallel)?;
            self.best.offer_all(&positions, &fitness, direction);
            self.positions = positions;
            self.fitness = fitness;
            evaluations += n;

            self.fitness_history.push(self.best.fitness);
            if self.config.verbose {
                info!(iteration = t + 1, best_fitness = self.best.fitness, "SMA iteration");
            }
            if self.config.record_history {
                self.history.record(&self.positions);
            }
        }

        if !self.config.record_history {
            self.history.record(&self.positions);
        }

        debug!(
            iterations = total,
            evaluations,
            best_fitness = self.best.fitness,
            "SMA run finished"
        );

        Ok(RunSummary {
            iterations: total,
            evaluations,
            best_fitness: self.best.fitness,
            best_solution: self.best.position.clone(),
        })
    }

    fn best_solution(&self) -> &[f64] {
        &self.best.position
    }

    fn best_fitness(&self) -> f64 {
        self.best.fitness
    }

    fn population_history(&self) -> &History {
        &self.history
    }

    fn fitness_history(&self) -> &[f64] {
        &self.fitness_history
    }

    fn population(&self) -> &[Vec<f64>] {
        &self.positions
    }

    fn space(&self) -> &SearchSpace {
        &self.space
    }

    fn direction(&self) -> Direction {
        self.config.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inertia::InertiaDecay;

    fn sphere(x: &[f64]) -> f64 {
        x.iter().map(|v| v * v).sum()
    }

    fn sphere_sma(config: SmaConfig) -> SlimeMold {
        let mut sma = SlimeMold::new(config).unwrap();
        sma.set_objective(Box::new(sphere));
        sma
    }

    #[test]
    fn test_decay_single_iteration_budget_rejected() {
        let config = SmaConfig::new(2, -10.0, 10.0)
            .with_inertia_decay(InertiaDecay::new(0.9, 0.4))
            .with_max_iterations(1);
        assert!(matches!(
            SlimeMold::new(config),
            Err(OptimizeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_decay_single_iteration_call_rejected() {
        let config = SmaConfig::new(2, -10.0, 10.0)
            .with_inertia_decay(InertiaDecay::new(0.9, 0.4))
            .with_max_iterations(10);
        let mut sma = sphere_sma(config);
        assert!(matches!(
            sma.optimize(Some(1)),
            Err(OptimizeError::InvalidConfig(_))
        ));
        assert!(sma.optimize(Some(10)).is_ok());
        assert!((sma.inertia() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_sphere_improves() {
        let mut sma = sphere_sma(SmaConfig::new(2, -10.0, 10.0).with_seed(3));
        sma.optimize(Some(100)).unwrap();
        let trace = sma.fitness_history();
        assert!(trace[trace.len() - 1] < trace[0]);
        assert!(sma.best_fitness() < 1.0, "got {}", sma.best_fitness());
    }

    #[test]
    fn test_zero_init_clamped_into_box() {
        let config = SmaConfig::new(2, 1.0, 3.0).with_position_init(PositionInit::Zero);
        let sma = SlimeMold::new(config).unwrap();
        for x in sma.population() {
            assert_eq!(x, &vec![1.0, 1.0]);
        }
    }

    #[test]
    fn test_zero_init_origin_inside() {
        let config = SmaConfig::new(3, -1.0, 1.0).with_position_init(PositionInit::Zero);
        let sma = SlimeMold::new(config).unwrap();
        assert!(sma.population().iter().flatten().all(|&v| v == 0.0));
    }

    #[test]
    fn test_update_positions_stays_in_bounds() {
        let mut sma = SlimeMold::new(SmaConfig::new(4, -0.5, 0.5).with_coefficients(5.0, 5.0)).unwrap();
        for _ in 0..20 {
            sma.update_positions();
            for x in sma.population() {
                assert!(sma.space().contains(x));
            }
        }
        assert!(sma.fitness_history().is_empty());
    }

    #[test]
    fn test_history_lengths() {
        let mut sma = sphere_sma(SmaConfig::new(2, -5.0, 5.0).with_record_history(true));
        sma.optimize(Some(15)).unwrap();
        assert_eq!(sma.population_history().len(), 16);

        let mut sma = sphere_sma(SmaConfig::new(2, -5.0, 5.0));
        sma.optimize(Some(15)).unwrap();
        assert_eq!(sma.population_history().len(), 1);
    }

    #[test]
    fn test_objective_not_set() {
        let mut sma = SlimeMold::new(SmaConfig::new(2, -5.0, 5.0)).unwrap();
        assert_eq!(sma.optimize(Some(3)), Err(OptimizeError::ObjectiveNotSet));
    }
}
