//! PSO iteration loop.

use super::config::{PsoConfig, Topology, VelocityInit};
use crate::error::{OptimizeError, Result};
use crate::objective::{evaluate_batch, Objective};
use crate::optimizer::{Direction, GlobalBest, History, Optimizer, RunSummary};
use crate::random::create_rng;
use crate::space::SearchSpace;
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, info};

/// Particle Swarm Optimizer.
///
/// Each particle's velocity is updated as
///
/// ```text
/// v = w·v + c1·r1·(pbest − x) + c2·r2·(guide − x)
/// ```
///
/// where `r1, r2 ~ U[0, 1]` are drawn per particle and per dimension and
/// `guide` is the global best (global topology) or the best personal best
/// in the particle's ring neighborhood.
///
/// # References
///
/// - Kennedy & Eberhart (1995), "Particle Swarm Optimization"
/// - Shi & Eberhart (1998), "A Modified Particle Swarm Optimizer"
pub struct ParticleSwarm {
    config: PsoConfig,
    space: SearchSpace,
    rng: StdRng,
    objective: Option<Arc<dyn Objective>>,
    w: f64,
    positions: Vec<Vec<f64>>,
    velocities: Vec<Vec<f64>>,
    pbest_positions: Vec<Vec<f64>>,
    pbest_fitness: Vec<f64>,
    best: GlobalBest,
    history: History,
    fitness_history: Vec<f64>,
}

impl ParticleSwarm {
    /// Validates `config` and places the particles.
    pub fn new(config: PsoConfig) -> Result<Self> {
        config.validate()?;
        let space = config.space()?;
        let mut rng = create_rng(config.seed);

        let n = config.population_size;
        let vel_range = space.range() * 0.1;
        let mut positions = Vec::with_capacity(n);
        let mut velocities = Vec::with_capacity(n);
        for _ in 0..n {
            let mut x = Vec::with_capacity(config.dim);
            let mut v = Vec::with_capacity(config.dim);
            for _ in 0..config.dim {
                x.push(space.sample_value(&mut rng));
                v.push(match config.velocity_init {
                    VelocityInit::Random => rng.random_range(-vel_range..vel_range),
                    VelocityInit::Zero => 0.0,
                });
            }
            positions.push(x);
            velocities.push(v);
        }

        debug!(
            particles = n,
            dim = config.dim,
            seed = config.seed,
            topology = ?config.topology,
            "PSO initialized"
        );

        Ok(Self {
            w: config.inertia_decay.map_or(config.w, |d| d.w_start),
            pbest_positions: positions.clone(),
            pbest_fitness: vec![config.direction.worst(); n],
            best: GlobalBest::new(config.dim, config.direction),
            config,
            space,
            rng,
            objective: None,
            positions,
            velocities,
            history: History::new(),
            fitness_history: Vec::new(),
        })
    }

    pub fn config(&self) -> &PsoConfig {
        &self.config
    }

    /// Current inertia weight.
    pub fn inertia(&self) -> f64 {
        self.w
    }

    pub fn velocities(&self) -> &[Vec<f64>] {
        &self.velocities
    }

    pub fn personal_best_positions(&self) -> &[Vec<f64>] {
        &self.pbest_positions
    }

    pub fn personal_best_fitness(&self) -> &[f64] {
        &self.pbest_fitness
    }

    /// Index of the best personal best in particle `i`'s ring neighborhood.
    ///
    /// Scans offsets `-neighbors..=neighbors` in order; ties keep the
    /// earlier index in scan order.
    pub fn local_best_index(&self, i: usize, neighbors: usize) -> usize {
        let n = self.pbest_fitness.len() as isize;
        let direction = self.config.direction;
        let k = neighbors as isize;

        let mut best_fit = direction.worst();
        let mut best_idx = i;
        for offset in -k..=k {
            let idx = (i as isize + offset).rem_euclid(n) as usize;
            let fit = self.pbest_fitness[idx];
            if direction.is_better(fit, best_fit) {
                best_fit = fit;
                best_idx = idx;
            }
        }
        best_idx
    }

    /// Computes the next positions and velocities without committing them.
    fn advance(&mut self) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
        let mut positions = self.positions.clone();
        let mut velocities = self.velocities.clone();
        let (c1, c2, w, v_max) = (self.config.c1, self.config.c2, self.w, self.config.v_max);

        for i in 0..positions.len() {
            let guide_idx = match self.config.topology {
                Topology::Global => None,
                Topology::Ring { neighbors } => Some(self.local_best_index(i, neighbors)),
            };
            let guide: &[f64] = match guide_idx {
                Some(j) => &self.pbest_positions[j],
                None => &self.best.position,
            };
            let pbest = &self.pbest_positions[i];
            let x = &mut positions[i];
            let v = &mut velocities[i];

            for d in 0..x.len() {
                let r1: f64 = self.rng.random();
                let r2: f64 = self.rng.random();
                v[d] = w * v[d] + c1 * r1 * (pbest[d] - x[d]) + c2 * r2 * (guide[d] - x[d]);
                if v_max > 0.0 {
                    v[d] = v[d].clamp(-v_max, v_max);
                }
            }
            for (xd, vd) in x.iter_mut().zip(v.iter()) {
                *xd += vd;
            }
            self.space.clamp(x);
        }
        (positions, velocities)
    }

    /// Updates personal bests from fresh fitness (strict improvement).
    fn update_personal_bests(&mut self, fitness: &[f64]) {
        let direction = self.config.direction;
        for (i, &f) in fitness.iter().enumerate() {
            if direction.is_better(f, self.pbest_fitness[i]) {
                self.pbest_fitness[i] = f;
                self.pbest_positions[i].clone_from(&self.positions[i]);
            }
        }
    }

    /// Refreshes the reported best after an iteration.
    ///
    /// Global topology offers each fresh position; ring topology offers the
    /// best personal best across the whole swarm.
    fn update_global_best(&mut self, fitness: &[f64]) {
        let direction = self.config.direction;
        match self.config.topology {
            Topology::Global => {
                self.best.offer_all(&self.positions, fitness, direction);
            }
            Topology::Ring { .. } => {
                let mut ring_best: Option<usize> = None;
                let mut ring_fit = direction.worst();
                for (i, &f) in self.pbest_fitness.iter().enumerate() {
                    if direction.is_better(f, ring_fit) {
                        ring_fit = f;
                        ring_best = Some(i);
                    }
                }
                if let Some(i) = ring_best {
                    self.best.offer(&self.pbest_positions[i], ring_fit, direction);
                }
            }
        }
    }
}

impl Optimizer for ParticleSwarm {
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
        debug!(iterations = total, "PSO run started");

        let fitness = evaluate_batch(objective.as_ref(), &self.positions, self.config.parallel)?;
        self.update_personal_bests(&fitness);
        self.best.offer_all(&self.positions, &fitness, direction);
        let mut evaluations = n;

        self.fitness_history.push(self.best.fitness);
        if self.config.record_history {
            self.history.record(&self.positions);
        }

        for t in 0..total {
            if let Some(decay) = &self.config.inertia_decay {
                self.w = decay.weight_at(t, total);
            }

            let (positions, velocities) = self.advance();
            let fitness = evaluate_batch(objective.as_ref(), &positions, self.config.parallel)?;
            self.positions = positions;
            self.velocities = velocities;
            evaluations += n;

            self.update_personal_bests(&fitness);
            self.update_global_best(&fitness);

            self.fitness_history.push(self.best.fitness);
            if self.config.verbose {
                info!(iteration = t + 1, best_fitness = self.best.fitness, "PSO iteration");
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
            "PSO run finished"
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
