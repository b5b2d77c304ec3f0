//! GA evolutionary loop execution.
//!
//! [`GeneticAlgorithm`] owns the population and orchestrates each call to
//! `optimize`: evaluation → selection → crossover → mutation → bounding →
//! evaluation, repeated once per generation.

use super::config::GaConfig;
use super::operators::{gaussian_mutation, reset_mutation, Mutation};
use super::selection::{rank, tournament_pool};
use crate::error::{OptimizeError, Result};
use crate::objective::{evaluate_batch, Objective};
use crate::optimizer::{Direction, GlobalBest, History, Optimizer, RunSummary};
use crate::random::create_rng;
use crate::space::SearchSpace;
use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::Normal;
use std::sync::Arc;
use tracing::{debug, info};

/// Genetic Algorithm over a box-bounded real vector space.
///
/// # Usage
///
/// ```
/// use popheur::ga::{GaConfig, GeneticAlgorithm};
/// use popheur::Optimizer;
///
/// let config = GaConfig::new(2, -5.0, 5.0).with_population_size(20).with_seed(1);
/// let mut ga = GeneticAlgorithm::new(config).unwrap();
/// ga.set_objective(Box::new(|x: &[f64]| x[0] * x[0] + x[1] * x[1]));
/// let summary = ga.optimize(Some(50)).unwrap();
/// assert_eq!(summary.iterations, 50);
/// ```
pub struct GeneticAlgorithm {
    config: GaConfig,
    space: SearchSpace,
    noise: Normal<f64>,
    rng: StdRng,
    objective: Option<Arc<dyn Objective>>,
    population: Vec<Vec<f64>>,
    fitness: Vec<f64>,
    best: GlobalBest,
    history: History,
    fitness_history: Vec<f64>,
}

impl GeneticAlgorithm {
    /// Validates `config` and samples the initial population.
    pub fn new(config: GaConfig) -> Result<Self> {
        config.validate()?;
        let space = config.space()?;
        let std = config.effective_mutation_std();
        let noise = Normal::new(0.0, std)
            .map_err(|e| OptimizeError::invalid(format!("mutation_std {std}: {e}")))?;

        let mut rng = create_rng(config.seed);
        let population: Vec<Vec<f64>> = (0..config.population_size)
            .map(|_| space.sample(&mut rng))
            .collect();

        debug!(
            population_size = config.population_size,
            dim = config.dim,
            seed = config.seed,
            crossover = ?config.crossover,
            mutation = ?config.mutation,
            "GA initialized"
        );

        Ok(Self {
            fitness: vec![config.direction.worst(); config.population_size],
            best: GlobalBest::new(config.dim, config.direction),
            config,
            space,
            noise,
            rng,
            objective: None,
            population,
            history: History::new(),
            fitness_history: Vec::new(),
        })
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Fitness of each individual from the latest evaluation.
    pub fn fitness(&self) -> &[f64] {
        &self.fitness
    }

    /// Builds the next generation from the current one.
    ///
    /// Elites are copied first (best first), then the remaining slots are
    /// filled with mutated, bounded offspring of random mating-pool pairs.
    fn next_generation(&mut self) -> Vec<Vec<f64>> {
        let n = self.config.population_size;
        let direction = self.config.direction;

        let pool = tournament_pool(
            &self.population,
            &self.fitness,
            self.config.tournament_size,
            direction,
            &mut self.rng,
        );

        let mut next: Vec<Vec<f64>> = rank(&self.fitness, direction)
            .into_iter()
            .take(self.config.elitism_count)
            .map(|i| self.population[i].clone())
            .collect();

        while next.len() < n {
            let p1 = &pool[self.rng.random_range(0..pool.len())];
            let p2 = &pool[self.rng.random_range(0..pool.len())];
            let child = self
                .config
                .crossover
                .apply(p1, p2, self.config.crossover_rate, &mut self.rng);
            let mut child = self.mutate(child);
            self.space.clamp(&mut child);
            next.push(child);
        }
        next
    }

    fn mutate(&mut self, genes: Vec<f64>) -> Vec<f64> {
        let rate = self.config.mutation_rate;
        match self.config.mutation {
            Mutation::Gaussian => gaussian_mutation(genes, rate, &self.noise, &mut self.rng),
            Mutation::Reset => reset_mutation(genes, rate, &self.space, &mut self.rng),
        }
    }

    /// Evaluates `population`, then commits it together with its fitness.
    ///
    /// Nothing is committed when the objective yields a non-finite value.
    fn commit(&mut self, objective: &dyn Objective, population: Vec<Vec<f64>>) -> Result<()> {
        let fitness = evaluate_batch(objective, &population, self.config.parallel)?;
        self.best
            .offer_all(&population, &fitness, self.config.direction);
        self.population = population;
        self.fitness = fitness;
        Ok(())
    }
}

impl Optimizer for GeneticAlgorithm {
    fn set_objective(&mut self, objective: Box<dyn Objective>) {
        self.objective = Some(Arc::from(objective));
    }

    fn optimize(&mut self, iterations: Option<usize>) -> Result<RunSummary> {
        let objective = self
            .objective
            .clone()
            .ok_or(OptimizeError::ObjectiveNotSet)?;
        let generations = iterations.unwrap_or(self.config.max_iterations);
        let n = self.config.population_size;
        debug!(generations, "GA run started");

        self.fitness = evaluate_batch(objective.as_ref(), &self.population, self.config.parallel)?;
        self.best
            .offer_all(&self.population, &self.fitness, self.config.direction);
        let mut evaluations = n;

        self.fitness_history.push(self.best.fitness);
        if self.config.record_history {
            self.history.record(&self.population);
        }

        for generation in 0..generations {
            let next = self.next_generation();
            self.commit(objective.as_ref(), next)?;
            evaluations += n;

            self.fitness_history.push(self.best.fitness);
            if self.config.verbose {
                info!(iteration = generation + 1, best_fitness = self.best.fitness, "GA generation");
            }
            if self.config.record_history {
                self.history.record(&self.population);
            }
        }

        if !self.config.record_history {
            self.history.record(&self.population);
        }

        debug!(
            generations,
            evaluations,
            best_fitness = self.best.fitness,
            "GA run finished"
        );

        Ok(RunSummary {
            iterations: generations,
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
        &self.population
    }

    fn space(&self) -> &SearchSpace {
        &self.space
    }

    fn direction(&self) -> Direction {
        self.config.direction
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::Crossover;

    fn sphere(x: &[f64]) -> f64 {
        x.iter().map(|v| v * v).sum()
    }

    fn sphere_ga(config: GaConfig) -> GeneticAlgorithm {
        let mut ga = GeneticAlgorithm::new(config).unwrap();
        ga.set_objective(Box::new(sphere));
        ga
    }

    #[test]
    fn test_sphere_scenario() {
        let config = GaConfig::new(2, -5.0, 5.0)
            .with_population_size(20)
            .with_elitism_count(1)
            .with_seed(1);
        let mut ga = sphere_ga(config);
        ga.optimize(Some(50)).unwrap();

        assert!(
            ga.best_fitness() < 1.0,
            "expected fitness < 1.0 for 2D sphere, got {}",
            ga.best_fitness()
        );
        for &x in ga.best_solution() {
            assert!((-1.0..=1.0).contains(&x), "best solution {:?}", ga.best_solution());
        }
    }

    #[test]
    fn test_objective_not_set() {
        let mut ga = GeneticAlgorithm::new(GaConfig::new(2, -1.0, 1.0)).unwrap();
        let before = ga.population().to_vec();
        assert_eq!(ga.optimize(Some(5)), Err(OptimizeError::ObjectiveNotSet));
        assert_eq!(ga.population(), before.as_slice());
        assert!(ga.population_history().is_empty());
        assert!(ga.fitness_history().is_empty());
    }

    #[test]
    fn test_sentinel_before_run() {
        let ga = GeneticAlgorithm::new(GaConfig::new(3, -1.0, 1.0)).unwrap();
        assert_eq!(ga.best_fitness(), f64::INFINITY);
        assert_eq!(ga.best_solution(), &[0.0, 0.0, 0.0]);

        let ga = GeneticAlgorithm::new(GaConfig::new(3, -1.0, 1.0).maximize()).unwrap();
        assert_eq!(ga.best_fitness(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_default_budget() {
        let config = GaConfig::new(2, -5.0, 5.0).with_max_iterations(7);
        let mut ga = sphere_ga(config);
        let summary = ga.optimize(None).unwrap();
        assert_eq!(summary.iterations, 7);
        assert_eq!(summary.evaluations, 8 * 50);
        assert_eq!(ga.fitness_history().len(), 8);
    }

    #[test]
    fn test_elitism_keeps_best_fitness_monotone() {
        let config = GaConfig::new(4, -5.0, 5.0)
            .with_population_size(30)
            .with_elitism_count(2)
            .with_seed(42);
        let mut ga = sphere_ga(config);
        ga.optimize(Some(40)).unwrap();

        for window in ga.fitness_history().windows(2) {
            assert!(
                window[1] <= window[0],
                "fitness should be monotonically non-increasing: {} > {}",
                window[1],
                window[0]
            );
        }
        // The incumbent survives as an elite.
        let current_best = ga
            .fitness()
            .iter()
            .cloned()
            .fold(f64::INFINITY, f64::min);
        assert_eq!(current_best, ga.best_fitness());
    }

    #[test]
    fn test_maximize() {
        let config = GaConfig::new(2, -3.0, 3.0)
            .with_population_size(30)
            .maximize()
            .with_seed(5);
        let mut ga = sphere_ga(config);
        ga.optimize(Some(60)).unwrap();

        // Maximum of the sphere on the box is at a corner: 18.
        assert!(ga.best_fitness() > 14.0, "got {}", ga.best_fitness());
        for window in ga.fitness_history().windows(2) {
            assert!(window[1] >= window[0]);
        }
    }

    #[test]
    fn test_history_per_generation() {
        let config = GaConfig::new(2, -5.0, 5.0)
            .with_population_size(10)
            .with_record_history(true);
        let mut ga = sphere_ga(config);
        ga.optimize(Some(12)).unwrap();
        assert_eq!(ga.population_history().len(), 13);
        for snapshot in ga.population_history().snapshots() {
            assert_eq!(snapshot.len(), 10);
            assert!(snapshot.iter().all(|x| x.len() == 2));
        }
    }

    #[test]
    fn test_history_final_only() {
        let mut ga = sphere_ga(GaConfig::new(2, -5.0, 5.0));
        ga.optimize(Some(12)).unwrap();
        assert_eq!(ga.population_history().len(), 1);
        assert_eq!(
            ga.population_history().last().unwrap(),
            ga.population()
        );
    }

    #[test]
    fn test_reentrant_accumulates() {
        let mut ga = sphere_ga(GaConfig::new(3, -5.0, 5.0).with_seed(11));
        ga.optimize(Some(10)).unwrap();
        let first = ga.best_fitness();
        ga.optimize(Some(10)).unwrap();
        assert!(ga.best_fitness() <= first);
        assert_eq!(ga.fitness_history().len(), 22);
        assert_eq!(ga.population_history().len(), 2);
    }

    #[test]
    fn test_single_point_gaussian_variant() {
        let config = GaConfig::new(5, -2.0, 2.0)
            .with_population_size(40)
            .with_crossover(Crossover::SinglePoint)
            .with_mutation(Mutation::Gaussian)
            .with_mutation_rate(0.2)
            .with_seed(3);
        let mut ga = sphere_ga(config);
        ga.optimize(Some(80)).unwrap();
        assert!(ga.best_fitness() < 1.0, "got {}", ga.best_fitness());
        for x in ga.population() {
            assert!(ga.space().contains(x));
        }
    }

    #[test]
    fn test_single_gene_single_point() {
        let config = GaConfig::new(1, -1.0, 1.0)
            .with_population_size(10)
            .with_crossover(Crossover::SinglePoint);
        let mut ga = sphere_ga(config);
        ga.optimize(Some(5)).unwrap();
        assert!(ga.best_fitness() < 1.0);
    }

    #[test]
    fn test_non_finite_objective_aborts() {
        let mut ga = GeneticAlgorithm::new(GaConfig::new(2, -1.0, 1.0)).unwrap();
        ga.set_objective(Box::new(|x: &[f64]| if x[0] > 0.9 { f64::NAN } else { x[0] }));
        let result = ga.optimize(Some(200));
        assert!(matches!(result, Err(OptimizeError::NonFiniteFitness { .. })));
        for x in ga.population() {
            assert!(ga.space().contains(x));
        }
        assert!(!ga.best_fitness().is_nan());
    }

    #[test]
    fn test_elites_copied_best_first() {
        let config = GaConfig::new(1, -10.0, 10.0)
            .with_population_size(6)
            .with_elitism_count(3)
            .with_mutation_rate(1.0);
        let mut ga = GeneticAlgorithm::new(config).unwrap();
        ga.population = vec![
            vec![4.0],
            vec![-1.0],
            vec![3.0],
            vec![0.5],
            vec![-2.0],
            vec![5.0],
        ];
        ga.fitness = ga.population.iter().map(|x| sphere(x)).collect();

        let next = ga.next_generation();
        assert_eq!(next.len(), 6);
        assert_eq!(&next[..3], &[vec![0.5], vec![-1.0], vec![-2.0]]);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let base = GaConfig::new(3, -5.0, 5.0).with_seed(8);
        let mut seq = sphere_ga(base.clone());
        let mut par = sphere_ga(base.with_parallel(true));
        seq.optimize(Some(20)).unwrap();
        par.optimize(Some(20)).unwrap();
        assert_eq!(seq.best_solution(), par.best_solution());
        assert_eq!(seq.fitness_history(), par.fitness_history());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GaConfig::new(2, -1.0, 1.0)
            .with_population_size(3)
            .with_elitism_count(3);
        assert!(matches!(
            GeneticAlgorithm::new(config),
            Err(OptimizeError::InvalidConfig(_))
        ));
    }
}
