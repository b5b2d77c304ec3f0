//! Verbose runs under an installed subscriber.

use popheur::{GaConfig, GeneticAlgorithm, Optimizer, ParticleSwarm, PsoConfig};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("popheur=debug"))
        .with_test_writer()
        .try_init();
}

#[test]
fn test_verbose_run_under_subscriber() {
    init_tracing();
    let mut ga = GeneticAlgorithm::new(
        GaConfig::new(2, -5.0, 5.0)
            .with_population_size(10)
            .with_verbose(true),
    )
    .unwrap();
    ga.set_objective(Box::new(|x: &[f64]| x.iter().map(|v| v * v).sum::<f64>()));
    let summary = ga.optimize(Some(5)).unwrap();
    assert_eq!(summary.iterations, 5);
    assert_eq!(summary.evaluations, 60);
}

#[test]
fn test_verbose_does_not_change_result() {
    init_tracing();
    let run = |verbose: bool| {
        let mut pso = ParticleSwarm::new(
            PsoConfig::new(3, -5.0, 5.0)
                .with_seed(11)
                .with_verbose(verbose),
        )
        .unwrap();
        pso.set_objective(Box::new(|x: &[f64]| x.iter().map(|v| v.abs()).sum::<f64>()));
        pso.optimize(Some(10)).unwrap()
    };
    assert_eq!(run(true), run(false));
}
