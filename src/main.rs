mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use boggle_ga::{Dictionary, Engine, EpochReport, Evaluator, Grid, SolutionWord, Solver};
use config::Config;
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Final state printed when the driver stops
#[derive(Debug, Serialize)]
struct RunSummary<'a> {
    generations: u32,
    last_generation_best_score: u32,
    best_configuration: &'a str,
    best_configuration_score: u32,
    words: &'a [SolutionWord],
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "boggle_ga=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Boggle GA...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Load dictionary; there is no fallback word list
    let dictionary = Dictionary::load(&config.dictionary.path)
        .await
        .with_context(|| format!("Failed to load dictionary from {}", config.dictionary.path))?;
    if dictionary.is_empty() {
        tracing::warn!(
            "Dictionary {} has no usable words, every board will score 0",
            config.dictionary.path
        );
    }

    let solver = Solver::new(Arc::new(dictionary), config.ga.board_width);
    let rng = match config.driver.seed {
        Some(seed) => {
            tracing::info!("Using fixed seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };

    let mut engine = Engine::new(config.ga.clone(), solver, rng)?;
    tracing::info!(
        population_size = config.ga.population_size,
        crossover_rate = config.ga.crossover_rate,
        mutation_rate = config.ga.mutation_rate,
        board_width = config.ga.board_width,
        "Population initialised"
    );

    run_evolution(&mut engine, &config).await?;
    report_final(&mut engine, config.ga.board_width)?;

    Ok(())
}

/// Step the GA a fixed number of evaluations per tick until interrupted or
/// the generation limit is reached
async fn run_evolution<E: Evaluator>(engine: &mut Engine<E, StdRng>, config: &Config) -> Result<()> {
    let mut interval = tokio::time::interval(config.driver.tick_interval());
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    tracing::info!(
        "Evolving {} evaluations every {:?} (Ctrl-C to stop)",
        config.driver.evaluations_per_tick,
        config.driver.tick_interval()
    );

    loop {
        tokio::select! {
            _ = interval.tick() => {
                for report in engine.run(config.driver.evaluations_per_tick)? {
                    log_generation(&report, config.ga.board_width);
                }

                let best = engine.best_configuration().to_string();
                engine.set_board_for_display(best);

                let max_generations = config.driver.max_generations;
                if max_generations > 0 && engine.generation_stats().generation >= max_generations {
                    tracing::info!("Reached {} generations", max_generations);
                    return Ok(());
                }
            }
            result = &mut shutdown => {
                result.context("Failed to listen for Ctrl-C")?;
                tracing::info!("Interrupted, stopping evolution");
                return Ok(());
            }
        }
    }
}

fn log_generation(report: &EpochReport, width: usize) {
    tracing::info!(
        generation = report.generation,
        best_score = report.best_score,
        average_score = report.average_score,
        best_configuration = %report.best_configuration,
        "Generation complete"
    );

    if let Ok(grid) = Grid::parse(&report.best_configuration, width) {
        tracing::debug!("Best board:\n{}", grid);
    }
}

fn report_final<E: Evaluator>(engine: &mut Engine<E, StdRng>, width: usize) -> Result<()> {
    let stats = engine.generation_stats();
    let evaluation = engine
        .display_evaluation()
        .context("Failed to solve the final board")?;
    let grid = Grid::parse(engine.display_configuration(), width)?;

    tracing::info!(
        "Best board after {} generations ({} points):\n{}",
        stats.generation,
        evaluation.score,
        grid
    );
    for word in &evaluation.words {
        tracing::debug!("{}:{}", word.word, word.score);
    }

    let summary = RunSummary {
        generations: stats.generation,
        last_generation_best_score: stats.last_generation_best_score,
        best_configuration: engine.display_configuration(),
        best_configuration_score: evaluation.score,
        words: &evaluation.words,
    };
    tracing::info!("{}", serde_json::to_string(&summary)?);

    Ok(())
}
