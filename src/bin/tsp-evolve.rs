use anyhow::{Context, Result};
use clap::{arg, value_parser, ArgMatches, Command};
use std::path::PathBuf;
use std::time::Instant;
use tracing::Level;
use tsp_evolve::ga::{
    EvolutionConfig, EvolutionController, GenerationObserver, GenerationReport, MutationPolicy,
};
use tsp_evolve::loader::load_distance_table;

fn cli() -> Command {
    Command::new("tsp-evolve")
        .about("Approximates a shortest round trip over a distance table with a genetic algorithm")
        .arg(arg!(<INPUT> "Distance table file").value_parser(value_parser!(PathBuf)))
        .arg(
            arg!(--population <N> "Routes per generation")
                .value_parser(value_parser!(usize))
                .default_value("50"),
        )
        .arg(
            arg!(--generations <N> "Generations to run, the initial one included")
                .value_parser(value_parser!(usize))
                .default_value("100"),
        )
        .arg(
            arg!(--tournament <N> "Tournament size")
                .value_parser(value_parser!(usize))
                .default_value("7"),
        )
        .arg(
            arg!(--"mutation-rate" <P> "Per-route mutation probability")
                .value_parser(value_parser!(f64))
                .default_value("0.3"),
        )
        .arg(
            arg!(--"operator-rate" <P> "Probability an invoked mutation changes the route")
                .value_parser(value_parser!(f64))
                .default_value("1.0"),
        )
        .arg(
            arg!(--mutation <POLICY> "Mutation operator: swap or two-opt")
                .value_parser(value_parser!(MutationPolicy))
                .default_value("swap"),
        )
        .arg(arg!(--seed <SEED> "Random seed").value_parser(value_parser!(u64)))
        .arg(arg!(--parallel "Breed each generation in parallel"))
        .arg(arg!(--quiet "Only print the final result"))
        .arg(arg!(-v --verbose "Enable debug logging"))
}

fn config_from(matches: &ArgMatches) -> EvolutionConfig {
    let mut config = EvolutionConfig::default()
        .with_population_size(*matches.get_one::<usize>("population").unwrap())
        .with_generations(*matches.get_one::<usize>("generations").unwrap())
        .with_tournament_size(*matches.get_one::<usize>("tournament").unwrap())
        .with_mutation_rate(*matches.get_one::<f64>("mutation-rate").unwrap())
        .with_operator_rate(*matches.get_one::<f64>("operator-rate").unwrap())
        .with_mutation(*matches.get_one::<MutationPolicy>("mutation").unwrap())
        .with_parallel(matches.get_flag("parallel"));
    if let Some(&seed) = matches.get_one::<u64>("seed") {
        config = config.with_seed(seed);
    }
    config
}

/// Prints the fittest route of every generation.
struct ConsoleReporter;

impl GenerationObserver for ConsoleReporter {
    fn on_generation(&mut self, report: &GenerationReport<'_, '_>) {
        println!("Generation {} of {}", report.generation, report.total_generations);
        println!("Current fittest has length {:.2}", report.fittest_length());
        println!("    {}", report.fittest);
        println!();
    }
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    tracing_subscriber::fmt()
        .with_max_level(if matches.get_flag("verbose") {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .with_writer(std::io::stderr)
        .init();

    let input = matches.get_one::<PathBuf>("INPUT").unwrap();
    let started = Instant::now();
    let registry = load_distance_table(input)
        .with_context(|| format!("failed to load distance table '{}'", input.display()))?;
    println!(
        "Loaded {} cities in {:.3} seconds",
        registry.len(),
        started.elapsed().as_secs_f64()
    );

    let controller = EvolutionController::new(&registry, config_from(&matches))
        .context("invalid run configuration")?;

    let started = Instant::now();
    let mut rng = {
        use rand::SeedableRng;
        let seed = controller.config().seed.unwrap_or_else(rand::random);
        rand::rngs::StdRng::seed_from_u64(seed)
    };
    let result = if matches.get_flag("quiet") {
        controller.run_with_rng(&mut rng)?
    } else {
        controller.run_with(&mut rng, None, &mut ConsoleReporter)?
    };

    println!("Finished evolving {} generations.", result.generations);
    println!("Elapsed time was {:.1} seconds.", started.elapsed().as_secs_f64());
    println!();
    println!("Initial best distance: {:.2}", result.initial_length);
    println!("Final best distance:   {:.2}", result.best_length);
    println!("The best route went via:");
    println!("    {}", result.best);

    Ok(())
}
