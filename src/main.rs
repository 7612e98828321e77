use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use podium::fixtures::{DataLayout, JsonFixtures};
use podium::standings::{
    calculate_constructor_standings, calculate_driver_standings, select_race,
};

const EXIT_SUCCESS: i32 = 0;
const EXIT_GENERATION: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Regenerate standings artifacts for configured seasons (default if no subcommand)
    Generate,
    /// Print a season's standings after a race without writing anything
    Show {
        /// Season id, e.g. s4
        season: String,
        /// Show constructor standings instead of drivers
        #[arg(long)]
        constructors: bool,
        /// Race to show (defaults to the latest race that ran)
        #[arg(long)]
        race: Option<String>,
        /// Tab-separated output for scripting
        #[arg(long)]
        tsv: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "podium")]
#[command(about = "Generate league driver and constructor standings", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ./podium.yaml, or built-in defaults)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Override the fixture data directory from the config
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let command = cli.command.unwrap_or(Commands::Generate);

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let mut config = match podium::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    if let Err(errors) = podium::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let layout = DataLayout::new(config.data_dir.clone());
    let fixtures = match JsonFixtures::open(layout.clone(), config.season_schemes()) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Fixture error: {:#}", anyhow::Error::from(e));
            std::process::exit(EXIT_GENERATION);
        }
    };
    let rules = config.rules();

    match command {
        Commands::Generate => {
            let report = match podium::generate::run(&config, &fixtures, &layout) {
                Ok(r) => r,
                Err(e) => {
                    tracing::error!("{:#}", e);
                    std::process::exit(EXIT_GENERATION);
                }
            };

            tracing::debug!("{} artifacts saved", report.saved().count());
            if !report.is_success() {
                for failure in report.failures() {
                    eprintln!(
                        "Failed: {} {} ({})",
                        failure.season,
                        failure.kind,
                        failure.path.display()
                    );
                }
                std::process::exit(EXIT_GENERATION);
            }
        }
        Commands::Show {
            season,
            constructors,
            race,
            tsv,
        } => {
            let use_colors = !tsv && podium::output::should_use_colors();

            let rendered = if constructors {
                calculate_constructor_standings(&fixtures, &season, &rules).map(|standings| {
                    select_race(&standings, race.as_deref()).map(|(name, row)| {
                        if tsv {
                            podium::output::format_constructor_tsv(row)
                        } else {
                            podium::output::format_constructor_table(name, row, use_colors)
                        }
                    })
                })
            } else {
                calculate_driver_standings(&fixtures, &season, &rules).map(|standings| {
                    select_race(&standings, race.as_deref()).map(|(name, row)| {
                        if tsv {
                            podium::output::format_driver_tsv(row)
                        } else {
                            podium::output::format_driver_table(name, row, use_colors)
                        }
                    })
                })
            };

            match rendered {
                Ok(Some(output)) => println!("{}", output),
                Ok(None) => {
                    eprintln!(
                        "No standings for season {} at {}",
                        season,
                        race.as_deref().unwrap_or("latest race")
                    );
                    std::process::exit(EXIT_GENERATION);
                }
                Err(e) => {
                    eprintln!("Error: {:#}", anyhow::Error::from(e));
                    std::process::exit(EXIT_GENERATION);
                }
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
