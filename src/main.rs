//! energy-series entry point: CLI and config wiring around one dashboard view.

use std::io;
use std::process;

use chrono::Local;
use tracing_subscriber::EnvFilter;

use energy_series::cli::{self, CliOptions};
use energy_series::config::AppConfig;
use energy_series::io::export::create_output;
use energy_series::runner::{RunSettings, run};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(cli: &CliOptions) -> AppConfig {
    let Some(path) = cli.config.as_deref() else {
        return AppConfig::default();
    };
    match AppConfig::from_toml_file(path) {
        Ok(cfg) => {
            tracing::info!(path = %path.display(), "loaded config");
            cfg
        }
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    }
}

fn main() {
    init_tracing();

    let cli = match cli::parse_args() {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("error: {e}");
            cli::print_usage();
            process::exit(1);
        }
    };
    if cli.help {
        cli::print_usage();
        process::exit(0);
    }

    let config = load_config(&cli);
    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let settings = RunSettings::resolve(&config, &cli);
    let now = Local::now();

    let result = match cli.out.as_deref() {
        Some(path) => create_output(path).and_then(|file| {
            run(&settings, &now, file)?;
            eprintln!("Series written to {}", path.display());
            Ok(())
        }),
        None => run(&settings, &now, io::stdout().lock()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
