use std::env;
use std::path::PathBuf;

use crate::labels::ClockStyle;
use crate::period::Period;

/// Which dashboard page to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Period/device series with its energy total.
    #[default]
    Analytics,
    /// Device overview, device list, and the 24h profile.
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

/// Parsed command line. `None` fields fall back to the config file.
#[derive(Debug, Default)]
pub struct CliOptions {
    pub view: View,
    pub config: Option<PathBuf>,
    pub period: Option<Period>,
    pub device: Option<String>,
    pub base: Option<f64>,
    pub energy: bool,
    pub seed: Option<u64>,
    pub clock: Option<ClockStyle>,
    pub format: OutputFormat,
    pub out: Option<PathBuf>,
    pub help: bool,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(&args)
}

pub fn parse_args_from(args: &[String]) -> Result<CliOptions, String> {
    let mut opts = CliOptions::default();
    let mut i = 0usize;

    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => opts.help = true,
            "--view" => {
                i += 1;
                opts.view = match args.next_or_err(i, "missing value for --view")? {
                    "analytics" => View::Analytics,
                    "dashboard" => View::Dashboard,
                    other => {
                        return Err(format!(
                            "--view must be \"analytics\" or \"dashboard\", got \"{other}\""
                        ));
                    }
                };
            }
            "--config" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --config (expected a TOML path)")?;
                if opts.config.replace(PathBuf::from(path)).is_some() {
                    return Err("--config provided more than once".to_string());
                }
            }
            "--period" => {
                i += 1;
                let value = args.next_or_err(i, "missing value for --period")?;
                opts.period = Some(value.parse::<Period>().map_err(|e| e.to_string())?);
            }
            "--device" => {
                i += 1;
                let id = args.next_or_err(i, "missing value for --device (expected \"all\" or an id)")?;
                opts.device = Some(id.to_string());
            }
            "--base" => {
                i += 1;
                let value = args.next_or_err(i, "missing value for --base (expected watts)")?;
                let base = value
                    .parse::<f64>()
                    .ok()
                    .filter(|b| b.is_finite() && *b >= 0.0)
                    .ok_or_else(|| format!("--base value \"{value}\" is not a non-negative number"))?;
                opts.base = Some(base);
            }
            "--energy" => opts.energy = true,
            "--seed" => {
                i += 1;
                let value = args.next_or_err(i, "missing value for --seed (expected a u64)")?;
                let seed = value
                    .parse::<u64>()
                    .map_err(|_| format!("--seed value \"{value}\" is not a valid u64"))?;
                opts.seed = Some(seed);
            }
            "--clock" => {
                i += 1;
                let value = args.next_or_err(i, "missing value for --clock (expected 24h or 12h)")?;
                opts.clock = Some(value.parse::<ClockStyle>().map_err(|e| e.message)?);
            }
            "--format" => {
                i += 1;
                opts.format = match args.next_or_err(i, "missing value for --format")? {
                    "table" => OutputFormat::Table,
                    "csv" => OutputFormat::Csv,
                    "json" => OutputFormat::Json,
                    other => {
                        return Err(format!(
                            "--format must be table, csv or json, got \"{other}\""
                        ));
                    }
                };
            }
            "--out" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --out (expected a file path)")?;
                if opts.out.replace(PathBuf::from(path)).is_some() {
                    return Err("--out provided more than once".to_string());
                }
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.device.is_some() && opts.base.is_some() {
        return Err(
            "arguments `--device` and `--base` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    Ok(opts)
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("energy-series: synthetic home-energy chart data");
    eprintln!();
    eprintln!("Usage: energy-series [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --view <name>        analytics (default) or dashboard");
    eprintln!("  --period <name>      hourly, daily or monthly");
    eprintln!("  --device <id>        all (400 W base) or a device id (100 W base)");
    eprintln!("  --base <watts>       base load override");
    eprintln!("  --energy             include energy (kWh) per sample");
    eprintln!("  --seed <u64>         reproducible random draws");
    eprintln!("  --clock <style>      24h (default) or 12h labels");
    eprintln!("  --format <name>      table (default), csv or json");
    eprintln!("  --out <path>         write output to a file instead of stdout");
    eprintln!("  --config <path>      load defaults from a TOML file");
    eprintln!("  --help               show this help message");
}
