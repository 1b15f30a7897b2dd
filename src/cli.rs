use std::env;
use std::path::PathBuf;

use feature_recorder::frame::SchemaPolicy;

pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub seed: Option<u64>,
    pub horizon: Option<usize>,
    pub schema: Option<SchemaPolicy>,
    pub features_out: Option<PathBuf>,
    pub help: bool,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(&args)
}

fn parse_args_from(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut opts = CliOptions {
        config: None,
        seed: None,
        horizon: None,
        schema: None,
        features_out: None,
        help: false,
    };

    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --config (expected a TOML file path)")?;
                if opts.config.replace(PathBuf::from(path)).is_some() {
                    return Err("--config provided more than once".to_string());
                }
            }
            "--seed" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --seed (expected a u64)")?;
                let seed = raw
                    .parse::<u64>()
                    .map_err(|_| format!("--seed value \"{raw}\" is not a valid u64"))?;
                opts.seed = Some(seed);
            }
            "--horizon" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --horizon (expected a step count)")?;
                let horizon = raw
                    .parse::<usize>()
                    .map_err(|_| format!("--horizon value \"{raw}\" is not a valid step count"))?;
                opts.horizon = Some(horizon);
            }
            "--schema" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --schema (expected strict or union)")?;
                let policy = SchemaPolicy::from_name(raw)
                    .ok_or_else(|| format!("--schema must be \"strict\" or \"union\", got \"{raw}\""))?;
                opts.schema = Some(policy);
            }
            "--features-out" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --features-out (expected a file path)")?;
                if opts.features_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--features-out provided more than once".to_string());
                }
            }
            "--help" | "-h" => opts.help = true,
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
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
    eprintln!("feature-recorder: record per-step features of a recursive forecast");
    eprintln!();
    eprintln!("Usage: feature-recorder [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>          Load run configuration from a TOML file");
    eprintln!("  --seed <u64>             Override the history seed");
    eprintln!("  --horizon <usize>        Override the number of forecast steps");
    eprintln!("  --schema <strict|union>  Override the recorder schema policy");
    eprintln!("  --features-out <path>    Write the recorded features as CSV");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("Log verbosity follows RUST_LOG (default: feature_recorder=info).");
}
