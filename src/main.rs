//! Entry point: runs a recursive forecast with a feature recorder in the step hook chain.

mod cli;

use std::process;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use feature_recorder::config::RunConfig;
use feature_recorder::forecast::{ForecastModel, Model, RecursiveForecaster, SyntheticHistory};
use feature_recorder::io::export::export_csv;
use feature_recorder::recorder::{FeatureRecorder, HookChain};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "feature_recorder=info".into());
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("warning: failed to initialize tracing: {e}");
    }
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("error: {message}");
    process::exit(1);
}

fn main() {
    let cli = match cli::parse_args() {
        Ok(opts) => opts,
        Err(e) => {
            cli::print_usage();
            fail(e);
        }
    };
    if cli.help {
        cli::print_usage();
        return;
    }

    init_tracing();

    let mut config = match cli.config {
        Some(ref path) => RunConfig::from_toml_file(path).unwrap_or_else(|e| fail(e)),
        None => RunConfig::default(),
    };

    // CLI overrides
    if let Some(seed) = cli.seed {
        config.history.seed = seed;
    }
    if let Some(horizon) = cli.horizon {
        config.forecast.horizon = horizon;
    }
    if let Some(policy) = cli.schema {
        config.recorder.schema_policy = policy;
    }

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let h = &config.history;
    let history = SyntheticHistory::new(h.base, h.amplitude, h.period, h.noise_std, h.seed)
        .generate(h.n_series, h.length);
    info!(n_series = h.n_series, length = h.length, seed = h.seed, "generated history");

    let model = ForecastModel::from_name(&config.forecast.model)
        .unwrap_or_else(|| fail(format!("unknown model \"{}\"", config.forecast.model)));
    let forecaster =
        RecursiveForecaster::new(model, config.forecast.lags.clone()).unwrap_or_else(|e| fail(e));

    let mut recorder = FeatureRecorder::with_policy(config.recorder.schema_policy);
    let forecast = {
        let mut hooks = HookChain::new();
        hooks.push(&mut recorder);
        forecaster
            .predict(&history, config.forecast.horizon, &mut hooks)
            .unwrap_or_else(|e| fail(e))
    };

    println!("Forecast ({} series, model={}):", forecast.n_series(), forecaster.model().name());
    print!("{forecast}");

    let features = recorder.get_features().unwrap_or_else(|e| fail(e));
    println!(
        "\nRecorded features: {} batches, {} rows x {} columns",
        recorder.len(),
        features.n_rows(),
        features.n_cols()
    );
    if features.is_empty() {
        warn!("no features were recorded");
    }

    if let Some(ref path) = cli.features_out {
        if let Err(e) = export_csv(&features, path) {
            fail(format!("failed to write CSV: {e}"));
        }
        info!(path = %path.display(), rows = features.n_rows(), "features written");
    } else {
        print!("{features}");
    }
}
