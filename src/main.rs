use anyhow::Result;
use clap::Parser;
use eegcompare::{
    analysis::AnalysisConfig,
    cli::{Cli, OutputFormat},
    csv_output,
    json_output::JsonReport,
    region::RegionRules,
    report,
};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; `--debug` forces TRACE, otherwise RUST_LOG or warn
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Configuration file (or defaults) with command-line overrides applied
fn load_config(args: &Cli) -> Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_toml(path)?,
        None => AnalysisConfig::default(),
    };
    args.apply_overrides(&mut config);
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;
    Ok(config)
}

/// Rule table from --region-rules, else from the config
fn load_rules(args: &Cli, config: &AnalysisConfig) -> Result<RegionRules> {
    match &args.region_rules {
        Some(path) => RegionRules::from_toml(path),
        None => config.region_rules(),
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing before anything logs
    init_tracing(args.debug);

    let config = load_config(&args)?;
    let rules = load_rules(&args, &config)?;

    let report = report::run(&args.data_dir, &config, &rules)?;

    let rendered = match args.format {
        OutputFormat::Text => report.to_report_string(),
        OutputFormat::Json => JsonReport::from_report(&report).to_json()?,
        OutputFormat::Csv => csv_output::report_to_csv(&report)?,
    };
    print!("{}", rendered);

    Ok(())
}
