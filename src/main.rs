use clap::Parser;
use miette::{IntoDiagnostic, Result};
use regiopay::application::dispatcher::PaymentDispatcher;
use regiopay::domain::region::{Region, RegionRegistry};
use regiopay::infrastructure::reporting::TracingReporter;
use regiopay::infrastructure::simulated::SimulatedProcessor;
use regiopay::interfaces::csv::intent_reader::IntentReader;
use regiopay::interfaces::csv::outcome_writer::{Outcome, OutcomeWriter, OutputFormat};
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input payment intents CSV file (region, amount, reference)
    input: PathBuf,

    /// Regions to enable, comma separated. Defaults to every region.
    #[arg(long, value_delimiter = ',', value_parser = parse_region)]
    regions: Vec<Region>,

    /// Enabled regions that get a simulated processor, comma separated.
    /// Defaults to every enabled region.
    #[arg(long, value_delimiter = ',', value_parser = parse_region)]
    processors: Vec<Region>,

    /// Simulated processor latency in milliseconds.
    #[arg(long, default_value_t = 0)]
    latency_ms: u64,

    /// Make simulated processors decline payments above this amount.
    #[arg(long)]
    decline_above: Option<Decimal>,

    /// Per-payment deadline in milliseconds.
    #[arg(long, default_value_t = 5000)]
    timeout_ms: u64,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,
}

fn parse_region(code: &str) -> std::result::Result<Region, String> {
    code.parse().map_err(|e: regiopay::error::PaymentError| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let registry = if cli.regions.is_empty() {
        RegionRegistry::new()
    } else {
        RegionRegistry::with_regions(cli.regions.iter().copied())
    };

    let dispatcher = PaymentDispatcher::new(registry.clone(), Box::new(TracingReporter));
    let processors: Vec<Region> = if cli.processors.is_empty() {
        registry.regions().collect()
    } else {
        cli.processors.clone()
    };
    let latency = Duration::from_millis(cli.latency_ms);
    for region in processors {
        let rail = registry.profile(region).local_rail();
        let mut processor = SimulatedProcessor::new(rail).with_latency(latency);
        if let Some(limit) = cli.decline_above {
            processor = processor.with_decline_above(limit);
        }
        dispatcher
            .register_strategy(region, Arc::new(processor))
            .await
            .into_diagnostic()?;
    }
    tracing::info!(regions = ?dispatcher.routed_regions().await, "dispatcher ready");

    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = IntentReader::new(file);
    let stdout = io::stdout();
    let mut writer = OutcomeWriter::new(stdout.lock(), cli.format);
    let deadline = Duration::from_millis(cli.timeout_ms);

    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                tracing::error!("Error reading payment intent: {}", e);
                continue;
            }
        };

        let (reference, region) = (record.reference.clone(), record.region.clone());
        let outcome = match record.into_intent(&registry) {
            Ok(intent) => match dispatcher.pay_within(&intent, deadline).await {
                Ok(receipt) => Outcome::completed(&intent, &receipt),
                Err(e) => Outcome::failed(&intent, &e),
            },
            Err(e) => {
                tracing::warn!(reference = %reference, "Rejected payment intent: {}", e);
                Outcome::rejected(&reference, &region, &e)
            }
        };
        writer.write(&outcome).into_diagnostic()?;
    }

    writer.flush().into_diagnostic()?;
    Ok(())
}
