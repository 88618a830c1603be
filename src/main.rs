use anyhow::Result;
use clap::{Parser, Subcommand};
use ensqr::{
    derive_items, render_item, Cursor, EnsQrConfig, ResolutionOutcome, ResolutionPipeline,
    RpcNameService,
};
use std::time::Duration;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "ensqr")]
#[command(about = "Resolve ENS records into scannable payloads")]
#[command(version)]
struct Cli {
    /// Ethereum JSON-RPC endpoint
    #[arg(short, long, default_value = ensqr::DEFAULT_RPC_URL)]
    rpc_url: String,

    /// Request timeout in seconds
    #[arg(short, long, default_value = "30")]
    timeout: u64,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the record set of one or more names
    Resolve {
        /// ENS names (e.g. vitalik.eth)
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// List the display items of a name
    Items {
        /// ENS name
        name: String,
        /// Item to show in detail
        #[arg(short, long, default_value = "0")]
        index: usize,
        /// Print the scan value without the QR code
        #[arg(long)]
        no_qr: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so --json output stays clean
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_writer(std::io::stderr)
            .init();
    }

    let config = EnsQrConfig::builder()
        .rpc_url(&cli.rpc_url)
        .request_timeout(Duration::from_secs(cli.timeout))
        .build()?;

    info!("Using RPC endpoint {}", config.rpc_url);
    let service = RpcNameService::new(&config)?;
    let pipeline = ResolutionPipeline::new(service, config);

    match cli.command {
        Commands::Resolve { names } => {
            let results = pipeline.resolve_batch(&names).await;
            let mut missing = false;

            for (name, result) in names.iter().zip(results) {
                match result {
                    Ok(outcome) => {
                        missing |= !outcome.is_found();
                        print_outcome(name, &outcome, cli.json)?;
                    }
                    Err(e) => {
                        error!("❌ Resolution of {} failed: {}", name, e);
                        missing = true;
                    }
                }
            }

            if missing {
                std::process::exit(1);
            }
        }

        Commands::Items { name, index, no_qr } => {
            let outcome = match pipeline.resolve(&name).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("❌ Resolution of {} failed: {}", name, e);
                    std::process::exit(1);
                }
            };

            let Some(records) = outcome.record_set() else {
                println!("No ENS name found");
                std::process::exit(1);
            };

            let items = derive_items(records);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&items)?);
                return Ok(());
            }

            if !items.has_items {
                println!("Nothing to show for {}", name);
                return Ok(());
            }

            let cursor = Cursor::at(index, &items);
            for (i, item) in items.iter().enumerate() {
                let marker = if i == cursor.index() { ">" } else { " " };
                println!("{} [{}] {}: {}", marker, i, item.label, item.payload);
            }

            if let Some(item) = cursor.current(&items) {
                println!();
                println!("{} ({}/{})", item.label, cursor.index() + 1, items.len());
                if !no_qr {
                    println!("{}", render_item(item)?);
                }
                println!("  scan value: {}", item.payload);
                println!(
                    "  prev: {}  next: {}",
                    if cursor.has_prev() { "yes" } else { "no" },
                    if cursor.has_next(&items) { "yes" } else { "no" },
                );
            }
        }
    }

    Ok(())
}

fn print_outcome(name: &str, outcome: &ResolutionOutcome, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    match outcome {
        ResolutionOutcome::Found(records) => {
            println!("✅ {} resolved:", name);
            for (field, value) in records.entries() {
                println!("  {}: {}", field.label(), value);
            }
        }
        ResolutionOutcome::NothingFound => {
            println!("❌ No ENS name found: {}", name);
        }
    }
    Ok(())
}
