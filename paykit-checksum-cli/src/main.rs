//! Paykit Checksum CLI
//!
//! Command-line interface for signing and verifying payment gateway checksums.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod ui;

#[derive(Parser)]
#[command(name = "paykit-checksum")]
#[command(about = "Sign and verify payment gateway checksums", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Merchant config file (JSON). Defaults to PAYTM_* environment variables
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a checksum for a parameter set
    Generate {
        /// Parameters as a JSON object, a JSON string, or @file
        #[arg(short, long)]
        params: String,

        /// Print only the checksum
        #[arg(long)]
        raw: bool,
    },

    /// Verify a checksum against a parameter set
    Verify {
        /// Parameters as a JSON object, a JSON string, or @file
        #[arg(short, long)]
        params: String,

        /// Checksum to verify
        #[arg(short, long)]
        checksum: String,
    },

    /// Verify a gateway callback form carrying CHECKSUMHASH
    Callback {
        /// Callback fields as a JSON object or @file
        #[arg(short, long)]
        form: String,
    },

    /// Build signed checkout parameters for a new payment
    Payment {
        /// Order ID
        #[arg(long)]
        order_id: String,

        /// Customer ID
        #[arg(long)]
        customer_id: String,

        /// Transaction amount
        #[arg(short, long)]
        amount: String,
    },

    /// Build a signed order-status request body
    StatusRequest {
        /// Order ID to query
        #[arg(long)]
        order_id: String,

        /// Print only the JSON body
        #[arg(long)]
        raw: bool,
    },

    /// Decide the redirect for an order-status response
    StatusOutcome {
        /// Gateway response as JSON or @file
        #[arg(short, long)]
        response: String,

        /// Order ID, if the response does not carry one
        #[arg(long)]
        order_id: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "paykit_checksum_cli=debug,paykit_checksum=debug"
    } else {
        "paykit_checksum_cli=info,paykit_checksum=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let verbose = cli.verbose;
    let config_path = cli.config;
    let load_config = || commands::load_config(config_path.as_deref());

    // Dispatch commands
    let ok = match cli.command {
        Commands::Generate { params, raw } => {
            commands::generate::run(&load_config()?, &params, raw, verbose).await?;
            true
        }
        Commands::Verify { params, checksum } => {
            commands::verify::run(&load_config()?, &params, &checksum, verbose)?
        }
        Commands::Callback { form } => commands::callback::run(&load_config()?, &form, verbose)?,
        Commands::Payment {
            order_id,
            customer_id,
            amount,
        } => {
            commands::payment::run(&load_config()?, &order_id, &customer_id, &amount, verbose)
                .await?;
            true
        }
        Commands::StatusRequest { order_id, raw } => {
            commands::status::request(&load_config()?, &order_id, raw).await?;
            true
        }
        Commands::StatusOutcome { response, order_id } => {
            commands::status::outcome(&response, order_id.as_deref())?;
            true
        }
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
