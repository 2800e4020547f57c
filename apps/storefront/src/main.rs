//! # TechStore Console Entry Point
//!
//! ```text
//! techstore [--config <path>]
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (stderr)
//! 2. Load configuration
//! 3. Open the cart store
//! 4. Start the session and restore the saved cart
//! 5. Run the console on stdin/stdout

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

/// TechStore - console storefront for tech products
#[derive(Debug, Parser)]
#[command(name = "techstore")]
#[command(version, about, long_about = None)]
struct Args {
    /// Config file to load instead of the platform default
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // The actual setup is in lib.rs for better testability
    match techstore_storefront::run(args.config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("techstore: {}", e);
            ExitCode::FAILURE
        }
    }
}
