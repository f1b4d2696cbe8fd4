//! launchutil — create and run simple daily launchd services.

use clap::Parser;

use launchutil::cli::Cli;
use launchutil::error::ServiceError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = cli.run().await {
        eprintln!("Error: {e}");
        let code = e
            .downcast_ref::<ServiceError>()
            .map_or(1, ServiceError::exit_code);
        std::process::exit(code);
    }
}
