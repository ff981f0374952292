// SpaceTraders command-line client - entry point

use clap::Parser;
use stcli::cli::{run, Cli};
use stcli::v_error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();

    // Operation errors already carry their cause chain in the message
    if let Err(e) = run(cli, &mut stdout).await {
        v_error!("❌ {}", e);
        std::process::exit(1);
    }
}
