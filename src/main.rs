use clap::Parser;

use wordtally::cli::{Cli, Output};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = cli.run().await {
        Output::new(false).error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
