use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct VersionArgs {
    /// Show detailed version information
    #[arg(short = 'd', long = "detailed")]
    pub detailed: bool,
}

pub async fn execute(args: VersionArgs) -> Result<()> {
    println!("wordtally {}", env!("CARGO_PKG_VERSION"));

    if args.detailed {
        println!("Rust Edition: 2024");
        println!("CPU cores: {}", num_cpus::get());
        println!("Description: {}", env!("CARGO_PKG_DESCRIPTION"));
    }
    Ok(())
}
