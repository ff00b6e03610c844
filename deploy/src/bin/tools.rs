use std::path::PathBuf;
use std::process::ExitCode;

use alloy::signers::local::PrivateKeySigner;
use clap::Parser;

use deploy::shared;

/// Prints the configured networks and the signer addresses derived from
/// their accounts, without touching any chain.
#[derive(Debug, Parser)]
struct Args {
    /// Path to the network configuration file.
    #[clap(long, env = "DEPLOY_CONFIG", default_value = shared::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

fn main() -> ExitCode {
    shared::init_tracing();
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = shared::config(&args.config)?;
    println!("solidity: {}", config.solidity);
    for (name, network) in &config.networks {
        println!("{name}: {}", network.url);
        for account in &network.accounts {
            let signer: PrivateKeySigner = account.parse()?;
            println!("  {}", signer.address());
        }
    }
    Ok(())
}
