use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use deploy::artifacts::ArtifactStore;
use deploy::deployer;
use deploy::provider::EthProvider;
use deploy::shared;

/// Deploys a compiled contract to one of the configured networks.
#[derive(Debug, Parser)]
struct Args {
    /// Name of the compiled contract to deploy.
    contract: String,

    /// Network entry from the configuration file to deploy to.
    #[clap(long)]
    network: String,

    /// Path to the network configuration file.
    #[clap(long, env = "DEPLOY_CONFIG", default_value = shared::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Directory holding the compiled contract artifacts.
    #[clap(long, env = "DEPLOY_ARTIFACTS", default_value = "artifacts")]
    artifacts: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    shared::init_tracing();
    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = shared::config(&args.config)?;
    let network = config.network(&args.network)?;
    tracing::info!(network = %args.network, rpc = %network.url, "deploying {}", args.contract);
    let provider = EthProvider::connect(network, ArtifactStore::new(args.artifacts))?;
    deployer::run(&provider, &args.contract).await?;
    Ok(())
}
