use alloy::primitives::Address;
use thiserror::Error;

use crate::provider::DeployProvider;

/// Everything that can end a deployment run. All variants are terminal:
/// a failed run is never retried.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("invalid configuration")]
    Configuration(#[source] anyhow::Error),
    #[error("cannot resolve a contract factory for {name}")]
    FactoryResolution {
        name: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("failed to submit the deployment transaction")]
    Submission(#[source] anyhow::Error),
    #[error("the deployment transaction was not confirmed")]
    Confirmation(#[source] anyhow::Error),
}

#[derive(Clone, Debug)]
pub struct DeploymentResult {
    pub contract_name: String,
    pub address: Address,
    pub deployer_account: Address,
}

/// Runs one deployment attempt: the first configured account signs, exactly
/// one transaction is submitted, and the run either confirms or fails.
pub async fn run(
    provider: &dyn DeployProvider,
    contract_name: &str,
) -> Result<DeploymentResult, DeployError> {
    let signers = provider.signers()?;
    let deployer = *signers.first().ok_or_else(|| {
        DeployError::Configuration(anyhow::anyhow!("no deployment accounts configured"))
    })?;
    println!("Deploying contracts with account: {deployer}");

    let factory = provider.contract_factory(contract_name).await?;
    let pending = factory.deploy().await?;
    let confirmed = pending.wait_for_confirmation().await?;
    println!("{contract_name} deployed to: {}", confirmed.address);

    Ok(DeploymentResult {
        contract_name: contract_name.to_string(),
        address: confirmed.address,
        deployer_account: deployer,
    })
}
