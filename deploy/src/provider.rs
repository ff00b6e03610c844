use alloy::network::{Ethereum, EthereumWallet, TransactionBuilder};
use alloy::primitives::{Address, Bytes};
use alloy::providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use url::Url;

use crate::artifacts::ArtifactStore;
use crate::deployer::DeployError;
use crate::shared::NetworkConfig;

/// A confirmed deployment.
#[derive(Clone, Debug)]
pub struct Confirmed {
    pub address: Address,
}

#[async_trait]
pub trait DeployProvider: Send + Sync {
    /// Signing identities in configuration order; the first one funds and
    /// signs the deployment.
    fn signers(&self) -> Result<Vec<Address>, DeployError>;

    /// Factory for a named compiled contract. Fails if the name is unknown.
    async fn contract_factory(&self, name: &str)
        -> Result<Box<dyn ContractFactory>, DeployError>;
}

#[async_trait]
pub trait ContractFactory: Send + Sync {
    /// Submits the deployment transaction. Returns once the node
    /// acknowledges the submission.
    async fn deploy(&self) -> Result<Box<dyn PendingDeployment>, DeployError>;
}

#[async_trait]
pub trait PendingDeployment: Send {
    /// Suspends until the transaction is mined, then yields the deployed
    /// contract address. Any timeout is the node's, not ours.
    async fn wait_for_confirmation(self: Box<Self>) -> Result<Confirmed, DeployError>;
}

/// `DeployProvider` over an EVM JSON-RPC endpoint.
#[derive(Debug)]
pub struct EthProvider {
    provider: DynProvider,
    signers: Vec<PrivateKeySigner>,
    artifacts: ArtifactStore,
}

impl EthProvider {
    /// Connects to `network.url` with every configured account registered
    /// as a signer.
    pub fn connect(network: &NetworkConfig, artifacts: ArtifactStore) -> Result<Self, DeployError> {
        let signers = network
            .accounts
            .iter()
            .map(|key| {
                key.parse::<PrivateKeySigner>()
                    .map_err(|err| anyhow::Error::new(err).context("invalid account private key"))
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(DeployError::Configuration)?;
        let url = Url::parse(&network.url).map_err(|err| {
            DeployError::Configuration(
                anyhow::Error::new(err).context(format!("invalid rpc url {}", network.url)),
            )
        })?;

        let mut accounts = signers.iter();
        let deployer = accounts.next().ok_or_else(|| {
            DeployError::Configuration(anyhow::anyhow!("network has no accounts configured"))
        })?;
        let mut wallet = EthereumWallet::from(deployer.clone());
        for signer in accounts {
            wallet.register_signer(signer.clone());
        }
        let provider = ProviderBuilder::new().wallet(wallet).connect_http(url).erased();

        Ok(Self {
            provider,
            signers,
            artifacts,
        })
    }
}

#[async_trait]
impl DeployProvider for EthProvider {
    fn signers(&self) -> Result<Vec<Address>, DeployError> {
        Ok(self.signers.iter().map(|signer| signer.address()).collect())
    }

    async fn contract_factory(
        &self,
        name: &str,
    ) -> Result<Box<dyn ContractFactory>, DeployError> {
        let code = self.artifacts.creation_code(name)?;
        Ok(Box::new(EthFactory {
            provider: self.provider.clone(),
            from: self.signers[0].address(),
            name: name.to_string(),
            code,
        }))
    }
}

struct EthFactory {
    provider: DynProvider,
    from: Address,
    name: String,
    code: Bytes,
}

#[async_trait]
impl ContractFactory for EthFactory {
    async fn deploy(&self) -> Result<Box<dyn PendingDeployment>, DeployError> {
        let tx = TransactionRequest::default()
            .with_from(self.from)
            .with_deploy_code(self.code.clone());
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|err| DeployError::Submission(err.into()))?;
        tracing::debug!(contract = %self.name, tx = %pending.tx_hash(), "deployment submitted");
        Ok(Box::new(EthPending { pending }))
    }
}

struct EthPending {
    pending: PendingTransactionBuilder<Ethereum>,
}

#[async_trait]
impl PendingDeployment for EthPending {
    async fn wait_for_confirmation(self: Box<Self>) -> Result<Confirmed, DeployError> {
        let receipt = self
            .pending
            .get_receipt()
            .await
            .map_err(|err| DeployError::Confirmation(err.into()))?;
        if !receipt.status() {
            return Err(DeployError::Confirmation(anyhow::anyhow!(
                "deployment transaction {} reverted",
                receipt.transaction_hash
            )));
        }
        let address = receipt.contract_address.ok_or_else(|| {
            DeployError::Confirmation(anyhow::anyhow!(
                "receipt for {} carries no contract address",
                receipt.transaction_hash
            ))
        })?;
        Ok(Confirmed { address })
    }
}
