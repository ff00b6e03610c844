use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use alloy::primitives::{address, Address};
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;

use deploy::deployer::DeployError;
use deploy::provider::{Confirmed, ContractFactory, DeployProvider, PendingDeployment};

pub const CONTRACT_NAME: &str = "DescentralizedBet";

pub const DEPLOYED_AT: Address = address!("abcdef0123456789abcdef0123456789abcdef01");

/// The ganache accounts from the checked-in configuration, deployer first.
pub const GANACHE_ACCOUNTS: [&str; 5] = [
    "0xddf186adadb92ce94f1c1ac5886846c2952a73d55242300ba0da0282988d07e0",
    "0x67de66601ab6dfb95ff796bb3deebaa8f59e1f9967014e9abab7ac7460713206",
    "0x76c92147c2823e91ab73db46eabcdd0266ecef03c1b4a243006d04cc9b4b66f2",
    "0x6ca1f861de1cce48d788da47fc23da2dc301e8e8155013642fcdb6d69f161224",
    "0x122920e6bb42876bd80f6e80a2805750adeee62af00cd20bfe6d3fe6451334ee",
];

pub fn ganache_signers() -> Vec<Address> {
    GANACHE_ACCOUNTS
        .iter()
        .map(|key| key.parse::<PrivateKeySigner>().unwrap().address())
        .collect()
}

#[derive(Clone, Copy)]
pub enum Outcome {
    Confirm(Address),
    FailSubmission,
    FailConfirmation,
}

/// Scriptable in-memory deploy provider. Knows a fixed set of contract
/// names and plays back the configured outcome; `submitted` counts the
/// transactions that reached the fake chain.
pub struct StubProvider {
    pub signers: Vec<Address>,
    pub known_contracts: Vec<String>,
    pub outcome: Outcome,
    pub submitted: Arc<AtomicUsize>,
}

impl StubProvider {
    pub fn new(signers: Vec<Address>) -> Self {
        Self {
            signers,
            known_contracts: vec![CONTRACT_NAME.to_string()],
            outcome: Outcome::Confirm(DEPLOYED_AT),
            submitted: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = outcome;
        self
    }

    pub fn submitted(&self) -> usize {
        self.submitted.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DeployProvider for StubProvider {
    fn signers(&self) -> Result<Vec<Address>, DeployError> {
        Ok(self.signers.clone())
    }

    async fn contract_factory(
        &self,
        name: &str,
    ) -> Result<Box<dyn ContractFactory>, DeployError> {
        if !self.known_contracts.iter().any(|known| known == name) {
            return Err(DeployError::FactoryResolution {
                name: name.to_string(),
                source: anyhow::anyhow!("contract is not compiled"),
            });
        }
        Ok(Box::new(StubFactory {
            outcome: self.outcome,
            submitted: self.submitted.clone(),
        }))
    }
}

struct StubFactory {
    outcome: Outcome,
    submitted: Arc<AtomicUsize>,
}

#[async_trait]
impl ContractFactory for StubFactory {
    async fn deploy(&self) -> Result<Box<dyn PendingDeployment>, DeployError> {
        if let Outcome::FailSubmission = self.outcome {
            return Err(DeployError::Submission(anyhow::anyhow!(
                "error sending request: connection refused"
            )));
        }
        self.submitted.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(StubPending {
            outcome: self.outcome,
        }))
    }
}

struct StubPending {
    outcome: Outcome,
}

#[async_trait]
impl PendingDeployment for StubPending {
    async fn wait_for_confirmation(self: Box<Self>) -> Result<Confirmed, DeployError> {
        match self.outcome {
            Outcome::Confirm(address) => Ok(Confirmed { address }),
            Outcome::FailConfirmation => Err(DeployError::Confirmation(anyhow::anyhow!(
                "transaction was not mined within the node timeout"
            ))),
            Outcome::FailSubmission => unreachable!("submission already failed"),
        }
    }
}
