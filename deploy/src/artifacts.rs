use std::path::PathBuf;

use alloy::primitives::Bytes;
use anyhow::Context;
use serde::Deserialize;

use crate::deployer::DeployError;

/// On-disk registry of compiled contract artifacts, resolved by contract
/// name: `<dir>/<name>.json` (build artifact with a `bytecode` field) or
/// `<dir>/<name>.bin` (raw creation bytecode hex).
#[derive(Debug)]
pub struct ArtifactStore {
    dir: PathBuf,
}

#[derive(Deserialize)]
struct Artifact {
    bytecode: String,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Creation bytecode for the named contract.
    pub fn creation_code(&self, name: &str) -> Result<Bytes, DeployError> {
        self.load(name)
            .map_err(|source| DeployError::FactoryResolution {
                name: name.to_string(),
                source,
            })
    }

    fn load(&self, name: &str) -> anyhow::Result<Bytes> {
        let json = self.dir.join(format!("{name}.json"));
        if json.exists() {
            let raw = std::fs::read_to_string(&json)
                .with_context(|| format!("reading {}", json.display()))?;
            let artifact: Artifact = serde_json::from_str(&raw)
                .with_context(|| format!("parsing {}", json.display()))?;
            return decode_hex(&artifact.bytecode);
        }
        let bin = self.dir.join(format!("{name}.bin"));
        if bin.exists() {
            let raw = std::fs::read_to_string(&bin)
                .with_context(|| format!("reading {}", bin.display()))?;
            return decode_hex(&raw);
        }
        anyhow::bail!(
            "no artifact for {name} in {} (expected {name}.json or {name}.bin)",
            self.dir.display()
        )
    }
}

fn decode_hex(code: &str) -> anyhow::Result<Bytes> {
    let code = code.trim().trim_start_matches("0x");
    anyhow::ensure!(!code.is_empty(), "artifact contains no bytecode");
    let bytes = alloy::hex::decode(code).context("decoding artifact bytecode")?;
    Ok(bytes.into())
}
