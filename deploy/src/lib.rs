pub mod artifacts;
pub mod deployer;
pub mod provider;
pub mod shared;
