//! Chain-facing collaborators of the liquidity driver.
//!
//! Defines the `ChainProvider` trait (reachability and nonce lookups)
//! and the `LiquidityDeployer` trait (the external routine that builds
//! and signs the deployment transactions), plus production
//! implementations:
//! - `JsonRpcClient` — HTTP JSON-RPC against the configured endpoint
//! - `CommandDeployer` — runs the transaction-building script as a child process

pub mod deployer;
pub mod rpc;

use anyhow::Result;
use async_trait::async_trait;

use crate::args::LiquidParams;
use crate::types::{Deployment, Wallet};
use std::path::PathBuf;

/// Minimal read access to the chain.
///
/// Calls are made sequentially with no retry; any failure aborts the run.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChainProvider: Send + Sync {
    /// Latest block number. Used as the reachability probe.
    async fn block_number(&self) -> Result<u64>;

    /// Number of transactions sent from `address` (its next nonce).
    async fn transaction_count(&self, address: &str) -> Result<u64>;
}

/// Everything the deployment routine needs for one run.
#[derive(Debug, Clone)]
pub struct DeployRequest {
    pub params: LiquidParams,
    pub rpc_url: String,
    pub admin: Wallet,
    pub user: Wallet,
    /// Most recent `uniBootstrap<N>.json`, reused by non-deploy runs.
    pub deployment_file: Option<PathBuf>,
}

/// The external routine that deploys contracts and bootstraps liquidity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LiquidityDeployer: Send + Sync {
    async fn deploy(&self, request: DeployRequest) -> Result<Deployment>;
}
