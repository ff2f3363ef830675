//! Liquidity bootstrap orchestration.
//!
//! Sequence for one run: probe the RPC endpoint, load wallets, check the
//! admin nonce (prompting unless auto-accept is set), hand the resolved
//! parameters and the latest deployment artifact to the deployment
//! routine, then persist any signed transactions as a new artifact.

use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::args::LiquidParams;
use crate::chain::{ChainProvider, DeployRequest, LiquidityDeployer};
use crate::storage::{ArtifactKind, ArtifactSequencer};
use crate::types::{DriverError, Wallet};

// ---------------------------------------------------------------------------
// Confirmation
// ---------------------------------------------------------------------------

/// Operator confirmation before running against a used admin account.
#[cfg_attr(test, mockall::automock)]
pub trait Confirmation: Send + Sync {
    /// Block until the operator agrees to continue.
    fn confirm(&self, nonce: u64) -> Result<()>;
}

/// Waits for Enter on the terminal. No timeout.
pub struct TerminalPrompt;

impl Confirmation for TerminalPrompt {
    fn confirm(&self, nonce: u64) -> Result<()> {
        let mut stderr = std::io::stderr();
        writeln!(stderr, "Your admin account nonce is currently {nonce}.")?;
        write!(stderr, "press Enter to continue...")?;
        stderr.flush()?;
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Wallets used by the deployment routine.
#[derive(Debug, Clone)]
pub struct Wallets {
    pub admin: Wallet,
    pub user: Wallet,
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiquidOutcome {
    pub admin_nonce: u64,
    pub signed_txs: usize,
    /// Artifact written, if the routine returned signed transactions.
    pub artifact: Option<PathBuf>,
}

pub struct LiquidDriver<'a> {
    rpc_url: &'a str,
    provider: &'a dyn ChainProvider,
    deployer: &'a dyn LiquidityDeployer,
    confirmation: &'a dyn Confirmation,
    sequencer: &'a ArtifactSequencer,
}

impl<'a> LiquidDriver<'a> {
    pub fn new(
        rpc_url: &'a str,
        provider: &'a dyn ChainProvider,
        deployer: &'a dyn LiquidityDeployer,
        confirmation: &'a dyn Confirmation,
        sequencer: &'a ArtifactSequencer,
    ) -> Self {
        Self { rpc_url, provider, deployer, confirmation, sequencer }
    }

    /// Run the bootstrap. `load_wallets` is only called once the
    /// endpoint has answered.
    pub async fn run(
        &self,
        params: LiquidParams,
        load_wallets: impl FnOnce() -> Result<Wallets>,
    ) -> Result<LiquidOutcome> {
        let block = self.provider.block_number().await.map_err(|e| {
            DriverError::UnreachableEndpoint {
                url: self.rpc_url.to_string(),
                reason: format!("{e:#}"),
            }
        })?;
        debug!(block, url = %self.rpc_url, "RPC endpoint reachable");

        let Wallets { admin, user } = load_wallets()?;

        let admin_nonce = self.provider.transaction_count(&admin.address).await?;
        if admin_nonce != 0 && !params.auto_accept {
            warn!(nonce = admin_nonce, address = %admin.address, "Admin account has already sent transactions");
            self.confirmation.confirm(admin_nonce)?;
        }

        let deployment_file = self.sequencer.resolve_existing()?;
        let fresh_deploy = params.filter.deploy;
        info!(
            deploy = params.filter.deploy,
            mint = params.filter.mint,
            approve = params.filter.approve,
            bootstrap = params.filter.bootstrap,
            num_pairs = %params.num_pairs,
            existing = ?deployment_file,
            "Running liquidity bootstrap"
        );

        let deployment = self
            .deployer
            .deploy(DeployRequest {
                params,
                rpc_url: self.rpc_url.to_string(),
                admin,
                user,
                deployment_file,
            })
            .await?;

        let artifact = if deployment.has_signed_txs() {
            let kind = if fresh_deploy {
                ArtifactKind::Deployment
            } else {
                ArtifactKind::Liquidity
            };
            let path = self.sequencer.resolve_next(kind)?;
            self.sequencer.save_deployment(&path, &deployment)?;
            Some(path)
        } else {
            info!("No signed transactions returned; nothing saved");
            None
        };

        Ok(LiquidOutcome {
            admin_nonce,
            signed_txs: deployment.signed_txs.len(),
            artifact,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
