//! Deployment routine bridged through a child process.
//!
//! The transaction-building library lives outside this crate. The
//! configured command receives the resolved parameters as JSON on stdin,
//! wallet keys through its environment, and prints the deployment
//! (`{"deployment": ..., "signedTxs": [...]}`) on stdout.

use anyhow::{Context, Result};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Serialize;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info};

use super::{DeployRequest, LiquidityDeployer};
use crate::args::LiquidParams;
use crate::types::{Deployment, DriverError};

/// Stdin payload. Keys are deliberately absent.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeployPayload<'a> {
    params: &'a LiquidParams,
    rpc_url: &'a str,
    admin_address: &'a str,
    user_address: &'a str,
    deployment_file: Option<&'a PathBuf>,
}

pub struct CommandDeployer {
    command: Vec<String>,
}

impl CommandDeployer {
    /// Build from a command line: program followed by its arguments.
    pub fn new(command: &[String]) -> Self {
        Self { command: command.to_vec() }
    }

    fn payload(request: &DeployRequest) -> Result<String> {
        let payload = DeployPayload {
            params: &request.params,
            rpc_url: &request.rpc_url,
            admin_address: &request.admin.address,
            user_address: &request.user.address,
            deployment_file: request.deployment_file.as_ref(),
        };
        serde_json::to_string(&payload).context("Failed to serialise deploy payload")
    }
}

#[async_trait]
impl LiquidityDeployer for CommandDeployer {
    async fn deploy(&self, request: DeployRequest) -> Result<Deployment> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| DriverError::Deployer("no deployer command configured".into()))?;
        let payload = Self::payload(&request)?;
        debug!(program = %program, args = ?args, "Spawning deployer");

        let mut child = Command::new(program)
            .args(args)
            .env("ADMIN_PRIVATE_KEY", request.admin.private_key.expose_secret())
            .env("TEST_PRIVATE_KEY", request.user.private_key.expose_secret())
            .env("RPC_URL", &request.rpc_url)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("Failed to spawn deployer `{program}`"))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(payload.as_bytes())
                .await
                .context("Failed to write deploy payload")?;
        }

        let output = child
            .wait_with_output()
            .await
            .context("Failed to wait for deployer")?;
        if !output.status.success() {
            return Err(DriverError::Deployer(format!("`{program}` exited with {}", output.status)).into());
        }

        let deployment: Deployment = serde_json::from_slice(&output.stdout)
            .context("Failed to parse deployer output")?;
        info!(signed_txs = deployment.signed_txs.len(), "Deployer finished");
        Ok(deployment)
    }
}
