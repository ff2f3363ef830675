//! Configuration loading from TOML with environment variable overrides.
//!
//! Reads an optional `mevflood.toml` and deserializes into strongly-typed
//! structs; every section has defaults so a missing file is fine.
//! `RPC_URL` and `NODE_ENV` override the endpoint and environment scope.
//! Wallet secrets are referenced by env-var name and resolved at runtime.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::types::Wallet;

/// Default config file path, overridable with `MEVFLOOD_CONFIG`.
pub const DEFAULT_CONFIG_FILE: &str = "mevflood.toml";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub rpc: RpcConfig,
    pub output: OutputConfig,
    pub wallets: WalletsConfig,
    pub deployer: DeployerConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RpcConfig {
    pub url: String,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self { url: "http://localhost:8545".into() }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OutputConfig {
    /// Root of `wallets.json` and the per-scope artifact directories.
    pub dir: String,
    pub env_scope: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "src/output".into(),
            env_scope: "development".into(),
        }
    }
}

/// Names of the env vars holding wallet material.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct WalletsConfig {
    pub admin_key_env: String,
    pub admin_address_env: String,
    pub test_key_env: String,
    pub test_address_env: String,
}

impl Default for WalletsConfig {
    fn default() -> Self {
        Self {
            admin_key_env: "ADMIN_PRIVATE_KEY".into(),
            admin_address_env: "ADMIN_ADDRESS".into(),
            test_key_env: "TEST_PRIVATE_KEY".into(),
            test_address_env: "TEST_ADDRESS".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct DeployerConfig {
    /// Program and arguments of the deployment routine. Empty means
    /// unconfigured; the liquidity run fails when it reaches deployment.
    pub command: Vec<String>,
}

impl AppConfig {
    /// Load configuration from a TOML file. A missing file yields defaults.
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::from_toml_str(&contents).with_context(|| format!("Failed to parse config file: {path}"))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply `RPC_URL` / `NODE_ENV` from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(std::env::var("RPC_URL").ok(), std::env::var("NODE_ENV").ok())
    }

    pub fn with_overrides(mut self, rpc_url: Option<String>, env_scope: Option<String>) -> Self {
        if let Some(url) = rpc_url.filter(|u| !u.is_empty()) {
            self.rpc.url = url;
        }
        if let Some(scope) = env_scope.filter(|s| !s.is_empty()) {
            self.output.env_scope = scope;
        }
        self
    }

    /// Resolve an environment variable name to its value.
    pub fn resolve_env(env_name: &str) -> Result<String> {
        std::env::var(env_name)
            .with_context(|| format!("Environment variable not set: {env_name}"))
    }

    pub fn admin_wallet(&self) -> Result<Wallet> {
        Ok(Wallet::new(
            Self::resolve_env(&self.wallets.admin_address_env)?,
            Self::resolve_env(&self.wallets.admin_key_env)?,
        ))
    }

    pub fn test_wallet(&self) -> Result<Wallet> {
        Ok(Wallet::new(
            Self::resolve_env(&self.wallets.test_address_env)?,
            Self::resolve_env(&self.wallets.test_key_env)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.rpc.url, "http://localhost:8545");
        assert_eq!(cfg.output.dir, "src/output");
        assert_eq!(cfg.output.env_scope, "development");
        assert_eq!(cfg.wallets.admin_key_env, "ADMIN_PRIVATE_KEY");
        assert!(cfg.deployer.command.is_empty());
    }

    #[test]
    fn test_partial_file() {
        let cfg = AppConfig::from_toml_str(
            r#"
            [rpc]
            url = "http://10.0.0.2:8545"

            [deployer]
            command = ["node", "deploy.js"]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.rpc.url, "http://10.0.0.2:8545");
        assert_eq!(cfg.output.env_scope, "development");
        assert_eq!(cfg.deployer.command, vec!["node", "deploy.js"]);
    }

    #[test]
    fn test_overrides() {
        let cfg = AppConfig::default().with_overrides(Some("http://rpc".into()), Some("goerli".into()));
        assert_eq!(cfg.rpc.url, "http://rpc");
        assert_eq!(cfg.output.env_scope, "goerli");

        let cfg = AppConfig::default().with_overrides(Some(String::new()), None);
        assert_eq!(cfg.rpc.url, "http://localhost:8545");
    }

    #[test]
    fn test_missing_file_is_default() {
        let cfg = AppConfig::load("/tmp/mevflood_no_such_config_9f2.toml").unwrap();
        assert_eq!(cfg.output.env_scope, "development");
    }

    #[test]
    fn test_bad_toml_is_error() {
        assert!(AppConfig::from_toml_str("[rpc\nurl=").is_err());
    }
}
