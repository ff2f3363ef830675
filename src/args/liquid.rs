//! `liquid`: deploy a uniswap v2 environment and bootstrap liquidity.
//!
//! Besides the numeric knobs this verb carries four execution gates.
//! Each `--X-only` flag clears the other three gates, so passing more
//! than one of them leaves every gate closed and nothing executes.

use serde::Serialize;
use tracing::warn;

use super::flags::{resolve_flags, FlagSpec};
use super::help::{options_block, style, HelpText};
use super::{requests_help, ArgumentVector, HelpScope, Resolution};
use crate::types::{ArgError, Numeric};

// ---------------------------------------------------------------------------
// Flags
// ---------------------------------------------------------------------------

const DEPLOY_ONLY: &str = "--deploy-only";
const MINT_ONLY: &str = "--mint-only";
const BOOTSTRAP_ONLY: &str = "--bootstrap-only";
const APPROVE_ONLY: &str = "--approve-only";
const NUM_PAIRS: &str = "--num-pairs";
const WETH_ADMIN: &str = "--weth-admin";
const WETH_USER: &str = "--weth-user";
const MEMPOOL: &str = "--mempool";
const AUTO_ACCEPT: &str = "-y";

pub const FLAGS: [FlagSpec; 9] = [
    FlagSpec::boolean(DEPLOY_ONLY, None, "* Only deploy contracts, don't bootstrap liquidity."),
    FlagSpec::boolean(MINT_ONLY, None, "* Only mint tokens."),
    FlagSpec::boolean(BOOTSTRAP_ONLY, None, "* Only bootstrap liquidity, don't deploy contracts."),
    FlagSpec::boolean(APPROVE_ONLY, None, "* Only approve uni router to spend your tokens."),
    FlagSpec::number(
        NUM_PAIRS,
        Some("-p"),
        Some(Numeric::Int(1)),
        "Number of DAI pairs to deploy (if deploying).",
    ),
    FlagSpec::number(
        WETH_ADMIN,
        Some("-w"),
        Some(Numeric::Int(100)),
        "Amount of WETH to mint for admin.",
    ),
    FlagSpec::number(
        WETH_USER,
        Some("-u"),
        Some(Numeric::Float(5.1)),
        "Amount of WETH to mint for user.",
    ),
    FlagSpec::boolean(MEMPOOL, Some("-m"), "Send transactions to mempool instead of Flashbots."),
    FlagSpec::boolean(AUTO_ACCEPT, None, "Auto-accept prompts (non-interactive mode)."),
];

// ---------------------------------------------------------------------------
// Execution gates
// ---------------------------------------------------------------------------

/// Which pipeline stages run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExecutionFilter {
    #[serde(rename = "shouldDeploy")]
    pub deploy: bool,
    #[serde(rename = "shouldMintTokens")]
    pub mint: bool,
    #[serde(rename = "shouldApproveTokens")]
    pub approve: bool,
    #[serde(rename = "shouldBootstrapLiquidity")]
    pub bootstrap: bool,
}

impl Default for ExecutionFilter {
    fn default() -> Self {
        Self { deploy: true, mint: true, approve: true, bootstrap: true }
    }
}

impl ExecutionFilter {
    /// Compute the gates from the `--X-only` flags present.
    pub fn from_only_flags(deploy_only: bool, mint_only: bool, bootstrap_only: bool, approve_only: bool) -> Self {
        let mut filter = Self::default();
        if deploy_only {
            filter.bootstrap = false;
            filter.mint = false;
            filter.approve = false;
        }
        if mint_only {
            filter.deploy = false;
            filter.bootstrap = false;
            filter.approve = false;
        }
        if bootstrap_only {
            filter.deploy = false;
            filter.mint = false;
            filter.approve = false;
        }
        if approve_only {
            filter.deploy = false;
            filter.bootstrap = false;
            filter.mint = false;
        }
        filter
    }

    /// True when no stage will run.
    pub fn is_empty(&self) -> bool {
        !(self.deploy || self.mint || self.approve || self.bootstrap)
    }
}

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidParams {
    #[serde(flatten)]
    pub filter: ExecutionFilter,
    pub num_pairs: Numeric,
    pub weth_mint_amount_admin: Numeric,
    pub weth_mint_amount_user: Numeric,
    pub send_to_mempool: bool,
    pub auto_accept: bool,
}

impl Default for LiquidParams {
    fn default() -> Self {
        Self {
            filter: ExecutionFilter::default(),
            num_pairs: Numeric::Int(1),
            weth_mint_amount_admin: Numeric::Int(100),
            weth_mint_amount_user: Numeric::Float(5.1),
            send_to_mempool: false,
            auto_accept: false,
        }
    }
}

pub fn help_text() -> String {
    let description = format!(
        "{}liquid{}: deploy a uniswap v2 environment w/ bootstrapped liquidity.\n\
         Deployment details are written to `<output-dir>/<env-scope>/uniBootstrap$N.json`\n\
         where $N increments numerically.",
        style::BRIGHT,
        style::RESET,
    );
    let options = format!(
        "{}\n    (*) passing multiple --X-only params will cause none of them to execute.",
        options_block(&FLAGS).trim_end()
    );
    HelpText {
        description: &description,
        usage: "    mevflood liquid [options]",
        options: &options,
        examples: "    # default; deploy contracts and bootstrap liquidity\n\
                   \x20   mevflood liquid\n\n\
                   \x20   # only deploy contracts\n\
                   \x20   mevflood liquid --deploy-only\n\n\
                   \x20   # deploy 4 DAI pairs without prompting\n\
                   \x20   mevflood liquid -p 4 -y",
    }
    .render()
}

/// Resolve `liquid` arguments. No tokens means the full pipeline with defaults.
pub fn resolve(args: &ArgumentVector) -> Result<Resolution<LiquidParams>, ArgError> {
    if requests_help(args, HelpScope::Joined) {
        return Ok(Resolution::Help(help_text()));
    }
    let flags = resolve_flags(args, &FLAGS)?;

    let only_flags = [DEPLOY_ONLY, MINT_ONLY, BOOTSTRAP_ONLY, APPROVE_ONLY];
    let only_count = only_flags.iter().filter(|f| flags.present(f)).count();
    let filter = ExecutionFilter::from_only_flags(
        flags.present(DEPLOY_ONLY),
        flags.present(MINT_ONLY),
        flags.present(BOOTSTRAP_ONLY),
        flags.present(APPROVE_ONLY),
    );
    if only_count > 1 {
        warn!(count = only_count, "Multiple --X-only flags passed; no stage will execute");
    }

    let defaults = LiquidParams::default();
    Ok(Resolution::Run(LiquidParams {
        filter,
        num_pairs: flags.number(NUM_PAIRS).unwrap_or(defaults.num_pairs),
        weth_mint_amount_admin: flags.number(WETH_ADMIN).unwrap_or(defaults.weth_mint_amount_admin),
        weth_mint_amount_user: flags.number(WETH_USER).unwrap_or(defaults.weth_mint_amount_user),
        send_to_mempool: flags.present(MEMPOOL),
        auto_accept: flags.present(AUTO_ACCEPT),
    }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn run(tokens: &[&str]) -> LiquidParams {
        resolve(&ArgumentVector::new(tokens.iter().copied()))
            .unwrap()
            .into_params()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        assert_eq!(run(&[]), LiquidParams::default());
        let p = run(&[]);
        assert_eq!(p.filter, ExecutionFilter::default());
        assert_eq!(p.num_pairs, Numeric::Int(1));
        assert_eq!(p.weth_mint_amount_admin, Numeric::Int(100));
        assert_eq!(p.weth_mint_amount_user, Numeric::Float(5.1));
        assert!(!p.send_to_mempool);
        assert!(!p.auto_accept);
    }

    #[test]
    fn test_single_only_flag_opens_one_gate() {
        let cases = [
            (DEPLOY_ONLY, ExecutionFilter { deploy: true, mint: false, approve: false, bootstrap: false }),
            (MINT_ONLY, ExecutionFilter { deploy: false, mint: true, approve: false, bootstrap: false }),
            (BOOTSTRAP_ONLY, ExecutionFilter { deploy: false, mint: false, approve: false, bootstrap: true }),
            (APPROVE_ONLY, ExecutionFilter { deploy: false, mint: false, approve: true, bootstrap: false }),
        ];
        for (flag, expected) in cases {
            assert_eq!(run(&[flag]).filter, expected, "{flag}");
        }
    }

    #[test]
    fn test_two_only_flags_close_every_gate() {
        let p = run(&["--deploy-only", "--bootstrap-only"]);
        assert!(p.filter.is_empty());
        let p = run(&["--mint-only", "--approve-only", "-y"]);
        assert!(p.filter.is_empty());
        assert!(p.auto_accept);
    }

    #[test]
    fn test_numeric_flags() {
        let p = run(&["-p", "4", "--weth-admin", "250.5", "-u", "10", "-m"]);
        assert_eq!(p.num_pairs, Numeric::Int(4));
        assert_eq!(p.weth_mint_amount_admin, Numeric::Float(250.5));
        assert_eq!(p.weth_mint_amount_user, Numeric::Int(10));
        assert!(p.send_to_mempool);
    }

    #[test]
    fn test_missing_value_is_an_error() {
        let err = resolve(&ArgumentVector::new(["-y", "--num-pairs"])).unwrap_err();
        assert_eq!(err, ArgError::MissingOptionValue { flag: "--num-pairs".into() });
    }

    #[test]
    fn test_help_anywhere() {
        let r = resolve(&ArgumentVector::new(["-p", "2", "--help"])).unwrap();
        match r {
            Resolution::Help(text) => {
                assert!(text.contains("--deploy-only"));
                assert!(text.contains("none of them to execute"));
            }
            other => panic!("expected help, got {other:?}"),
        }
    }

    #[test]
    fn test_serializes_gate_names() {
        let json = serde_json::to_value(LiquidParams::default()).unwrap();
        assert_eq!(json["shouldDeploy"], true);
        assert_eq!(json["shouldBootstrapLiquidity"], true);
        assert_eq!(json["numPairs"], 1);
        assert_eq!(json["wethMintAmountUser"], 5.1);
    }
}
