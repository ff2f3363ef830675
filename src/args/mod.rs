//! Argument resolution for the mev-flood scripts.
//!
//! Each verb owns a resolver that turns an [`ArgumentVector`] into a
//! typed parameter struct. Flag scanning is shared (see [`flags`]);
//! verbs only declare their flag table, defaults and post-processing.

pub mod arb;
pub mod flags;
pub mod fund;
pub mod help;
pub mod liquid;
pub mod private_tx;
pub mod search;
pub mod swap;

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::types::ArgError;

pub use arb::ArbParams;
pub use fund::FundWalletsParams;
pub use liquid::{ExecutionFilter, LiquidParams};
pub use private_tx::{CancelPrivateTxParams, SendPrivateTxParams, SendProtectTxParams};
pub use search::{SearchParams, SearchProgram};
pub use swap::SwapParams;

// ---------------------------------------------------------------------------
// Argument vector
// ---------------------------------------------------------------------------

/// The tokens supplied after the verb. Index 0 is the first user token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentVector {
    tokens: Vec<String>,
}

impl ArgumentVector {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// Exact token match anywhere in the vector.
    pub fn includes(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Index of the first exact occurrence of `token`.
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.tokens.iter().position(|t| t == token)
    }

    pub fn joined(&self, separator: &str) -> String {
        self.tokens.join(separator)
    }
}

impl<S: Into<String>> FromIterator<S> for ArgumentVector {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

// ---------------------------------------------------------------------------
// Help detection
// ---------------------------------------------------------------------------

/// Which tokens the help trigger inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpScope {
    /// Any token, matched against the whole vector joined together.
    Joined,
    /// Only the first token.
    FirstToken,
}

/// Whether the operator asked for help.
///
/// This is a plain substring match: `helpdesk` triggers it too. All
/// resolvers go through here so the rule can be tightened in one place.
pub fn requests_help(args: &ArgumentVector, scope: HelpScope) -> bool {
    const TRIGGER: &str = "help";
    match scope {
        HelpScope::Joined => args.joined(" ").contains(TRIGGER),
        HelpScope::FirstToken => args.get(0).is_some_and(|t| t.contains(TRIGGER)),
    }
}

// ---------------------------------------------------------------------------
// Positionals
// ---------------------------------------------------------------------------

/// Parse a wallet index positional.
pub(crate) fn wallet_index(token: &str, name: &str) -> Result<usize, ArgError> {
    token.trim().parse().map_err(|_| ArgError::InvalidNumber {
        flag: name.to_string(),
        value: token.to_string(),
    })
}

/// Read `<first> [last]` wallet indices from the front of the vector.
///
/// A missing or flag-like second token yields `first + 1`.
pub(crate) fn wallet_range(args: &ArgumentVector) -> Result<(usize, usize), ArgError> {
    let first = args.get(0).unwrap_or_default();
    let start = wallet_index(first, "first_wallet_index")?;
    let end = match args.get(1) {
        Some(token) if !token.starts_with('-') => wallet_index(token, "last_wallet_index")?,
        _ => start.checked_add(1).ok_or_else(|| ArgError::InvalidNumber {
            flag: "first_wallet_index".to_string(),
            value: first.to_string(),
        })?,
    };
    Ok((start, end))
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<T> {
    /// Parameters are ready to hand to the script.
    Run(T),
    /// The operator asked for help; print it and exit 0.
    Help(String),
}

impl<T> Resolution<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolution<U> {
        match self {
            Resolution::Run(t) => Resolution::Run(f(t)),
            Resolution::Help(text) => Resolution::Help(text),
        }
    }

    /// Parameters, if this is not a help request.
    pub fn into_params(self) -> Option<T> {
        match self {
            Resolution::Run(t) => Some(t),
            Resolution::Help(_) => None,
        }
    }
}

/// Build the error for a verb invoked without its required positionals.
pub(crate) fn missing_positional(message: &str, help: String) -> ArgError {
    ArgError::MissingPositionalArgument {
        message: message.to_string(),
        help,
    }
}

// ---------------------------------------------------------------------------
// Verbs
// ---------------------------------------------------------------------------

/// The fixed set of scripts this engine resolves arguments for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Liquid,
    Swapd,
    Arbd,
    SendPrivateTx,
    CancelPrivateTx,
    SendProtectTx,
    FundWallets,
    Search(SearchProgram),
}

impl Verb {
    pub const ALL: [Verb; 10] = [
        Verb::Liquid,
        Verb::Swapd,
        Verb::Arbd,
        Verb::SendPrivateTx,
        Verb::CancelPrivateTx,
        Verb::SendProtectTx,
        Verb::FundWallets,
        Verb::Search(SearchProgram::Dumb),
        Verb::Search(SearchProgram::Smart),
        Verb::Search(SearchProgram::Fake),
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Verb::Liquid => "liquid",
            Verb::Swapd => "swapd",
            Verb::Arbd => "arbd",
            Verb::SendPrivateTx => "send-private-tx",
            Verb::CancelPrivateTx => "cancel-private-tx",
            Verb::SendProtectTx => "send-protect-tx",
            Verb::FundWallets => "fund-wallets",
            Verb::Search(program) => program.name(),
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            Verb::Liquid => "deploy a uniswap v2 environment w/ bootstrapped liquidity",
            Verb::Swapd => "randomly swap on every block with multiple wallets",
            Verb::Arbd => "monitor the mempool and backrun profitable swaps",
            Verb::SendPrivateTx => "send a sample private tx",
            Verb::CancelPrivateTx => "cancel a private tx",
            Verb::SendProtectTx => "send a sample Protect tx",
            Verb::FundWallets => "fund wallets with ETH",
            Verb::Search(_) => "search on multiple wallets",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Verb {
    type Err = ArgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Verb::ALL
            .into_iter()
            .find(|verb| verb.name() == s)
            .ok_or_else(|| ArgError::UnknownVerb(s.to_string()))
    }
}

/// Top-level listing of every verb.
pub fn verbs_help(program: &str) -> String {
    let mut out = format!("Usage:\n    {program} <verb> [ARGS...]\n\nVerbs:\n");
    for verb in Verb::ALL {
        out.push_str(&format!("    {:<20}{}\n", verb.name(), verb.summary()));
    }
    out.push_str(&format!("\nRun `{program} <verb> --help` for verb options.\n"));
    out
}

/// Parameters for any verb.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResolvedParams {
    Liquid(LiquidParams),
    Swap(SwapParams),
    Arb(ArbParams),
    SendPrivateTx(SendPrivateTxParams),
    CancelPrivateTx(CancelPrivateTxParams),
    SendProtectTx(SendProtectTxParams),
    FundWallets(FundWalletsParams),
    Search(SearchParams),
}

/// Dispatch `args` to the resolver for `verb`.
pub fn resolve(verb: Verb, args: &ArgumentVector) -> Result<Resolution<ResolvedParams>, ArgError> {
    let resolution = match verb {
        Verb::Liquid => liquid::resolve(args)?.map(ResolvedParams::Liquid),
        Verb::Swapd => swap::resolve(args)?.map(ResolvedParams::Swap),
        Verb::Arbd => arb::resolve(args)?.map(ResolvedParams::Arb),
        Verb::SendPrivateTx => private_tx::resolve_send(args).map(ResolvedParams::SendPrivateTx),
        Verb::CancelPrivateTx => {
            private_tx::resolve_cancel(args)?.map(ResolvedParams::CancelPrivateTx)
        }
        Verb::SendProtectTx => private_tx::resolve_protect(args).map(ResolvedParams::SendProtectTx),
        Verb::FundWallets => fund::resolve(args)?.map(ResolvedParams::FundWallets),
        Verb::Search(program) => search::resolve(program, args)?.map(ResolvedParams::Search),
    };
    Ok(resolution)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
