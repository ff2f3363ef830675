//! `arbd`: watch the mempool and backrun swaps when an arbitrage pays.

use serde::Serialize;

use super::flags::{resolve_flags, FlagSpec};
use super::help::{options_block, HelpText};
use super::{missing_positional, requests_help, wallet_index, ArgumentVector, HelpScope, Resolution};
use crate::types::{ArgError, Numeric};

const MIN_PROFIT: &str = "--min-profit";
const MAX_PROFIT: &str = "--max-profit";
const MINT_WETH: &str = "--mint-weth";

/// `--max-profit` value meaning "no upper bound".
const UNBOUNDED: Numeric = Numeric::Int(-1);

pub const FLAGS: [FlagSpec; 3] = [
    FlagSpec::number(MIN_PROFIT, Some("-m"), Some(Numeric::Int(100)), "Minimum profit an arbitrage should achieve, in gwei."),
    FlagSpec::number(MAX_PROFIT, Some("-M"), Some(UNBOUNDED), "Maximum profit an arbitrage should achieve, in gwei; -1 is unbounded."),
    FlagSpec::number(
        MINT_WETH,
        Some("-w"),
        Some(Numeric::Int(20)),
        "Amount of WETH to mint from each wallet, if balance is lower than this amount.",
    ),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArbParams {
    pub wallet_idx: usize,
    /// Gwei.
    pub min_profit: Numeric,
    /// Gwei; `None` is unbounded.
    pub max_profit: Option<Numeric>,
    pub mint_weth_amount: Numeric,
}

pub fn help_text() -> String {
    let options = options_block(&FLAGS);
    HelpText {
        description: "Monitor mempool for arbitrage opportunities, backrun user when profit detected.",
        usage: "    mevflood arbd <wallet_index> [OPTIONS...]",
        options: &options,
        examples: "    # run arb bot with wallet 13\n\
                   \x20   mevflood arbd 13\n\n\
                   \x20   # run arb bot with minimum profit threshold of 0.2 gwei\n\
                   \x20   mevflood arbd 13 -m 0.2\n\n\
                   \x20   # only execute opportunities that profit between 1 and 10 gwei\n\
                   \x20   mevflood arbd 13 -m 1 -M 10",
    }
    .render()
}

pub fn resolve(args: &ArgumentVector) -> Result<Resolution<ArbParams>, ArgError> {
    if args.is_empty() {
        return Err(missing_positional("a wallet index is required", help_text()));
    }
    if requests_help(args, HelpScope::Joined) {
        return Ok(Resolution::Help(help_text()));
    }

    let wallet_idx = wallet_index(args.get(0).unwrap_or_default(), "wallet_index")?;
    let flags = resolve_flags(args, &FLAGS)?;
    let number = |long: &str| flags.number(long).unwrap_or(Numeric::Int(0));

    let max_profit = number(MAX_PROFIT);
    Ok(Resolution::Run(ArbParams {
        wallet_idx,
        min_profit: number(MIN_PROFIT),
        max_profit: (max_profit != UNBOUNDED).then_some(max_profit),
        mint_weth_amount: number(MINT_WETH),
    }))
}
