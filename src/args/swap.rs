//! `swapd`: randomly swap on every block with a range of wallets.

use serde::Serialize;

use super::flags::{resolve_flags, FlagSpec};
use super::help::{options_block, HelpText};
use super::{missing_positional, requests_help, wallet_range, ArgumentVector, HelpScope, Resolution};
use crate::types::{ArgError, Numeric};

const NUM_SWAPS: &str = "--num-swaps";
const NUM_PAIRS: &str = "--num-pairs";
const MIN_USD: &str = "--min-usd";
const MAX_USD: &str = "--max-usd";
const EXCHANGE: &str = "--exchange";
const DAI_INDEX: &str = "--dai-number";
const BUY_DAI: &str = "--buy-dai";
const BUY_ETH: &str = "--buy-eth";
const MINT_WETH: &str = "--mint-weth";

/// Order matters: `--buy-eth` is applied after `--buy-dai`.
pub const FLAGS: [FlagSpec; 9] = [
    FlagSpec::number(MIN_USD, Some("-m"), Some(Numeric::Int(100)), "Minimum amount to spend (USD value in either asset)."),
    FlagSpec::number(MAX_USD, Some("-M"), Some(Numeric::Int(5000)), "Maximum amount to spend (USD value in either asset)."),
    FlagSpec::number(NUM_SWAPS, Some("-n"), Some(Numeric::Int(1)), "Number of swaps to execute per wallet."),
    FlagSpec::number(NUM_PAIRS, Some("-p"), Some(Numeric::Int(1)), "Number of pairs to choose from; one is selected randomly."),
    FlagSpec::string(EXCHANGE, Some("-e"), "Exchange to swap on (\"A\" or \"B\")."),
    FlagSpec::number(DAI_INDEX, Some("-d"), Some(Numeric::Int(0)), "Index of deployed DAI token to trade with."),
    FlagSpec::boolean(BUY_DAI, Some("-b"), "Swaps WETH for DAI if set."),
    FlagSpec::boolean(BUY_ETH, Some("-s"), "Swaps DAI for WETH if set."),
    FlagSpec::number(
        MINT_WETH,
        Some("-w"),
        Some(Numeric::Int(20)),
        "Amount of WETH to mint from each wallet, if balance is lower than this amount.",
    ),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapParams {
    pub start_idx: usize,
    pub end_idx: usize,
    pub num_swaps: Numeric,
    /// Never below 1.
    pub num_pairs: Numeric,
    pub min_usd: Numeric,
    pub max_usd: Numeric,
    pub exchange: Option<String>,
    pub dai_index: Numeric,
    /// `Some(true)` buys DAI, `Some(false)` buys ETH, `None` picks randomly.
    pub swap_weth_for_dai: Option<bool>,
    pub mint_weth_amount: Numeric,
    pub mint_weth_wei: u128,
}

pub fn help_text() -> String {
    let options = options_block(&FLAGS);
    HelpText {
        description: "randomly swap on every block with multiple wallets (defined in `<output-dir>/wallets.json`)",
        usage: "    mevflood swapd <first_wallet_index> [last_wallet_index] [OPTIONS...]",
        options: &options,
        examples: "    # run with a single wallet\n\
                   \x20   mevflood swapd 13\n\n\
                   \x20   # run with 25 wallets\n\
                   \x20   mevflood swapd 0 25\n\n\
                   \x20   # run with 10 wallets, each sending 5 swaps per block\n\
                   \x20   mevflood swapd 10 21 -n 5\n\n\
                   \x20   # do the same with 5 trading pairs to choose from\n\
                   \x20   mevflood swapd 10 21 -n 5 --num-pairs 5\n\n\
                   \x20   # swap with dai token 2 on exchange A\n\
                   \x20   mevflood swapd 13 -e A -d 2\n\n\
                   \x20   # swap up to $5000 worth of ETH into DAI\n\
                   \x20   mevflood swapd 13 -M 5000 --buy-dai",
    }
    .render()
}

pub fn resolve(args: &ArgumentVector) -> Result<Resolution<SwapParams>, ArgError> {
    if args.is_empty() {
        return Err(missing_positional("one or two wallet indices are required", help_text()));
    }
    if requests_help(args, HelpScope::Joined) {
        return Ok(Resolution::Help(help_text()));
    }

    let (start_idx, end_idx) = wallet_range(args)?;
    let flags = resolve_flags(args, &FLAGS)?;

    let mut swap_weth_for_dai = None;
    if flags.present(BUY_DAI) {
        swap_weth_for_dai = Some(true);
    }
    // --buy-eth writes the negation into the same field, last one wins
    if flags.present(BUY_ETH) {
        swap_weth_for_dai = Some(false);
    }

    let number = |long: &str| flags.number(long).unwrap_or(Numeric::Int(0));
    let mint_weth_amount = number(MINT_WETH);
    let mint_weth_wei = mint_weth_amount.to_wei().ok_or_else(|| ArgError::InvalidNumber {
        flag: MINT_WETH.to_string(),
        value: mint_weth_amount.to_string(),
    })?;

    Ok(Resolution::Run(SwapParams {
        start_idx,
        end_idx,
        num_swaps: number(NUM_SWAPS),
        num_pairs: number(NUM_PAIRS).max(Numeric::Int(1)),
        min_usd: number(MIN_USD),
        max_usd: number(MAX_USD),
        exchange: flags.text(EXCHANGE),
        dai_index: number(DAI_INDEX),
        swap_weth_for_dai,
        mint_weth_amount,
        mint_weth_wei,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(tokens: &[&str]) -> SwapParams {
        resolve(&ArgumentVector::new(tokens.iter().copied()))
            .unwrap()
            .into_params()
            .unwrap()
    }

    #[test]
    fn test_defaults_with_single_wallet() {
        let p = run(&["13"]);
        assert_eq!((p.start_idx, p.end_idx), (13, 14));
        assert_eq!(p.num_swaps, Numeric::Int(1));
        assert_eq!(p.num_pairs, Numeric::Int(1));
        assert_eq!(p.min_usd, Numeric::Int(100));
        assert_eq!(p.max_usd, Numeric::Int(5000));
        assert_eq!(p.exchange, None);
        assert_eq!(p.dai_index, Numeric::Int(0));
        assert_eq!(p.swap_weth_for_dai, None);
        assert_eq!(p.mint_weth_amount, Numeric::Int(20));
        assert_eq!(p.mint_weth_wei, 20_000_000_000_000_000_000);
    }

    #[test]
    fn test_flags_after_range() {
        let p = run(&["10", "21", "-n", "5", "--num-pairs", "5", "-e", "A", "-d", "2"]);
        assert_eq!((p.start_idx, p.end_idx), (10, 21));
        assert_eq!(p.num_swaps, Numeric::Int(5));
        assert_eq!(p.num_pairs, Numeric::Int(5));
        assert_eq!(p.exchange.as_deref(), Some("A"));
        assert_eq!(p.dai_index, Numeric::Int(2));
    }

    #[test]
    fn test_flag_in_end_position_defaults_end_idx() {
        let p = run(&["13", "-M", "5000", "--buy-dai"]);
        assert_eq!(p.end_idx, 14);
        assert_eq!(p.swap_weth_for_dai, Some(true));
    }

    #[test]
    fn test_pair_count_floored_at_one() {
        assert_eq!(run(&["1", "-p", "0"]).num_pairs, Numeric::Int(1));
        assert_eq!(run(&["1", "-p", "-3"]).num_pairs, Numeric::Int(1));
    }

    #[test]
    fn test_buy_eth_inverts_same_field() {
        assert_eq!(run(&["1", "-s"]).swap_weth_for_dai, Some(false));
        assert_eq!(run(&["1", "--buy-eth", "--buy-dai"]).swap_weth_for_dai, Some(false));
        assert_eq!(run(&["1", "-b"]).swap_weth_for_dai, Some(true));
    }

    #[test]
    fn test_fractional_mint_weth() {
        let p = run(&["1", "-w", "0.5"]);
        assert_eq!(p.mint_weth_amount, Numeric::Float(0.5));
        assert_eq!(p.mint_weth_wei, 500_000_000_000_000_000);
    }

    #[test]
    fn test_large_mint_weth() {
        let p = run(&["1", "-w", "1e11"]);
        assert_eq!(p.mint_weth_amount, Numeric::Int(100_000_000_000));
        assert_eq!(p.mint_weth_wei, 100_000_000_000_000_000_000_000_000_000);
    }

    #[test]
    fn test_no_wallet_is_missing_positional() {
        let err = resolve(&ArgumentVector::default()).unwrap_err();
        match err {
            ArgError::MissingPositionalArgument { message, help } => {
                assert_eq!(message, "one or two wallet indices are required");
                assert!(help.contains("--num-swaps"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_help_inside_value() {
        let r = resolve(&ArgumentVector::new(["13", "-e", "helpdesk"])).unwrap();
        assert!(matches!(r, Resolution::Help(_)));
    }

    #[test]
    fn test_exchange_without_value() {
        let err = resolve(&ArgumentVector::new(["13", "-e"])).unwrap_err();
        assert_eq!(err, ArgError::MissingOptionValue { flag: "-e".into() });
    }
}
