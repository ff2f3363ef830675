//! Search scripts (`dumb-search`, `smart-search`, `fake-search`).

use serde::Serialize;

use super::help::HelpText;
use super::{missing_positional, requests_help, wallet_range, ArgumentVector, HelpScope, Resolution};
use crate::types::ArgError;

/// Which search strategy the script runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchProgram {
    Dumb,
    Smart,
    Fake,
}

impl SearchProgram {
    pub fn name(&self) -> &'static str {
        match self {
            SearchProgram::Dumb => "dumb-search",
            SearchProgram::Smart => "smart-search",
            SearchProgram::Fake => "fake-search",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub program: SearchProgram,
    pub start_idx: usize,
    pub end_idx: usize,
    pub use_mempool: bool,
}

pub fn help_text(program: SearchProgram) -> String {
    let name = program.name();
    let usage = format!("    mevflood {name} <first_wallet_index> [last_wallet_index] [mempool]");
    let examples = format!(
        "    # run with a single wallet\n    mevflood {name} 13\n\n\
         \x20   # run with 25 wallets on flashbots\n    mevflood {name} 0 25\n\n\
         \x20   # run with 25 wallets on mempool\n    mevflood {name} 0 25 mempool"
    );
    HelpText {
        description: "search on multiple wallets (defined in `<output-dir>/wallets.json`)",
        usage: &usage,
        options: "    mempool\t\t\tSend to the mempool instead of Flashbots (third positional).",
        examples: &examples,
    }
    .render()
}

pub fn resolve(program: SearchProgram, args: &ArgumentVector) -> Result<Resolution<SearchParams>, ArgError> {
    if args.is_empty() {
        return Err(missing_positional("one or two wallet indices are required", help_text(program)));
    }
    if requests_help(args, HelpScope::FirstToken) {
        return Ok(Resolution::Help(help_text(program)));
    }
    let (start_idx, end_idx) = wallet_range(args)?;
    Ok(Resolution::Run(SearchParams {
        program,
        start_idx,
        end_idx,
        use_mempool: args.get(2) == Some("mempool"),
    }))
}
