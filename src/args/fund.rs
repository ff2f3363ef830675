//! `fund-wallets`: send ETH from the admin account to every test wallet.

use serde::Serialize;

use super::flags::{resolve_flags, FlagSpec};
use super::help::{options_block, HelpText};
use super::{requests_help, ArgumentVector, HelpScope, Resolution};
use crate::types::{ArgError, Numeric};

const ETH: &str = "--eth";

pub const FLAGS: [FlagSpec; 1] = [FlagSpec::number(
    ETH,
    Some("-e"),
    Some(Numeric::Int(50)),
    "Amount of ETH to send to each wallet.",
)];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundWalletsParams {
    pub eth: Numeric,
}

pub fn help_text() -> String {
    let options = options_block(&FLAGS);
    HelpText {
        description: "Fund wallets with ETH.",
        usage: "    mevflood fund-wallets [OPTIONS]",
        options: &options,
        examples: "    # fund wallets with 50 ETH each (default)\n\
                   \x20   mevflood fund-wallets\n\n\
                   \x20   # fund wallets with 1 ETH\n\
                   \x20   mevflood fund-wallets -e 1",
    }
    .render()
}

pub fn resolve(args: &ArgumentVector) -> Result<Resolution<FundWalletsParams>, ArgError> {
    if requests_help(args, HelpScope::Joined) {
        return Ok(Resolution::Help(help_text()));
    }
    let flags = resolve_flags(args, &FLAGS)?;
    Ok(Resolution::Run(FundWalletsParams {
        eth: flags.number(ETH).unwrap_or(Numeric::Int(50)),
    }))
}
