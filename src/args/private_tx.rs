//! Private transaction scripts: send, cancel and Protect send.
//!
//! These take bare positional tokens rather than flags. A help request
//! is a normal outcome here, not an error.

use serde::Serialize;

use super::help::HelpText;
use super::{missing_positional, requests_help, ArgumentVector, HelpScope, Resolution};
use crate::types::ArgError;

// ---------------------------------------------------------------------------
// send-private-tx
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SendPrivateTxParams {
    /// Target the uniswap router instead of the lottery contract.
    pub dummy: bool,
}

pub fn send_help_text() -> String {
    HelpText {
        description: "send a sample private tx.",
        usage: "    mevflood send-private-tx [dummy]",
        options: "    dummy\t\t\tSend to the uniswapV2 router (works on any chain).",
        examples: "    # send private tx to lottery contract (lottery_mev.sol must be deployed on target chain)\n\
                   \x20   mevflood send-private-tx\n\n\
                   \x20   # send private tx to uniswapV2 router (works on any chain)\n\
                   \x20   mevflood send-private-tx dummy",
    }
    .render()
}

pub fn resolve_send(args: &ArgumentVector) -> Resolution<SendPrivateTxParams> {
    if requests_help(args, HelpScope::FirstToken) {
        return Resolution::Help(send_help_text());
    }
    let dummy = args.get(0).is_some_and(|t| t.contains("dummy"));
    Resolution::Run(SendPrivateTxParams { dummy })
}

// ---------------------------------------------------------------------------
// cancel-private-tx
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelPrivateTxParams {
    pub tx_hash: String,
}

pub fn cancel_help_text() -> String {
    HelpText {
        description: "cancel a private tx.",
        usage: "    mevflood cancel-private-tx <tx_hash>",
        options: "",
        examples: "    mevflood cancel-private-tx 0x52485869d1aa64a4fb029edaf94e6b978ad32ea1879adabab38639dd462324ac",
    }
    .render()
}

pub fn resolve_cancel(args: &ArgumentVector) -> Result<Resolution<CancelPrivateTxParams>, ArgError> {
    let Some(first) = args.get(0) else {
        return Err(missing_positional("a transaction hash is required", cancel_help_text()));
    };
    if requests_help(args, HelpScope::FirstToken) {
        return Ok(Resolution::Help(cancel_help_text()));
    }
    Ok(Resolution::Run(CancelPrivateTxParams { tx_hash: first.to_string() }))
}

// ---------------------------------------------------------------------------
// send-protect-tx
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SendProtectTxParams {
    pub dummy: bool,
    /// Use Protect fast mode.
    pub fast: bool,
}

pub fn protect_help_text() -> String {
    HelpText {
        description: "send a sample Protect tx.",
        usage: "    mevflood send-protect-tx [dummy] [fast]",
        options: "    dummy\t\t\tSend to the uniswapV2 router (works on any chain).\n\
                   \x20   fast\t\t\tUse Protect fast mode.",
        examples: "    # send lottery contract tx to Protect (lottery_mev.sol must be deployed on target chain)\n\
                   \x20   mevflood send-protect-tx\n\n\
                   \x20   # send uniswapV2 router tx to Protect w/ fast mode\n\
                   \x20   mevflood send-protect-tx fast dummy\n\
                   \x20   # or\n\
                   \x20   mevflood send-protect-tx dummy fast",
    }
    .render()
}

/// `dummy` and `fast` are substring matches over the first two tokens.
pub fn resolve_protect(args: &ArgumentVector) -> Resolution<SendProtectTxParams> {
    if args.is_empty() {
        return Resolution::Run(SendProtectTxParams::default());
    }
    if requests_help(args, HelpScope::FirstToken) {
        return Resolution::Help(protect_help_text());
    }
    let probe = format!("{}&{}", args.get(0).unwrap_or_default(), args.get(1).unwrap_or_default());
    Resolution::Run(SendProtectTxParams {
        dummy: probe.contains("dummy"),
        fast: probe.contains("fast"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(tokens: &[&str]) -> ArgumentVector {
        ArgumentVector::new(tokens.iter().copied())
    }

    #[test]
    fn test_send_dummy() {
        assert_eq!(resolve_send(&argv(&[])), Resolution::Run(SendPrivateTxParams { dummy: false }));
        assert_eq!(resolve_send(&argv(&["dummy"])), Resolution::Run(SendPrivateTxParams { dummy: true }));
        assert_eq!(resolve_send(&argv(&["x", "dummy"])), Resolution::Run(SendPrivateTxParams { dummy: false }));
    }

    #[test]
    fn test_send_help_returns_without_params() {
        assert!(resolve_send(&argv(&["--help"])).into_params().is_none());
    }

    #[test]
    fn test_cancel_takes_hash() {
        let r = resolve_cancel(&argv(&["0xabc"])).unwrap();
        assert_eq!(r, Resolution::Run(CancelPrivateTxParams { tx_hash: "0xabc".into() }));
    }

    #[test]
    fn test_cancel_requires_hash() {
        let err = resolve_cancel(&argv(&[])).unwrap_err();
        assert!(matches!(err, ArgError::MissingPositionalArgument { .. }));
        assert!(matches!(resolve_cancel(&argv(&["help"])).unwrap(), Resolution::Help(_)));
    }

    #[test]
    fn test_protect_flags_in_either_order() {
        let both = Resolution::Run(SendProtectTxParams { dummy: true, fast: true });
        assert_eq!(resolve_protect(&argv(&["fast", "dummy"])), both);
        assert_eq!(resolve_protect(&argv(&["dummy", "fast"])), both);
        assert_eq!(
            resolve_protect(&argv(&["fast"])),
            Resolution::Run(SendProtectTxParams { dummy: false, fast: true })
        );
        assert_eq!(resolve_protect(&argv(&[])), Resolution::Run(SendProtectTxParams::default()));
    }

    #[test]
    fn test_protect_ignores_third_token() {
        let r = resolve_protect(&argv(&["x", "y", "fast"]));
        assert_eq!(r, Resolution::Run(SendProtectTxParams::default()));
    }
}
