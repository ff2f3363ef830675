//! End-to-end argument resolution through the public verb dispatcher.

use mevflood_args::args::{self, ArgumentVector, ExecutionFilter, Resolution, ResolvedParams, Verb};
use mevflood_args::types::{ArgError, Numeric};

fn resolve(verb: &str, tokens: &[&str]) -> Result<Resolution<ResolvedParams>, ArgError> {
    let verb: Verb = verb.parse().unwrap();
    args::resolve(verb, &ArgumentVector::new(tokens.iter().copied()))
}

fn liquid(tokens: &[&str]) -> args::LiquidParams {
    match resolve("liquid", tokens).unwrap() {
        Resolution::Run(ResolvedParams::Liquid(p)) => p,
        other => panic!("expected liquid params, got {other:?}"),
    }
}

#[test]
fn liquid_without_flags_runs_full_pipeline() {
    let p = liquid(&[]);
    assert_eq!(
        p.filter,
        ExecutionFilter { deploy: true, mint: true, approve: true, bootstrap: true }
    );
    assert_eq!(p.num_pairs, Numeric::Int(1));
    assert_eq!(p.weth_mint_amount_admin, Numeric::Int(100));
    assert_eq!(p.weth_mint_amount_user, Numeric::Float(5.1));
    assert!(!p.send_to_mempool);
    assert!(!p.auto_accept);
}

#[test]
fn liquid_rightmost_spelling_wins() {
    let p = liquid(&["-p", "1", "--num-pairs", "2"]);
    assert_eq!(p.num_pairs, Numeric::Int(2));
}

#[test]
fn liquid_multiple_only_flags_disable_everything() {
    let p = liquid(&["--deploy-only", "--mint-only"]);
    assert_eq!(
        p.filter,
        ExecutionFilter { deploy: false, mint: false, approve: false, bootstrap: false }
    );
}

#[test]
fn every_value_flag_at_the_end_is_missing_its_value() {
    let cases: &[(&str, &[&str])] = &[
        ("liquid", &["--num-pairs"]),
        ("liquid", &["-w"]),
        ("liquid", &["-u"]),
        ("swapd", &["1", "-n"]),
        ("swapd", &["1", "-p"]),
        ("swapd", &["1", "-m"]),
        ("swapd", &["1", "-M"]),
        ("swapd", &["1", "-e"]),
        ("swapd", &["1", "-d"]),
        ("swapd", &["1", "-w"]),
        ("arbd", &["1", "-m"]),
        ("arbd", &["1", "--max-profit"]),
        ("fund-wallets", &["-e"]),
    ];
    for (verb, tokens) in cases {
        let err = resolve(verb, tokens).unwrap_err();
        let flag = tokens.last().unwrap().to_string();
        assert_eq!(err, ArgError::MissingOptionValue { flag }, "{verb} {tokens:?}");
    }
}

#[test]
fn help_substring_triggers_help_for_flag_verbs() {
    for (verb, tokens) in [
        ("liquid", vec!["-p", "helpdesk"]),
        ("swapd", vec!["13", "-e", "helpdesk"]),
        ("arbd", vec!["13", "--help"]),
        ("fund-wallets", vec!["help"]),
    ] {
        let r = resolve(verb, &tokens).unwrap();
        match r {
            Resolution::Help(text) => {
                assert!(text.contains("Usage:"), "{verb}");
                assert!(text.contains("--help"), "{verb}");
            }
            other => panic!("{verb}: expected help, got {other:?}"),
        }
    }
}

#[test]
fn positional_verbs_require_their_arguments() {
    for verb in ["swapd", "arbd", "cancel-private-tx", "dumb-search"] {
        let err = resolve(verb, &[]).unwrap_err();
        match err {
            ArgError::MissingPositionalArgument { help, .. } => assert!(help.contains(verb), "{verb}"),
            other => panic!("{verb}: unexpected {other:?}"),
        }
    }
}

#[test]
fn swap_direction_last_flag_wins() {
    match resolve("swapd", &["0", "3", "-b", "-s"]).unwrap() {
        Resolution::Run(ResolvedParams::Swap(p)) => {
            assert_eq!((p.start_idx, p.end_idx), (0, 3));
            assert_eq!(p.swap_weth_for_dai, Some(false));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn malformed_numbers_fail_fast() {
    let err = resolve("fund-wallets", &["-e", "lots"]).unwrap_err();
    assert_eq!(err, ArgError::InvalidNumber { flag: "-e".into(), value: "lots".into() });
}

#[test]
fn resolved_params_serialize_flat() {
    let r = resolve("send-protect-tx", &["dummy", "fast"]).unwrap();
    let params = r.into_params().unwrap();
    let json = serde_json::to_value(&params).unwrap();
    assert_eq!(json, serde_json::json!({ "dummy": true, "fast": true }));
}
