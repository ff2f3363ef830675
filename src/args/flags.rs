//! Flag location, value coercion and the generic table-driven resolver.

use tracing::trace;

use super::ArgumentVector;
use crate::types::{ArgError, Numeric};

// ---------------------------------------------------------------------------
// Flag declarations
// ---------------------------------------------------------------------------

/// How the token after a flag is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Number,
    String,
    /// Presence alone means `true`; no value token is consumed.
    Boolean,
}

/// A declared flag. `long` is the full name (`--num-pairs`); flags with
/// only a single-dash spelling (`-y`) put it in `long` and leave
/// `short` empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlagSpec {
    pub long: &'static str,
    pub short: Option<&'static str>,
    pub kind: ValueKind,
    pub default: Option<Numeric>,
    pub help: &'static str,
}

impl FlagSpec {
    pub const fn number(
        long: &'static str,
        short: Option<&'static str>,
        default: Option<Numeric>,
        help: &'static str,
    ) -> Self {
        Self { long, short, kind: ValueKind::Number, default, help }
    }

    pub const fn string(long: &'static str, short: Option<&'static str>, help: &'static str) -> Self {
        Self { long, short, kind: ValueKind::String, default: None, help }
    }

    pub const fn boolean(long: &'static str, short: Option<&'static str>, help: &'static str) -> Self {
        Self { long, short, kind: ValueKind::Boolean, default: None, help }
    }

    /// Whether either spelling appears in `args`.
    pub fn is_present(&self, args: &ArgumentVector) -> bool {
        args.includes(self.long) || self.short.is_some_and(|s| args.includes(s))
    }
}

/// A coerced flag value.
#[derive(Debug, Clone, PartialEq)]
pub enum FlagValue {
    Number(Numeric),
    Text(String),
    Present,
}

// ---------------------------------------------------------------------------
// Locator and coercer
// ---------------------------------------------------------------------------

/// Index of a flag in `args`.
///
/// Each spelling is looked up by its first occurrence; when both
/// spellings occur the later of the two wins.
pub fn flag_index(args: &ArgumentVector, long: &str, short: Option<&str>) -> Option<usize> {
    let long_at = args.index_of(long);
    let short_at = short.and_then(|s| args.index_of(s));
    long_at.max(short_at)
}

/// Coerce the value of the flag at `index`.
///
/// Booleans never look at the following token. Other kinds fail with
/// [`ArgError::MissingOptionValue`] when the flag is the last token.
pub fn option_value(args: &ArgumentVector, index: usize, kind: ValueKind) -> Result<FlagValue, ArgError> {
    let flag = args.get(index).unwrap_or_default();
    if kind == ValueKind::Boolean {
        return Ok(FlagValue::Present);
    }
    let Some(token) = args.get(index + 1) else {
        return Err(ArgError::MissingOptionValue { flag: flag.to_string() });
    };
    match kind {
        ValueKind::Number => Numeric::parse(token)
            .map(FlagValue::Number)
            .ok_or_else(|| ArgError::InvalidNumber {
                flag: flag.to_string(),
                value: token.to_string(),
            }),
        ValueKind::String => Ok(FlagValue::Text(token.to_string())),
        ValueKind::Boolean => Ok(FlagValue::Present),
    }
}

// ---------------------------------------------------------------------------
// Table resolver
// ---------------------------------------------------------------------------

/// Flags matched against a spec table, in table order.
#[derive(Debug, Clone, Default)]
pub struct ResolvedFlags {
    matched: Vec<(&'static str, FlagValue)>,
    defaults: Vec<(&'static str, Numeric)>,
}

impl ResolvedFlags {
    fn value(&self, long: &str) -> Option<&FlagValue> {
        self.matched.iter().find(|(name, _)| *name == long).map(|(_, v)| v)
    }

    /// Matched number, or the declared default.
    pub fn number(&self, long: &str) -> Option<Numeric> {
        match self.value(long) {
            Some(FlagValue::Number(n)) => Some(*n),
            _ => self.defaults.iter().find(|(name, _)| *name == long).map(|(_, n)| *n),
        }
    }

    pub fn text(&self, long: &str) -> Option<String> {
        match self.value(long) {
            Some(FlagValue::Text(s)) => Some(s.clone()),
            _ => None,
        }
    }

    pub fn present(&self, long: &str) -> bool {
        self.value(long).is_some()
    }

    /// Long names of the matched flags, in table order.
    pub fn matched_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.matched.iter().map(|(name, _)| *name)
    }
}

/// Resolve every flag in `specs` against `args`.
///
/// Flags may appear in any order and between positionals. The first
/// coercion failure aborts the whole resolution.
pub fn resolve_flags(args: &ArgumentVector, specs: &[FlagSpec]) -> Result<ResolvedFlags, ArgError> {
    let mut resolved = ResolvedFlags::default();
    for spec in specs {
        if let Some(default) = spec.default {
            resolved.defaults.push((spec.long, default));
        }
        if !spec.is_present(args) {
            continue;
        }
        let Some(index) = flag_index(args, spec.long, spec.short) else {
            continue;
        };
        let value = option_value(args, index, spec.kind)?;
        trace!(flag = spec.long, index, value = ?value, "Flag resolved");
        resolved.matched.push((spec.long, value));
    }
    Ok(resolved)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(tokens: &[&str]) -> ArgumentVector {
        ArgumentVector::new(tokens.iter().copied())
    }

    const PAIRS: FlagSpec = FlagSpec::number("--num-pairs", Some("-p"), Some(Numeric::Int(1)), "");
    const EXCHANGE: FlagSpec = FlagSpec::string("--exchange", Some("-e"), "");
    const MEMPOOL: FlagSpec = FlagSpec::boolean("--mempool", Some("-m"), "");

    #[test]
    fn test_flag_index_prefers_later_spelling() {
        let args = argv(&["-p", "1", "--num-pairs", "2"]);
        assert_eq!(flag_index(&args, "--num-pairs", Some("-p")), Some(2));
        let args = argv(&["--num-pairs", "2", "-p", "1"]);
        assert_eq!(flag_index(&args, "--num-pairs", Some("-p")), Some(2));
    }

    #[test]
    fn test_flag_index_uses_first_occurrence_per_spelling() {
        let args = argv(&["-p", "1", "-p", "2"]);
        assert_eq!(flag_index(&args, "--num-pairs", Some("-p")), Some(0));
    }

    #[test]
    fn test_flag_index_not_found() {
        let args = argv(&["13", "-n", "5"]);
        assert_eq!(flag_index(&args, "--num-pairs", Some("-p")), None);
        assert_eq!(flag_index(&args, "--num-swaps", None), None);
    }

    #[test]
    fn test_option_value_kinds() {
        let args = argv(&["-p", "5", "-u", "5.1", "-e", "A", "-m"]);
        assert_eq!(option_value(&args, 0, ValueKind::Number).unwrap(), FlagValue::Number(Numeric::Int(5)));
        assert_eq!(
            option_value(&args, 2, ValueKind::Number).unwrap(),
            FlagValue::Number(Numeric::Float(5.1))
        );
        assert_eq!(option_value(&args, 4, ValueKind::String).unwrap(), FlagValue::Text("A".into()));
        assert_eq!(option_value(&args, 6, ValueKind::Boolean).unwrap(), FlagValue::Present);
    }

    #[test]
    fn test_option_value_missing_at_end() {
        for kind in [ValueKind::Number, ValueKind::String] {
            let err = option_value(&argv(&["13", "-e"]), 1, kind).unwrap_err();
            assert_eq!(err, ArgError::MissingOptionValue { flag: "-e".into() });
        }
    }

    #[test]
    fn test_option_value_invalid_number() {
        let err = option_value(&argv(&["-p", "many"]), 0, ValueKind::Number).unwrap_err();
        assert_eq!(
            err,
            ArgError::InvalidNumber { flag: "-p".into(), value: "many".into() }
        );
    }

    #[test]
    fn test_resolve_flags_defaults_and_matches() {
        let flags = resolve_flags(&argv(&["-e", "B"]), &[PAIRS, EXCHANGE, MEMPOOL]).unwrap();
        assert_eq!(flags.number("--num-pairs"), Some(Numeric::Int(1)));
        assert_eq!(flags.text("--exchange").as_deref(), Some("B"));
        assert!(!flags.present("--mempool"));
        assert_eq!(flags.matched_names().collect::<Vec<_>>(), vec!["--exchange"]);
    }

    #[test]
    fn test_resolve_flags_interleaved_with_positionals() {
        let args = argv(&["10", "-m", "21", "--num-pairs", "3"]);
        let flags = resolve_flags(&args, &[PAIRS, MEMPOOL]).unwrap();
        assert_eq!(flags.number("--num-pairs"), Some(Numeric::Int(3)));
        assert!(flags.present("--mempool"));
    }

    #[test]
    fn test_resolve_flags_aborts_on_missing_value() {
        let err = resolve_flags(&argv(&["-m", "-p"]), &[PAIRS, MEMPOOL]).unwrap_err();
        assert_eq!(err, ArgError::MissingOptionValue { flag: "-p".into() });
    }
}
