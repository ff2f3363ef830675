//! Help text synthesis.
//!
//! Every verb's help follows the same layout: description, then
//! Usage / Options / Examples. The options block is generated from the
//! verb's flag table so parsing and documentation cannot drift apart.

use super::flags::{FlagSpec, ValueKind};

/// ANSI styles used in help output.
pub mod style {
    pub const RESET: &str = "\x1b[0m";
    pub const BRIGHT: &str = "\x1b[1m";
    pub const UNDERSCORE: &str = "\x1b[4m";
}

/// The pieces of a verb's help page.
#[derive(Debug, Clone, Default)]
pub struct HelpText<'a> {
    pub description: &'a str,
    pub usage: &'a str,
    pub options: &'a str,
    pub examples: &'a str,
}

impl HelpText<'_> {
    /// Render with the standard section order and the `--help` line.
    pub fn render(&self) -> String {
        use self::style::{BRIGHT, RESET, UNDERSCORE};
        format!(
            "{description}\n\n\
             {UNDERSCORE}Usage:{RESET}\n{usage}\n\n\
             {UNDERSCORE}Options:{RESET}\n    {BRIGHT}--help{RESET}\t\t\tPrint this help message.\n{options}\n\n\
             {UNDERSCORE}Examples:{RESET}\n{examples}\n",
            description = self.description.trim_end(),
            usage = self.usage.trim_end(),
            options = self.options.trim_end(),
            examples = self.examples.trim_end(),
        )
    }
}

/// One line per flag: spellings, description and default.
pub fn options_block(specs: &[FlagSpec]) -> String {
    let mut out = String::new();
    for spec in specs {
        let names = match spec.short {
            Some(short) => format!("{short}, {}", spec.long),
            None => spec.long.to_string(),
        };
        let default = match (spec.kind, spec.default) {
            (ValueKind::Number, Some(n)) => format!(" (default={n})"),
            _ => String::new(),
        };
        out.push_str(&format!("    {names:<24}{}{default}\n", spec.help));
    }
    out
}
