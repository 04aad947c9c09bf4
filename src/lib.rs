//! Declarative commandline option parsing.
//!
//! Each option is declared with an [`Opt`] bound to a variable the caller
//! owns. [`parse_arguments`] writes parsed values straight into those
//! variables and collects positional arguments; [`usage_string`] renders help
//! text from the same declarations.
//!
//! ```
//! use optbind::{flag, opt, parse_arguments, usage_string};
//!
//! let mut verbose = false;
//! let mut count = 10i32;
//! let mut files = Vec::new();
//!
//! let mut opts = [
//!     flag(&mut verbose, "Enable verbose output").long("verbose").short('v'),
//!     opt(&mut count, "Number of iterations").long("count").short('n'),
//! ];
//! let result = parse_arguments(["prog", "-n", "3", "input.txt"], &mut opts, Some(&mut files));
//! let usage = usage_string("prog", &opts, true);
//!
//! assert!(result.is_ok());
//! assert!(usage.starts_with("Usage: prog [option]... [--] [file]...\n"));
//! assert_eq!(count, 3);
//! assert!(!verbose);
//! assert_eq!(files, ["input.txt"]);
//! ```
mod error;
mod parser;
mod usage;
mod value;
use parser::ArgParser;

pub use error::{ParseError, Result};
pub use parser::{OptionMatch, find_match};
pub use usage::{Usage, usage_string};
pub use value::{OptionValue, ValueSlot};

use std::env;

/// Where a parsed option writes to
pub enum Binding<'a> {
    /// Set to `true` when the flag is present, never reads a value
    Flag(&'a mut bool),
    /// Filled from the argument following the option
    Value(&'a mut dyn ValueSlot),
}

/// Declaration of a single option bound to a caller-owned variable.
///
/// The option only borrows the variable; the caller keeps ownership and can
/// read it again once the option set is no longer used.
pub struct Opt<'a> {
    binding: Binding<'a>,
    help: String,
    long: Option<String>,
    short: Option<char>,
    required: bool,
}

impl<'a> Opt<'a> {
    /// Create a boolean flag. The variable is reset to `false` here and only
    /// becomes `true` if the flag is seen.
    pub fn flag(value: &'a mut bool, help: impl Into<String>) -> Self {
        *value = false;
        Self {
            binding: Binding::Flag(value),
            help: help.into(),
            long: None,
            short: None,
            required: false,
        }
    }

    /// Create an option that reads a value into `value`.
    ///
    /// The current contents of `value` are shown as the default in usage
    /// output unless the option is required.
    pub fn value<T: OptionValue>(value: &'a mut T, help: impl Into<String>) -> Self {
        Self {
            binding: Binding::Value(value),
            help: help.into(),
            long: None,
            short: None,
            required: false,
        }
    }

    /// Set the long name (e.g., "verbose" for --verbose)
    pub fn long(mut self, s: impl Into<String>) -> Self {
        let s = s.into();
        self.long = if s.is_empty() { None } else { Some(s) };
        self
    }

    /// Set the short name (e.g., 'v' for -v)
    pub fn short(mut self, c: char) -> Self {
        self.short = if c == '\0' { None } else { Some(c) };
        self
    }

    /// Mark this option as required. Has no effect on flags.
    pub fn required(mut self) -> Self {
        self.required = self.reads_value();
        self
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn long_name(&self) -> Option<&str> {
        self.long.as_deref()
    }

    pub fn short_name(&self) -> Option<char> {
        self.short
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether the option consumes the following argument as its value
    pub fn reads_value(&self) -> bool {
        matches!(self.binding, Binding::Value(_))
    }

    /// Display name of the bound type, `None` for flags
    pub fn type_name(&self) -> Option<&'static str> {
        match &self.binding {
            Binding::Flag(_) => None,
            Binding::Value(slot) => Some(slot.type_name()),
        }
    }

    /// The bound variable's current value as shown in usage, `None` for flags
    pub fn default_value(&self) -> Option<String> {
        match &self.binding {
            Binding::Flag(_) => None,
            Binding::Value(slot) => Some(slot.render_default()),
        }
    }

    /// How the option is written on the commandline: `--long` if it has a
    /// long name, else `-s`
    pub fn display_flag(&self) -> String {
        debug_assert!(self.is_addressable(), "option declared without a name");
        match (&self.long, self.short) {
            (Some(long), _) => format!("--{}", long),
            (None, Some(c)) => format!("-{}", c),
            (None, None) => String::new(),
        }
    }

    pub(crate) fn is_addressable(&self) -> bool {
        self.long.is_some() || self.short.is_some()
    }

    /// Whether `name` (without leading dashes) refers to this option
    pub(crate) fn matches_name(&self, name: &str) -> bool {
        let mut chars = name.chars();
        let is_short = match (chars.next(), chars.next()) {
            (Some(c), None) => self.short == Some(c),
            _ => false,
        };
        is_short || self.long.as_deref() == Some(name)
    }

    pub(crate) fn binding_mut(&mut self) -> &mut Binding<'a> {
        &mut self.binding
    }
}

/// Parse `args` (program name first) into the variables bound by `opts`.
///
/// Positional arguments are appended to `positionals` in the order they
/// appear. Passing `None` declares that no positional arguments are accepted.
///
/// Parsing is not transactional: on error, options seen before the failing
/// argument have already been written.
pub fn parse_arguments<I, S>(
    args: I,
    opts: &mut [Opt<'_>],
    positionals: Option<&mut Vec<String>>,
) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_string()).collect();
    ArgParser::new(opts).parse(&args, positionals)
}

/// Parse the process commandline into the variables bound by `opts`
pub fn parse_env_arguments(
    opts: &mut [Opt<'_>],
    positionals: Option<&mut Vec<String>>,
) -> Result<()> {
    parse_arguments(env::args(), opts, positionals)
}

/// Convenience function to create a boolean flag
#[inline]
pub fn flag<'a>(value: &'a mut bool, help: impl Into<String>) -> Opt<'a> {
    Opt::flag(value, help)
}

/// Convenience function to create a value-reading option
#[inline]
pub fn opt<'a, T: OptionValue>(value: &'a mut T, help: impl Into<String>) -> Opt<'a> {
    Opt::value(value, help)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_resets_destination() {
        let mut on = true;
        let o = flag(&mut on, "switch").short('s');
        assert!(!o.reads_value());
        assert_eq!(o.type_name(), None);
        drop(o);
        assert!(!on);
    }

    #[test]
    fn flags_are_never_required() {
        let mut on = false;
        let o = flag(&mut on, "switch").long("switch").required();
        assert!(!o.is_required());
    }

    #[test]
    fn value_option_metadata() {
        let mut n = 7u32;
        let o = opt(&mut n, "count").long("count").short('c').required();
        assert!(o.is_required());
        assert!(o.reads_value());
        assert_eq!(o.type_name(), Some("uint"));
        assert_eq!(o.default_value().as_deref(), Some("7"));
        assert_eq!(o.long_name(), Some("count"));
        assert_eq!(o.short_name(), Some('c'));
        assert_eq!(o.help(), "count");
    }

    #[test]
    fn empty_names_mean_none() {
        let mut s = String::new();
        let o = opt(&mut s, "name").long("").short('\0');
        assert_eq!(o.long_name(), None);
        assert_eq!(o.short_name(), None);
        assert!(!o.is_addressable());
    }

    #[test]
    fn display_flag_prefers_long() {
        let mut a = 0i32;
        let mut b = 0i32;
        let both = opt(&mut a, "").long("number").short('n');
        let short = opt(&mut b, "").short('k');
        assert_eq!(both.display_flag(), "--number");
        assert_eq!(short.display_flag(), "-k");
    }

    #[test]
    fn name_matching() {
        let mut a = 0i32;
        let o = opt(&mut a, "").long("number").short('n');
        assert!(o.matches_name("n"));
        assert!(o.matches_name("number"));
        assert!(!o.matches_name("num"));
        assert!(!o.matches_name("nn"));
        assert!(!o.matches_name(""));
    }
}
