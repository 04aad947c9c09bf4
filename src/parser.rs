use tracing::{debug, trace};

use crate::error::{ParseError, Result};
use crate::{Binding, Opt};

/// An option matched by name, able to write into its bound variable
pub struct OptionMatch<'o, 'a> {
    /// Position of the matched option in the option slice
    pub index: usize,
    opt: &'o mut Opt<'a>,
}

impl OptionMatch<'_, '_> {
    /// Whether the option consumes the following argument as its value
    pub fn reads_value(&self) -> bool {
        self.opt.reads_value()
    }

    /// Convert `text` into the bound variable. Flags accept no value and
    /// always report failure.
    pub fn fill(&mut self, text: &str) -> bool {
        match self.opt.binding_mut() {
            Binding::Value(slot) => slot.fill(text),
            Binding::Flag(_) => false,
        }
    }

    /// Set a flag's variable to `true`. No effect on value options.
    pub fn set_flag(&mut self) {
        if let Binding::Flag(on) = self.opt.binding_mut() {
            **on = true;
        }
    }
}

/// Find the first option, in declaration order, that `name` refers to.
///
/// `name` has its leading dashes already stripped. A single character is
/// checked against short names, and any name against long names.
pub fn find_match<'o, 'a>(opts: &'o mut [Opt<'a>], name: &str) -> Option<OptionMatch<'o, 'a>> {
    opts.iter_mut()
        .enumerate()
        .find(|(_, opt)| opt.matches_name(name))
        .map(|(index, opt)| OptionMatch { index, opt })
}

/// What a single commandline argument turned out to be
#[derive(Debug, PartialEq, Eq)]
enum Token<'t> {
    /// The `--` separator
    EndOfOptions,
    /// `-x` or `--name`, holding the name without dashes
    Option(&'t str),
    Positional,
}

fn classify(arg: &str) -> Token<'_> {
    if arg == "--" {
        return Token::EndOfOptions;
    }

    if let Some(name) = arg.strip_prefix("--") {
        // "--" itself was handled above, so the name is non-empty
        return Token::Option(name);
    }

    if let Some(name) = arg.strip_prefix('-') {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next())
            && c != '-'
        {
            return Token::Option(name);
        }
    }

    Token::Positional
}

/// Internal argument parser
pub struct ArgParser<'p, 'a> {
    /// Option declarations, in declaration order
    opts: &'p mut [Opt<'a>],
    /// Which options have been seen, by index into `opts`
    found: Vec<bool>,
}

impl<'p, 'a> ArgParser<'p, 'a> {
    pub fn new(opts: &'p mut [Opt<'a>]) -> Self {
        debug_assert!(
            opts.iter().all(Opt::is_addressable),
            "every option needs a long or short name"
        );
        let found = vec![false; opts.len()];
        Self { opts, found }
    }

    /// Parse `args`, skipping the program name in the first position
    pub fn parse(
        mut self,
        args: &[String],
        mut positionals: Option<&mut Vec<String>>,
    ) -> Result<()> {
        let result = self.scan(args, &mut positionals).and_then(|()| self.check_required());

        match &result {
            Ok(()) => debug!(
                options = self.found.iter().filter(|&&f| f).count(),
                positionals = positionals.as_ref().map_or(0, |p| p.len()),
                "arguments parsed"
            ),
            Err(e) => debug!(error = %e, "argument parsing failed"),
        }

        result
    }

    fn scan(&mut self, args: &[String], positionals: &mut Option<&mut Vec<String>>) -> Result<()> {
        let mut args_iter = args.iter().skip(1);
        let mut end_of_options = false;

        while let Some(arg) = args_iter.next() {
            let token = if end_of_options {
                Token::Positional
            } else {
                classify(arg)
            };
            trace!(arg = %arg, ?token, "classified argument");

            match token {
                Token::EndOfOptions => end_of_options = true,
                Token::Positional => match positionals {
                    Some(list) => list.push(arg.clone()),
                    None => {
                        return Err(ParseError::BareArgument {
                            argument: arg.clone(),
                        });
                    }
                },
                Token::Option(name) => self.handle_option(name, &mut args_iter)?,
            }
        }

        Ok(())
    }

    fn handle_option<'t>(
        &mut self,
        name: &str,
        args_iter: &mut impl Iterator<Item = &'t String>,
    ) -> Result<()> {
        let Some(mut matched) = find_match(self.opts, name) else {
            return Err(ParseError::Unrecognized {
                name: name.to_string(),
            });
        };

        let Some(found) = self.found.get_mut(matched.index) else {
            return Err(ParseError::Unrecognized {
                name: name.to_string(),
            });
        };
        if *found {
            return Err(ParseError::Duplicate {
                name: name.to_string(),
            });
        }
        *found = true;

        if !matched.reads_value() {
            matched.set_flag();
            return Ok(());
        }

        // The next argument is the value, whatever it looks like
        let value = args_iter.next().ok_or_else(|| ParseError::MissingValue {
            name: name.to_string(),
        })?;
        if !matched.fill(value) {
            return Err(ParseError::InvalidValue {
                name: name.to_string(),
                value: value.clone(),
            });
        }
        trace!(option = name, value = %value, "filled option value");

        Ok(())
    }

    /// Report every required option that was never seen, all at once
    fn check_required(&self) -> Result<()> {
        let missing: Vec<String> = self
            .opts
            .iter()
            .zip(&self.found)
            .filter(|(opt, found)| opt.is_required() && !**found)
            .map(|(opt, _)| opt.display_flag())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ParseError::MissingRequired(missing))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{flag, opt};
    use rstest::rstest;

    #[rstest]
    #[case("--", Token::EndOfOptions)]
    #[case("-f", Token::Option("f"))]
    #[case("--flag", Token::Option("flag"))]
    #[case("--x", Token::Option("x"))]
    #[case("---x", Token::Option("-x"))]
    #[case("-é", Token::Option("é"))]
    #[case("-", Token::Positional)]
    #[case("", Token::Positional)]
    #[case("-ab", Token::Positional)]
    #[case("file.txt", Token::Positional)]
    fn classifies_arguments(#[case] arg: &str, #[case] expected: Token<'static>) {
        assert_eq!(classify(arg), expected);
    }

    #[test]
    fn matches_short_and_long_names() {
        let mut on = false;
        let mut n = 0i32;
        let mut opts = [
            flag(&mut on, "").long("flag").short('f'),
            opt(&mut n, "").long("number").short('n'),
        ];

        let m = find_match(&mut opts, "n").map(|m| (m.index, m.reads_value()));
        assert_eq!(m, Some((1, true)));
        let m = find_match(&mut opts, "flag").map(|m| (m.index, m.reads_value()));
        assert_eq!(m, Some((0, false)));
        assert!(find_match(&mut opts, "nope").is_none());
        assert!(find_match(&mut opts, "F").is_none());
    }

    #[test]
    fn first_declared_option_wins() {
        let mut a = 0i32;
        let mut b = 0i32;
        let mut opts = [
            opt(&mut a, "").short('x'),
            opt(&mut b, "").long("x"),
        ];

        let index = find_match(&mut opts, "x").map(|m| m.index);
        assert_eq!(index, Some(0));
    }

    #[test]
    fn match_writes_through_binding() {
        let mut on = false;
        let mut n = 0i32;
        {
            let mut opts = [flag(&mut on, "").short('f'), opt(&mut n, "").short('n')];
            if let Some(mut m) = find_match(&mut opts, "n") {
                assert!(!m.fill("x"));
                assert!(m.fill("12"));
            }
            if let Some(mut m) = find_match(&mut opts, "f") {
                assert!(!m.fill("true"));
                m.set_flag();
            }
        }
        assert!(on);
        assert_eq!(n, 12);
    }

    #[test]
    fn trailing_separator_terminates() {
        let mut files = Vec::new();
        let mut opts: [Opt<'_>; 0] = [];
        let args = ["prog", "a", "--"].map(String::from);
        let result = ArgParser::new(&mut opts).parse(&args, Some(&mut files));
        assert_eq!(result, Ok(()));
        assert_eq!(files, ["a"]);
    }
}
