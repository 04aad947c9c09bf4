use thiserror::Error;

/// Result type for argument parsing
pub type Result<T> = std::result::Result<T, ParseError>;

/// An error that stopped argument parsing.
///
/// The `Display` output is the complete message meant for the user. Callers
/// that only care about success can treat any `Err` as "print it and the usage".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No declared option has this name
    #[error("Unrecognized option found: {name}")]
    Unrecognized { name: String },

    /// The option was already given once
    #[error("Duplicate option found: {name}")]
    Duplicate { name: String },

    /// A value-taking option was the last argument
    #[error("No value for option {name}")]
    MissingValue { name: String },

    /// The value text could not be converted to the option's type
    #[error("Unable to parse value \"{value}\" for option {name}")]
    InvalidValue { name: String, value: String },

    /// A positional argument was given but none are accepted
    #[error("Bare option found!")]
    BareArgument { argument: String },

    /// Required options that never appeared, as `--long` or `-s`
    #[error("{}", missing_lines(.0))]
    MissingRequired(Vec<String>),
}

fn missing_lines(flags: &[String]) -> String {
    flags
        .iter()
        .map(|flag| format!("Missing required option \"{}\"\n", flag))
        .collect()
}

impl ParseError {
    /// The user-facing message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Print the error followed by `usage` and exit with status 1
    pub fn exit(&self, usage: &str) -> ! {
        println!("{}", self.message().trim_end());
        print!("{}", usage);
        std::process::exit(1);
    }
}
