use crate::Opt;

/// Builder for the usage text of a program
#[derive(Debug, Clone)]
pub struct Usage {
    /// Program name shown in the synopsis
    program: String,
    /// Whether the synopsis mentions positional arguments
    positional_arguments: bool,
    /// What a positional argument is called in the synopsis
    positional_type: String,
}

impl Usage {
    /// Create a usage builder for `program`, without positional arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            positional_arguments: false,
            positional_type: "file".to_string(),
        }
    }

    /// Mention positional arguments in the synopsis
    pub fn positional_arguments(mut self, enabled: bool) -> Self {
        self.positional_arguments = enabled;
        self
    }

    /// Set the name shown for positional arguments (default "file")
    pub fn positional_type(mut self, name: impl Into<String>) -> Self {
        self.positional_type = name.into();
        self
    }

    /// Render the synopsis followed by one aligned line per option
    pub fn render(&self, opts: &[Opt<'_>]) -> String {
        let mut usage = format!("Usage: {} [option]...", self.program);
        if self.positional_arguments {
            usage.push_str(&format!(" [--] [{}]...", self.positional_type));
        }
        usage.push('\n');

        let max_width = opts.iter().map(option_width).max().unwrap_or(0);
        for opt in opts {
            usage.push_str(&option_line(opt, max_width));
        }

        usage
    }
}

/// Width of the part of an option line that varies: the long name, plus
/// a space and the type name for options that read a value
fn option_width(opt: &Opt<'_>) -> usize {
    let long = opt.long_name().map_or(0, |l| l.chars().count());
    match opt.type_name() {
        Some(type_name) => long + 1 + type_name.chars().count(),
        None => long,
    }
}

fn option_line(opt: &Opt<'_>, max_width: usize) -> String {
    let mut line = String::from("  ");

    match opt.short_name() {
        Some(c) => line.push_str(&format!("-{}", c)),
        None => line.push_str("  "),
    }

    if let Some(long) = opt.long_name() {
        line.push_str(&format!(" --{}", long));
    }

    if let Some(type_name) = opt.type_name() {
        line.push(' ');
        line.push_str(type_name);
    }

    // help text starts at column max_width + 9 on every line
    let indent = if opt.long_name().is_some() { 2 } else { 5 };
    let pad = max_width + indent - option_width(opt);
    line.push_str(&" ".repeat(pad));

    line.push_str(opt.help());

    if !opt.is_required()
        && let Some(default) = opt.default_value()
    {
        line.push_str(&format!(" (default: {})", default));
    }

    line.push('\n');
    line
}

/// Render usage for `program` with positional arguments shown as `file`
pub fn usage_string(program: &str, opts: &[Opt<'_>], positional_arguments: bool) -> String {
    Usage::new(program)
        .positional_arguments(positional_arguments)
        .render(opts)
}
