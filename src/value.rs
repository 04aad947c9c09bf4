/// A type that an option can parse its value into.
///
/// Numeric parsing is all-or-nothing: the whole text must be consumed, so
/// `"12abc"` is rejected instead of being read as `12`.
pub trait OptionValue: Sized {
    /// Name shown in usage output (e.g. `int` in `--number int`)
    const TYPE_NAME: &'static str = "unknown";

    /// Parse a value from commandline text, `None` if the text does not fit
    fn parse_value(text: &str) -> Option<Self>;

    /// Render the current value as the default shown in usage output
    fn render_default(&self) -> String;
}

/// Object-safe view of a bound destination.
///
/// Every [`OptionValue`] is a `ValueSlot`, which lets options of different
/// value types sit in one slice.
pub trait ValueSlot {
    /// Parse `text` into the destination. On failure the destination is left untouched.
    fn fill(&mut self, text: &str) -> bool;

    /// Display name of the destination type
    fn type_name(&self) -> &'static str;

    /// The current value rendered for usage output
    fn render_default(&self) -> String;
}

impl<T: OptionValue> ValueSlot for T {
    fn fill(&mut self, text: &str) -> bool {
        match T::parse_value(text) {
            Some(v) => {
                *self = v;
                true
            }
            None => false,
        }
    }

    fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn render_default(&self) -> String {
        OptionValue::render_default(self)
    }
}

impl OptionValue for String {
    const TYPE_NAME: &'static str = "string";

    fn parse_value(text: &str) -> Option<Self> {
        Some(text.to_string())
    }

    fn render_default(&self) -> String {
        format!("\"{}\"", self)
    }
}

/// Split integer text into a sign-prefixed digit string and its radix.
///
/// `0x`/`0X` selects hex, a leading `0` followed by more digits selects octal.
fn split_radix(text: &str) -> Option<(String, u32)> {
    let (sign, rest) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.strip_prefix('+').unwrap_or(text)),
    };

    let (radix, digits) = if let Some(hex) = rest
        .strip_prefix("0x")
        .or_else(|| rest.strip_prefix("0X"))
    {
        (16, hex)
    } else if rest.len() > 1
        && let Some(oct) = rest.strip_prefix('0')
    {
        (8, oct)
    } else {
        (10, rest)
    };

    // from_str_radix would accept a second sign here
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return None;
    }

    Some((format!("{}{}", sign, digits), radix))
}

macro_rules! integer_value {
    ($name:literal => $($ty:ty),+) => {$(
        impl OptionValue for $ty {
            const TYPE_NAME: &'static str = $name;

            fn parse_value(text: &str) -> Option<Self> {
                let (digits, radix) = split_radix(text)?;
                <$ty>::from_str_radix(&digits, radix).ok()
            }

            fn render_default(&self) -> String {
                self.to_string()
            }
        }
    )+};
}

macro_rules! float_value {
    ($name:literal => $ty:ty) => {
        impl OptionValue for $ty {
            const TYPE_NAME: &'static str = $name;

            fn parse_value(text: &str) -> Option<Self> {
                text.parse::<$ty>().ok()
            }

            fn render_default(&self) -> String {
                self.to_string()
            }
        }
    };
}

integer_value!("int" => i8, i16, i32, i64, i128, isize);
integer_value!("uint" => u8, u16, u32, u64, u128, usize);
float_value!("float" => f32);
float_value!("double" => f64);
