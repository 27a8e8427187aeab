//! History Text Encoding
//!
//! Canonical, deterministic text for call arguments and results.
//!
//! - strings: single-quoted, with `\\`, `\'`, `\n`, `\r`, `\t` escaped
//! - bytes: `b'...'`, printable ASCII verbatim, everything else as `\xNN`
//! - integers: base 10; floats: `{:?}` form (always has a `.` or exponent)
//! - argument lists: `()`, `(x,)`, `(x, y)`
//!
//! Outputs are logged in display form, where strings are left unquoted.

use crate::value::StoredValue;

// == History Text ==
/// Conversion of a value into its history log text.
pub trait HistoryText {
    /// Quoted, unambiguous form used inside argument lists.
    fn repr(&self) -> String;

    /// Form logged for results.
    fn display(&self) -> String {
        self.repr()
    }

    /// The positional arguments this value stands for when used as a call input.
    fn arguments(&self) -> Vec<String> {
        vec![self.repr()]
    }
}

/// Renders positional arguments as a tuple.
pub fn argument_list(arguments: &[String]) -> String {
    match arguments {
        [] => "()".to_string(),
        [single] => format!("({single},)"),
        many => format!("({})", many.join(", ")),
    }
}

fn quote_str(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

fn quote_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 3);
    out.push_str("b'");
    for &b in bytes {
        match b {
            b'\\' => out.push_str("\\\\"),
            b'\'' => out.push_str("\\'"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            0x20..=0x7e => out.push(b as char),
            other => out.push_str(&format!("\\x{other:02x}")),
        }
    }
    out.push('\'');
    out
}

impl HistoryText for str {
    fn repr(&self) -> String {
        quote_str(self)
    }

    fn display(&self) -> String {
        self.to_string()
    }
}

impl HistoryText for String {
    fn repr(&self) -> String {
        quote_str(self)
    }

    fn display(&self) -> String {
        self.clone()
    }
}

impl HistoryText for Vec<u8> {
    fn repr(&self) -> String {
        quote_bytes(self)
    }
}

impl HistoryText for i64 {
    fn repr(&self) -> String {
        self.to_string()
    }
}

impl HistoryText for u64 {
    fn repr(&self) -> String {
        self.to_string()
    }
}

impl HistoryText for i32 {
    fn repr(&self) -> String {
        self.to_string()
    }
}

impl HistoryText for f64 {
    fn repr(&self) -> String {
        format!("{self:?}")
    }
}

impl HistoryText for bool {
    fn repr(&self) -> String {
        self.to_string()
    }
}

impl HistoryText for StoredValue {
    fn repr(&self) -> String {
        match self {
            StoredValue::Text(text) => text.repr(),
            StoredValue::Bytes(bytes) => bytes.repr(),
            StoredValue::Integer(n) => n.repr(),
            StoredValue::Float(x) => x.repr(),
        }
    }

    fn display(&self) -> String {
        match self {
            StoredValue::Text(text) => text.display(),
            other => other.repr(),
        }
    }
}

impl<T: HistoryText> HistoryText for Option<T> {
    fn repr(&self) -> String {
        match self {
            Some(value) => value.repr(),
            None => "None".to_string(),
        }
    }

    fn display(&self) -> String {
        match self {
            Some(value) => value.display(),
            None => "None".to_string(),
        }
    }
}

impl HistoryText for () {
    fn repr(&self) -> String {
        "()".to_string()
    }

    fn arguments(&self) -> Vec<String> {
        Vec::new()
    }
}

macro_rules! tuple_history_text {
    ($($name:ident),+) => {
        impl<$($name: HistoryText),+> HistoryText for ($($name,)+) {
            fn repr(&self) -> String {
                argument_list(&self.arguments())
            }

            #[allow(non_snake_case)]
            fn arguments(&self) -> Vec<String> {
                let ($($name,)+) = self;
                vec![$($name.repr()),+]
            }
        }
    };
}

tuple_history_text!(A);
tuple_history_text!(A, B);
tuple_history_text!(A, B, C);
tuple_history_text!(A, B, C, D);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_list_shapes() {
        assert_eq!(argument_list(&[]), "()");
        assert_eq!(argument_list(&["'a'".to_string()]), "('a',)");
        assert_eq!(
            argument_list(&["'a'".to_string(), "1".to_string()]),
            "('a', 1)"
        );
    }

    #[test]
    fn test_string_repr_and_display() {
        let s = "it's".to_string();
        assert_eq!(s.repr(), r"'it\'s'");
        assert_eq!(s.display(), "it's");
        assert_eq!(s.arguments(), vec![r"'it\'s'".to_string()]);
    }

    #[test]
    fn test_string_escapes_control_characters() {
        assert_eq!("a\\b\nc\t".repr(), r"'a\\b\nc\t'");
    }

    #[test]
    fn test_bytes_repr() {
        assert_eq!(vec![b'a', 0x00, 0xff, b'\''].repr(), r"b'a\x00\xff\''");
    }

    #[test]
    fn test_numbers() {
        assert_eq!(42_i64.repr(), "42");
        assert_eq!(3.0_f64.repr(), "3.0");
        assert_eq!(0.5_f64.display(), "0.5");
    }

    #[test]
    fn test_stored_value() {
        let text = StoredValue::Text("a".to_string());
        assert_eq!(text.arguments(), vec!["'a'".to_string()]);
        assert_eq!(text.display(), "a");
        assert_eq!(StoredValue::Integer(7).display(), "7");
        assert_eq!(StoredValue::Bytes(b"x".to_vec()).display(), "b'x'");
    }

    #[test]
    fn test_tuples_expand_to_arguments() {
        let args = ("url".to_string(), 10_i64);
        assert_eq!(args.arguments().len(), 2);
        assert_eq!(argument_list(&args.arguments()), "('url', 10)");
        assert_eq!(argument_list(&().arguments()), "()");
        assert_eq!(argument_list(&(1_i64,).arguments()), "(1,)");
    }

    #[test]
    fn test_option() {
        assert_eq!(Some("a".to_string()).display(), "a");
        assert_eq!(None::<String>.repr(), "None");
    }
}
