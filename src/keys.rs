//! Key Naming
//!
//! Every store key the client derives is built here.

/// Suffix of the list holding an operation's serialized inputs
pub const INPUTS_SUFFIX: &str = ":inputs";

/// Suffix of the list holding an operation's serialized outputs
pub const OUTPUTS_SUFFIX: &str = ":outputs";

/// Prefix of memoized fetch results
pub const CACHE_PREFIX: &str = "cache:";

/// Prefix of per-argument access counters
pub const COUNT_PREFIX: &str = "count:";

/// Invocation counter of an operation.
pub fn counter_key(name: &str) -> String {
    name.to_string()
}

/// Input history list of an operation.
pub fn inputs_key(name: &str) -> String {
    format!("{name}{INPUTS_SUFFIX}")
}

/// Output history list of an operation.
pub fn outputs_key(name: &str) -> String {
    format!("{name}{OUTPUTS_SUFFIX}")
}

/// Percent-encodes a fetch argument; only unreserved characters stay as-is.
pub fn encode_argument(argument: &str) -> String {
    urlencoding::encode(argument).into_owned()
}

/// Memoized result of a fetch argument.
pub fn cache_key(argument: &str) -> String {
    format!("{CACHE_PREFIX}{}", encode_argument(argument))
}

/// Access counter of a fetch argument.
pub fn count_key(argument: &str) -> String {
    format!("{COUNT_PREFIX}{}", encode_argument(argument))
}
