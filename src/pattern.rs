//! Value classification: deciding whether a loaded value is an ICU-style
//! message pattern or a verbatim string.
//!
//! The store only carries the tag; expanding a pattern with runtime
//! arguments is the business of an external formatting engine.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Opening of an ICU MessageFormat argument: `{name}`, `{0}`,
    // `{count, plural, ...}`.
    static ref ICU_ARGUMENT_REGEX: Regex =
        Regex::new(r"\{\s*[A-Za-z0-9_]+\s*[,}]").unwrap();
}

/// A deterministic, side-effect-free predicate over a decoded value.
///
/// Invoked once per entry at load time; the result is stored on the entry
/// and never re-evaluated. Implemented for plain closures, so tests and
/// callers with their own detection rule can pass a `Fn(&str) -> bool`.
pub trait PatternDetector {
    fn is_pattern(&self, value: &str) -> bool;
}

impl<F> PatternDetector for F
where
    F: Fn(&str) -> bool,
{
    fn is_pattern(&self, value: &str) -> bool {
        self(value)
    }
}

/// Default detector: a value containing at least one ICU argument in curly
/// brackets is a pattern.
#[derive(Debug, Clone, Copy, Default)]
pub struct IcuDetector;

impl PatternDetector for IcuDetector {
    fn is_pattern(&self, value: &str) -> bool {
        ICU_ARGUMENT_REGEX.is_match(value)
    }
}
