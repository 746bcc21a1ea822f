//! Bidirectional escaping of control and structural characters.
//!
//! Wire tokens are always two characters wide: `\` followed by a single
//! marker character. Because every token starts with the escape character and
//! has the same width, no token is a prefix of another and a left-to-right
//! scan decodes unambiguously.

use std::collections::HashMap;

/// The escape character that introduces every wire token.
pub const ESCAPE_CHAR: char = '\\';

/// Characters that are always protected regardless of configuration: the
/// escape character itself, the record separator, and the CSV quote.
const IMPLICIT_PROTECTED: [char; 3] = ['\\', ';', '"'];

/// Default additional protected characters.
const DEFAULT_PROTECTED: [char; 2] = ['\n', '\t'];

/// Two complementary substitution tables, exact inverses of each other.
///
/// `encode` maps a literal character to its marker; `decode` maps a marker
/// back to the literal. Both tables are built together from one protected
/// set, so a partially updated pair is never observable: reconfiguring
/// constructs a complete replacement table.
///
/// ```
/// use langstore::EscapeTable;
///
/// let table = EscapeTable::default();
/// assert_eq!(table.encode("a;b\nc"), "a\\sb\\nc");
/// assert_eq!(table.decode("a\\sb\\nc"), "a;b\nc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapeTable {
    encode: HashMap<char, char>,
    decode: HashMap<char, char>,
}

impl Default for EscapeTable {
    fn default() -> Self {
        Self::with_protected(DEFAULT_PROTECTED)
    }
}

impl EscapeTable {
    /// Builds a table protecting the given characters in addition to the
    /// implicit set (`\`, `;`, `"`).
    ///
    /// A character whose marker letter is already taken by an earlier entry
    /// is skipped, keeping the two tables exact inverses.
    pub fn with_protected(chars: impl IntoIterator<Item = char>) -> Self {
        let mut encode = HashMap::new();
        let mut decode = HashMap::new();
        for c in IMPLICIT_PROTECTED.into_iter().chain(chars) {
            let marker = marker_for(c);
            if let std::collections::hash_map::Entry::Vacant(slot) = decode.entry(marker) {
                slot.insert(c);
                encode.insert(c, marker);
            }
        }
        EscapeTable { encode, decode }
    }

    /// Replaces the protected set. Both directions are regenerated together.
    pub fn set_protected(&mut self, chars: impl IntoIterator<Item = char>) {
        *self = Self::with_protected(chars);
    }

    /// Whether `c` is replaced by a wire token on encode.
    pub fn protects(&self, c: char) -> bool {
        self.encode.contains_key(&c)
    }

    /// Replaces every protected character with its two-character wire token.
    pub fn encode(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        for c in input.chars() {
            match self.encode.get(&c) {
                Some(&marker) => {
                    out.push(ESCAPE_CHAR);
                    out.push(marker);
                }
                None => out.push(c),
            }
        }
        out
    }

    /// Reverts wire tokens to their literal characters.
    ///
    /// An escape sequence with an unknown marker, or a trailing lone `\`,
    /// passes through unchanged so that foreign input is never corrupted.
    pub fn decode(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        let mut chars = input.chars();
        while let Some(c) = chars.next() {
            if c != ESCAPE_CHAR {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some(marker) => match self.decode.get(&marker) {
                    Some(&literal) => out.push(literal),
                    None => {
                        out.push(ESCAPE_CHAR);
                        out.push(marker);
                    }
                },
                None => out.push(ESCAPE_CHAR),
            }
        }
        out
    }
}

/// Marker character used in the wire token for `c`.
///
/// Control and structural characters get mnemonic letters so that no raw
/// separator or quote ever appears inside a wire token; anything else uses
/// the character itself.
fn marker_for(c: char) -> char {
    match c {
        '\n' => 'n',
        '\t' => 't',
        '\r' => 'r',
        ';' => 's',
        '"' => 'q',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_protects_newline_tab_and_structural() {
        let table = EscapeTable::default();
        for c in ['\n', '\t', '\\', ';', '"'] {
            assert!(table.protects(c), "expected {:?} to be protected", c);
        }
        assert!(!table.protects('a'));
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let table = EscapeTable::default();
        let literal = "line one\nline two\twith \"quotes\"; and \\ backslash";
        let wire = table.encode(literal);
        assert!(!wire.contains('\n'));
        assert!(!wire.contains('\t'));
        assert_eq!(table.decode(&wire), literal);
    }

    #[test]
    fn test_decode_encode_is_identity_on_wire_tokens() {
        let table = EscapeTable::default();
        let wire = "hello\\nworld\\t\\sdone";
        assert_eq!(table.encode(&table.decode(wire)), wire);
    }

    #[test]
    fn test_wire_tokens_contain_no_structural_characters() {
        let table = EscapeTable::default();
        let wire = table.encode("a;b\"c\\d");
        assert!(!wire.contains(';'));
        assert!(!wire.contains('"'));
        assert_eq!(table.decode(&wire), "a;b\"c\\d");
    }

    #[test]
    fn test_unknown_escape_passes_through() {
        let table = EscapeTable::default();
        assert_eq!(table.decode("100\\% sure"), "100\\% sure");
    }

    #[test]
    fn test_trailing_lone_backslash() {
        let table = EscapeTable::default();
        assert_eq!(table.decode("oops\\"), "oops\\");
    }

    #[test]
    fn test_custom_protected_set() {
        let table = EscapeTable::with_protected(['|']);
        assert_eq!(table.encode("a|b"), "a\\|b");
        assert_eq!(table.decode("a\\|b"), "a|b");
        // Structural characters stay protected even when not listed.
        assert_eq!(table.encode("a;b"), "a\\sb");
        // Newline is no longer in the set.
        assert!(!table.protects('\n'));
        assert_eq!(table.encode("a\nb"), "a\nb");
    }

    #[test]
    fn test_set_protected_replaces_both_directions() {
        let mut table = EscapeTable::default();
        table.set_protected(['#']);
        assert!(table.protects('#'));
        assert!(!table.protects('\t'));
        assert_eq!(table.decode(&table.encode("x#y")), "x#y");
    }

    #[test]
    fn test_marker_collision_keeps_first_entry() {
        // Protecting the letter 'n' would collide with the newline mnemonic;
        // the earlier entry wins and the tables stay inverse.
        let table = EscapeTable::with_protected(['\n', 'n']);
        assert_eq!(table.decode(&table.encode("n\nn")), "n\nn");
    }
}
