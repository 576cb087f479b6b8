use std::fmt::{Debug, Display};
use std::hash::Hash;

use siphasher::sip128::{Hasher128, SipHasher13};

/// How per-position key parts are joined into one composite key.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum KeyEncoding {
    /// Each part is written as `<byte length>:<part>`.
    ///
    /// Distinct sequences of parts always produce distinct keys.
    #[default]
    LengthPrefixed,
    /// Parts are concatenated without a separator.
    ///
    /// Parts `"1", "23"` and `"12", "3"` both produce the key `"123"`, so two
    /// different bundles may share a cache entry.
    Concat,
}

/// Builds a composite cache key, one part per bundle position.
#[derive(Debug, Clone)]
pub struct KeyBuilder {
    encoding: KeyEncoding,
    key: String,
}

impl KeyBuilder {
    /// Start an empty key.
    pub fn new(encoding: KeyEncoding) -> Self {
        Self { encoding, key: String::new() }
    }

    /// Append the next position's part.
    pub fn push(&mut self, part: &str) {
        if self.encoding == KeyEncoding::LengthPrefixed {
            self.key.push_str(&part.len().to_string());
            self.key.push(':');
        }
        self.key.push_str(part);
    }

    /// The composite key.
    pub fn finish(self) -> String {
        self.key
    }
}

/// Derive a key part through `Display`.
pub fn to_key<T: Display + ?Sized>(value: &T) -> String {
    value.to_string()
}

/// Derive a key part through `Debug`.
pub fn debug_key<T: Debug + ?Sized>(value: &T) -> String {
    format!("{value:?}")
}

/// Derive a key part from a 128-bit hash of the value, in hex.
///
/// Useful for values that are large or have no textual form. Equal values
/// produce equal keys; distinct values collide only with negligible
/// probability.
pub fn hash_key<T: Hash + ?Sized>(value: &T) -> String {
    let mut state = SipHasher13::new();
    value.hash(&mut state);
    format!("{:032x}", state.finish128().as_u128())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(encoding: KeyEncoding, parts: &[&str]) -> String {
        let mut builder = KeyBuilder::new(encoding);
        for part in parts {
            builder.push(part);
        }
        builder.finish()
    }

    #[test]
    fn test_concat_collides() {
        assert_eq!(key(KeyEncoding::Concat, &["1", "23"]), "123");
        assert_eq!(key(KeyEncoding::Concat, &["12", "3"]), "123");
    }

    #[test]
    fn test_length_prefixed_separates() {
        let a = key(KeyEncoding::LengthPrefixed, &["1", "23"]);
        let b = key(KeyEncoding::LengthPrefixed, &["12", "3"]);
        assert_eq!(a, "1:12:23");
        assert_eq!(b, "2:121:3");
        assert_ne!(a, b);
        assert_eq!(key(KeyEncoding::LengthPrefixed, &["", "x"]), "0:1:x");
    }

    #[test]
    fn test_length_prefix_counts_bytes() {
        assert_eq!(key(KeyEncoding::LengthPrefixed, &["é"]), "2:é");
    }

    #[test]
    fn test_key_functions() {
        assert_eq!(to_key(&42), "42");
        assert_eq!(to_key("abc"), "abc");
        assert_eq!(debug_key(&Some(1)), "Some(1)");
        assert_eq!(hash_key(&(1, "a")), hash_key(&(1, "a")));
        assert_ne!(hash_key(&1u32), hash_key(&2u32));
        assert_eq!(hash_key(&0u8).len(), 32);
    }
}
