//! Scalar value types

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A typed scalar stored in a table cell
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Value {
    /// Missing value (empty field, blank cell)
    Missing,

    /// Numeric value (all numbers stored as f64)
    Number(f64),

    /// Text value
    Text(SharedString),
}

impl Value {
    /// Create a new text value
    pub fn text<S: Into<String>>(s: S) -> Self {
        Value::Text(SharedString::new(s.into()))
    }

    /// Check if the value is missing
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the value as a string slice
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Missing => "missing",
            Value::Number(_) => "number",
            Value::Text(_) => "text",
        }
    }

    /// Hashable identity of this value, used for exact-duplicate detection.
    ///
    /// `-0.0` collapses to `0.0` and `Missing` equals `Missing`, so two rows
    /// that render identically compare as duplicates.
    pub fn key(&self) -> ValueKey {
        match self {
            Value::Missing => ValueKey::Missing,
            Value::Number(n) => {
                let n = if *n == 0.0 { 0.0 } else { *n };
                ValueKey::Number(n.to_bits())
            }
            Value::Text(s) => ValueKey::Text(s.clone()),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Missing
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => write!(f, ""),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s.as_str()),
        }
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::text(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::text(s)
    }
}

/// Hashable form of a [`Value`]
///
/// Numbers are compared by bit pattern (after collapsing `-0.0`), which gives
/// the exact-equality semantics duplicate removal needs without requiring
/// `Eq` on `f64`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKey {
    Missing,
    Number(u64),
    Text(SharedString),
}

/// Interned string for memory efficiency
///
/// Text values are often repeated across rows (e.g., "Yes", "No", category
/// labels). Using Arc<str> allows sharing the same string data across cells.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SharedString(Arc<str>);

impl SharedString {
    /// Create a new shared string
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        SharedString(Arc::from(s.as_ref()))
    }

    /// Get the string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the length of the string
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the string is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SharedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl fmt::Display for SharedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SharedString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SharedString {
    fn from(s: &str) -> Self {
        SharedString::new(s)
    }
}

impl From<String> for SharedString {
    fn from(s: String) -> Self {
        SharedString::new(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SharedString {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// String pool for deduplicating strings
///
/// When reading large files, many cells often contain the same text values.
/// The string pool ensures each unique string is stored only once in memory.
#[derive(Debug, Default)]
pub struct StringPool {
    strings: HashMap<Arc<str>, SharedString>,
}

impl StringPool {
    /// Create a new empty string pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create a shared string
    ///
    /// If the string already exists in the pool, returns a clone of the
    /// existing SharedString. Otherwise, creates a new SharedString and adds
    /// it to the pool.
    pub fn intern<S: AsRef<str>>(&mut self, s: S) -> SharedString {
        let s = s.as_ref();
        if let Some(shared) = self.strings.get(s) {
            shared.clone()
        } else {
            let arc: Arc<str> = Arc::from(s);
            let shared = SharedString(arc.clone());
            self.strings.insert(arc, shared.clone());
            shared
        }
    }

    /// Get the number of unique strings in the pool
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if the pool is empty
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Clear all strings from the pool
    pub fn clear(&mut self) {
        self.strings.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::from(42), Value::Number(42.0));
        assert_eq!(Value::from(3.14), Value::Number(3.14));

        let s = Value::from("hello");
        assert_eq!(s.as_text(), Some("hello"));
    }

    #[test]
    fn test_value_as_number() {
        assert_eq!(Value::Number(42.0).as_number(), Some(42.0));
        assert_eq!(Value::text("hello").as_number(), None);
        assert_eq!(Value::Missing.as_number(), None);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Number(42.0).to_string(), "42");
        assert_eq!(Value::Number(3.5).to_string(), "3.5");
        assert_eq!(Value::text("abc").to_string(), "abc");
        assert_eq!(Value::Missing.to_string(), "");
    }

    #[test]
    fn test_value_key_negative_zero() {
        assert_eq!(Value::Number(0.0).key(), Value::Number(-0.0).key());
        assert_ne!(Value::Number(0.0).key(), Value::Number(1.0).key());
        assert_eq!(Value::Missing.key(), Value::Missing.key());
        assert_ne!(Value::Missing.key(), Value::text("").key());
    }

    #[test]
    fn test_string_pool() {
        let mut pool = StringPool::new();

        let s1 = pool.intern("hello");
        let s2 = pool.intern("hello");
        let s3 = pool.intern("world");

        // Same string should return same SharedString
        assert!(Arc::ptr_eq(&s1.0, &s2.0));

        // Different strings should be different
        assert!(!Arc::ptr_eq(&s1.0, &s3.0));

        assert_eq!(pool.len(), 2);
    }
}
