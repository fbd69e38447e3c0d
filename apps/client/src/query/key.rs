use std::fmt;

/// One component of a query key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeySegment {
    Str(String),
    Int(i64),
    Empty,
}

impl From<&str> for KeySegment {
    fn from(value: &str) -> Self {
        KeySegment::Str(value.to_string())
    }
}

impl From<String> for KeySegment {
    fn from(value: String) -> Self {
        KeySegment::Str(value)
    }
}

impl From<u32> for KeySegment {
    fn from(value: u32) -> Self {
        KeySegment::Int(i64::from(value))
    }
}

impl From<i64> for KeySegment {
    fn from(value: i64) -> Self {
        KeySegment::Int(value)
    }
}

impl<T: Into<KeySegment>> From<Option<T>> for KeySegment {
    fn from(value: Option<T>) -> Self {
        value.map_or(KeySegment::Empty, Into::into)
    }
}

/// Identifier under which a fetched resource is cached, parameters included.
/// `["skills", 1, 10, "rust"]` and `["skills", 2, 10, "rust"]` are distinct entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<KeySegment>);

impl QueryKey {
    pub fn new(resource: &str) -> Self {
        Self(vec![KeySegment::from(resource)])
    }

    pub fn with(mut self, segment: impl Into<KeySegment>) -> Self {
        self.0.push(segment.into());
        self
    }

    /// Prefix match, used by invalidation.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match segment {
                KeySegment::Str(s) => write!(f, "{s:?}")?,
                KeySegment::Int(n) => write!(f, "{n}")?,
                KeySegment::Empty => f.write_str("null")?,
            }
        }
        f.write_str("]")
    }
}
