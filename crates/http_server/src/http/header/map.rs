use std::collections::HashMap;

use crate::http::encoding::ContentCoding;

use super::names;

/// Request header fields, keyed by lower-cased name.
///
/// A repeated name replaces the earlier value. Insertion order is not kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    map: HashMap<String, String>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Inserts a field, normalizing the name (trimmed, lower-cased) and trimming the value.
    /// Returns the value it replaced, if any.
    pub fn insert(&mut self, name: &str, value: &str) -> Option<String> {
        self.map
            .insert(name.trim().to_ascii_lowercase(), value.trim().to_owned())
    }

    /// Looks a field up by name, ignoring ASCII case
    pub fn get(&self, name: &str) -> Option<&str> {
        if name.bytes().any(|b| b.is_ascii_uppercase()) {
            return self.map.get(&name.to_ascii_lowercase()).map(String::as_str);
        }
        self.map.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// The declared body length. Absent, negative or non-numeric values yield `None`.
    pub fn content_length(&self) -> Option<usize> {
        self.get(names::CONTENT_LENGTH)?.parse().ok()
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.get(names::USER_AGENT)
    }

    /// Whether `accept-encoding` lists the given coding.
    /// Matching is a plain substring check, without q-values.
    pub fn accepts(&self, coding: ContentCoding) -> bool {
        self.get(names::ACCEPT_ENCODING)
            .is_some_and(|value| value.contains(coding.http_identifier()))
    }
}
