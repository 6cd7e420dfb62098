//! Strings that are safe for direct injection into rendered HTML.
//!
//! Plugin renderers return [`SafeString`]s. A template layer must insert them
//! verbatim; plain strings go through [`escape`] first.

use std::fmt;

use serde::{Deserialize, Serialize};

/// HTML that must not be escaped again.
///
/// Marking a string safe is a promise made by the caller. Nothing here
/// sanitizes the contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SafeString(String);

impl SafeString {
    /// Returns an empty safe string.
    pub const fn empty() -> Self {
        Self(String::new())
    }

    /// Returns the wrapped markup.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if there is no markup.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends another safe fragment.
    pub fn push_safe(&mut self, other: &Self) {
        self.0.push_str(&other.0);
    }

    /// Unwraps the markup.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SafeString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SafeString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromIterator<Self> for SafeString {
    fn from_iter<I: IntoIterator<Item = Self>>(iter: I) -> Self {
        let mut out = Self::empty();
        for part in iter {
            out.push_safe(&part);
        }
        out
    }
}

/// Marks `value` as safe, bypassing HTML escaping.
///
/// # Examples
///
/// ```
/// use feincms3_rs_core::safestring::mark_safe;
///
/// assert_eq!(mark_safe("<b>x</b>").as_str(), "<b>x</b>");
/// ```
pub fn mark_safe(value: impl Into<String>) -> SafeString {
    SafeString(value.into())
}

/// Escapes HTML special characters in a string.
///
/// Replaces `&`, `<`, `>`, `"`, and `'` with their HTML entity equivalents.
pub fn escape(s: &str) -> SafeString {
    SafeString(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#x27;"),
    )
}
