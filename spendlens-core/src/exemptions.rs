//! Exemption list: description fragments whose transactions are dropped
//! before they ever become expenses (card payments, transfers, ...).

use serde::{Deserialize, Serialize};

/// Lowercased description fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExemptionSet {
    fragments: Vec<String>,
}

impl ExemptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw entries. Entries are trimmed and lowercased; blank
    /// entries are skipped since an empty fragment would match everything.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        set.extend(entries);
        set
    }

    /// Parse an exemption file body: one fragment per line, `#` starts a comment line.
    pub fn parse_lines(text: &str) -> Self {
        Self::from_entries(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        )
    }

    pub fn extend<I, S>(&mut self, entries: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for entry in entries {
            let fragment = entry.as_ref().trim().to_lowercase();
            if !fragment.is_empty() && !self.fragments.contains(&fragment) {
                self.fragments.push(fragment);
            }
        }
    }

    /// True iff the lowercased description contains any fragment.
    pub fn is_exempt(&self, description: &str) -> bool {
        is_exempt(description, &self.fragments)
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

/// Case-insensitive containment check against any exemption entry.
/// Stops at the first hit; an empty list never exempts.
pub fn is_exempt<S: AsRef<str>>(description: &str, exemptions: &[S]) -> bool {
    if exemptions.is_empty() {
        return false;
    }
    let desc = description.to_lowercase();
    exemptions.iter().any(|e| {
        let fragment = e.as_ref().to_lowercase();
        !fragment.is_empty() && desc.contains(&fragment)
    })
}
