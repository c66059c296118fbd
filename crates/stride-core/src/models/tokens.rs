// ABOUTME: Opaque credential pair issued by the upstream fitness service
// ABOUTME: Shared by the authenticator, providers, sessions, and the stateless token API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

/// Token pair obtained once at login and replayed on every fetch
///
/// The JSON shape is what browser clients cache locally and send back in the
/// `tokens` query parameter. `oauth2` is the short-lived bearer used for API
/// calls; `oauth1` is the long-lived credential. Both are opaque here.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenPair {
    /// Long-lived credential
    pub oauth1: String,
    /// Short-lived bearer token
    pub oauth2: String,
}

impl TokenPair {
    /// Build a token pair
    #[must_use]
    pub fn new(oauth1: impl Into<String>, oauth2: impl Into<String>) -> Self {
        Self {
            oauth1: oauth1.into(),
            oauth2: oauth2.into(),
        }
    }

    /// Both halves are present
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.oauth1.is_empty() && !self.oauth2.is_empty()
    }

    /// Bearer token for API requests
    #[must_use]
    pub fn bearer(&self) -> &str {
        &self.oauth2
    }

    /// Parse the JSON-encoded pair sent by stateless clients
    ///
    /// Malformed JSON yields an empty pair, which callers reject as incomplete.
    #[must_use]
    pub fn from_query_json(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }
}

// Never print token material
impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("oauth1", &if self.oauth1.is_empty() { "<empty>" } else { "<redacted>" })
            .field("oauth2", &if self.oauth2.is_empty() { "<empty>" } else { "<redacted>" })
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_json_parsing() {
        let pair = TokenPair::from_query_json(r#"{"oauth1":"a","oauth2":"b"}"#);
        assert!(pair.is_complete());
        assert_eq!(pair.bearer(), "b");

        assert!(!TokenPair::from_query_json(r#"{"oauth2":"b"}"#).is_complete());
        assert!(!TokenPair::from_query_json("not json").is_complete());
        assert!(!TokenPair::from_query_json("{}").is_complete());
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let rendered = format!("{:?}", TokenPair::new("secret-1", "secret-2"));
        assert!(!rendered.contains("secret"));
    }
}
