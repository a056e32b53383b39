/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Link policy configuration.
//!
//! The policy lives under a `[links]` table so it can sit inside the viewer's
//! larger settings file:
//!
//! ```toml
//! [links]
//! same_chain = "reject"
//! equal_positions = "creation_order"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

/// What `add_link` does when both objects already share a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SameChainPolicy {
    /// Succeed without touching any link.
    #[default]
    Ignore,
    /// Fail with `LayerError::SameChain`.
    Reject,
}

/// What `add_link` does when the two chains hold objects on the same page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EqualPositionPolicy {
    /// Merge; objects on the same page are ordered by creation.
    #[default]
    CreationOrder,
    /// Fail with `LayerError::PositionConflict`.
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkPolicy {
    pub same_chain: SameChainPolicy,
    pub equal_positions: EqualPositionPolicy,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PolicyFile {
    links: Option<LinkPolicy>,
}

impl LinkPolicy {
    /// Parse a policy from TOML. A missing `[links]` table yields the defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, PolicyLoadError> {
        let file: PolicyFile =
            toml::from_str(source).map_err(|e| PolicyLoadError::Parse(e.to_string()))?;
        Ok(file.links.unwrap_or_else(|| {
            log::warn!("No [links] table in policy source; using default link policy");
            Self::default()
        }))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PolicyLoadError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| PolicyLoadError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&source)
    }

    pub fn to_toml_string(&self) -> Result<String, PolicyLoadError> {
        toml::to_string(&PolicyFile { links: Some(*self) })
            .map_err(|e| PolicyLoadError::Encode(e.to_string()))
    }
}

/// Errors from reading or writing a link policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyLoadError {
    Io(String),
    Parse(String),
    Encode(String),
}

impl std::fmt::Display for PolicyLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyLoadError::Io(e) => write!(f, "IO error: {e}"),
            PolicyLoadError::Parse(e) => write!(f, "Parse error: {e}"),
            PolicyLoadError::Encode(e) => write!(f, "Encode error: {e}"),
        }
    }
}

impl std::error::Error for PolicyLoadError {}
