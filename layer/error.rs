/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use super::{LayerKey, LayerObjectId};

/// Broad classification of a rejected call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerErrorKind {
    /// The arguments are valid objects but the operation makes no sense for them.
    InvalidOperation,
    /// An argument is missing, stale, or already taken.
    InvalidArgument,
}

/// Errors from layer object linking.
///
/// Every variant is returned before any link is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerError {
    /// `add_link(x, x)`.
    SelfLink { key: LayerKey },
    /// `add_link(x, None)`.
    NullTarget { key: LayerKey },
    /// Both objects already share a chain and the policy rejects that.
    SameChain { x: LayerKey, y: LayerKey },
    /// The two chains both hold an object on this page and the policy rejects that.
    PositionConflict { page_index: usize },
    /// The key does not name a live object.
    UnknownObject { key: LayerKey },
    /// An object with this identity already exists.
    DuplicateId { id: LayerObjectId },
}

impl LayerError {
    pub fn kind(&self) -> LayerErrorKind {
        match self {
            Self::SelfLink { .. } | Self::SameChain { .. } | Self::PositionConflict { .. } => {
                LayerErrorKind::InvalidOperation
            }
            Self::NullTarget { .. } | Self::UnknownObject { .. } | Self::DuplicateId { .. } => {
                LayerErrorKind::InvalidArgument
            }
        }
    }
}

impl std::fmt::Display for LayerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SelfLink { key } => {
                write!(f, "layer object {} cannot be linked to itself", key.index())
            }
            Self::NullTarget { key } => {
                write!(f, "layer object {} has no link target", key.index())
            }
            Self::SameChain { x, y } => write!(
                f,
                "layer objects {} and {} are already in the same chain",
                x.index(),
                y.index()
            ),
            Self::PositionConflict { page_index } => write!(
                f,
                "both chains hold a layer object on page {page_index}"
            ),
            Self::UnknownObject { key } => {
                write!(f, "no layer object with key {}", key.index())
            }
            Self::DuplicateId { id } => write!(f, "layer object {id} already exists"),
        }
    }
}

impl std::error::Error for LayerError {}
