/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Layer-object linking for the document viewer.
//!
//! Annotation objects ("layer objects") are created and destroyed by the
//! viewer. This crate keeps the page-ordered chains that associate them, e.g.
//! the highlight fragments of one passage that runs across several pages.
//!
//! - [`layer`]: the object store, chain merge/split, and chain queries.
//! - [`config`]: link policy for same-chain and equal-page linking.

pub mod config;
pub mod layer;

pub use config::{EqualPositionPolicy, LinkPolicy, PolicyLoadError, SameChainPolicy};
pub use layer::invariants::collect_link_invariant_violations;
pub use layer::{
    LayerError, LayerErrorKind, LayerKey, LayerObject, LayerObjectId, LayerObjects,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
