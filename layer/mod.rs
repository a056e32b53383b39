/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Layer object store and chain queries.
//!
//! Core structures:
//! - `LayerObjects`: the viewer's object collection, backed by petgraph::StableGraph
//! - `LayerObject`: one annotation on one page, plus the viewer's opaque payload
//! - `ChainLink`: directed `previous -> next` association between two objects
//!
//! A chain is never stored as a value of its own. It is whatever is reachable
//! from a member by following link edges. Every object has at most one
//! outgoing and at most one incoming link edge, so an edge `a -> b` is at the
//! same time `a.next == b` and `b.previous == a`.

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction};
use std::collections::HashMap;
use uuid::Uuid;

use crate::config::LinkPolicy;

mod error;
pub mod invariants;
mod link;

pub use error::{LayerError, LayerErrorKind};

/// Stable object handle.
///
/// Pairs the petgraph slot with the creation sequence of the object that was
/// given that slot. `StableGraph` reuses freed slots, so a key kept past
/// `remove_object` would otherwise name whichever object is created next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerKey {
    pub(crate) node: NodeIndex,
    sequence: u64,
}

impl LayerKey {
    pub(crate) fn new(node: NodeIndex, sequence: u64) -> Self {
        Self { node, sequence }
    }

    /// Slot index, for diagnostics.
    pub fn index(&self) -> usize {
        self.node.index()
    }
}

/// Opaque identity assigned to a layer object by the viewer.
///
/// Used for equality and diagnostics only. Chain order never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct LayerObjectId(Uuid);

impl LayerObjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for LayerObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LayerObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "layer:{}", self.0)
    }
}

/// An annotation placed on one page of the document.
#[derive(Debug, Clone)]
pub struct LayerObject<T = ()> {
    id: LayerObjectId,

    /// Page the object appears on; the only chain ordering key.
    page_index: usize,

    /// Creation order, breaks ties between equal page indices.
    sequence: u64,

    /// Viewer-owned data (geometry, style, selection). Never read here.
    pub payload: T,
}

impl<T> LayerObject<T> {
    pub fn id(&self) -> LayerObjectId {
        self.id
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub(crate) fn order_key(&self) -> (usize, u64) {
        (self.page_index, self.sequence)
    }
}

/// Edge weight for a `previous -> next` association.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct ChainLink;

/// The viewer's layer object collection.
#[derive(Clone)]
pub struct LayerObjects<T = ()> {
    /// Objects as nodes, chain links as directed edges.
    pub(crate) inner: StableGraph<LayerObject<T>, ChainLink, Directed>,

    /// Identity to key mapping.
    id_to_key: HashMap<LayerObjectId, LayerKey>,

    next_sequence: u64,

    policy: LinkPolicy,
}

impl<T> LayerObjects<T> {
    /// Create an empty collection with the default link policy.
    pub fn new() -> Self {
        Self::with_policy(LinkPolicy::default())
    }

    pub fn with_policy(policy: LinkPolicy) -> Self {
        Self {
            inner: StableGraph::new(),
            id_to_key: HashMap::new(),
            next_sequence: 0,
            policy,
        }
    }

    pub fn policy(&self) -> LinkPolicy {
        self.policy
    }

    /// Replace the link policy. Existing chains are left as they are.
    pub fn set_policy(&mut self, policy: LinkPolicy) {
        self.policy = policy;
    }

    /// Add a new, unlinked object with a fresh identity.
    pub fn add_object(&mut self, page_index: usize, payload: T) -> LayerKey {
        let id = LayerObjectId::new();
        let key = self.insert_object(id, page_index, payload);
        log::trace!("created {id} on page {page_index}");
        key
    }

    /// Add a new, unlinked object under an identity chosen by the viewer.
    pub fn add_object_with_id(
        &mut self,
        id: LayerObjectId,
        page_index: usize,
        payload: T,
    ) -> Result<LayerKey, LayerError> {
        if self.id_to_key.contains_key(&id) {
            return Err(LayerError::DuplicateId { id });
        }
        Ok(self.insert_object(id, page_index, payload))
    }

    fn insert_object(&mut self, id: LayerObjectId, page_index: usize, payload: T) -> LayerKey {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        let node = self.inner.add_node(LayerObject {
            id,
            page_index,
            sequence,
            payload,
        });
        let key = LayerKey::new(node, sequence);
        self.id_to_key.insert(id, key);
        key
    }

    /// Destroy an object. Its chain neighbors are linked to each other first.
    pub fn remove_object(&mut self, key: LayerKey) -> Option<LayerObject<T>> {
        if !self.contains(key) {
            return None;
        }
        self.remove_links(key);
        let object = self.inner.remove_node(key.node)?;
        self.id_to_key.remove(&object.id);
        Some(object)
    }

    pub fn get(&self, key: LayerKey) -> Option<&LayerObject<T>> {
        self.inner
            .node_weight(key.node)
            .filter(|object| object.sequence == key.sequence)
    }

    /// Mutable access to an object's payload.
    ///
    /// Identity and page index are fixed at creation, so only the payload is
    /// handed out.
    pub fn payload_mut(&mut self, key: LayerKey) -> Option<&mut T> {
        self.inner
            .node_weight_mut(key.node)
            .filter(|object| object.sequence == key.sequence)
            .map(|object| &mut object.payload)
    }

    pub fn key_for_id(&self, id: LayerObjectId) -> Option<LayerKey> {
        self.id_to_key.get(&id).copied()
    }

    /// Whether `key` names a live object. Keys of destroyed objects never do,
    /// even after their slot is reused.
    pub fn contains(&self, key: LayerKey) -> bool {
        self.get(key).is_some()
    }

    /// Iterate over all objects in key order.
    pub fn objects(&self) -> impl Iterator<Item = (LayerKey, &LayerObject<T>)> {
        self.inner
            .node_indices()
            .map(move |node| (self.key_at(node), &self.inner[node]))
    }

    pub fn len(&self) -> usize {
        self.inner.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.node_count() == 0
    }

    /// Number of `previous -> next` associations across all chains.
    pub fn link_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Whether the object has a previous or a next neighbor.
    pub fn is_linked(&self, key: LayerKey) -> bool {
        self.previous_link(key).is_some() || self.next_link(key).is_some()
    }

    pub fn next_link(&self, key: LayerKey) -> Option<LayerKey> {
        self.link_edge(key, Direction::Outgoing)
            .and_then(|edge| self.inner.edge_endpoints(edge))
            .map(|(_, to)| self.key_at(to))
    }

    pub fn previous_link(&self, key: LayerKey) -> Option<LayerKey> {
        self.link_edge(key, Direction::Incoming)
            .and_then(|edge| self.inner.edge_endpoints(edge))
            .map(|(from, _)| self.key_at(from))
    }

    /// First object of the chain `key` belongs to (`key` itself when unlinked).
    pub fn chain_head(&self, key: LayerKey) -> Option<LayerKey> {
        if !self.contains(key) {
            return None;
        }
        let mut head = key;
        while let Some(previous) = self.previous_link(head) {
            head = previous;
        }
        Some(head)
    }

    /// Last object of the chain `key` belongs to (`key` itself when unlinked).
    pub fn chain_tail(&self, key: LayerKey) -> Option<LayerKey> {
        if !self.contains(key) {
            return None;
        }
        let mut tail = key;
        while let Some(next) = self.next_link(tail) {
            tail = next;
        }
        Some(tail)
    }

    /// Members of the chain `key` belongs to, head to tail.
    ///
    /// An unlinked object is a chain of one. A stale key yields an empty vector.
    pub fn chain(&self, key: LayerKey) -> Vec<LayerKey> {
        let mut members = Vec::new();
        let mut cursor = self.chain_head(key);
        while let Some(member) = cursor {
            members.push(member);
            cursor = self.next_link(member);
        }
        members
    }

    pub fn same_chain(&self, a: LayerKey, b: LayerKey) -> bool {
        match (self.chain_head(a), self.chain_head(b)) {
            (Some(a_head), Some(b_head)) => a_head == b_head,
            _ => false,
        }
    }

    /// The single link edge leaving (`Outgoing`) or entering (`Incoming`) `key`.
    pub(crate) fn link_edge(&self, key: LayerKey, direction: Direction) -> Option<EdgeIndex> {
        if !self.contains(key) {
            return None;
        }
        self.inner
            .edges_directed(key.node, direction)
            .next()
            .map(|edge| edge.id())
    }

    /// Key for a live slot.
    pub(crate) fn key_at(&self, node: NodeIndex) -> LayerKey {
        LayerKey::new(node, self.inner[node].sequence)
    }

    pub(crate) fn order_key(&self, key: LayerKey) -> (usize, u64) {
        self.inner[key.node].order_key()
    }
}

impl<T> Default for LayerObjects<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for LayerObjects<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerObjects")
            .field("objects", &self.inner.node_count())
            .field("links", &self.inner.edge_count())
            .field("policy", &self.policy)
            .finish()
    }
}
