/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Chain merge (`add_link`) and chain split (`remove_links`).

use log::{debug, trace};
use petgraph::Direction;

use super::{ChainLink, LayerError, LayerKey, LayerObjects};
use crate::config::{EqualPositionPolicy, SameChainPolicy};

impl<T> LayerObjects<T> {
    /// Merge the chain of `x` with the chain of `target` into one chain
    /// ordered by page.
    ///
    /// Either chain may be a single unlinked object. The result does not depend
    /// on argument order. Nothing is mutated when an error is returned.
    pub fn add_link(&mut self, x: LayerKey, target: Option<LayerKey>) -> Result<(), LayerError> {
        if !self.contains(x) {
            return Err(LayerError::UnknownObject { key: x });
        }
        let Some(y) = target else {
            trace!("rejected link of {} to nothing", x.index());
            return Err(LayerError::NullTarget { key: x });
        };
        if !self.contains(y) {
            return Err(LayerError::UnknownObject { key: y });
        }
        if x == y {
            trace!("rejected self link of {}", x.index());
            return Err(LayerError::SelfLink { key: x });
        }

        let x_chain = self.chain(x);
        let y_chain = self.chain(y);
        if x_chain.first() == y_chain.first() {
            return match self.policy().same_chain {
                SameChainPolicy::Ignore => {
                    debug!(
                        "{} and {} already share a chain; nothing to link",
                        x.index(),
                        y.index()
                    );
                    Ok(())
                }
                SameChainPolicy::Reject => Err(LayerError::SameChain { x, y }),
            };
        }
        if self.policy().equal_positions == EqualPositionPolicy::Reject
            && let Some(page_index) = self.shared_page(&x_chain, &y_chain)
        {
            return Err(LayerError::PositionConflict { page_index });
        }

        let merged = self.merge_chains(&x_chain, &y_chain);
        let relinked = self.rethread(&merged);
        debug!(
            "merged chains of {} ({} objects) and {} ({} objects); {} links reassigned",
            x.index(),
            x_chain.len(),
            y.index(),
            y_chain.len(),
            relinked
        );
        self.debug_assert_chain_invariants(&[x]);
        Ok(())
    }

    /// Take `key` out of its chain, linking its former neighbors to each other.
    ///
    /// No-op for unlinked objects and stale keys.
    pub fn remove_links(&mut self, key: LayerKey) {
        let previous = self.previous_link(key);
        let next = self.next_link(key);
        if previous.is_none() && next.is_none() {
            return;
        }

        self.set_next(key, None);
        if let Some(previous) = previous {
            self.set_next(previous, next);
        }
        debug!(
            "unlinked {} (previous {:?}, next {:?})",
            key.index(),
            previous.map(|k| k.index()),
            next.map(|k| k.index())
        );
        let survivor = previous.or(next).unwrap_or(key);
        self.debug_assert_chain_invariants(&[key, survivor]);
    }

    /// First page present in both chains, if any. Both chains are page ordered.
    fn shared_page(&self, left: &[LayerKey], right: &[LayerKey]) -> Option<usize> {
        let (mut i, mut j) = (0, 0);
        while i < left.len() && j < right.len() {
            let left_page = self.inner[left[i].node].page_index();
            let right_page = self.inner[right[j].node].page_index();
            match left_page.cmp(&right_page) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => return Some(left_page),
            }
        }
        None
    }

    /// Two-pointer merge of two chains, each already ordered by `(page, sequence)`.
    fn merge_chains(&self, left: &[LayerKey], right: &[LayerKey]) -> Vec<LayerKey> {
        let mut merged = Vec::with_capacity(left.len() + right.len());
        let (mut i, mut j) = (0, 0);
        while i < left.len() && j < right.len() {
            if self.order_key(left[i]) < self.order_key(right[j]) {
                merged.push(left[i]);
                i += 1;
            } else {
                merged.push(right[j]);
                j += 1;
            }
        }
        merged.extend_from_slice(&left[i..]);
        merged.extend_from_slice(&right[j..]);
        merged
    }

    /// Point every member's `next` at its successor in `order`.
    ///
    /// `order` must hold every member of the chains being rethreaded, so each
    /// link dropped along the way is rewritten when its source comes up.
    /// Returns the number of members whose `next` changed.
    fn rethread(&mut self, order: &[LayerKey]) -> usize {
        let mut relinked = 0;
        for (index, &key) in order.iter().enumerate() {
            let wanted = order.get(index + 1).copied();
            if self.next_link(key) != wanted {
                self.set_next(key, wanted);
                relinked += 1;
            }
        }
        relinked
    }

    /// Replace the outgoing link of `key`. A new target loses its old incoming link.
    fn set_next(&mut self, key: LayerKey, next: Option<LayerKey>) {
        if let Some(edge) = self.link_edge(key, Direction::Outgoing) {
            self.inner.remove_edge(edge);
        }
        if let Some(next) = next {
            if let Some(edge) = self.link_edge(next, Direction::Incoming) {
                self.inner.remove_edge(edge);
            }
            self.inner.add_edge(key.node, next.node, ChainLink);
        }
    }

    /// Audit only the chains holding `members`, so debug builds stay O(chain).
    fn debug_assert_chain_invariants(&self, members: &[LayerKey]) {
        if cfg!(debug_assertions) {
            let violations: Vec<String> = members
                .iter()
                .flat_map(|&member| super::invariants::collect_chain_violations(self, member))
                .collect();
            debug_assert!(violations.is_empty(), "link invariants broken: {violations:?}");
        }
    }
}
