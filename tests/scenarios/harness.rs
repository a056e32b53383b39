/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use layer_links::{LayerKey, LayerObjects, collect_link_invariant_violations};

/// Objects labelled `A`, `B`, `C`, ... in creation order.
pub(crate) struct Highlights {
    pub objects: LayerObjects<char>,
}

impl Highlights {
    /// One highlight per page index, labelled in order.
    pub(crate) fn on_pages(pages: &[usize]) -> (Self, Vec<LayerKey>) {
        let mut objects = LayerObjects::new();
        let keys = pages
            .iter()
            .zip('A'..='Z')
            .map(|(&page, label)| objects.add_object(page, label))
            .collect();
        (Self { objects }, keys)
    }

    pub(crate) fn link(&mut self, x: LayerKey, y: LayerKey) {
        self.objects
            .add_link(x, Some(y))
            .expect("link should succeed");
        self.assert_consistent();
    }

    /// Chain of `key` drawn as `A <-> B <-> C`.
    pub(crate) fn render_chain(&self, key: LayerKey) -> String {
        self.objects
            .chain(key)
            .into_iter()
            .map(|member| self.objects.get(member).unwrap().payload.to_string())
            .collect::<Vec<_>>()
            .join(" <-> ")
    }

    pub(crate) fn assert_consistent(&self) {
        let violations = collect_link_invariant_violations(&self.objects);
        assert!(violations.is_empty(), "violations: {violations:?}");
    }
}
