/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use insta::assert_snapshot;
use layer_links::{LayerError, LayerErrorKind};

use crate::harness::Highlights;

#[test]
fn two_pairs_merge_into_one_page_ordered_chain() {
    let (mut h, keys) = Highlights::on_pages(&[0, 1, 2, 3]);
    let [a, b, c, d] = keys[..] else { unreachable!() };

    h.link(a, c);
    h.link(b, d);
    assert_snapshot!(h.render_chain(a), @"A <-> C");
    assert_snapshot!(h.render_chain(b), @"B <-> D");

    h.link(a, d);
    assert_snapshot!(h.render_chain(d), @"A <-> B <-> C <-> D");
    assert_eq!(h.objects.link_count(), 3);
}

#[test]
fn linking_lower_page_to_tail_prepends() {
    let (mut h, keys) = Highlights::on_pages(&[0, 1, 2, 3]);
    let [a, b, c, d] = keys[..] else { unreachable!() };
    h.link(b, c);
    h.link(c, d);

    h.link(d, a);

    assert_snapshot!(h.render_chain(c), @"A <-> B <-> C <-> D");
    assert_eq!(h.objects.previous_link(a), None);
    assert_eq!(h.objects.next_link(a), Some(b));
    assert_eq!(h.objects.chain_head(d), Some(a));
    assert_eq!(h.objects.chain_tail(a), Some(d));
}

#[test]
fn linking_in_reverse_page_order_sorts_chain() {
    let (mut h, keys) = Highlights::on_pages(&[8, 6, 4, 2]);
    for pair in keys.windows(2) {
        h.link(pair[0], pair[1]);
    }

    assert_snapshot!(h.render_chain(keys[0]), @"D <-> C <-> B <-> A");
}

#[test]
fn merge_is_independent_of_argument_order() {
    let topology = |swap: bool| {
        let (mut h, keys) = Highlights::on_pages(&[0, 5, 2, 7, 3]);
        h.link(keys[0], keys[1]);
        h.link(keys[2], keys[3]);
        h.link(keys[3], keys[4]);
        if swap {
            h.link(keys[4], keys[1]);
        } else {
            h.link(keys[1], keys[4]);
        }
        keys.iter()
            .map(|&k| (h.objects.previous_link(k), h.objects.next_link(k)))
            .collect::<Vec<_>>()
    };

    assert_eq!(topology(false), topology(true));
}

#[test]
fn rejected_links_leave_chains_untouched() {
    let (mut h, keys) = Highlights::on_pages(&[0, 1, 2]);
    h.link(keys[0], keys[1]);

    let self_link = h.objects.add_link(keys[1], Some(keys[1])).unwrap_err();
    assert_eq!(self_link, LayerError::SelfLink { key: keys[1] });
    assert_eq!(self_link.kind(), LayerErrorKind::InvalidOperation);

    let null_target = h.objects.add_link(keys[2], None).unwrap_err();
    assert_eq!(null_target, LayerError::NullTarget { key: keys[2] });
    assert_eq!(null_target.kind(), LayerErrorKind::InvalidArgument);

    assert_snapshot!(h.render_chain(keys[0]), @"A <-> B");
    assert!(!h.objects.is_linked(keys[2]));
    h.assert_consistent();
}
