/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use insta::assert_snapshot;
use layer_links::LayerError;

use crate::harness::Highlights;

#[test]
fn removing_middle_reconnects_neighbors() {
    let (mut h, keys) = Highlights::on_pages(&[0, 1, 2]);
    let [a, b, c] = keys[..] else { unreachable!() };
    h.link(a, b);
    h.link(b, c);

    h.objects.remove_links(b);
    h.assert_consistent();

    assert_snapshot!(h.render_chain(a), @"A <-> C");
    assert_snapshot!(h.render_chain(b), @"B");
    assert!(!h.objects.is_linked(b));
    assert_eq!(h.objects.next_link(a), Some(c));
    assert_eq!(h.objects.previous_link(c), Some(a));
}

#[test]
fn removed_object_can_be_relinked() {
    let (mut h, keys) = Highlights::on_pages(&[0, 1, 2, 3]);
    for pair in keys.windows(2) {
        h.link(pair[0], pair[1]);
    }

    h.objects.remove_links(keys[2]);
    assert_snapshot!(h.render_chain(keys[0]), @"A <-> B <-> D");

    h.link(keys[2], keys[3]);
    assert_snapshot!(h.render_chain(keys[0]), @"A <-> B <-> C <-> D");
}

#[test]
fn destroying_chain_ends_shortens_chain() {
    let (mut h, keys) = Highlights::on_pages(&[0, 1, 2, 3]);
    for pair in keys.windows(2) {
        h.link(pair[0], pair[1]);
    }

    let destroyed = h.objects.remove_object(keys[0]).unwrap();
    h.assert_consistent();
    assert_eq!(destroyed.payload, 'A');
    assert_snapshot!(h.render_chain(keys[3]), @"B <-> C <-> D");

    h.objects.remove_object(keys[3]);
    h.assert_consistent();
    assert_snapshot!(h.render_chain(keys[1]), @"B <-> C");
    assert_eq!(h.objects.len(), 2);
}

#[test]
fn key_of_destroyed_highlight_stays_dead_after_slot_reuse() {
    let (mut h, keys) = Highlights::on_pages(&[0, 1, 2]);
    let [a, b, c] = keys[..] else { unreachable!() };
    h.link(b, c);

    h.objects.remove_object(a);
    let replacement = h.objects.add_object(5, 'E');
    assert_eq!(replacement.index(), a.index());

    let err = h.objects.add_link(a, Some(b)).unwrap_err();
    assert_eq!(err, LayerError::UnknownObject { key: a });
    h.objects.remove_links(a);

    assert_snapshot!(h.render_chain(b), @"B <-> C");
    assert_snapshot!(h.render_chain(replacement), @"E");
    h.assert_consistent();
}
