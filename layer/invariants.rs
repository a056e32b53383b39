/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::collections::HashSet;

use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableGraph};

use super::{ChainLink, LayerKey, LayerObject, LayerObjects};

type LinkGraph<T> = StableGraph<LayerObject<T>, ChainLink>;

/// Describe every broken chain invariant. An empty result means the
/// collection is consistent.
pub fn collect_link_invariant_violations<T>(objects: &LayerObjects<T>) -> Vec<String> {
    let mut violations = Vec::new();
    let graph = &objects.inner;

    for node in graph.node_indices() {
        push_link_violations(graph, node, &mut violations);
    }

    // With degrees in bounds, anything not reachable from a head sits on a cycle.
    let mut reached: HashSet<NodeIndex> = HashSet::new();
    for head in graph
        .node_indices()
        .filter(|&node| graph.edges_directed(node, Direction::Incoming).next().is_none())
    {
        let mut cursor = Some(head);
        while let Some(node) = cursor {
            if !reached.insert(node) {
                break;
            }
            cursor = graph.neighbors_directed(node, Direction::Outgoing).next();
        }
    }
    for node in graph.node_indices() {
        if !reached.contains(&node) {
            violations.push(format!("cycle: object {} has no chain head", node.index()));
        }
    }

    violations
}

/// Same checks as [`collect_link_invariant_violations`], limited to the chain
/// holding `member`. Stale keys yield nothing.
pub(crate) fn collect_chain_violations<T>(
    objects: &LayerObjects<T>,
    member: LayerKey,
) -> Vec<String> {
    let mut violations = Vec::new();
    if !objects.contains(member) {
        return violations;
    }
    let graph = &objects.inner;

    let mut seen: HashSet<NodeIndex> = HashSet::from([member.node]);
    let mut head = member.node;
    while let Some(previous) = graph.neighbors_directed(head, Direction::Incoming).next() {
        if !seen.insert(previous) {
            violations.push(format!(
                "cycle: object {} has no chain head",
                member.index()
            ));
            return violations;
        }
        head = previous;
    }

    seen.clear();
    let mut cursor = Some(head);
    while let Some(node) = cursor {
        if !seen.insert(node) {
            violations.push(format!("cycle: object {} is revisited", node.index()));
            break;
        }
        push_link_violations(graph, node, &mut violations);
        cursor = graph.neighbors_directed(node, Direction::Outgoing).next();
    }
    violations
}

/// Degree, self-link and ordering checks for the links around one object.
fn push_link_violations<T>(graph: &LinkGraph<T>, node: NodeIndex, violations: &mut Vec<String>) {
    let outgoing = graph.edges_directed(node, Direction::Outgoing).count();
    if outgoing > 1 {
        violations.push(format!(
            "degree: object {} has {outgoing} next links",
            node.index()
        ));
    }
    let incoming = graph.edges_directed(node, Direction::Incoming).count();
    if incoming > 1 {
        violations.push(format!(
            "degree: object {} has {incoming} previous links",
            node.index()
        ));
    }
    for next in graph.neighbors_directed(node, Direction::Outgoing) {
        if next == node {
            violations.push(format!(
                "self link: object {} links to itself",
                node.index()
            ));
        } else if graph[node].order_key() >= graph[next].order_key() {
            violations.push(format!(
                "order: object {} (page {}) precedes object {} (page {})",
                node.index(),
                graph[node].page_index(),
                next.index(),
                graph[next].page_index()
            ));
        }
    }
}
