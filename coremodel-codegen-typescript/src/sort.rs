//! Dependency ordering of declarations.

use std::{
    cmp::Reverse,
    collections::{BTreeSet, BinaryHeap, HashMap},
};

use petgraph::{
    algo::tarjan_scc,
    graph::{DiGraph, NodeIndex},
};

use crate::ast::Decl;

/// Order `decls` so that every declaration follows the ones it references.
///
/// Mutually recursive declarations stay together in their original order.
/// Among declarations whose dependencies are all placed, the one emitted
/// first goes first, so the result only depends on the input order.
pub fn toposort(decls: Vec<Decl>) -> Vec<Decl> {
    let mut graph: DiGraph<(), ()> = DiGraph::with_capacity(decls.len(), 0);
    let nodes: Vec<NodeIndex> = decls.iter().map(|_| graph.add_node(())).collect();

    let mut by_name: HashMap<&str, usize> = HashMap::new();
    for (i, decl) in decls.iter().enumerate() {
        by_name.entry(decl.name()).or_insert(i);
    }
    for (i, decl) in decls.iter().enumerate() {
        for name in decl.references() {
            if let Some(&j) = by_name.get(name.as_str()) {
                if i != j {
                    graph.update_edge(nodes[i], nodes[j], ());
                }
            }
        }
    }

    // Members of each strongly connected component, in emission order.
    let members: Vec<Vec<usize>> = tarjan_scc(&graph)
        .into_iter()
        .map(|scc| {
            let mut indices: Vec<usize> = scc.into_iter().map(NodeIndex::index).collect();
            indices.sort_unstable();
            indices
        })
        .collect();
    let mut component = vec![0; decls.len()];
    for (c, indices) in members.iter().enumerate() {
        for &i in indices {
            component[i] = c;
        }
    }

    // pending[c]: components c still waits for
    let mut pending = vec![0usize; members.len()];
    let mut dependents: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); members.len()];
    for edge in graph.raw_edges() {
        let from = component[edge.source().index()];
        let to = component[edge.target().index()];
        if from != to && dependents[to].insert(from) {
            pending[from] += 1;
        }
    }

    let mut ready: BinaryHeap<Reverse<(usize, usize)>> = members
        .iter()
        .enumerate()
        .filter(|(c, _)| pending[*c] == 0)
        .map(|(c, indices)| Reverse((indices[0], c)))
        .collect();

    let mut order: Vec<usize> = Vec::with_capacity(decls.len());
    while let Some(Reverse((_, c))) = ready.pop() {
        order.extend(&members[c]);
        for &dependent in &dependents[c] {
            pending[dependent] -= 1;
            if pending[dependent] == 0 {
                ready.push(Reverse((members[dependent][0], dependent)));
            }
        }
    }

    let mut slots: Vec<Option<Decl>> = decls.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect()
}
