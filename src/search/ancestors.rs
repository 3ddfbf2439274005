//! Upward breadth-first walk over the parent relation.
//!
//! Each traversal state is a person paired with whether every hop on the way
//! there was biological. A state is recorded once, at the smallest depth it is
//! reached, together with every predecessor hop achieving that depth. So the
//! walk visits at most two states per person and terminates on cyclic input.

use std::collections::VecDeque;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use tracing::trace;

use crate::graph::FamilyGraph;
use crate::model::{FamilyId, Hop, LinkKind, PersonId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct State<'g> {
    person: &'g PersonId,
    biological: bool,
}

/// The hop from a child state up into the state that records it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Predecessor<'g> {
    from: State<'g>,
    family: &'g FamilyId,
    kind: LinkKind,
}

#[derive(Debug)]
struct Reached<'g> {
    depth: usize,
    preds: Vec<Predecessor<'g>>,
}

/// Every ancestor reachable from one root, with how it was reached.
#[derive(Debug)]
pub struct AncestorMap<'g> {
    root: Option<&'g PersonId>,
    reached: HashMap<State<'g>, Reached<'g>>,
}

impl<'g> AncestorMap<'g> {
    /// Walk up from `root` for at most `max_generations` generations.
    /// The root is its own ancestor at depth 0.
    pub fn walk(graph: &'g FamilyGraph, root: &str, max_generations: usize) -> Self {
        let mut reached = HashMap::new();
        let Some(root) = graph.person(root).map(|p| &p.id) else {
            return Self { root: None, reached };
        };

        let start = State { person: root, biological: true };
        reached.insert(start, Reached { depth: 0, preds: Vec::new() });
        let mut queue = VecDeque::from([start]);

        while let Some(state) = queue.pop_front() {
            let depth = reached[&state].depth;
            if depth >= max_generations {
                trace!(root = %root, person = %state.person, "generation limit reached");
                continue;
            }
            for link in graph.parent_links(state.person.as_str()) {
                let next = State {
                    person: link.parent,
                    biological: state.biological && link.kind.is_biological(),
                };
                let pred = Predecessor { from: state, family: link.family, kind: link.kind };
                match reached.entry(next) {
                    Entry::Vacant(slot) => {
                        slot.insert(Reached { depth: depth + 1, preds: vec![pred] });
                        queue.push_back(next);
                    }
                    Entry::Occupied(mut slot) => {
                        let known = slot.get_mut();
                        if known.depth == depth + 1 && !known.preds.contains(&pred) {
                            known.preds.push(pred);
                        }
                    }
                }
            }
        }

        // Record order must not leak into path enumeration.
        for entry in reached.values_mut() {
            entry.preds.sort();
        }

        Self { root: Some(root), reached }
    }

    pub fn root(&self) -> Option<&'g PersonId> {
        self.root
    }

    /// Number of distinct persons reached, the root included.
    pub fn len(&self) -> usize {
        self.persons().count()
    }

    pub fn is_empty(&self) -> bool {
        self.reached.is_empty()
    }

    /// Distinct persons reached, in no particular order.
    pub fn persons(&self) -> impl Iterator<Item = &'g PersonId> + '_ {
        self.reached
            .keys()
            .filter(|s| s.biological || !self.reached.contains_key(&State { biological: true, ..**s }))
            .map(|s| s.person)
    }

    /// Smallest number of generations between the root and `person`.
    pub fn depth_of(&self, person: &PersonId) -> Option<usize> {
        [true, false]
            .into_iter()
            .filter_map(|biological| self.reached.get(&State { person, biological }))
            .map(|r| r.depth)
            .min()
    }

    /// Smallest depth over fully biological routes only.
    pub fn biological_depth_of(&self, person: &PersonId) -> Option<usize> {
        self.reached.get(&State { person, biological: true }).map(|r| r.depth)
    }

    pub fn contains(&self, person: &PersonId) -> bool {
        self.depth_of(person).is_some()
    }

    /// Hop sequences from the root up to `person`: the shortest ones of each
    /// purity class, biological first, at most `limit` per class, in a
    /// deterministic order.
    pub fn hop_sequences(&self, person: &PersonId, limit: usize) -> Vec<Vec<Hop>> {
        let mut out = Vec::new();
        for biological in [true, false] {
            let state = State { person, biological };
            if !self.reached.contains_key(&state) {
                continue;
            }
            let mut class = Vec::new();
            self.collect(state, &mut Vec::new(), limit, &mut class);
            out.extend(class);
        }
        out
    }

    /// Depth-first over predecessors. `suffix` holds the hops above `state`,
    /// nearest the ancestor first.
    fn collect(&self, state: State<'_>, suffix: &mut Vec<Hop>, limit: usize, out: &mut Vec<Vec<Hop>>) {
        if out.len() >= limit {
            return;
        }
        let Some(reached) = self.reached.get(&state) else { return };
        if reached.preds.is_empty() {
            out.push(suffix.iter().rev().cloned().collect());
            return;
        }
        for pred in &reached.preds {
            suffix.push(Hop {
                person: pred.from.person.clone(),
                family: pred.family.clone(),
                kind: pred.kind,
            });
            self.collect(pred.from, suffix, limit, out);
            suffix.pop();
            if out.len() >= limit {
                return;
            }
        }
    }
}
