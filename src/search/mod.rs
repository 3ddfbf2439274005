//! # Ancestor Search
//!
//! Two independent upward walks, one from the match and one from the
//! reference person, meet at their nearest shared ancestors. Every path to
//! those ancestors becomes a candidate and [`select::select_path`] keeps one.

pub mod ancestors;
pub mod select;

pub use ancestors::AncestorMap;
pub use select::{precedence, select_path};

use tracing::trace;

use crate::config::Config;
use crate::graph::FamilyGraph;
use crate::model::{AncestorPath, PersonId};

/// Finds paths from any person to one fixed reference person.
///
/// The reference side of the search is walked once and reused for every match.
pub struct PathFinder<'g> {
    graph: &'g FamilyGraph,
    reference: AncestorMap<'g>,
    max_generations: usize,
    max_paths: usize,
}

impl<'g> PathFinder<'g> {
    pub fn new(graph: &'g FamilyGraph, reference: &str, config: &Config) -> Self {
        Self {
            graph,
            reference: AncestorMap::walk(graph, reference, config.max_generations),
            max_generations: config.max_generations,
            max_paths: config.max_paths_per_ancestor,
        }
    }

    /// Every path to the nearest shared ancestors of `person` and the
    /// reference, in both purity classes. Empty when they share none.
    ///
    /// Ancestors shared over fully biological routes are ranked first; the
    /// any-purity depths only decide when no such ancestor exists.
    pub fn candidates(&self, person: &str) -> Vec<AncestorPath> {
        let theirs = AncestorMap::walk(self.graph, person, self.max_generations);

        let mut nearest = nearest_shared(&theirs, &self.reference, AncestorMap::biological_depth_of);
        if nearest.is_empty() {
            nearest = nearest_shared(&theirs, &self.reference, AncestorMap::depth_of);
        }

        let mut paths = Vec::new();
        for ancestor in nearest {
            let match_sides = theirs.hop_sequences(ancestor, self.max_paths);
            let reference_sides = self.reference.hop_sequences(ancestor, self.max_paths);
            for m in &match_sides {
                for r in &reference_sides {
                    paths.push(AncestorPath {
                        ancestor: ancestor.clone(),
                        match_side: m.clone(),
                        reference_side: r.clone(),
                    });
                }
            }
        }
        trace!(person, candidates = paths.len(), "candidate paths");
        paths
    }

    /// The canonical path from `person` to the reference, if any.
    pub fn find(&self, person: &str) -> Option<AncestorPath> {
        select_path(self.candidates(person))
    }
}

/// Persons reached by both walks at the smallest combined `depth`, sorted.
fn nearest_shared<'g>(
    theirs: &AncestorMap<'g>,
    reference: &AncestorMap<'g>,
    depth: impl Fn(&AncestorMap<'g>, &PersonId) -> Option<usize>,
) -> Vec<&'g PersonId> {
    let mut best = usize::MAX;
    let mut nearest = Vec::new();
    for ancestor in theirs.persons() {
        let (Some(dm), Some(dr)) = (depth(theirs, ancestor), depth(reference, ancestor)) else {
            continue;
        };
        let total = dm + dr;
        if total < best {
            best = total;
            nearest.clear();
        }
        if total == best {
            nearest.push(ancestor);
        }
    }
    nearest.sort();
    nearest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gedcom;

    /// Grandparents I1+I2 (F1) have sons I3 and I4. I3 has I5 with I6 (F2)
    /// and I7 with a second wife I8 (F3). I4 has I9 (F4).
    const FAMILY: &str = "\
0 @I1@ INDI
0 @I2@ INDI
0 @I3@ INDI
1 FAMC @F1@
0 @I4@ INDI
1 FAMC @F1@
0 @I5@ INDI
1 FAMC @F2@
0 @I6@ INDI
0 @I7@ INDI
1 FAMC @F3@
0 @I8@ INDI
0 @I9@ INDI
1 FAMC @F4@
0 @F1@ FAM
1 HUSB @I1@
1 WIFE @I2@
1 CHIL @I3@
1 CHIL @I4@
0 @F2@ FAM
1 HUSB @I3@
1 WIFE @I6@
1 CHIL @I5@
0 @F3@ FAM
1 HUSB @I3@
1 WIFE @I8@
1 CHIL @I7@
0 @F4@ FAM
1 HUSB @I4@
1 CHIL @I9@
";

    fn finder_for(reference: &str, f: impl FnOnce(&PathFinder<'_>)) {
        let doc = gedcom::parse(FAMILY).unwrap();
        let graph = FamilyGraph::build(&doc);
        let finder = PathFinder::new(&graph, reference, &Config::default());
        f(&finder);
    }

    #[test]
    fn test_first_cousins_tie_on_grandparent_couple() {
        finder_for("I5", |finder| {
            let candidates = finder.candidates("I9");
            let ancestors: Vec<&str> = candidates.iter().map(|p| p.ancestor.as_str()).collect();
            assert_eq!(ancestors, vec!["I1", "I2"]);

            let path = finder.find("I9").unwrap();
            assert_eq!(path.ancestor.as_str(), "I1");
            assert_eq!((path.depth_match(), path.depth_reference()), (2, 2));
            assert!(!path.is_half());
        });
    }

    #[test]
    fn test_half_siblings_share_one_parent() {
        finder_for("I5", |finder| {
            let path = finder.find("I7").unwrap();
            assert_eq!(path.ancestor.as_str(), "I3");
            assert!(path.is_half());
        });
    }

    #[test]
    fn test_direct_line() {
        finder_for("I5", |finder| {
            let path = finder.find("I1").unwrap();
            assert_eq!(path.depth_match(), 0);
            assert_eq!(path.depth_reference(), 2);
        });
    }

    #[test]
    fn test_unrelated_is_unconnected() {
        finder_for("I5", |finder| {
            assert!(finder.candidates("I8").is_empty());
            assert_eq!(finder.find("I8"), None);
        });
    }
}
