//! # Family Graph
//!
//! An id-indexed arena of persons and families built from collaborator
//! records. Parent→child is the only directed relation; spouse links are
//! kept per person purely to flag people with several unions.
//!
//! The builder never fails: links to persons or families missing from the
//! records are dropped (logged at `debug`) and the graph is built partially.

use hashbrown::HashMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::gedcom::RecordSource;
use crate::model::*;

/// One upward step available from a person: `parent` is a parent in `family`,
/// where the person is a child of kind `kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentLink<'g> {
    pub parent: &'g PersonId,
    pub family: &'g FamilyId,
    pub kind: LinkKind,
}

#[derive(Debug, Default)]
pub struct FamilyGraph {
    persons: Vec<Person>,
    families: Vec<Family>,
    person_index: HashMap<PersonId, usize>,
    family_index: HashMap<FamilyId, usize>,
}

impl FamilyGraph {
    /// Build the arena from any record source.
    pub fn build<S: RecordSource>(source: &S) -> Self {
        let mut graph = FamilyGraph::default();

        for indi in source.individuals() {
            if graph.person_index.contains_key(&indi.id) {
                debug!(person = %indi.id, "duplicate individual record ignored");
                continue;
            }
            let mut person = Person::new(indi.id.clone());
            person.sex = indi.sex;
            person.name = indi.name.clone();
            person.birth = indi.birth.clone();
            person.death = indi.death.clone();
            graph.person_index.insert(person.id.clone(), graph.persons.len());
            graph.persons.push(person);
        }

        for record in source.families() {
            if graph.family_index.contains_key(&record.id) {
                debug!(family = %record.id, "duplicate family record ignored");
                continue;
            }
            let mut family = Family::new(record.id.clone());
            family.husband = graph.known_person(record.husband.as_ref(), &record.id);
            family.wife = graph.known_person(record.wife.as_ref(), &record.id);
            for child in &record.children {
                if graph.known_person(Some(&child.child), &record.id).is_none() {
                    continue;
                }
                if !family.has_child(&child.child) {
                    family.children.push(ChildLink {
                        child: child.child.clone(),
                        kind: child.kind.unwrap_or_default(),
                    });
                }
            }
            graph.family_index.insert(family.id.clone(), graph.families.len());
            graph.families.push(family);
        }

        // Individual-side links: FAMC (with pedigree) and FAMS.
        for indi in source.individuals() {
            let Some(&p) = graph.person_index.get(&indi.id) else { continue };
            for link in &indi.child_of {
                let Some(&f) = graph.family_index.get(&link.family) else {
                    debug!(person = %indi.id, family = %link.family, "child of unknown family");
                    continue;
                };
                graph.link_child(p, f, link.pedigree);
            }
            for fam in &indi.spouse_of {
                let Some(&f) = graph.family_index.get(fam) else {
                    debug!(person = %indi.id, family = %fam, "spouse in unknown family");
                    continue;
                };
                push_unique(&mut graph.persons[p].spouse_of, &graph.families[f].id);
            }
        }

        // Family-side links the individuals did not declare.
        for f in 0..graph.families.len() {
            let family = &graph.families[f];
            let children: Vec<usize> = family
                .children
                .iter()
                .filter_map(|c| graph.person_index.get(&c.child).copied())
                .collect();
            let parents: Vec<usize> = family
                .parents()
                .into_iter()
                .filter_map(|p| graph.person_index.get(p).copied())
                .collect();
            let id = family.id.clone();
            for p in children {
                push_unique(&mut graph.persons[p].child_of, &id);
            }
            for p in parents {
                push_unique(&mut graph.persons[p].spouse_of, &id);
            }
        }

        for person in &mut graph.persons {
            person.multi_family = person.spouse_of.len() > 1;
        }

        debug!(
            persons = graph.persons.len(),
            families = graph.families.len(),
            "family graph built"
        );
        graph
    }

    fn known_person(&self, id: Option<&PersonId>, family: &FamilyId) -> Option<PersonId> {
        let id = id?;
        if self.person_index.contains_key(id) {
            Some(id.clone())
        } else {
            debug!(person = %id, family = %family, "family refers to unknown person");
            None
        }
    }

    /// Record `persons[p]` as a child of `families[f]`, merging the pedigree
    /// qualifier into the family's link kind.
    fn link_child(&mut self, p: usize, f: usize, pedigree: Option<LinkKind>) {
        let id = self.persons[p].id.clone();
        let family = &mut self.families[f];
        match family.children.iter_mut().find(|c| c.child == id) {
            Some(link) => {
                if let Some(kind) = pedigree {
                    link.kind = link.kind.least_biological(kind);
                }
            }
            None => family.children.push(ChildLink {
                child: id,
                kind: pedigree.unwrap_or_default(),
            }),
        }
        let fam_id = family.id.clone();
        push_unique(&mut self.persons[p].child_of, &fam_id);
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    pub fn person(&self, id: &str) -> Option<&Person> {
        self.person_index.get(id).map(|&i| &self.persons[i])
    }

    pub fn family(&self, id: &str) -> Option<&Family> {
        self.family_index.get(id).map(|&i| &self.families[i])
    }

    /// Persons in source order.
    pub fn persons(&self) -> impl Iterator<Item = &Person> {
        self.persons.iter()
    }

    /// Families in source order.
    pub fn families(&self) -> impl Iterator<Item = &Family> {
        self.families.iter()
    }

    pub fn person_count(&self) -> usize {
        self.persons.len()
    }

    pub fn family_count(&self) -> usize {
        self.families.len()
    }

    // ========================================================================
    // Relations
    // ========================================================================

    /// Families where the person is a child.
    pub fn birth_families(&self, id: &str) -> impl Iterator<Item = &Family> {
        self.person(id)
            .into_iter()
            .flat_map(|p| p.child_of.iter())
            .filter_map(move |f| self.family(f.as_str()))
    }

    /// Every upward step from a person, across all of its birth families.
    pub fn parent_links(&self, id: &str) -> SmallVec<[ParentLink<'_>; 4]> {
        let mut links = SmallVec::new();
        let Some(person) = self.person(id) else { return links };
        for family in self.birth_families(id) {
            let kind = family.link_kind_of(&person.id).unwrap_or_default();
            for parent in family.parents() {
                links.push(ParentLink { parent, family: &family.id, kind });
            }
        }
        links
    }

    pub fn parents_of(&self, id: &str) -> Vec<&PersonId> {
        let mut parents: Vec<&PersonId> = Vec::new();
        for link in self.parent_links(id) {
            if !parents.contains(&link.parent) {
                parents.push(link.parent);
            }
        }
        parents
    }

    pub fn children_of(&self, id: &str) -> Vec<&PersonId> {
        let mut children: Vec<&PersonId> = Vec::new();
        let Some(person) = self.person(id) else { return children };
        for family in person.spouse_of.iter().filter_map(|f| self.family(f.as_str())) {
            for link in &family.children {
                if !children.contains(&&link.child) {
                    children.push(&link.child);
                }
            }
        }
        children
    }
}

fn push_unique(list: &mut Vec<FamilyId>, id: &FamilyId) {
    if !list.contains(id) {
        list.push(id.clone());
    }
}
