#![crate_name = "heredity"]
//! Exact posterior inference of gene copy counts and trait expression over
//! small family pedigrees.
//!
//! Every person carries a gene node (0, 1 or 2 copies of the variant) and a
//! trait node. Founders draw their gene count from a fixed prior, children
//! inherit one allele from each parent with a small chance of mutation, and
//! the trait depends only on a person's own gene count. Given the trait
//! evidence that is known, [`inference::Infer::infer`] enumerates every joint world,
//! weighs it, and returns normalized per-person marginals.
//!
//! # Example
//!
//! ```no_run
//! use heredity::prelude::*;
//!
//! let pedigree = load_pedigree("family0.csv")?;
//! let marginals = pedigree.infer(&Model::default())?;
//! print!("{}", Report::new(&marginals));
//! # Ok::<(), heredity::Error>(())
//! ```
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod prelude;

pub mod error;
pub mod hypothesis;
pub mod inference;
pub mod joint;
pub mod logging;
pub mod model;
pub mod observable;
pub mod posterior;
pub mod report;

pub use error::{Error, Result};

/// People keyed by name, in the order they were recorded.
pub type People = IndexMap<String, Person>;

/// Number of copies of the variant allele a person carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GeneCount {
    Zero,
    One,
    Two,
}

impl GeneCount {
    pub const ALL: [GeneCount; 3] = [GeneCount::Zero, GeneCount::One, GeneCount::Two];

    pub fn copies(self) -> u8 {
        self as u8
    }

    /// Position of this count in a three-slot distribution.
    pub fn index(self) -> usize {
        self as usize
    }

}

impl fmt::Display for GeneCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.copies())
    }
}

/// A member of a pedigree.
///
/// Parents are referenced by name and are either both known or both
/// unknown. A person with no recorded parents is a founder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    name: String,
    mother: Option<String>,
    father: Option<String>,
    observed_trait: Option<bool>,
}

impl Person {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            mother: None,
            father: None,
            observed_trait: None,
        }
    }

    pub fn with_parents(mut self, mother: &str, father: &str) -> Self {
        self.mother = Some(mother.into());
        self.father = Some(father.into());
        self
    }

    pub fn with_trait(mut self, has_trait: bool) -> Self {
        self.observed_trait = Some(has_trait);
        self
    }

    pub(crate) fn from_parts(
        name: String,
        mother: Option<String>,
        father: Option<String>,
        observed_trait: Option<bool>,
    ) -> Self {
        Self {
            name,
            mother,
            father,
            observed_trait,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mother(&self) -> Option<&str> {
        self.mother.as_deref()
    }

    pub fn father(&self) -> Option<&str> {
        self.father.as_deref()
    }

    /// The trait evidence for this person, `None` when unknown.
    pub fn observed_trait(&self) -> Option<bool> {
        self.observed_trait
    }

    pub fn is_founder(&self) -> bool {
        self.mother.is_none() && self.father.is_none()
    }
}

/// The registry of everyone in a family.
///
/// A `Pedigree` is read-only while inference runs. People are addressed by
/// their insertion index, which is also the order results are reported in.
#[derive(Debug, Clone, Default)]
pub struct Pedigree {
    people: People,
}

impl Pedigree {
    /// Constructs a new empty `Pedigree`
    ///
    /// The `Pedigree` can be filled up iteratively by calling
    /// `insert()` or `observe()`, followed by `validate()` once every
    /// parent has been recorded.
    pub fn new() -> Self {
        Self {
            people: People::new(),
        }
    }

    /// Builds and validates a `Pedigree` in one step.
    pub fn from_people<I>(people: I) -> Result<Self>
    where
        I: IntoIterator<Item = Person>,
    {
        let mut pedigree = Self::new();
        for person in people {
            pedigree.insert(person)?;
        }
        pedigree.validate()?;
        Ok(pedigree)
    }

    /// Records a single person.
    ///
    /// Parents may be recorded later, so references to them are only
    /// checked by `validate()`.
    pub fn insert(&mut self, person: Person) -> Result<()> {
        match (&person.mother, &person.father) {
            (Some(_), None) | (None, Some(_)) => {
                return Err(Error::OneSidedParents(person.name));
            }
            (Some(mother), Some(father)) if *mother == person.name || *father == person.name => {
                return Err(Error::SelfParent(person.name));
            }
            (Some(mother), Some(father)) if mother == father => {
                return Err(Error::SameParents(person.name));
            }
            _ => {}
        }
        if self.people.contains_key(&person.name) {
            return Err(Error::DuplicatePerson(person.name));
        }
        self.people.insert(person.name.clone(), person);
        Ok(())
    }

    /// Records every person produced by a source such as `observable::Csv`.
    pub fn observe<I>(&mut self, people: I) -> Result<()>
    where
        I: IntoIterator<Item = Result<Person>>,
    {
        for person in people {
            self.insert(person?)?;
        }
        Ok(())
    }

    /// Checks that every parent reference names someone in the registry
    /// and that nobody is their own ancestor.
    pub fn validate(&self) -> Result<()> {
        for person in self.people.values() {
            for parent in person.mother.iter().chain(person.father.iter()) {
                if !self.people.contains_key(parent) {
                    return Err(Error::UnknownParent {
                        person: person.name.clone(),
                        parent: parent.clone(),
                    });
                }
            }
        }
        self.check_acyclic()
    }

    /// Depth-first walk up the ancestry of every person.
    fn check_acyclic(&self) -> Result<()> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            InProgress,
            Done,
        }

        let mut marks = vec![Mark::Unvisited; self.len()];
        for root in 0..self.len() {
            if marks[root] != Mark::Unvisited {
                continue;
            }
            // (person, whether their parents have been pushed)
            let mut stack = vec![(root, false)];
            while let Some((person, expanded)) = stack.pop() {
                if expanded {
                    marks[person] = Mark::Done;
                    continue;
                }
                match marks[person] {
                    Mark::Done => continue,
                    Mark::InProgress => {
                        return Err(self.cycle_error(person));
                    }
                    Mark::Unvisited => {}
                }
                marks[person] = Mark::InProgress;
                stack.push((person, true));
                if let Some((mother, father)) = self.parents_of(person) {
                    for parent in [mother, father].iter() {
                        match marks[*parent] {
                            Mark::InProgress => return Err(self.cycle_error(*parent)),
                            Mark::Unvisited => stack.push((*parent, false)),
                            Mark::Done => {}
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn cycle_error(&self, index: usize) -> Error {
        let person = self
            .people
            .get_index(index)
            .map(|(name, _)| name.clone())
            .unwrap_or_default();
        Error::CyclicPedigree { person }
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Person> {
        self.people.get(name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.people.get_index_of(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Person> {
        self.people.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.people.keys().map(String::as_str)
    }

    /// Indices of (mother, father), or `None` for a founder.
    ///
    /// A parent missing from an unvalidated registry also yields `None`.
    pub fn parents_of(&self, index: usize) -> Option<(usize, usize)> {
        let (_, person) = self.people.get_index(index)?;
        if person.is_founder() {
            return None;
        }
        let mother = self.index_of(person.mother.as_deref()?)?;
        let father = self.index_of(person.father.as_deref()?)?;
        Some((mother, father))
    }

    /// Observed trait of each person, by index.
    pub fn evidence(&self) -> Vec<Option<bool>> {
        self.people.values().map(|p| p.observed_trait).collect()
    }
}
