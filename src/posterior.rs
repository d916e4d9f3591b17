//! Accumulation and normalization of per-person marginal distributions.

use crate::hypothesis::Hypothesis;
use crate::prelude::*;
use indexmap::IndexMap;
use ndarray::Array2;

const HAS_TRAIT: usize = 0;
const NO_TRAIT: usize = 1;

fn trait_column(has_trait: bool) -> usize {
    if has_trait {
        HAS_TRAIT
    } else {
        NO_TRAIT
    }
}

/// Unnormalized gene and trait weights for every person.
///
/// Row `i` belongs to the `i`th person of the pedigree the table was built
/// for. Gene columns are indexed by copy count, trait columns are
/// has-trait then no-trait.
#[derive(Debug, Clone)]
pub struct PosteriorTable {
    names: Vec<String>,
    genes: Array2<f64>,
    traits: Array2<f64>,
    mass: f64,
}

impl PosteriorTable {
    /// Creates an all-zero table with one row per person.
    pub fn new(pedigree: &Pedigree) -> Self {
        let people = pedigree.len();
        Self {
            names: pedigree.names().map(String::from).collect(),
            genes: Array2::zeros((people, 3)),
            traits: Array2::zeros((people, 2)),
            mass: 0.0,
        }
    }

    /// Adds the joint probability `p` of `hypothesis` to each person's
    /// weight for their assigned gene count and trait value.
    pub fn update(&mut self, hypothesis: &Hypothesis, p: f64) {
        debug_assert!(p >= 0.0, "joint probability must be non-negative");
        debug_assert_eq!(hypothesis.len(), self.names.len());
        for person in 0..self.names.len() {
            self.genes[[person, hypothesis.genes(person).index()]] += p;
            self.traits[[person, trait_column(hypothesis.has_trait(person))]] += p;
        }
        self.mass += p;
    }

    /// Folds in a table accumulated over a disjoint part of the space.
    pub fn merge(&mut self, other: &PosteriorTable) {
        debug_assert_eq!(self.names, other.names);
        self.genes += &other.genes;
        self.traits += &other.traits;
        self.mass += other.mass;
    }

    /// Total probability of the hypotheses accumulated so far.
    pub fn total_mass(&self) -> f64 {
        self.mass
    }

    pub fn gene_weight(&self, person: usize, genes: GeneCount) -> f64 {
        self.genes[[person, genes.index()]]
    }

    pub fn trait_weight(&self, person: usize, has_trait: bool) -> f64 {
        self.traits[[person, trait_column(has_trait)]]
    }

    /// Scales every distribution to sum to one.
    ///
    /// Fails with `Error::UnsatisfiableEvidence` when a person has no
    /// probability mass left to scale.
    pub fn normalize(mut self) -> Result<Marginals> {
        for person in 0..self.names.len() {
            normalize_row(&mut self.genes, person, &self.names[person])?;
            normalize_row(&mut self.traits, person, &self.names[person])?;
        }

        let people = self
            .names
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                let marginal = Marginal {
                    genes: [self.genes[[i, 0]], self.genes[[i, 1]], self.genes[[i, 2]]],
                    has_trait: self.traits[[i, HAS_TRAIT]],
                    no_trait: self.traits[[i, NO_TRAIT]],
                };
                (name, marginal)
            })
            .collect();
        Ok(Marginals { people })
    }
}

fn normalize_row(weights: &mut Array2<f64>, person: usize, name: &str) -> Result<()> {
    let mut row = weights.row_mut(person);
    let total = row.sum();
    if !(total.is_finite() && total > 0.0) {
        return Err(Error::UnsatisfiableEvidence {
            person: name.to_string(),
        });
    }
    row.mapv_inplace(|w| w / total);
    Ok(())
}

/// One person's normalized distributions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marginal {
    genes: [f64; 3],
    has_trait: f64,
    no_trait: f64,
}

impl Marginal {
    pub fn gene(&self, genes: GeneCount) -> f64 {
        self.genes[genes.index()]
    }

    pub fn has_trait(&self) -> f64 {
        self.has_trait
    }

    pub fn no_trait(&self) -> f64 {
        self.no_trait
    }
}

/// Normalized marginals for a whole pedigree, in pedigree order.
#[derive(Debug, Clone, PartialEq)]
pub struct Marginals {
    people: IndexMap<String, Marginal>,
}

impl Marginals {
    pub fn get(&self, name: &str) -> Option<&Marginal> {
        self.people.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Marginal)> {
        self.people.iter().map(|(name, m)| (name.as_str(), m))
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
}
