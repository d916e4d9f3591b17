//! Fixed probabilities of the inheritance network.

use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::io::Read;

const TOLERANCE: f64 = 1e-9;

/// The constants that parameterize inference.
///
/// `Model::default()` carries the reference parameters. A `Model` is an
/// immutable value handed to the evaluator, so alternate parameterizations
/// can be compared side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// P(gene count) for a person with no recorded parents, indexed by copies.
    founder_prior: [f64; 3],
    /// P(trait | gene count), indexed by copies.
    trait_probability: [f64; 3],
    /// Chance that a transmitted allele flips type.
    mutation: f64,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            founder_prior: [0.96, 0.03, 0.01],
            trait_probability: [0.01, 0.56, 0.65],
            mutation: 0.01,
        }
    }
}

impl Model {
    pub fn builder() -> ModelBuilder {
        ModelBuilder::new()
    }

    /// Reads a JSON model and validates it.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let model: Model = serde_json::from_reader(reader)?;
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> Result<()> {
        for (i, p) in self.founder_prior.iter().enumerate() {
            check_probability(&format!("founder_prior[{}]", i), *p)?;
        }
        for (i, p) in self.trait_probability.iter().enumerate() {
            check_probability(&format!("trait_probability[{}]", i), *p)?;
        }
        check_probability("mutation", self.mutation)?;

        let total: f64 = self.founder_prior.iter().sum();
        if (total - 1.0).abs() > TOLERANCE {
            return Err(Error::InvalidModel(format!(
                "founder_prior sums to {}, expected 1",
                total
            )));
        }
        Ok(())
    }

    pub fn founder_prior(&self, genes: GeneCount) -> f64 {
        self.founder_prior[genes.index()]
    }

    /// P(trait value | gene count).
    pub fn trait_given_genes(&self, genes: GeneCount, has_trait: bool) -> f64 {
        let p = self.trait_probability[genes.index()];
        if has_trait {
            p
        } else {
            1.0 - p
        }
    }

    /// Probability that a parent with `genes` copies passes the variant on.
    pub fn transmission(&self, genes: GeneCount) -> f64 {
        match genes {
            GeneCount::Zero => self.mutation,
            GeneCount::One => 0.5,
            GeneCount::Two => 1.0 - self.mutation,
        }
    }

    /// P(child gene count | mother's and father's gene counts).
    pub fn inheritance(&self, child: GeneCount, mother: GeneCount, father: GeneCount) -> f64 {
        let from_mother = self.transmission(mother);
        let from_father = self.transmission(father);
        match child {
            GeneCount::Zero => (1.0 - from_mother) * (1.0 - from_father),
            GeneCount::One => from_mother * (1.0 - from_father) + (1.0 - from_mother) * from_father,
            GeneCount::Two => from_mother * from_father,
        }
    }
}

fn check_probability(name: &str, p: f64) -> Result<()> {
    if p.is_finite() && (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(Error::InvalidModel(format!(
            "{} must be a probability in [0, 1], got {}",
            name, p
        )))
    }
}

pub struct ModelBuilder {
    model: Model,
}

impl ModelBuilder {
    /// Construct a new Model builder seeded with the default parameters
    pub fn new() -> Self {
        Self {
            model: Model::default(),
        }
    }

    pub fn founder_prior(&mut self, prior: [f64; 3]) -> &mut Self {
        self.model.founder_prior = prior;
        self
    }

    pub fn trait_probability(&mut self, genes: GeneCount, p: f64) -> &mut Self {
        self.model.trait_probability[genes.index()] = p;
        self
    }

    pub fn mutation(&mut self, mutation: f64) -> &mut Self {
        self.model.mutation = mutation;
        self
    }

    pub fn build(&self) -> Result<Model> {
        self.model.validate()?;
        Ok(self.model.clone())
    }
}

impl Default for ModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}
