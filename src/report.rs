//! Rendering of normalized marginals.

use crate::posterior::{Marginal, Marginals};
use crate::prelude::*;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;

/// Renders every person's distributions to four decimal places.
///
/// Gene counts are listed from two copies down to none, followed by the
/// trait distribution.
pub struct Report<'a> {
    marginals: &'a Marginals,
}

impl<'a> Report<'a> {
    pub fn new(marginals: &'a Marginals) -> Self {
        Self { marginals }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, marginal) in self.marginals.iter() {
            writeln!(f, "{}:", name)?;
            writeln!(f, "  Gene:")?;
            for genes in GeneCount::ALL.iter().rev() {
                writeln!(f, "    {}: {:.4}", genes, marginal.gene(*genes))?;
            }
            writeln!(f, "  Trait:")?;
            writeln!(f, "    True: {:.4}", marginal.has_trait())?;
            writeln!(f, "    False: {:.4}", marginal.no_trait())?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct GeneDistribution {
    #[serde(rename = "2")]
    two: f64,
    #[serde(rename = "1")]
    one: f64,
    #[serde(rename = "0")]
    zero: f64,
}

#[derive(Serialize)]
struct TraitDistribution {
    #[serde(rename = "true")]
    has_trait: f64,
    #[serde(rename = "false")]
    no_trait: f64,
}

#[derive(Serialize)]
struct PersonReport {
    gene: GeneDistribution,
    #[serde(rename = "trait")]
    trait_distribution: TraitDistribution,
}

impl From<&Marginal> for PersonReport {
    fn from(marginal: &Marginal) -> Self {
        Self {
            gene: GeneDistribution {
                two: marginal.gene(GeneCount::Two),
                one: marginal.gene(GeneCount::One),
                zero: marginal.gene(GeneCount::Zero),
            },
            trait_distribution: TraitDistribution {
                has_trait: marginal.has_trait(),
                no_trait: marginal.no_trait(),
            },
        }
    }
}

impl Serialize for Report<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.marginals.len()))?;
        for (name, marginal) in self.marginals.iter() {
            map.serialize_entry(name, &PersonReport::from(marginal))?;
        }
        map.end()
    }
}
