//! Enumeration of complete gene and trait assignments.
//!
//! A trait assignment is a bit mask where bit `i` is set when person `i` has
//! the trait. A gene assignment is a base-3 code where digit `i` is person
//! `i`'s copy count. Walking `0..2^P` and `0..3^P` visits every assignment
//! exactly once.

use crate::prelude::*;
use std::ops::Range;

/// Largest pedigree the enumerator accepts. The space grows as 6^P.
pub const MAX_POPULATION: usize = 20;

/// One fully specified world: a gene count and a trait value per person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hypothesis {
    genes: Vec<GeneCount>,
    traits: Vec<bool>,
}

impl Hypothesis {
    /// Both assignments must cover the same people. Outside the crate,
    /// hypotheses come from `HypothesisSpace::decode`, which guarantees it.
    pub(crate) fn new(genes: Vec<GeneCount>, traits: Vec<bool>) -> Self {
        debug_assert_eq!(genes.len(), traits.len());
        Self { genes, traits }
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn genes(&self, person: usize) -> GeneCount {
        self.genes[person]
    }

    pub fn has_trait(&self, person: usize) -> bool {
        self.traits[person]
    }

    pub fn gene_assignment(&self) -> &[GeneCount] {
        &self.genes
    }

    pub fn trait_assignment(&self) -> &[bool] {
        &self.traits
    }

    /// Whether every known trait matches this assignment.
    pub fn is_consistent(&self, evidence: &[Option<bool>]) -> bool {
        evidence
            .iter()
            .zip(self.traits.iter())
            .all(|(observed, assigned)| observed.map_or(true, |o| o == *assigned))
    }
}

/// The evidence-filtered space of hypotheses over a population.
#[derive(Debug, Clone)]
pub struct HypothesisSpace {
    population: usize,
    known: u64,
    required: u64,
}

impl HypothesisSpace {
    pub fn new(evidence: &[Option<bool>]) -> Result<Self> {
        if evidence.len() > MAX_POPULATION {
            return Err(Error::PopulationTooLarge {
                size: evidence.len(),
                max: MAX_POPULATION,
            });
        }
        let mut known = 0;
        let mut required = 0;
        for (i, observed) in evidence.iter().enumerate() {
            if let Some(has_trait) = observed {
                known |= 1u64 << i;
                if *has_trait {
                    required |= 1u64 << i;
                }
            }
        }
        Ok(Self {
            population: evidence.len(),
            known,
            required,
        })
    }

    pub fn from_pedigree(pedigree: &Pedigree) -> Result<Self> {
        Self::new(&pedigree.evidence())
    }

    pub fn population(&self) -> usize {
        self.population
    }

    /// Every gene assignment, as base-3 codes.
    pub fn gene_codes(&self) -> Range<u64> {
        0..3u64.pow(self.population as u32)
    }

    /// Trait masks that agree with the evidence.
    pub fn trait_masks(&self) -> impl Iterator<Item = u64> + '_ {
        (0..1u64 << self.population).filter(move |mask| mask & self.known == self.required)
    }

    pub fn trait_mask_count(&self) -> u64 {
        1u64 << (self.population as u32 - self.known.count_ones())
    }

    /// Number of hypotheses that survive the evidence filter.
    pub fn len(&self) -> u64 {
        self.gene_codes().end * self.trait_mask_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Hypothesis> + '_ {
        self.iter_genes(self.gene_codes())
    }

    /// Hypotheses whose gene code falls in `genes`, for every consistent
    /// trait mask.
    pub fn iter_genes(&self, genes: Range<u64>) -> impl Iterator<Item = Hypothesis> + '_ {
        self.trait_masks()
            .flat_map(move |mask| genes.clone().map(move |code| self.decode(code, mask)))
    }

    /// Splits the gene codes into at most `shards` contiguous, non-empty
    /// ranges that together cover the whole space.
    pub fn shards(&self, shards: usize) -> Vec<Range<u64>> {
        let total = self.gene_codes().end;
        let shards = (shards.max(1) as u64).min(total);
        let size = total / shards;
        let extra = total % shards;
        let mut start = 0;
        (0..shards)
            .map(|i| {
                let end = start + size + if i < extra { 1 } else { 0 };
                let range = start..end;
                start = end;
                range
            })
            .collect()
    }

    pub fn decode(&self, gene_code: u64, trait_mask: u64) -> Hypothesis {
        let mut code = gene_code;
        let genes = (0..self.population)
            .map(|_| {
                let genes = match code % 3 {
                    0 => GeneCount::Zero,
                    1 => GeneCount::One,
                    _ => GeneCount::Two,
                };
                code /= 3;
                genes
            })
            .collect();
        let traits = (0..self.population)
            .map(|i| (trait_mask >> i) & 1 == 1)
            .collect();
        Hypothesis { genes, traits }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::error::Error as StdError;

    #[test]
    fn test_no_evidence_visits_full_space() -> std::result::Result<(), Box<dyn StdError>> {
        let space = HypothesisSpace::new(&[None, None, None])?;
        let all: Vec<Hypothesis> = space.iter().collect();
        assert_eq!(all.len(), 27 * 8);
        assert_eq!(space.len(), 27 * 8);
        let distinct: HashSet<_> = all
            .iter()
            .map(|h| (h.gene_assignment().to_vec(), h.trait_assignment().to_vec()))
            .collect();
        assert_eq!(distinct.len(), all.len());
        Ok(())
    }

    #[test]
    fn test_evidence_filters_trait_masks() -> std::result::Result<(), Box<dyn StdError>> {
        let evidence = [None, Some(true), Some(false)];
        let space = HypothesisSpace::new(&evidence)?;
        assert_eq!(space.trait_mask_count(), 2);
        assert_eq!(space.trait_masks().collect::<Vec<_>>(), vec![0b010, 0b011]);
        assert!(space.iter().all(|h| h.is_consistent(&evidence)));
        assert_eq!(space.iter().count(), 27 * 2);
        Ok(())
    }

    #[test]
    fn test_single_observation_keeps_space() -> std::result::Result<(), Box<dyn StdError>> {
        for observed in [Some(true), Some(false)].iter() {
            let space = HypothesisSpace::new(&[*observed])?;
            assert_eq!(space.iter().count(), 3);
            assert!(!space.is_empty());
        }
        Ok(())
    }

    #[test]
    fn test_empty_population_has_one_world() -> std::result::Result<(), Box<dyn StdError>> {
        let space = HypothesisSpace::new(&[])?;
        let all: Vec<Hypothesis> = space.iter().collect();
        assert_eq!(all.len(), 1);
        assert!(all[0].is_empty());
        Ok(())
    }

    #[test]
    fn test_decode_reads_base_three_digits() -> std::result::Result<(), Box<dyn StdError>> {
        let space = HypothesisSpace::new(&[None, None, None])?;
        // 2 + 0*3 + 1*9
        let h = space.decode(11, 0b101);
        assert_eq!(
            h.gene_assignment(),
            &[GeneCount::Two, GeneCount::Zero, GeneCount::One]
        );
        assert_eq!(h.trait_assignment(), &[true, false, true]);
        Ok(())
    }

    #[test]
    fn test_decoded_worlds_cover_population() -> std::result::Result<(), Box<dyn StdError>> {
        let space = HypothesisSpace::new(&[None, Some(true), None, Some(false)])?;
        for h in space.iter() {
            assert_eq!(h.len(), 4);
            assert_eq!(h.gene_assignment().len(), h.trait_assignment().len());
        }
        // Codes past the space wrap in the high digits, never short the world.
        let h = space.decode(u64::MAX, u64::MAX);
        assert_eq!(h.len(), 4);
        Ok(())
    }

    #[test]
    fn test_shards_partition_gene_codes() -> std::result::Result<(), Box<dyn StdError>> {
        let space = HypothesisSpace::new(&[None, None, None])?;
        let shards = space.shards(4);
        assert_eq!(shards.len(), 4);
        assert_eq!(shards[0].start, 0);
        assert_eq!(shards[3].end, 27);
        for pair in shards.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        let visited: usize = shards.iter().map(|r| space.iter_genes(r.clone()).count()).sum();
        assert_eq!(visited, 27 * 8);
        assert_eq!(space.shards(100).len(), 27);
        assert_eq!(space.shards(0).len(), 1);
        Ok(())
    }

    #[test]
    fn test_population_limit() {
        let evidence = vec![None; MAX_POPULATION + 1];
        assert!(matches!(
            HypothesisSpace::new(&evidence),
            Err(Error::PopulationTooLarge { size, .. }) if size == MAX_POPULATION + 1
        ));
    }
}
