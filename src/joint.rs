use crate::hypothesis::Hypothesis;
use crate::prelude::*;

/// Probability of one complete world.
///
/// Each person contributes the probability of their gene count (the founder
/// prior, or inheritance from both parents' assigned counts) times the
/// probability of their trait value given that count. An empty pedigree has
/// probability 1.
pub fn joint_probability(pedigree: &Pedigree, hypothesis: &Hypothesis, model: &Model) -> f64 {
    (0..pedigree.len()).fold(1.0, |p, person| {
        let genes = hypothesis.genes(person);
        let gene_factor = match pedigree.parents_of(person) {
            None => model.founder_prior(genes),
            Some((mother, father)) => {
                model.inheritance(genes, hypothesis.genes(mother), hypothesis.genes(father))
            }
        };
        let trait_factor = model.trait_given_genes(genes, hypothesis.has_trait(person));
        p * gene_factor * trait_factor
    })
}
