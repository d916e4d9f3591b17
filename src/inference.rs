use crate::hypothesis::HypothesisSpace;
use crate::joint::joint_probability;
use crate::posterior::{Marginals, PosteriorTable};
use crate::prelude::*;
use std::ops::Range;
use std::thread;
use tracing::{debug, info};

pub trait Infer {
    /// Exact marginals for every person given the recorded evidence.
    fn infer(&self, model: &Model) -> Result<Marginals>;

    /// Same as `infer`, with the gene assignments split across `shards`
    /// worker threads whose partial tables are merged before normalizing.
    fn infer_sharded(&self, model: &Model, shards: usize) -> Result<Marginals>;
}

impl Infer for Pedigree {
    fn infer(&self, model: &Model) -> Result<Marginals> {
        let space = HypothesisSpace::from_pedigree(self)?;
        info!(
            population = space.population(),
            hypotheses = space.len(),
            "enumerating hypotheses"
        );
        let table = accumulate(self, model, &space, space.gene_codes());
        finish(table)
    }

    fn infer_sharded(&self, model: &Model, shards: usize) -> Result<Marginals> {
        let space = HypothesisSpace::from_pedigree(self)?;
        let ranges = space.shards(shards);
        info!(
            population = space.population(),
            hypotheses = space.len(),
            shards = ranges.len(),
            "enumerating hypotheses"
        );

        let space = &space;
        let partials: Vec<PosteriorTable> = thread::scope(|scope| {
            let workers: Vec<_> = ranges
                .into_iter()
                .map(|range| scope.spawn(move || accumulate(self, model, space, range)))
                .collect();
            workers
                .into_iter()
                .map(|worker| worker.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                .collect()
        });

        let mut table = PosteriorTable::new(self);
        for partial in &partials {
            table.merge(partial);
        }
        finish(table)
    }
}

fn accumulate(
    pedigree: &Pedigree,
    model: &Model,
    space: &HypothesisSpace,
    genes: Range<u64>,
) -> PosteriorTable {
    debug!(start = genes.start, end = genes.end, "accumulating gene codes");
    let mut table = PosteriorTable::new(pedigree);
    for hypothesis in space.iter_genes(genes) {
        let p = joint_probability(pedigree, &hypothesis, model);
        table.update(&hypothesis, p);
    }
    table
}

fn finish(table: PosteriorTable) -> Result<Marginals> {
    debug!(mass = table.total_mass(), "normalizing");
    table.normalize()
}
