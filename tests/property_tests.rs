//! Property-based tests for enumeration and inference.
//!
//! Random pedigrees of up to five people are generated with random trait
//! evidence, and random (valid) models are drawn around the defaults.

use heredity::hypothesis::HypothesisSpace;
use heredity::joint::joint_probability;
use heredity::inference::Infer;
use heredity::model::Model;
use heredity::{GeneCount, Pedigree, Person};
use proptest::prelude::*;

type PersonSpec = (Option<bool>, bool, u8, u8);

/// Later people may name any two distinct earlier people as parents.
fn build(specs: Vec<PersonSpec>) -> Pedigree {
    let people = specs
        .into_iter()
        .enumerate()
        .map(|(i, (evidence, has_parents, mother, father))| {
            let mut person = Person::new(&format!("P{}", i));
            if has_parents && i >= 2 {
                let mother = mother as usize % i;
                let mut father = father as usize % i;
                if father == mother {
                    father = (mother + 1) % i;
                }
                person = person.with_parents(&format!("P{}", mother), &format!("P{}", father));
            }
            if let Some(has_trait) = evidence {
                person = person.with_trait(has_trait);
            }
            person
        })
        .collect::<Vec<_>>();
    Pedigree::from_people(people).expect("generated pedigree is valid")
}

fn pedigree() -> impl Strategy<Value = Pedigree> {
    prop::collection::vec(
        (any::<Option<bool>>(), any::<bool>(), any::<u8>(), any::<u8>()),
        1..=5,
    )
    .prop_map(build)
}

fn model() -> impl Strategy<Value = Model> {
    (
        (0.01f64..1.0, 0.01f64..1.0, 0.01f64..1.0),
        (0.01f64..0.99, 0.01f64..0.99, 0.01f64..0.99),
        0.001f64..0.5,
    )
        .prop_map(|((a, b, c), (t0, t1, t2), mutation)| {
            let total = a + b + c;
            Model::builder()
                .founder_prior([a / total, b / total, c / total])
                .trait_probability(GeneCount::Zero, t0)
                .trait_probability(GeneCount::One, t1)
                .trait_probability(GeneCount::Two, t2)
                .mutation(mutation)
                .build()
                .expect("generated model is valid")
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn enumeration_is_complete(pedigree in pedigree()) {
        let evidence = pedigree.evidence();
        let unknown = evidence.iter().filter(|e| e.is_none()).count() as u32;
        let space = HypothesisSpace::new(&evidence).unwrap();
        let expected = 3u64.pow(pedigree.len() as u32) * 2u64.pow(unknown);
        prop_assert_eq!(space.len(), expected);
        prop_assert_eq!(space.iter().count() as u64, expected);
        prop_assert!(space.iter().all(|h| h.is_consistent(&evidence)));
    }

    #[test]
    fn unfiltered_joint_probability_sums_to_one(pedigree in pedigree(), model in model()) {
        let space = HypothesisSpace::new(&vec![None; pedigree.len()]).unwrap();
        let total: f64 = space
            .iter()
            .map(|h| joint_probability(&pedigree, &h, &model))
            .sum();
        prop_assert!((total - 1.0).abs() < 1e-9, "total mass {}", total);
    }

    #[test]
    fn marginals_are_normalized(pedigree in pedigree(), model in model()) {
        let marginals = pedigree.infer(&model).unwrap();
        prop_assert_eq!(marginals.len(), pedigree.len());
        for (name, marginal) in marginals.iter() {
            let genes: f64 = GeneCount::ALL.iter().map(|g| marginal.gene(*g)).sum();
            prop_assert!((genes - 1.0).abs() < 1e-9, "{} genes sum to {}", name, genes);
            let traits = marginal.has_trait() + marginal.no_trait();
            prop_assert!((traits - 1.0).abs() < 1e-9, "{} traits sum to {}", name, traits);
        }
    }

    #[test]
    fn evidence_is_reflected_exactly(pedigree in pedigree()) {
        let marginals = pedigree.infer(&Model::default()).unwrap();
        for person in pedigree.iter() {
            let marginal = marginals.get(person.name()).unwrap();
            match person.observed_trait() {
                Some(true) => prop_assert_eq!(marginal.has_trait(), 1.0),
                Some(false) => prop_assert_eq!(marginal.no_trait(), 1.0),
                None => prop_assert!(marginal.has_trait() > 0.0 && marginal.no_trait() > 0.0),
            }
        }
    }

    #[test]
    fn inference_is_deterministic(pedigree in pedigree()) {
        let model = Model::default();
        prop_assert_eq!(pedigree.infer(&model).unwrap(), pedigree.infer(&model).unwrap());
    }

    #[test]
    fn sharding_matches_serial(pedigree in pedigree(), shards in 1usize..6) {
        let model = Model::default();
        let serial = pedigree.infer(&model).unwrap();
        let sharded = pedigree.infer_sharded(&model, shards).unwrap();
        for (name, expected) in serial.iter() {
            let actual = sharded.get(name).unwrap();
            for genes in GeneCount::ALL.iter() {
                prop_assert!((actual.gene(*genes) - expected.gene(*genes)).abs() < 1e-12);
            }
            prop_assert!((actual.has_trait() - expected.has_trait()).abs() < 1e-12);
        }
    }
}
