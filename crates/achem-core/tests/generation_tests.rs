use std::collections::{HashMap, HashSet};

use achem_core::{derive_cleavages, derive_condensations, CatalyzerParams, GeneratedNetwork,
                 GeneratorError, GeneratorInput, LengthClass, NetworkEngine, SystemParams};
use achem_domain::reaction::CanonicalReaction;
use achem_domain::{CleavageTemplate, CondensationTemplate, Species};

fn species(name: &str) -> Species {
    Species::new(name, "1.0", "0")
}

fn input_ab() -> GeneratorInput {
    // seed {A, B} plus container, one template (suffix A, prefix B), ML = 2
    GeneratorInput { species: vec![species("Cont"), species("A"), species("B")],
                     cond_templates: vec![CondensationTemplate::new("A", "B", 1.0)],
                     cll_templates: vec![],
                     catalyzer_params: CatalyzerParams { min_length: 1,
                                                        max_length: 3,
                                                        num_cond: 0,
                                                        num_cll: 0,
                                                        both_on: false },
                     system: SystemParams { max_species_length: 2,
                                            cleavage_cap_active: true,
                                            default_concentration: "0.5".into(),
                                            default_contribution: "0".into() },
                     new_species_params: HashMap::new() }
}

fn input_rich() -> GeneratorInput {
    let mut classes = HashMap::new();
    classes.insert(2, LengthClass { p_cata_cond: 1.0, p_cata_cll: 1.0, specificity: 1 });
    classes.insert(3, LengthClass { p_cata_cond: 1.0, p_cata_cll: 1.0, specificity: 1 });
    GeneratorInput { species: vec![species("Cont"), species("A"), species("B"), species("BA")],
                     cond_templates: vec![CondensationTemplate::new("A", "B", 1.0),
                                          CondensationTemplate::new("B", "A", 2.0)],
                     cll_templates: vec![CleavageTemplate::new("AB", 0.5, 1).unwrap()],
                     catalyzer_params: CatalyzerParams { min_length: 1,
                                                        max_length: 2,
                                                        num_cond: 1,
                                                        num_cll: 1,
                                                        both_on: false },
                     system: SystemParams { max_species_length: 3,
                                            cleavage_cap_active: true,
                                            default_concentration: "0.1".into(),
                                            default_contribution: "0".into() },
                     new_species_params: classes }
}

fn run(input: GeneratorInput, seed: u64) -> GeneratedNetwork {
    NetworkEngine::with_seed(input, seed).unwrap().run().unwrap()
}

#[test]
fn worked_example_closes_at_ml() {
    let network = run(input_ab(), 99);
    let names: Vec<&str> = network.species.iter().map(|s| s.name.as_str()).collect();
    // iteration 1 produces AB; iteration 2 nothing, every further product exceeds ML
    assert_eq!(names, vec!["Cont", "A", "B", "AB"]);
    assert_eq!(network.cond_reactions.len(), 1);
    let r = &network.cond_reactions[0];
    assert_eq!((r.reagent_1.as_str(), r.reagent_2.as_str(), r.product.as_str()), ("A", "B", "AB"));
    // no catalyzer was ever bound; the empty list is preserved, not hidden
    assert!(r.catalyzers.is_empty());
    assert!(network.cll_reactions.is_empty());
}

#[test]
fn new_species_inherit_default_payloads() {
    let network = run(input_ab(), 7);
    let ab = network.species.iter().find(|s| s.name == "AB").unwrap();
    assert_eq!(ab.concentration, "0.5");
    assert_eq!(ab.contribution, "0");
    // seed records are propagated untouched
    let a = network.species.iter().find(|s| s.name == "A").unwrap();
    assert_eq!(a.concentration, "1.0");
}

#[test]
fn fixed_seed_reproduces_the_network_byte_for_byte() {
    let a = run(input_rich(), 42);
    let b = run(input_rich(), 42);
    assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
}

#[test]
fn rederiving_over_the_final_species_reaches_a_fixpoint() {
    let network = run(input_rich(), 13);
    let known: HashSet<&str> = network.species.iter().map(|s| s.name.as_str()).collect();
    let container = &network.species[0].name;
    let ml = 3;

    let current: Vec<String> = network.species.iter()
                                              .filter(|s| &s.name != container)
                                              .map(|s| s.name.clone())
                                              .collect();
    let short: Vec<String> = current.iter().filter(|n| n.len() <= ml).cloned().collect();

    let input = input_rich();
    for r in derive_condensations(&short, &input.cond_templates, &[]) {
        assert!(known.contains(r.product.as_str()), "unseen product {}", r.product);
    }
    for r in derive_cleavages(&short, &input.cll_templates, &[]) {
        assert!(known.contains(r.product_1.as_str()));
        assert!(known.contains(r.product_2.as_str()));
    }
}

#[test]
fn reactions_concatenate_exactly() {
    let network = run(input_rich(), 21);
    assert!(!network.cond_reactions.is_empty());
    assert!(!network.cll_reactions.is_empty());
    for r in &network.cond_reactions {
        assert_eq!(r.product, format!("{}{}", r.reagent_1, r.reagent_2));
    }
    for r in &network.cll_reactions {
        assert_eq!(format!("{}{}", r.product_1, r.product_2), r.reactant);
    }
}

#[test]
fn no_two_reactions_share_a_canonical_key() {
    let network = run(input_rich(), 5);
    let mut cond_keys = HashSet::new();
    for r in &network.cond_reactions {
        assert!(cond_keys.insert(r.key()), "duplicate condensation key");
    }
    let mut cll_keys = HashSet::new();
    for r in &network.cll_reactions {
        assert!(cll_keys.insert(r.key()), "duplicate cleavage key");
    }
}

#[test]
fn species_are_sorted_container_first_then_length_then_lex() {
    let network = run(input_rich(), 3);
    assert_eq!(network.species[0].name, "Cont");
    let rest = &network.species[1..];
    for pair in rest.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!((a.len(), a.name.as_str()) < (b.len(), b.name.as_str()),
                "{} should sort before {}",
                a.name,
                b.name);
    }
}

#[test]
fn container_never_reacts_even_when_it_matches() {
    // container named like a would-be product: A + A -> AA collides with it
    let input = GeneratorInput { species: vec![species("AA"), species("A")],
                                 cond_templates: vec![CondensationTemplate::new("A", "A", 1.0)],
                                 cll_templates: vec![],
                                 catalyzer_params: CatalyzerParams { min_length: 1,
                                                                    max_length: 2,
                                                                    num_cond: 0,
                                                                    num_cll: 0,
                                                                    both_on: false },
                                 system: SystemParams { max_species_length: 4,
                                                        cleavage_cap_active: true,
                                                        default_concentration: "0".into(),
                                                        default_contribution: "0".into() },
                                 new_species_params: HashMap::new() };
    let network = run(input, 17);
    for r in &network.cond_reactions {
        assert_ne!(r.reagent_1, "AA");
        assert_ne!(r.reagent_2, "AA");
    }
    // the product AA already exists as the container, so it is not re-added
    let count = network.species.iter().filter(|s| s.name == "AA").count();
    assert_eq!(count, 1);
    assert_eq!(network.species[0].name, "AA");
}

#[test]
fn catalyst_roles_stay_disjoint_without_both_on() {
    let network = run(input_rich(), 31);
    let cond: HashSet<&str> = network.catalyzers.cond.iter().map(|a| a.species.as_str()).collect();
    let cll: HashSet<&str> = network.catalyzers.cll.iter().map(|a| a.species.as_str()).collect();
    assert!(!cond.is_empty());
    assert!(cond.is_disjoint(&cll), "a species catalyzes both classes with both_on = false");
}

#[test]
fn uncapped_cleavage_still_cuts_species_longer_than_ml() {
    // ML = 2, pero AB + AB -> ABAB produce una especie de longitud 4;
    // con la cota desactivada el clivaje también recorre esas especies
    let mut input = GeneratorInput { species: vec![species("Cont"), species("A"), species("B")],
                                     cond_templates: vec![CondensationTemplate::new("A", "B", 1.0),
                                                          CondensationTemplate::new("B", "A", 2.0)],
                                     cll_templates: vec![CleavageTemplate::new("BA", 0.5, 1).unwrap()],
                                     catalyzer_params: CatalyzerParams { min_length: 1,
                                                                        max_length: 2,
                                                                        num_cond: 0,
                                                                        num_cll: 0,
                                                                        both_on: false },
                                     system: SystemParams { max_species_length: 2,
                                                            cleavage_cap_active: false,
                                                            default_concentration: "0.1".into(),
                                                            default_contribution: "0".into() },
                                     new_species_params: HashMap::new() };
    let network = run(input.clone(), 23);
    assert!(network.species.iter().any(|s| s.name == "ABAB"));
    assert!(network.cll_reactions.iter().any(|r| r.reactant == "ABAB"));

    // with the cap on, only species within ML are eligible reactants
    input.system.cleavage_cap_active = true;
    let capped = run(input, 23);
    assert!(capped.species.iter().any(|s| s.name == "ABAB"));
    assert!(capped.cll_reactions.iter().all(|r| r.reactant.len() <= 2),
            "an over-length species was cleaved despite the cap");
}

#[test]
fn both_on_lets_new_species_hold_both_roles() {
    // counterpart of the disjointness check: with the policy active the
    // cleavage draw shares the condensation pool and the mutual-exclusion
    // flip is skipped, so p = 1.0 on both classes binds every new species
    // of a classed length to both roles
    let mut input = input_rich();
    input.catalyzer_params.both_on = true;
    let network = run(input, 31);

    let cond: HashSet<&str> = network.catalyzers.cond.iter().map(|a| a.species.as_str()).collect();
    let cll: HashSet<&str> = network.catalyzers.cll.iter().map(|a| a.species.as_str()).collect();

    let seeds: HashSet<&str> = ["Cont", "A", "B", "BA"].into_iter().collect();
    let new_classed: Vec<&str> = network.species.iter()
                                                .filter(|s| !seeds.contains(s.name.as_str()) && s.len() <= 3)
                                                .map(|s| s.name.as_str())
                                                .collect();
    assert!(!new_classed.is_empty());
    for name in new_classed {
        assert!(cond.contains(name), "{name} missing the condensation role");
        assert!(cll.contains(name), "{name} missing the cleavage role");
    }
}

#[test]
fn seed_quota_above_eligible_pool_aborts() {
    let mut input = input_rich();
    input.catalyzer_params.num_cond = 5;
    // eligible band holds A, B and BA only
    let err = NetworkEngine::with_seed(input, 1).unwrap().run().unwrap_err();
    assert_eq!(err, GeneratorError::InsufficientSpecies);
}

#[test]
fn missing_ml_is_fatal_before_generation() {
    let mut input = input_ab();
    input.system.max_species_length = 0;
    let err = NetworkEngine::with_seed(input, 1).unwrap_err();
    assert!(matches!(err, GeneratorError::Configuration(_)));
}
