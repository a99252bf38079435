//! Motor de cierre de la red de reacciones.
//!
//! Responsable de orquestar la corrida completa: reparto inicial de
//! catalizadores, derivación sobre las especies vigentes, extracción de las
//! especies recién producidas con su propio reparto (`k = 1`), y vuelta a
//! empezar hasta que una iteración no descubra nada nuevo. La terminación
//! la garantiza la cota `ML` sobre la condensación; sin ella las plantillas
//! reconcatenarían productos sin fin.
//!
//! Todo el estado acumulado (especies, reacciones, vínculos) vive aquí,
//! con un único escritor y sin mutación en sitio: los registros solo se
//! anexan y el finalizador reordena sin alterarlos.

use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use achem_domain::{CatalyzerAssignment, CleavageReaction, CleavageTemplate, CondensationReaction,
                   CondensationTemplate, Species};

use crate::allocator::allocate;
use crate::config::{CatalyzerParams, GeneratorInput, LengthClass, SystemParams};
use crate::deriver::{derive_cleavages, derive_condensations};
use crate::errors::GeneratorError;
use crate::resolve::resolve_duplicates;

/// Vínculos (especie, plantilla) vigentes, por clase de plantilla.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalyzerState {
    pub cond: Vec<CatalyzerAssignment<CondensationTemplate>>,
    pub cll: Vec<CatalyzerAssignment<CleavageTemplate>>,
}

/// Resultado estructurado de una corrida, listo para el serializador externo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedNetwork {
    /// Contenedor primero, resto ordenado por (longitud, orden lexicográfico).
    pub species: Vec<Species>,
    pub cond_reactions: Vec<CondensationReaction>,
    pub cll_reactions: Vec<CleavageReaction>,
    pub catalyzers: CatalyzerState,
}

/// Motor de generación; consume la entrada y produce la red cerrada.
#[derive(Debug)]
pub struct NetworkEngine<R: Rng> {
    rng: R,
    container: Species,
    species: IndexMap<String, Species>,
    cond_templates: Vec<CondensationTemplate>,
    cll_templates: Vec<CleavageTemplate>,
    catalyzer_params: CatalyzerParams,
    system: SystemParams,
    new_species_params: HashMap<usize, LengthClass>,
    cond_reactions: Vec<CondensationReaction>,
    cll_reactions: Vec<CleavageReaction>,
    catalyzers: CatalyzerState,
}

impl NetworkEngine<StdRng> {
    /// Motor con RNG sembrado; misma semilla, misma red byte a byte.
    pub fn with_seed(input: GeneratorInput, seed: u64) -> Result<Self, GeneratorError> {
        NetworkEngine::new(input, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> NetworkEngine<R> {
    pub fn new(input: GeneratorInput, rng: R) -> Result<Self, GeneratorError> {
        input.validate()?;
        let GeneratorInput { species,
                             cond_templates,
                             cll_templates,
                             catalyzer_params,
                             system,
                             new_species_params } = input;

        let mut ordered = IndexMap::with_capacity(species.len());
        let mut seed_species = species.into_iter();
        let container = match seed_species.next() {
            Some(c) => c,
            None => return Err(GeneratorError::Configuration("species list must start with the container".into())),
        };
        ordered.insert(container.name.clone(), container.clone());
        for sp in seed_species {
            ordered.insert(sp.name.clone(), sp);
        }

        Ok(NetworkEngine { rng,
                           container,
                           species: ordered,
                           cond_templates,
                           cll_templates,
                           catalyzer_params,
                           system,
                           new_species_params,
                           cond_reactions: Vec::new(),
                           cll_reactions: Vec::new(),
                           catalyzers: CatalyzerState::default() })
    }

    /// Corre la generación completa y entrega la red final ordenada.
    pub fn run(mut self) -> Result<GeneratedNetwork, GeneratorError> {
        self.seed_catalyzers()?;

        let seed_names = self.generative_names();
        self.cond_reactions = derive_condensations(&seed_names, &self.cond_templates, &self.catalyzers.cond);
        self.cll_reactions = derive_cleavages(&seed_names, &self.cll_templates, &self.catalyzers.cll);
        self.resolve_all();

        self.close_over_species()?;
        self.resolve_all();

        Ok(self.finalize())
    }

    /// Nombres de las especies vigentes con rol generativo (sin contenedor).
    fn generative_names(&self) -> Vec<String> {
        self.species.keys()
                    .filter(|name| **name != self.container.name)
                    .cloned()
                    .collect()
    }

    /// Reparto inicial: cuotas completas sobre la banda de longitud elegible.
    ///
    /// Los pools de condensación y clivaje son disjuntos salvo que la
    /// política `both_on` esté activa: sin ella, las especies ya ligadas
    /// como catalizadores de condensación salen del pool de clivaje.
    fn seed_catalyzers(&mut self) -> Result<(), GeneratorError> {
        let CatalyzerParams { min_length, max_length, num_cond, num_cll, both_on } = self.catalyzer_params;

        let eligible: Vec<String> = self.generative_names()
                                        .into_iter()
                                        .filter(|name| min_length <= name.len() && name.len() <= max_length)
                                        .collect();
        if eligible.len() < num_cond + num_cll {
            return Err(GeneratorError::InsufficientSpecies);
        }

        let cond = allocate(&mut self.rng, num_cond, &eligible, &self.cond_templates)?;

        let cll_pool: Vec<String> = if both_on {
            eligible
        } else {
            eligible.into_iter()
                    .filter(|name| !cond.iter().any(|a| &a.species == name))
                    .collect()
        };
        let cll = allocate(&mut self.rng, num_cll, &cll_pool, &self.cll_templates)?;

        self.catalyzers.cond = cond;
        self.catalyzers.cll = cll;
        Ok(())
    }

    /// Bucle de punto fijo: deriva sobre el conjunto vigente, incorpora las
    /// especies nuevas (con su reparto de catalizadores) y repite hasta que
    /// no aparezca ninguna.
    fn close_over_species(&mut self) -> Result<(), GeneratorError> {
        let ml = self.system.max_species_length;
        loop {
            let current = self.generative_names();
            let short: Vec<String> = current.iter()
                                            .filter(|name| name.len() <= ml)
                                            .cloned()
                                            .collect();

            let cond_candidates = derive_condensations(&short, &self.cond_templates, &self.catalyzers.cond);
            let cll_over = if self.system.cleavage_cap_active { &short } else { &current };
            let cll_candidates = derive_cleavages(cll_over, &self.cll_templates, &self.catalyzers.cll);

            let mut discovered: IndexSet<String> = IndexSet::new();
            for r in &cond_candidates {
                if !self.species.contains_key(&r.product) {
                    discovered.insert(r.product.clone());
                }
            }
            for r in &cll_candidates {
                for product in [&r.product_1, &r.product_2] {
                    if !self.species.contains_key(product.as_str()) {
                        discovered.insert(product.clone());
                    }
                }
            }

            for name in &discovered {
                self.allocate_for_new_species(name)?;
            }

            // las candidatas de la última iteración también se anexan;
            // la resolución final colapsa las copias
            self.cond_reactions.extend(cond_candidates);
            self.cll_reactions.extend(cll_candidates);

            if discovered.is_empty() {
                return Ok(());
            }

            for name in discovered {
                let record = Species::new(&name,
                                          &self.system.default_concentration,
                                          &self.system.default_contribution);
                self.species.insert(name, record);
            }
        }
    }

    /// Clasifica una especie recién descubierta por su longitud exacta y,
    /// según los ensayos de Bernoulli de su clase, le asigna exactamente un
    /// vínculo por rol superviviente sobre las plantillas que superen la
    /// especificidad. Sin clase para esa longitud no hay catálisis.
    fn allocate_for_new_species(&mut self, name: &str) -> Result<(), GeneratorError> {
        let class = match self.new_species_params.get(&name.len()) {
            Some(class) => *class,
            None => return Ok(()),
        };

        let mut is_cond = self.rng.gen::<f64>() <= class.p_cata_cond;
        let mut is_cll = self.rng.gen::<f64>() <= class.p_cata_cll;
        if !self.catalyzer_params.both_on && is_cond && is_cll {
            // exclusión mutua: una moneda justa decide el rol que queda
            if self.rng.gen::<f64>() <= 0.5 {
                is_cond = false;
            } else {
                is_cll = false;
            }
        }

        let pool = [name.to_string()];
        if is_cond {
            let filtered: Vec<CondensationTemplate> = self.cond_templates
                                                          .iter()
                                                          .filter(|t| t.specificity() >= class.specificity)
                                                          .cloned()
                                                          .collect();
            let assigned = allocate(&mut self.rng, 1, &pool, &filtered)?;
            self.catalyzers.cond.extend(assigned);
        }
        if is_cll {
            let filtered: Vec<CleavageTemplate> = self.cll_templates
                                                      .iter()
                                                      .filter(|t| t.specificity() >= class.specificity)
                                                      .cloned()
                                                      .collect();
            let assigned = allocate(&mut self.rng, 1, &pool, &filtered)?;
            self.catalyzers.cll.extend(assigned);
        }
        Ok(())
    }

    fn resolve_all(&mut self) {
        let cond = std::mem::take(&mut self.cond_reactions);
        self.cond_reactions = resolve_duplicates(&mut self.rng, cond);
        let cll = std::mem::take(&mut self.cll_reactions);
        self.cll_reactions = resolve_duplicates(&mut self.rng, cll);
    }

    /// Ordena las especies (contenedor primero, luego longitud y orden
    /// lexicográfico) y arma el resultado; no altera ningún registro.
    fn finalize(self) -> GeneratedNetwork {
        let NetworkEngine { container, species, cond_reactions, cll_reactions, catalyzers, .. } = self;

        let mut rest: Vec<Species> = species.into_values()
                                            .filter(|s| s.name != container.name)
                                            .collect();
        rest.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.name.cmp(&b.name)));

        let mut ordered = Vec::with_capacity(rest.len() + 1);
        ordered.push(container);
        ordered.extend(rest);

        GeneratedNetwork { species: ordered,
                           cond_reactions,
                           cll_reactions,
                           catalyzers }
    }
}
