//! Reparto de catalizadores sobre plantillas de reacción.
//!
//! Política de cuota: con `k` mayor que el número de plantillas, cada
//! plantilla recibe primero exactamente un catalizador (ahí agotar el pool
//! es fatal); el resto de la cuota se rellena reutilizando únicamente
//! plantillas ya asignadas, recargando el pool al agotarse. Con `k` menor o
//! igual, se muestrean `k` plantillas distintas y cada una recibe una
//! especie. Si en la fase de relleno ninguna plantilla asignada queda
//! disponible, el reparto se detiene y devuelve menos de `k` entradas.

use achem_domain::CatalyzerAssignment;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::errors::GeneratorError;

/// Asigna hasta `k` pares (especie, plantilla) extraídos del pool elegible.
///
/// Todo sorteo pasa por `rng`; con la misma semilla el reparto es
/// reproducible. En la fase de relleno la especie sorteada no se retira del
/// pool.
pub fn allocate<T, R>(rng: &mut R,
                      k: usize,
                      eligible: &[String],
                      templates: &[T])
                      -> Result<Vec<CatalyzerAssignment<T>>, GeneratorError>
    where T: Clone + PartialEq,
          R: Rng + ?Sized
{
    let mut assignments: Vec<CatalyzerAssignment<T>> = Vec::with_capacity(k);
    let mut pool: Vec<String> = eligible.to_vec();

    if k > templates.len() {
        for template in templates {
            if pool.is_empty() {
                return Err(GeneratorError::InsufficientSpecies);
            }
            let chosen = pool.remove(rng.gen_range(0..pool.len()));
            assignments.push(CatalyzerAssignment { species: chosen, template: template.clone() });
        }
    } else {
        let sampled: Vec<&T> = templates.choose_multiple(rng, k).collect();
        for template in sampled {
            if pool.is_empty() {
                pool = eligible.to_vec();
                if pool.is_empty() {
                    return Err(GeneratorError::InsufficientSpecies);
                }
            }
            let chosen = pool.remove(rng.gen_range(0..pool.len()));
            assignments.push(CatalyzerAssignment { species: chosen, template: template.clone() });
        }
    }

    while assignments.len() < k {
        if pool.is_empty() {
            pool = eligible.to_vec();
            if pool.is_empty() {
                return Err(GeneratorError::InsufficientSpecies);
            }
        }
        let chosen = pool[rng.gen_range(0..pool.len())].clone();
        let reusable: Vec<&T> = templates.iter()
                                         .filter(|t| assignments.iter().any(|a| a.template == **t))
                                         .collect();
        if reusable.is_empty() {
            break;
        }
        let template = reusable[rng.gen_range(0..reusable.len())].clone();
        assignments.push(CatalyzerAssignment { species: chosen, template });
    }

    Ok(assignments)
}
