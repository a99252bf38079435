//! Resolución de reacciones duplicadas.
//!
//! Varias plantillas pueden derivar la misma transformación física. Las
//! candidatas se agrupan por su clave canónica y sobrevive exactamente una
//! por grupo, sorteada uniformemente: la reacción conserva solo la
//! instantánea de catalizadores de la plantilla ganadora y descarta las
//! demás. El agrupado usa un mapa con orden de inserción para que el
//! sorteo sea reproducible bajo una misma semilla.

use achem_domain::reaction::CanonicalReaction;
use achem_domain::ReactionKey;
use indexmap::IndexMap;
use rand::Rng;

/// Colapsa las candidatas a una reacción por clave canónica.
pub fn resolve_duplicates<T, R>(rng: &mut R, candidates: Vec<T>) -> Vec<T>
    where T: CanonicalReaction,
          R: Rng + ?Sized
{
    let mut groups: IndexMap<ReactionKey, Vec<T>> = IndexMap::new();
    for candidate in candidates {
        groups.entry(candidate.key()).or_default().push(candidate);
    }
    groups.into_values()
          .map(|mut group| group.swap_remove(rng.gen_range(0..group.len())))
          .collect()
}
