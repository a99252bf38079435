//! achem-core: generador determinista de redes de reacciones
//!
//! Construye, a partir de un alfabeto semilla de especies y un puñado de
//! plantillas de reacción, la clausura completa de la química artificial:
//! toda especie alcanzable por condensación y clivaje hasta la cota de
//! longitud configurada, más el reparto de catalizadores por plantilla.
//! El núcleo no hace E/S; todo lo probabilístico pasa por un único RNG
//! inyectado para que una misma semilla reproduzca la misma red.
pub mod allocator;
pub mod config;
pub mod deriver;
pub mod engine;
pub mod errors;
pub mod resolve;

pub use allocator::allocate;
pub use config::{CatalyzerParams, GeneratorInput, LengthClass, SystemParams};
pub use deriver::{derive_cleavages, derive_condensations};
pub use engine::{CatalyzerState, GeneratedNetwork, NetworkEngine};
pub use errors::GeneratorError;
pub use resolve::resolve_duplicates;
