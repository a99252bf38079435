//! Errores fatales del generador. Sin reintentos: todo error se propaga
//! intacto al llamador y aborta la corrida sin salida parcial.

use achem_domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum GeneratorError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("not enough unique species to cover all required catalyzers")]
    InsufficientSpecies,

    #[error(transparent)]
    Domain(#[from] DomainError),
}
