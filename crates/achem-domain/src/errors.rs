// errors.rs
use thiserror::Error;

/// Error de validación del dominio químico.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum DomainError {
    /// El punto de corte de una plantilla de clivaje debe caer dentro de su núcleo.
    #[error("cleavage split offset {split} must be less than core length {core_len}")]
    InvalidTemplate { split: usize, core_len: usize },

    #[error("validation error: {0}")]
    ValidationError(String),
}
