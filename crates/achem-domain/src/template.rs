use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Plantilla de condensación: une dos especies por concatenación.
///
/// Casa con el par ordenado `(a, b)` cuando `a` termina en `suffix` y `b`
/// empieza por `prefix`; el producto es `a ‖ b`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CondensationTemplate {
    pub suffix: String,
    pub prefix: String,
    pub rate: f64,
}

impl CondensationTemplate {
    pub fn new(suffix: &str, prefix: &str, rate: f64) -> Self {
        CondensationTemplate { suffix: suffix.to_string(),
                               prefix: prefix.to_string(),
                               rate }
    }

    pub fn matches(&self, reagent_1: &str, reagent_2: &str) -> bool {
        reagent_1.ends_with(&self.suffix) && reagent_2.starts_with(&self.prefix)
    }

    /// Longitud combinada de los patrones; umbral de especificidad.
    pub fn specificity(&self) -> usize {
        self.suffix.len() + self.prefix.len()
    }
}

/// Plantilla de clivaje: corta una especie que contenga `core` como
/// subcadena, `split` caracteres después del inicio de la ocurrencia.
///
/// Invariante: `split < core.len()`, garantizado por el constructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleavageTemplate {
    core: String,
    pub rate: f64,
    split: usize,
}

impl CleavageTemplate {
    pub fn new(core: &str, rate: f64, split: usize) -> Result<Self, DomainError> {
        if split >= core.len() {
            return Err(DomainError::InvalidTemplate { split, core_len: core.len() });
        }
        Ok(CleavageTemplate { core: core.to_string(), rate, split })
    }

    pub fn core(&self) -> &str {
        &self.core
    }

    pub fn split(&self) -> usize {
        self.split
    }

    /// La mitad izquierda del núcleo, antes del punto de corte.
    pub fn core_left(&self) -> &str {
        &self.core[..self.split]
    }

    /// La mitad derecha del núcleo, después del punto de corte.
    pub fn core_right(&self) -> &str {
        &self.core[self.split..]
    }

    pub fn specificity(&self) -> usize {
        self.core.len()
    }
}
