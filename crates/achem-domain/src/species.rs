use serde::{Deserialize, Serialize};
use std::fmt;

/// Especie química identificada por su nombre (cadena sobre un alfabeto fijo).
///
/// `concentration` y `contribution` son payloads opacos: el generador los
/// propaga sin interpretarlos. La primera especie de la semilla es el
/// contenedor (Container), siempre en la posición 0 de la salida y excluida
/// de todo rol generativo.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Species {
    pub name: String,
    pub concentration: String,
    pub contribution: String,
}

impl Species {
    pub fn new(name: &str, concentration: &str, contribution: &str) -> Self {
        Species { name: name.to_string(),
                  concentration: concentration.to_string(),
                  contribution: contribution.to_string() }
    }

    /// Longitud de la cadena de la especie (bytes; el alfabeto es ASCII).
    pub fn len(&self) -> usize {
        self.name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.name, self.concentration, self.contribution)
    }
}
