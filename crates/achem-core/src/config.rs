//! Configuración tipada del generador.
//!
//! El colaborador de entrada (CLI o tests) arma un `GeneratorInput`; el
//! motor lo valida antes de arrancar el bucle. Nada de estado ambiental:
//! la política `both_on` y la cota `ML` viajan aquí dentro.

use std::collections::HashMap;

use achem_domain::{CleavageTemplate, CondensationTemplate, Species};
use serde::{Deserialize, Serialize};

use crate::errors::GeneratorError;

/// Parámetros del reparto inicial de catalizadores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalyzerParams {
    /// Banda de longitud `[min, max]` que hace elegible a una especie semilla.
    pub min_length: usize,
    pub max_length: usize,
    /// Cuota de catalizadores de condensación.
    pub num_cond: usize,
    /// Cuota de catalizadores de clivaje.
    pub num_cll: usize,
    /// Si está activo, una especie puede catalizar ambas clases de plantilla.
    pub both_on: bool,
}

/// Parámetros globales del sistema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemParams {
    /// `ML`: longitud máxima de especie que entra a condensar. Es la única
    /// cota que garantiza terminación del cierre.
    pub max_species_length: usize,
    /// Si está activo, el clivaje también se restringe a especies `<= ML`.
    pub cleavage_cap_active: bool,
    /// Payloads por defecto de las especies recién descubiertas.
    pub default_concentration: String,
    pub default_contribution: String,
}

/// Clase de especie nueva, indexada por longitud exacta de cadena.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LengthClass {
    pub p_cata_cond: f64,
    pub p_cata_cll: f64,
    /// Longitud mínima de patrón para que la especie catalice esa plantilla.
    pub specificity: usize,
}

/// Entrada completa de una corrida de generación.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorInput {
    /// Lista semilla; la posición 0 es el contenedor.
    pub species: Vec<Species>,
    pub cond_templates: Vec<CondensationTemplate>,
    pub cll_templates: Vec<CleavageTemplate>,
    pub catalyzer_params: CatalyzerParams,
    pub system: SystemParams,
    pub new_species_params: HashMap<usize, LengthClass>,
}

impl GeneratorInput {
    /// Comprobaciones fatales previas a la generación; sin salida parcial.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.species.is_empty() {
            return Err(GeneratorError::Configuration("species list must start with the container".into()));
        }
        if self.system.max_species_length == 0 {
            return Err(GeneratorError::Configuration("ML must be a positive integer".into()));
        }
        if self.catalyzer_params.min_length == 0 {
            return Err(GeneratorError::Configuration("minimum catalyzer species length must be at least 1".into()));
        }
        Ok(())
    }
}
