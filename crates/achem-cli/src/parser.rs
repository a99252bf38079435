//! Parser del fichero de configuración por secciones.
//!
//! Gramática: líneas vacías y comentarios `#` se ignoran; las cabeceras
//! `SPECIES`, `CATALYZER_PARAMS`, `REACTIONS`, `SYSTEM` y
//! `NEW_SPECIES_PARAMS` abren sección y cada línea siguiente se interpreta
//! según la sección abierta. En `REACTIONS` los tokens pierden las
//! decoraciones `R-`/`-R`; una línea es de clivaje cuando su segundo campo
//! es una tasa numérica y el tercero un corte entero, y de condensación
//! cuando el segundo campo es el patrón prefijo.

use std::collections::HashMap;

use achem_core::{CatalyzerParams, GeneratorInput, LengthClass, SystemParams};
use achem_domain::{CleavageTemplate, CondensationTemplate, DomainError, Species};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {0}: species line must be `<name> <concentration> <contribution>`")]
    SpeciesForm(usize),

    #[error("line {0}: catalyzer length band must be `<min>,<max>` with min >= 1")]
    CatalyzerBand(usize),

    #[error("line {0}: the number of catalyst species must be a non-negative integer")]
    CatalyzerQuota(usize),

    #[error("line {0}: the both-catalyst policy must be either ON or OFF")]
    CatalyzerPolicy(usize),

    #[error("line {0}: unexpected extra line in the CATALYZER_PARAMS section")]
    CatalyzerExtra(usize),

    #[error("line {0}: reaction line must be `<suffix> <prefix> <rate>` or `<core> <rate> <split>`")]
    ReactionForm(usize),

    #[error("line {line}: unknown system parameter `{name}`")]
    SystemParam { line: usize, name: String },

    #[error("line {0}: system parameter must be `<name> <value>`")]
    SystemForm(usize),

    #[error("line {0}: new species line must be `<lengths> <p_cata_cond> <p_cata_cll> <specificity>`")]
    NewSpeciesForm(usize),

    #[error("line {0}: content outside of any section")]
    OrphanLine(usize),

    #[error("missing system parameters: {0}")]
    MissingSystemParams(String),

    #[error("ML must be a positive integer")]
    BadMaxLength,

    #[error("CLL_ML_ACTIVE must be either ON or OFF")]
    BadCleavagePolicy,

    #[error("the CATALYZER_PARAMS section must hold band, two quotas and the ON/OFF policy")]
    IncompleteCatalyzerParams,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    None,
    Species,
    CatalyzerParams,
    Reactions,
    System,
    NewSpecies,
}

const SYSTEM_KEYS: [&str; 4] = ["ML", "CLL_ML_ACTIVE", "D_CONCENTRATION", "D_CONTRIB"];

#[derive(Debug, Default)]
struct RawSections {
    species: Vec<Species>,
    band: Option<(usize, usize)>,
    quotas: Vec<usize>,
    both_on: Option<bool>,
    catalyzer_lines: usize,
    cond_templates: Vec<CondensationTemplate>,
    cll_templates: Vec<CleavageTemplate>,
    system: HashMap<String, String>,
    new_species: HashMap<usize, LengthClass>,
}

/// Parsea el texto completo del fichero de entrada.
pub fn parse_input(text: &str) -> Result<GeneratorInput, ParseError> {
    let mut section = Section::None;
    let mut raw = RawSections::default();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        section = match line {
            l if l.starts_with("SPECIES") => Section::Species,
            l if l.starts_with("CATALYZER_PARAMS") => Section::CatalyzerParams,
            l if l.starts_with("REACTIONS") => Section::Reactions,
            l if l.starts_with("SYSTEM") => Section::System,
            l if l.starts_with("NEW_SPECIES_PARAMS") => Section::NewSpecies,
            _ => {
                parse_line(line, line_no, section, &mut raw)?;
                section
            }
        };
    }

    assemble(raw)
}

fn parse_line(line: &str, line_no: usize, section: Section, raw: &mut RawSections) -> Result<(), ParseError> {
    match section {
        Section::None => Err(ParseError::OrphanLine(line_no)),
        Section::Species => parse_species(line, line_no, raw),
        Section::CatalyzerParams => parse_catalyzer_param(line, line_no, raw),
        Section::Reactions => parse_reaction(line, line_no, raw),
        Section::System => parse_system(line, line_no, raw),
        Section::NewSpecies => parse_new_species(line, line_no, raw),
    }
}

fn parse_species(line: &str, line_no: usize, raw: &mut RawSections) -> Result<(), ParseError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(ParseError::SpeciesForm(line_no));
    }
    raw.species.push(Species::new(parts[0], parts[1], parts[2]));
    Ok(())
}

/// Las cuatro líneas de `CATALYZER_PARAMS` llegan en orden fijo: banda
/// `min,max`, cuota de condensación, cuota de clivaje, política ON/OFF.
fn parse_catalyzer_param(line: &str, line_no: usize, raw: &mut RawSections) -> Result<(), ParseError> {
    match raw.catalyzer_lines {
        0 => {
            let bounds: Vec<usize> = line.split(',')
                                         .map(|p| p.trim().parse())
                                         .collect::<Result<_, _>>()
                                         .map_err(|_| ParseError::CatalyzerBand(line_no))?;
            if bounds.len() != 2 || bounds[0] < 1 {
                return Err(ParseError::CatalyzerBand(line_no));
            }
            raw.band = Some((bounds[0], bounds[1]));
        }
        1 | 2 => {
            let quota = line.parse::<usize>().map_err(|_| ParseError::CatalyzerQuota(line_no))?;
            raw.quotas.push(quota);
        }
        3 => {
            raw.both_on = Some(match line {
                "ON" => true,
                "OFF" => false,
                _ => return Err(ParseError::CatalyzerPolicy(line_no)),
            });
        }
        _ => return Err(ParseError::CatalyzerExtra(line_no)),
    }
    raw.catalyzer_lines += 1;
    Ok(())
}

fn parse_reaction(line: &str, line_no: usize, raw: &mut RawSections) -> Result<(), ParseError> {
    let parts: Vec<String> = line.split_whitespace()
                                 .map(|p| p.replace("R-", "").replace("-R", ""))
                                 .collect();
    if parts.len() != 3 {
        return Err(ParseError::ReactionForm(line_no));
    }

    // `<core> <rate> <split>` si el segundo campo es numérico, si no
    // `<suffix> <prefix> <rate>`
    if let Ok(rate) = parts[1].parse::<f64>() {
        let split = parts[2].parse::<usize>().map_err(|_| ParseError::ReactionForm(line_no))?;
        raw.cll_templates.push(CleavageTemplate::new(&parts[0], rate, split)?);
    } else {
        let rate = parts[2].parse::<f64>().map_err(|_| ParseError::ReactionForm(line_no))?;
        raw.cond_templates.push(CondensationTemplate::new(&parts[0], &parts[1], rate));
    }
    Ok(())
}

fn parse_system(line: &str, line_no: usize, raw: &mut RawSections) -> Result<(), ParseError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 2 {
        return Err(ParseError::SystemForm(line_no));
    }
    if !SYSTEM_KEYS.contains(&parts[0]) {
        return Err(ParseError::SystemParam { line: line_no, name: parts[0].to_string() });
    }
    raw.system.insert(parts[0].to_string(), parts[1].to_string());
    Ok(())
}

fn parse_new_species(line: &str, line_no: usize, raw: &mut RawSections) -> Result<(), ParseError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 4 {
        return Err(ParseError::NewSpeciesForm(line_no));
    }
    let p_cata_cond = parts[1].parse::<f64>().map_err(|_| ParseError::NewSpeciesForm(line_no))?;
    let p_cata_cll = parts[2].parse::<f64>().map_err(|_| ParseError::NewSpeciesForm(line_no))?;
    let specificity = parts[3].parse::<usize>().map_err(|_| ParseError::NewSpeciesForm(line_no))?;
    for class in parts[0].split(',') {
        let length = class.trim().parse::<usize>().map_err(|_| ParseError::NewSpeciesForm(line_no))?;
        raw.new_species.insert(length, LengthClass { p_cata_cond, p_cata_cll, specificity });
    }
    Ok(())
}

fn assemble(raw: RawSections) -> Result<GeneratorInput, ParseError> {
    let missing: Vec<&str> = SYSTEM_KEYS.iter()
                                        .filter(|k| !raw.system.contains_key(**k))
                                        .copied()
                                        .collect();
    if !missing.is_empty() {
        return Err(ParseError::MissingSystemParams(missing.join(", ")));
    }

    let max_species_length = raw.system["ML"].parse::<usize>().map_err(|_| ParseError::BadMaxLength)?;
    let cleavage_cap_active = match raw.system["CLL_ML_ACTIVE"].as_str() {
        "ON" => true,
        "OFF" => false,
        _ => return Err(ParseError::BadCleavagePolicy),
    };

    let (band, both_on) = match (raw.band, raw.both_on) {
        (Some(band), Some(both_on)) if raw.quotas.len() == 2 => (band, both_on),
        _ => return Err(ParseError::IncompleteCatalyzerParams),
    };

    Ok(GeneratorInput { species: raw.species,
                        cond_templates: raw.cond_templates,
                        cll_templates: raw.cll_templates,
                        catalyzer_params: CatalyzerParams { min_length: band.0,
                                                            max_length: band.1,
                                                            num_cond: raw.quotas[0],
                                                            num_cll: raw.quotas[1],
                                                            both_on },
                        system: SystemParams { max_species_length,
                                               cleavage_cap_active,
                                               default_concentration: raw.system["D_CONCENTRATION"].clone(),
                                               default_contribution: raw.system["D_CONTRIB"].clone() },
                        new_species_params: raw.new_species })
}
