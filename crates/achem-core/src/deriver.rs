//! Derivación de reacciones candidatas por casado de patrones.
//!
//! El derivador no decide nada al azar: enumera todas las candidatas sobre
//! el conjunto de especies que le pasan (el contenedor ya viene excluido
//! aguas arriba) y les adjunta la instantánea de catalizadores ligados a la
//! plantilla en ese momento. Las candidatas repetidas se colapsan después
//! en `resolve`.

use achem_domain::{CatalyzerAssignment, CleavageReaction, CleavageTemplate, CondensationReaction,
                   CondensationTemplate};

/// Especies actualmente ligadas a `template` (instantánea, por valor).
fn bound_catalyzers<T: PartialEq>(bindings: &[CatalyzerAssignment<T>], template: &T) -> Vec<String> {
    bindings.iter()
            .filter(|a| &a.template == template)
            .map(|a| a.species.clone())
            .collect()
}

/// Candidatas de condensación: todo par ordenado `(a, b)` (auto-pares
/// incluidos) contra toda plantilla cuyo sufijo/prefijo casen.
pub fn derive_condensations(species: &[String],
                            templates: &[CondensationTemplate],
                            bindings: &[CatalyzerAssignment<CondensationTemplate>])
                            -> Vec<CondensationReaction> {
    let mut candidates = Vec::new();
    for reagent_1 in species {
        for reagent_2 in species {
            for template in templates {
                if template.matches(reagent_1, reagent_2) {
                    candidates.push(CondensationReaction { product: format!("{reagent_1}{reagent_2}"),
                                                           reagent_1: reagent_1.clone(),
                                                           reagent_2: reagent_2.clone(),
                                                           rate: template.rate,
                                                           catalyzers: bound_catalyzers(bindings, template) });
                }
            }
        }
    }
    candidates
}

/// Candidatas de clivaje: recorre las ocurrencias solapadas del núcleo de
/// izquierda a derecha (tras un hit se reanuda en el carácter siguiente) y
/// corta `split` posiciones dentro de la ventana casada.
///
/// El corte se revalida contra las dos mitades del núcleo: el producto
/// izquierdo debe terminar en `core[..split]` y el derecho empezar por
/// `core[split..]`; una candidata desalineada se descarta.
pub fn derive_cleavages(species: &[String],
                        templates: &[CleavageTemplate],
                        bindings: &[CatalyzerAssignment<CleavageTemplate>])
                        -> Vec<CleavageReaction> {
    let mut candidates = Vec::new();
    for reactant in species {
        for template in templates {
            let core = template.core();
            let mut from = 0;
            while let Some(found) = reactant[from..].find(core) {
                let at = from + found;
                if core.len() >= template.split() {
                    let (left, right) = reactant.split_at(at + template.split());
                    if left.ends_with(template.core_left()) && right.starts_with(template.core_right()) {
                        candidates.push(CleavageReaction { reactant: reactant.clone(),
                                                           product_1: left.to_string(),
                                                           product_2: right.to_string(),
                                                           rate: template.rate,
                                                           catalyzers: bound_catalyzers(bindings, template) });
                    }
                }
                from = at + 1;
            }
        }
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn condensation_enumerates_ordered_pairs_including_self() {
        let templates = vec![CondensationTemplate::new("A", "A", 2.0)];
        let got = derive_condensations(&names(&["BA", "AB"]), &templates, &[]);
        // termina en A -> {BA}; empieza por A -> {AB}; único par válido: BA+AB
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].product, "BAAB");
        assert_eq!(got[0].rate, 2.0);

        let got = derive_condensations(&names(&["AA"]), &templates, &[]);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].product, "AAAA");
        assert_eq!(got[0].reagent_1, got[0].reagent_2);
    }

    #[test]
    fn condensation_snapshot_carries_current_bindings() {
        let template = CondensationTemplate::new("A", "B", 1.0);
        let bindings = vec![CatalyzerAssignment { species: "CC".to_string(),
                                                  template: template.clone() },
                            CatalyzerAssignment { species: "DD".to_string(),
                                                  template: CondensationTemplate::new("B", "A", 1.0) }];
        let got = derive_condensations(&names(&["A", "B"]), &[template], &bindings);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].catalyzers, vec!["CC".to_string()]);
    }

    #[test]
    fn cleavage_scans_overlapping_occurrences() {
        let template = CleavageTemplate::new("AA", 0.5, 1).unwrap();
        let got = derive_cleavages(&names(&["AAA"]), &[template], &[]);
        // ocurrencias en 0 y 1, cortes en 1 y 2
        assert_eq!(got.len(), 2);
        assert_eq!((got[0].product_1.as_str(), got[0].product_2.as_str()), ("A", "AA"));
        assert_eq!((got[1].product_1.as_str(), got[1].product_2.as_str()), ("AA", "A"));
    }

    #[test]
    fn cleavage_products_reassemble_the_reactant() {
        let template = CleavageTemplate::new("AB", 1.0, 1).unwrap();
        let got = derive_cleavages(&names(&["BABAB"]), &[template], &[]);
        assert_eq!(got.len(), 2);
        for r in &got {
            assert_eq!(format!("{}{}", r.product_1, r.product_2), r.reactant);
        }
    }

    #[test]
    fn unmatched_species_yield_nothing() {
        let cond = vec![CondensationTemplate::new("Z", "Z", 1.0)];
        assert!(derive_condensations(&names(&["A", "B"]), &cond, &[]).is_empty());
        let cll = vec![CleavageTemplate::new("ZZ", 1.0, 1).unwrap()];
        assert!(derive_cleavages(&names(&["ABAB"]), &cll, &[]).is_empty());
    }
}
