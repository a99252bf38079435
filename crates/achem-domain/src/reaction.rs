use serde::{Deserialize, Serialize};

/// Clave canónica de una reacción: el par de cadenas de rol ordenado
/// lexicográficamente más la cadena ancla.
///
/// Para condensación los roles son los dos reactivos y el ancla el producto;
/// para clivaje los roles son los dos productos y el ancla el reactante. Dos
/// candidatas con la misma clave describen la misma transformación física.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReactionKey {
    pub roles: (String, String),
    pub anchor: String,
}

impl ReactionKey {
    pub fn new(role_a: &str, role_b: &str, anchor: &str) -> Self {
        let roles = if role_a <= role_b {
            (role_a.to_string(), role_b.to_string())
        } else {
            (role_b.to_string(), role_a.to_string())
        };
        ReactionKey { roles, anchor: anchor.to_string() }
    }
}

/// Reacción con identidad canónica; la resolución de duplicados agrupa por
/// esta clave.
pub trait CanonicalReaction {
    fn key(&self) -> ReactionKey;
}

/// Vínculo (plantilla, especie catalizadora). Muchos-a-muchos: una plantilla
/// puede tener varios catalizadores y una especie catalizar varias plantillas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalyzerAssignment<T> {
    pub species: String,
    pub template: T,
}

/// Reacción de condensación derivada: `reagent_1 + reagent_2 -> product`.
///
/// `catalyzers` es la instantánea de especies ligadas a la plantilla en el
/// momento de la derivación; no se actualiza retroactivamente. Una lista
/// vacía se conserva tal cual (produce cero líneas de salida).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CondensationReaction {
    pub product: String,
    pub reagent_1: String,
    pub reagent_2: String,
    pub rate: f64,
    pub catalyzers: Vec<String>,
}

impl CanonicalReaction for CondensationReaction {
    fn key(&self) -> ReactionKey {
        ReactionKey::new(&self.reagent_1, &self.reagent_2, &self.product)
    }
}

/// Reacción de clivaje derivada: `reactant -> product_1 + product_2`, con
/// `product_1 ‖ product_2 == reactant`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleavageReaction {
    pub reactant: String,
    pub product_1: String,
    pub product_2: String,
    pub rate: f64,
    pub catalyzers: Vec<String>,
}

impl CanonicalReaction for CleavageReaction {
    fn key(&self) -> ReactionKey {
        ReactionKey::new(&self.product_1, &self.product_2, &self.reactant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_sorts_roles_but_keeps_anchor() {
        let a = ReactionKey::new("BB", "AA", "AABB");
        let b = ReactionKey::new("AA", "BB", "AABB");
        assert_eq!(a, b);
        assert_eq!(a.roles, ("AA".to_string(), "BB".to_string()));
        assert_eq!(a.anchor, "AABB");
    }

    #[test]
    fn mirrored_condensations_share_a_key_only_with_same_product() {
        let ab = CondensationReaction { product: "AB".into(),
                                        reagent_1: "A".into(),
                                        reagent_2: "B".into(),
                                        rate: 1.0,
                                        catalyzers: vec![] };
        let ba = CondensationReaction { product: "BA".into(),
                                        reagent_1: "B".into(),
                                        reagent_2: "A".into(),
                                        rate: 1.0,
                                        catalyzers: vec![] };
        // mismos roles, distinto ancla
        assert_ne!(ab.key(), ba.key());
    }

    #[test]
    fn cleavage_key_uses_products_as_roles() {
        let r = CleavageReaction { reactant: "AB".into(),
                                   product_1: "A".into(),
                                   product_2: "B".into(),
                                   rate: 0.5,
                                   catalyzers: vec!["BB".into()] };
        assert_eq!(r.key(), ReactionKey::new("A", "B", "AB"));
    }
}
