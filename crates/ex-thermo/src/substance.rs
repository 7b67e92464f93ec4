//! Substance identity carried by material streams.

use crate::composition::Composition;
use crate::species::Species;

/// What flows in a material stream.
///
/// `Named` covers user-defined fluids (thermal oils, molten salts, ...) that
/// only a configured property model knows about.
#[derive(Debug, Clone, PartialEq)]
pub enum Substance {
    Pure(Species),
    Mixture(Composition),
    Named(String),
}

impl Substance {
    /// Key used to look up reference states, overrides and property models.
    pub fn key(&self) -> String {
        match self {
            Substance::Pure(species) => species.key().to_string(),
            Substance::Mixture(comp) => comp.key(),
            Substance::Named(name) => name.clone(),
        }
    }

    /// Composition, if the substance is made of known species.
    pub fn composition(&self) -> Option<Composition> {
        match self {
            Substance::Pure(species) => Some(Composition::pure(*species)),
            Substance::Mixture(comp) => Some(comp.clone()),
            Substance::Named(_) => None,
        }
    }
}

impl From<Species> for Substance {
    fn from(species: Species) -> Self {
        Substance::Pure(species)
    }
}

impl From<Composition> for Substance {
    fn from(comp: Composition) -> Self {
        match comp.is_pure() {
            Some(species) => Substance::Pure(species),
            None => Substance::Mixture(comp),
        }
    }
}

impl std::fmt::Display for Substance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys() {
        assert_eq!(Substance::Pure(Species::H2O).key(), "H2O");
        assert_eq!(Substance::Named("therminol".into()).key(), "therminol");
        let mix = Composition::new_mole_fractions(vec![(Species::CH4, 0.5), (Species::N2, 0.5)])
            .unwrap();
        assert_eq!(Substance::Mixture(mix).key(), "N2:0.5,CH4:0.5");
    }

    #[test]
    fn pure_composition_collapses() {
        let s: Substance = Composition::pure(Species::CO2).into();
        assert_eq!(s, Substance::Pure(Species::CO2));
        assert!(Substance::Named("salt".into()).composition().is_none());
    }
}
