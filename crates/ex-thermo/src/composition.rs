//! Mixture composition.

use crate::error::{ThermoError, ThermoResult};
use crate::species::Species;
use ex_core::numeric::{Tolerances, nearly_equal};

/// Composition defined by normalized mole fractions.
///
/// Always normalized (mole fractions sum to 1.0) and sorted by species so
/// equal mixtures compare and print identically.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    items: Vec<(Species, f64)>,
}

impl Composition {
    /// Create a pure-species composition.
    pub fn pure(species: Species) -> Self {
        Self {
            items: vec![(species, 1.0)],
        }
    }

    /// Create a composition from mole fractions.
    ///
    /// Fractions must be finite and non-negative with a positive sum. Repeated
    /// species are merged before normalizing.
    pub fn new_mole_fractions(fractions: Vec<(Species, f64)>) -> ThermoResult<Self> {
        if fractions.is_empty() {
            return Err(ThermoError::InvalidArg {
                what: "empty composition".into(),
            });
        }

        let mut merged: Vec<(Species, f64)> = Vec::with_capacity(fractions.len());
        for (species, frac) in fractions {
            if !frac.is_finite() {
                return Err(ThermoError::NonPhysical {
                    what: "non-finite mole fraction",
                });
            }
            if frac < 0.0 {
                return Err(ThermoError::NonPhysical {
                    what: "negative mole fraction",
                });
            }
            match merged.iter_mut().find(|(s, _)| *s == species) {
                Some(entry) => entry.1 += frac,
                None => merged.push((species, frac)),
            }
        }

        let sum: f64 = merged.iter().map(|(_, f)| f).sum();
        if sum <= 0.0 || !sum.is_finite() {
            return Err(ThermoError::NonPhysical {
                what: "mole fractions sum to zero or non-finite",
            });
        }

        let mut items: Vec<(Species, f64)> = merged
            .into_iter()
            .map(|(s, f)| (s, f / sum))
            .filter(|(_, f)| *f > 1e-15)
            .collect();
        items.sort_by_key(|(s, _)| *s);

        Ok(Self { items })
    }

    /// Mole fraction of a species (0.0 if not present).
    pub fn mole_fraction(&self, species: Species) -> f64 {
        self.items
            .iter()
            .find(|(s, _)| *s == species)
            .map(|(_, f)| *f)
            .unwrap_or(0.0)
    }

    /// Returns `Some(species)` if exactly one species has fraction ≈1.0.
    pub fn is_pure(&self) -> Option<Species> {
        if let [(species, frac)] = self.items.as_slice() {
            let tol = Tolerances {
                abs: 1e-10,
                rel: 1e-10,
            };
            if nearly_equal(*frac, 1.0, tol) {
                return Some(*species);
            }
        }
        None
    }

    /// Iterate over all species with non-zero mole fractions.
    pub fn iter(&self) -> impl Iterator<Item = (Species, f64)> + '_ {
        self.items.iter().copied()
    }

    /// Mixture molar mass [kg/kmol]: M_mix = Σ x_i M_i.
    pub fn molar_mass(&self) -> f64 {
        self.items
            .iter()
            .map(|(species, mole_frac)| species.molar_mass() * mole_frac)
            .sum()
    }

    /// Replace pseudo-pure species (air) by their constituents.
    pub fn expanded(&self) -> Self {
        let mut out: Vec<(Species, f64)> = Vec::with_capacity(self.items.len() + 3);
        for &(species, x) in &self.items {
            match species.constituents() {
                Some(parts) => out.extend(parts.iter().map(|&(s, xi)| (s, x * xi))),
                None => out.push((species, x)),
            }
        }
        // Inputs are already valid fractions, so this cannot fail.
        Self::new_mole_fractions(out).unwrap_or_else(|_| self.clone())
    }

    /// Stable textual key, e.g. `CH4:0.9,C2H6:0.1`.
    pub fn key(&self) -> String {
        if let Some(species) = self.is_pure() {
            return species.key().to_string();
        }
        self.items
            .iter()
            .map(|(s, f)| format!("{}:{}", s.key(), f))
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: Tolerances = Tolerances {
        abs: 1e-10,
        rel: 1e-10,
    };

    #[test]
    fn pure_composition() {
        let comp = Composition::pure(Species::O2);
        assert_eq!(comp.is_pure(), Some(Species::O2));
        assert_eq!(comp.mole_fraction(Species::O2), 1.0);
        assert_eq!(comp.mole_fraction(Species::N2), 0.0);
        assert_eq!(comp.key(), "O2");
    }

    #[test]
    fn mixture_normalization_non_unit_sum() {
        let comp =
            Composition::new_mole_fractions(vec![(Species::O2, 2.0), (Species::N2, 8.0)]).unwrap();

        assert_eq!(comp.is_pure(), None);
        assert!(nearly_equal(comp.mole_fraction(Species::O2), 0.2, TOL));
        assert!(nearly_equal(comp.mole_fraction(Species::N2), 0.8, TOL));
    }

    #[test]
    fn repeated_species_merge() {
        let comp = Composition::new_mole_fractions(vec![
            (Species::CH4, 1.0),
            (Species::CO2, 1.0),
            (Species::CH4, 2.0),
        ])
        .unwrap();
        assert!(nearly_equal(comp.mole_fraction(Species::CH4), 0.75, TOL));
        assert_eq!(comp.iter().count(), 2);
    }

    #[test]
    fn invalid_inputs() {
        assert!(Composition::new_mole_fractions(vec![]).is_err());
        assert!(
            Composition::new_mole_fractions(vec![(Species::O2, -0.5), (Species::N2, 1.5)]).is_err()
        );
        assert!(
            Composition::new_mole_fractions(vec![(Species::O2, 0.0), (Species::N2, 0.0)]).is_err()
        );
        assert!(Composition::new_mole_fractions(vec![(Species::O2, f64::NAN)]).is_err());
    }

    #[test]
    fn air_expansion() {
        let comp =
            Composition::new_mole_fractions(vec![(Species::Air, 0.5), (Species::N2, 0.5)]).unwrap();
        let expanded = comp.expanded();
        assert_eq!(expanded.mole_fraction(Species::Air), 0.0);
        assert!(nearly_equal(
            expanded.mole_fraction(Species::N2),
            0.5 + 0.5 * 0.7808,
            TOL
        ));
        assert!(nearly_equal(
            expanded.mole_fraction(Species::O2),
            0.5 * 0.2095,
            TOL
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn normalized_sum_is_one(fracs in prop::collection::vec(0.0_f64..1.0_f64, 1..5)) {
            let species = [Species::O2, Species::N2, Species::H2, Species::He, Species::Ar];
            let composition_input: Vec<(Species, f64)> = fracs
                .iter()
                .enumerate()
                .map(|(i, &f)| (species[i % species.len()], f))
                .collect();

            if let Ok(comp) = Composition::new_mole_fractions(composition_input) {
                let sum: f64 = comp.iter().map(|(_, f)| f).sum();
                let tol = Tolerances { abs: 1e-9, rel: 1e-9 };
                prop_assert!(nearly_equal(sum, 1.0, tol));
            }
        }
    }
}
