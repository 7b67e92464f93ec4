//! Chemical species definitions.

/// Chemical species known to the property backends and chemical-exergy tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Species {
    /// Oxygen (O₂)
    O2,
    /// Nitrogen (N₂)
    N2,
    /// Argon (Ar)
    Ar,
    /// Carbon dioxide (CO₂)
    CO2,
    /// Carbon monoxide (CO)
    CO,
    /// Water (H₂O)
    H2O,
    /// Hydrogen (H₂)
    H2,
    /// Helium (He)
    He,
    /// Methane (CH₄)
    CH4,
    /// Ethane (C₂H₆)
    Ethane,
    /// Propane (C₃H₈)
    Propane,
    /// n-Butane (C₄H₁₀)
    NButane,
    /// Sulfur dioxide (SO₂)
    SulfurDioxide,
    /// Ammonia (NH₃)
    Ammonia,
    /// Air (pseudo-pure; expanded into constituents for chemical exergy)
    Air,
    /// Isobutane (R600a)
    Isobutane,
    /// n-Pentane
    NPentane,
    /// Refrigerant R134a
    R134a,
    /// Refrigerant R245fa
    R245fa,
}

impl Species {
    pub const ALL: [Species; 19] = [
        Species::O2,
        Species::N2,
        Species::Ar,
        Species::CO2,
        Species::CO,
        Species::H2O,
        Species::H2,
        Species::He,
        Species::CH4,
        Species::Ethane,
        Species::Propane,
        Species::NButane,
        Species::SulfurDioxide,
        Species::Ammonia,
        Species::Air,
        Species::Isobutane,
        Species::NPentane,
        Species::R134a,
        Species::R245fa,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Species::O2 => "O2",
            Species::N2 => "N2",
            Species::Ar => "Ar",
            Species::CO2 => "CO2",
            Species::CO => "CO",
            Species::H2O => "H2O",
            Species::H2 => "H2",
            Species::He => "He",
            Species::CH4 => "CH4",
            Species::Ethane => "C2H6",
            Species::Propane => "C3H8",
            Species::NButane => "nC4H10",
            Species::SulfurDioxide => "SO2",
            Species::Ammonia => "NH3",
            Species::Air => "Air",
            Species::Isobutane => "Isobutane",
            Species::NPentane => "nPentane",
            Species::R134a => "R134a",
            Species::R245fa => "R245fa",
        }
    }

    /// Molar mass [kg/kmol].
    pub fn molar_mass(&self) -> f64 {
        match self {
            Species::O2 => 31.999,
            Species::N2 => 28.014,
            Species::Ar => 39.948,
            Species::CO2 => 44.010,
            Species::CO => 28.010,
            Species::H2O => 18.015,
            Species::H2 => 2.016,
            Species::He => 4.003,
            Species::CH4 => 16.043,
            Species::Ethane => 30.070,
            Species::Propane => 44.097,
            Species::NButane => 58.124,
            Species::SulfurDioxide => 64.066,
            Species::Ammonia => 17.031,
            Species::Air => 28.965,
            Species::Isobutane => 58.124,
            Species::NPentane => 72.151,
            Species::R134a => 102.031,
            Species::R245fa => 134.048,
        }
    }

    /// Standard dry-air constituents, used when Air appears in a chemical
    /// exergy lookup.
    pub fn constituents(&self) -> Option<&'static [(Species, f64)]> {
        const AIR: [(Species, f64); 4] = [
            (Species::N2, 0.7808),
            (Species::O2, 0.2095),
            (Species::Ar, 0.0093),
            (Species::CO2, 0.0004),
        ];
        match self {
            Species::Air => Some(&AIR),
            _ => None,
        }
    }

    /// Map to rfluids Pure enum (internal use for CoolProp backend).
    #[cfg(feature = "coolprop")]
    pub(crate) fn rfluids_pure(&self) -> rfluids::substance::Pure {
        use rfluids::substance::Pure;
        match self {
            Species::O2 => Pure::Oxygen,
            Species::N2 => Pure::Nitrogen,
            Species::Ar => Pure::Argon,
            Species::CO2 => Pure::CarbonDioxide,
            Species::CO => Pure::CarbonMonoxide,
            Species::H2O => Pure::Water,
            Species::H2 => Pure::Hydrogen,
            Species::He => Pure::Helium,
            Species::CH4 => Pure::Methane,
            Species::Ethane => Pure::Ethane,
            Species::Propane => Pure::nPropane,
            Species::NButane => Pure::nButane,
            Species::SulfurDioxide => Pure::SulfurDioxide,
            Species::Ammonia => Pure::Ammonia,
            Species::Air => Pure::Air,
            Species::Isobutane => Pure::Isobutane,
            Species::NPentane => Pure::nPentane,
            Species::R134a => Pure::R134a,
            Species::R245fa => Pure::R245fa,
        }
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for Species {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "O2" | "OXYGEN" => Ok(Species::O2),
            "N2" | "NITROGEN" => Ok(Species::N2),
            "AR" | "ARGON" => Ok(Species::Ar),
            "CO2" | "CARBONDIOXIDE" | "CARBON DIOXIDE" => Ok(Species::CO2),
            "CO" | "CARBONMONOXIDE" | "CARBON MONOXIDE" => Ok(Species::CO),
            "H2O" | "WATER" => Ok(Species::H2O),
            "H2" | "HYDROGEN" => Ok(Species::H2),
            "HE" | "HELIUM" => Ok(Species::He),
            "CH4" | "METHANE" => Ok(Species::CH4),
            "C2H6" | "ETHANE" => Ok(Species::Ethane),
            "C3H8" | "PROPANE" => Ok(Species::Propane),
            "NC4H10" | "NBUTANE" | "N-BUTANE" | "BUTANE" => Ok(Species::NButane),
            "SO2" | "SULFURDIOXIDE" | "SULFUR DIOXIDE" => Ok(Species::SulfurDioxide),
            "NH3" | "AMMONIA" => Ok(Species::Ammonia),
            "AIR" => Ok(Species::Air),
            "ISOBUTANE" | "R600A" => Ok(Species::Isobutane),
            "NPENTANE" | "N-PENTANE" | "PENTANE" => Ok(Species::NPentane),
            "R134A" => Ok(Species::R134a),
            "R245FA" => Ok(Species::R245fa),
            _ => Err("unknown species"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_aliases() {
        assert_eq!("methane".parse::<Species>().unwrap(), Species::CH4);
        assert_eq!("Carbon Dioxide".parse::<Species>().unwrap(), Species::CO2);
        assert_eq!("n-butane".parse::<Species>().unwrap(), Species::NButane);
        assert!("RP1".parse::<Species>().is_err());
    }

    #[test]
    fn canonical_keys_roundtrip() {
        for species in Species::ALL {
            assert_eq!(species.key().parse::<Species>().unwrap(), species);
        }
    }

    #[test]
    fn air_constituents_sum_to_one() {
        let parts = Species::Air.constituents().unwrap();
        let sum: f64 = parts.iter().map(|(_, x)| x).sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert!(Species::N2.constituents().is_none());
    }
}
