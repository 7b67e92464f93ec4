//! Exergy-carrying flows seen by a component.
//!
//! Rates are in W. Material flows carry specific values multiplied by their
//! mass flow; power and heat flows carry their energy rate directly.

use ex_core::units::constants::T_SUN_K;
use ex_thermo::StreamExergy;

/// A material stream with its evaluated specific exergies.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialFlow {
    pub name: String,
    /// Mass flow [kg/s].
    pub mass_flow: f64,
    /// Temperature [K].
    pub t: f64,
    /// Pressure [Pa].
    pub p: f64,
    /// Specific enthalpy [J/kg].
    pub h: f64,
    pub exergy: StreamExergy,
}

impl MaterialFlow {
    /// Physical exergy rate.
    pub fn ph(&self) -> f64 {
        self.mass_flow * self.exergy.physical
    }

    /// Thermal exergy rate, when the split was computed.
    pub fn thermal(&self) -> Option<f64> {
        self.exergy.thermal.map(|e| self.mass_flow * e)
    }

    /// Mechanical exergy rate, when the split was computed.
    pub fn mechanical(&self) -> Option<f64> {
        self.exergy.mechanical.map(|e| self.mass_flow * e)
    }

    /// Chemical exergy rate, when evaluated.
    pub fn chemical(&self) -> Option<f64> {
        self.exergy.chemical.map(|c| self.mass_flow * c.value)
    }

    /// Physical plus chemical exergy rate.
    pub fn total(&self) -> f64 {
        self.mass_flow * self.exergy.total()
    }

    /// Enthalpy flow [W].
    pub fn enthalpy_flow(&self) -> f64 {
        self.mass_flow * self.h
    }
}

/// Any stream attached to a component.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Material(MaterialFlow),
    /// Mechanical or electrical power [W], along the stream direction.
    Power { name: String, power: f64 },
    /// Heat [W] along the stream direction, with its exergy at the boundary
    /// temperature.
    Heat {
        name: String,
        duty: f64,
        temperature: Option<f64>,
        exergy: f64,
    },
}

impl Flow {
    pub fn name(&self) -> &str {
        match self {
            Flow::Material(m) => &m.name,
            Flow::Power { name, .. } | Flow::Heat { name, .. } => name,
        }
    }

    pub fn as_material(&self) -> Option<&MaterialFlow> {
        match self {
            Flow::Material(m) => Some(m),
            _ => None,
        }
    }

    /// Exergy rate carried by the flow.
    pub fn exergy_rate(&self) -> f64 {
        match self {
            Flow::Material(m) => m.total(),
            Flow::Power { power, .. } => *power,
            Flow::Heat { exergy, .. } => *exergy,
        }
    }
}

/// Energy exchanged with a component that is not modelled as a stream.
///
/// Sign convention: positive = into the component.
#[derive(Debug, Clone, PartialEq)]
pub enum EnergyInteraction {
    Shaft {
        name: String,
        power: f64,
    },
    Heat {
        name: String,
        duty: f64,
        /// Boundary temperature [K] where the heat crosses.
        temperature: Option<f64>,
    },
    /// Absorbed solar radiation [W].
    Solar {
        name: String,
        irradiance: f64,
    },
}

impl EnergyInteraction {
    pub fn name(&self) -> &str {
        match self {
            EnergyInteraction::Shaft { name, .. }
            | EnergyInteraction::Heat { name, .. }
            | EnergyInteraction::Solar { name, .. } => name,
        }
    }

    /// Signed energy rate into the component.
    pub fn energy(&self) -> f64 {
        match self {
            EnergyInteraction::Shaft { power, .. } => *power,
            EnergyInteraction::Heat { duty, .. } => *duty,
            EnergyInteraction::Solar { irradiance, .. } => *irradiance,
        }
    }

    /// Exergy magnitude of the interaction at ambient temperature `t0`.
    pub fn exergy(&self, t0: f64) -> f64 {
        match self {
            EnergyInteraction::Shaft { power, .. } => power.abs(),
            EnergyInteraction::Heat {
                duty, temperature, ..
            } => heat_exergy(*duty, *temperature, t0),
            EnergyInteraction::Solar { irradiance, .. } => solar_exergy(*irradiance, t0),
        }
    }
}

/// |Q| |1 - T0/T_b|; heat crossing at an unknown temperature is taken to
/// cross at T0 and carries no exergy.
pub fn heat_exergy(duty: f64, boundary_temperature: Option<f64>, t0: f64) -> f64 {
    match boundary_temperature {
        Some(tb) if tb > 0.0 => duty.abs() * (1.0 - t0 / tb).abs(),
        _ => 0.0,
    }
}

/// Exergy of solar radiation: Q (1 - 4/3 T0/T_sun).
pub fn solar_exergy(irradiance: f64, t0: f64) -> f64 {
    irradiance * (1.0 - 4.0 / 3.0 * t0 / T_SUN_K)
}
