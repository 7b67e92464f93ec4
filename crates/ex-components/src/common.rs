//! Thresholds shared by the rules.

use crate::flow::MaterialFlow;

/// Mass flow below which a stream is treated as stagnant [kg/s].
pub const EPSILON_MDOT: f64 = 1e-10;

/// Temperature difference below which two states count as identical [K].
pub const EPSILON_TEMPERATURE: f64 = 1e-2;

/// Relative pressure difference below which two states count as identical.
pub const EPSILON_PRESSURE_REL: f64 = 1e-4;

pub fn is_stagnant(flow: &MaterialFlow) -> bool {
    flow.mass_flow.abs() < EPSILON_MDOT
}

/// True when `b` is the same thermodynamic state as `a` within the
/// temperature and relative pressure thresholds.
pub fn same_state(a: &MaterialFlow, b: &MaterialFlow) -> bool {
    (a.t - b.t).abs() < EPSILON_TEMPERATURE
        && (a.p - b.p).abs() <= EPSILON_PRESSURE_REL * a.p.abs()
}

/// Sum of mass flows [kg/s].
pub fn total_mass(flows: &[&MaterialFlow]) -> f64 {
    flows.iter().map(|f| f.mass_flow).sum()
}

/// True when inlet and outlet mass flows agree to the relative tolerance.
pub fn mass_conserved(inlets: &[&MaterialFlow], outlets: &[&MaterialFlow], rel: f64) -> bool {
    let m_in = total_mass(inlets);
    let m_out = total_mass(outlets);
    (m_in - m_out).abs() <= rel * m_in.abs().max(m_out.abs()).max(EPSILON_MDOT)
}
