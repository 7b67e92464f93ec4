//! Archetype-to-rule registry.

use std::collections::HashMap;
use std::sync::Arc;

use crate::combustion::CombustionRule;
use crate::context::ClassifyContext;
use crate::dissipative::DissipativeRule;
use crate::error::{ComponentError, ComponentResult};
use crate::heat_exchanger::HeatExchangerRule;
use crate::machines::PowerConversionRule;
use crate::nodes::{FlashTankRule, MixerRule, SplitterRule};
use crate::pump::CompressionRule;
use crate::simple_heat_exchanger::SimpleHeatExchangerRule;
use crate::solar::SolarCollectorRule;
use crate::traits::{ClassificationRule, ExergyFlows};
use crate::turbine::TurbineRule;
use crate::valve::ValveRule;

/// Lookup table from archetype key to classification rule.
///
/// Components with a `dissipative` flag but no dedicated treatment in their
/// own rule can still be analysed by registering [`DissipativeRule`] under
/// their archetype.
#[derive(Clone, Default)]
pub struct ClassifierRegistry {
    rules: HashMap<String, Arc<dyn ClassificationRule>>,
}

impl ClassifierRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with a rule for every built-in archetype.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(TurbineRule);
        registry.register(CompressionRule::compressor());
        registry.register(CompressionRule::pump());
        registry.register(HeatExchangerRule);
        registry.register(SimpleHeatExchangerRule);
        registry.register(CombustionRule);
        registry.register(MixerRule::mixer());
        registry.register(MixerRule::collecting_header());
        registry.register(SplitterRule::splitter());
        registry.register(SplitterRule::distributing_header());
        registry.register(FlashTankRule);
        registry.register(ValveRule);
        registry.register(PowerConversionRule::generator());
        registry.register(PowerConversionRule::motor());
        registry.register(DissipativeRule);
        registry.register(SolarCollectorRule);
        registry
    }

    /// Registers `rule` under its archetype, replacing any previous rule.
    pub fn register(&mut self, rule: impl ClassificationRule + 'static) -> &mut Self {
        let key = rule.archetype().key().to_string();
        self.rules.insert(key, Arc::new(rule));
        self
    }

    /// Registers `rule` under an explicit key.
    pub fn register_as(
        &mut self,
        key: impl Into<String>,
        rule: Arc<dyn ClassificationRule>,
    ) -> &mut Self {
        self.rules.insert(key.into(), rule);
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.rules.contains_key(key)
    }

    /// Registered archetype keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Classifies one component with the rule registered for its archetype.
    pub fn classify(&self, ctx: &ClassifyContext<'_>) -> ComponentResult<ExergyFlows> {
        let rule = self
            .rules
            .get(ctx.archetype.key())
            .ok_or_else(|| ComponentError::Unregistered {
                component: ctx.component.to_string(),
                archetype: ctx.archetype.to_string(),
            })?;
        rule.classify(ctx)
    }
}

impl std::fmt::Debug for ClassifierRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierRegistry")
            .field("archetypes", &self.keys())
            .finish()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::archetype::Archetype;
    use crate::balance::balance;
    use crate::testing::*;
    use ex_core::Tolerances;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn valve_balance_closes(
            t_in in 310.0..600.0f64,
            dt in 0.5..10.0f64,
            m in 0.1..50.0f64,
            e_in in 50e3..500e3f64,
            frac in 0.1..0.99f64,
        ) {
            let registry = ClassifierRegistry::with_defaults();
            let a = Archetype::Valve;
            let ins = [with_pressure(material("1", m, t_in, e_in), 10e5)];
            let outs = [with_pressure(material("2", m, t_in - dt, e_in * frac), 2e5)];
            let c = ctx(&a, &ins, &outs, &[]);
            let flows = registry.classify(&c).unwrap();
            let b = balance(&c, flows, &Tolerances::default()).unwrap();
            let residual = b.fuel - b.product - b.loss - b.destruction;
            prop_assert!(residual.abs() <= 1e-9 * b.fuel.abs().max(1.0));
            prop_assert!(b.destruction >= 0.0);
            prop_assert_eq!(b.product, 0.0);
        }

        #[test]
        fn mixer_destruction_is_exergy_difference(
            m1 in 0.1..10.0f64,
            m2 in 0.1..10.0f64,
            e1 in 0.0..200e3f64,
            e2 in 0.0..200e3f64,
            w in 0.0..1.0f64,
        ) {
            let registry = ClassifierRegistry::with_defaults();
            let a = Archetype::Mixer;
            // outlet specific exergy no higher than the mass-weighted mean
            let e_out = w * (m1 * e1 + m2 * e2) / (m1 + m2);
            let ins = [material("1", m1, 350.0, e1), material("2", m2, 350.0, e2)];
            let outs = [material("3", m1 + m2, 350.0, e_out)];
            let c = ctx(&a, &ins, &outs, &[]);
            let flows = registry.classify(&c).unwrap();
            let b = balance(&c, flows, &Tolerances::default()).unwrap();
            let expected = m1 * e1 + m2 * e2 - (m1 + m2) * e_out;
            prop_assert!((b.destruction - expected).abs() <= 1e-6 * expected.abs().max(1.0));
        }
    }
}
