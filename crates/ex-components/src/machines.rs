//! Generator and motor rules.

use crate::archetype::Archetype;
use crate::context::ClassifyContext;
use crate::error::ComponentResult;
use crate::traits::{ClassificationRule, ExergyFlows};

/// Conversion between shaft and electrical power.
///
/// Fuel is the power entering, product the power leaving. A motor whose
/// streams are declared from the grid side (more power out than in) is
/// read the other way round.
#[derive(Debug, Clone)]
pub struct PowerConversionRule {
    archetype: Archetype,
}

impl PowerConversionRule {
    pub fn generator() -> Self {
        Self {
            archetype: Archetype::Generator,
        }
    }

    pub fn motor() -> Self {
        Self {
            archetype: Archetype::Motor,
        }
    }
}

impl ClassificationRule for PowerConversionRule {
    fn archetype(&self) -> Archetype {
        self.archetype.clone()
    }

    fn classify(&self, ctx: &ClassifyContext<'_>) -> ComponentResult<ExergyFlows> {
        if ctx.net_power_in().is_none() {
            return Err(ctx.missing("power streams or shaft interactions"));
        }
        let (mut p_in, mut p_out) = ctx.power_in_out();
        if self.archetype == Archetype::Motor && p_out > p_in {
            std::mem::swap(&mut p_in, &mut p_out);
        }
        Ok(ExergyFlows::new()
            .fuel("W_in", p_in)
            .product("W_out", p_out)
            .with_losses(ctx.heat_loss_terms()))
    }
}
