//! Classification rule trait and its output.

use serde::Serialize;

use crate::archetype::Archetype;
use crate::context::ClassifyContext;
use crate::error::ComponentResult;

/// One labelled, signed contribution to a fuel, product or loss total [W].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExergyTerm {
    pub label: String,
    pub value: f64,
}

impl ExergyTerm {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Fuel, product and loss of one component, each as a list of terms.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExergyFlows {
    pub fuel: Vec<ExergyTerm>,
    pub product: Vec<ExergyTerm>,
    pub loss: Vec<ExergyTerm>,
}

impl ExergyFlows {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fuel(mut self, label: impl Into<String>, value: f64) -> Self {
        self.fuel.push(ExergyTerm::new(label, value));
        self
    }

    pub fn product(mut self, label: impl Into<String>, value: f64) -> Self {
        self.product.push(ExergyTerm::new(label, value));
        self
    }

    pub fn loss(mut self, label: impl Into<String>, value: f64) -> Self {
        self.loss.push(ExergyTerm::new(label, value));
        self
    }

    pub fn with_losses(mut self, terms: impl IntoIterator<Item = ExergyTerm>) -> Self {
        self.loss.extend(terms);
        self
    }

    pub fn fuel_total(&self) -> f64 {
        self.fuel.iter().fold(0.0, |acc, t| acc + t.value)
    }

    pub fn product_total(&self) -> f64 {
        self.product.iter().fold(0.0, |acc, t| acc + t.value)
    }

    pub fn loss_total(&self) -> f64 {
        self.loss.iter().fold(0.0, |acc, t| acc + t.value)
    }
}

/// Maps a component's streams and energy interactions to fuel, product
/// and loss.
///
/// Rules are stateless and shared across worker threads. A rule that cannot
/// partition its streams must return an error naming the component, never
/// an all-zero result.
pub trait ClassificationRule: Send + Sync {
    /// Archetype this rule is registered under.
    fn archetype(&self) -> Archetype;

    fn classify(&self, ctx: &ClassifyContext<'_>) -> ComponentResult<ExergyFlows>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_sum_signed_terms() {
        let flows = ExergyFlows::new()
            .fuel("E_PH[1]", 100.0)
            .fuel("E_PH[2]", -40.0)
            .product("W", 50.0)
            .loss("Q", 2.0);
        assert_eq!(flows.fuel_total(), 60.0);
        assert_eq!(flows.product_total(), 50.0);
        assert_eq!(flows.loss_total(), 2.0);
    }
}
