//! Analysis results.

use ex_components::{ComponentBalance, Fraction};
use ex_thermo::StreamExergy;
use serde::Serialize;

use crate::options::AnalysisOptions;

/// Evaluated exergy of one stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamReport {
    pub name: String,
    pub kind: &'static str,
    /// [kg/s], material streams only.
    pub mass_flow: Option<f64>,
    /// Specific exergies [J/kg], material streams only.
    pub exergy: Option<StreamExergy>,
    /// Total exergy rate carried by the stream [W].
    pub exergy_rate: f64,
}

/// Component balance with its share of system destruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentReport {
    #[serde(flatten)]
    pub balance: ComponentBalance,
    /// E_D,k / E_F,tot
    pub y: Fraction,
    /// E_D,k / E_D,tot
    pub y_star: Fraction,
}

/// System totals [W].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SystemReport {
    pub fuel: f64,
    pub product: f64,
    pub loss: f64,
    pub destruction: f64,
    pub efficiency: Fraction,
    /// Sum of component destructions, equal to `destruction` within tolerance.
    pub component_destruction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankEntry {
    pub component: String,
    pub destruction: f64,
    pub y_star: Fraction,
}

/// Everything one analysis run produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Ambient temperature [K].
    pub t0: f64,
    /// Ambient pressure [Pa].
    pub p0: f64,
    pub options: AnalysisOptions,
    pub streams: Vec<StreamReport>,
    pub components: Vec<ComponentReport>,
    pub system: SystemReport,
    /// Components by descending y*; ties by name.
    pub ranking: Vec<RankEntry>,
}

impl AnalysisReport {
    pub fn stream(&self, name: &str) -> Option<&StreamReport> {
        self.streams.iter().find(|s| s.name == name)
    }

    pub fn component(&self, name: &str) -> Option<&ComponentReport> {
        self.components.iter().find(|c| c.balance.component == name)
    }
}

/// Orders components by y* descending; not-applicable shares go last.
pub(crate) fn rank(components: &[ComponentReport]) -> Vec<RankEntry> {
    let mut ranking: Vec<RankEntry> = components
        .iter()
        .map(|c| RankEntry {
            component: c.balance.component.clone(),
            destruction: c.balance.destruction,
            y_star: c.y_star,
        })
        .collect();
    ranking.sort_by(|a, b| {
        let key = |e: &RankEntry| e.y_star.value().unwrap_or(f64::NEG_INFINITY);
        key(b)
            .total_cmp(&key(a))
            .then_with(|| a.component.cmp(&b.component))
    });
    ranking
}

#[cfg(test)]
mod tests {
    use super::*;
    use ex_components::ExergyFlows;

    fn report(name: &str, d: f64, y_star: Fraction) -> ComponentReport {
        ComponentReport {
            balance: ComponentBalance {
                component: name.into(),
                archetype: "Valve".into(),
                fuel: d,
                product: 0.0,
                loss: 0.0,
                destruction: d,
                efficiency: Fraction::Value(0.0),
                flows: ExergyFlows::new(),
            },
            y: Fraction::NotApplicable,
            y_star,
        }
    }

    #[test]
    fn ranking_is_descending_with_ties_by_name() {
        let comps = vec![
            report("b", 1.0, Fraction::Value(0.25)),
            report("z", 0.0, Fraction::NotApplicable),
            report("a", 1.0, Fraction::Value(0.25)),
            report("c", 2.0, Fraction::Value(0.5)),
        ];
        let names: Vec<String> = rank(&comps).into_iter().map(|e| e.component).collect();
        assert_eq!(names, ["c", "a", "b", "z"]);
    }

    #[test]
    fn component_report_serializes_flat() {
        let json = serde_json::to_value(report("v", 3.0, Fraction::Value(1.0))).unwrap();
        assert_eq!(json["component"], "v");
        assert_eq!(json["destruction"], 3.0);
        assert_eq!(json["y"], serde_json::Value::Null);
    }
}
