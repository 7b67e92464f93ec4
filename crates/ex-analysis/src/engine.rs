//! Parallel evaluation and aggregation of one analysis run.

use ex_components::{
    ClassifierRegistry, ClassifyContext, ComponentBalance, Flow, Fraction, MaterialFlow, balance,
    heat_exergy,
};
use ex_graph::{Stream, StreamKind};
use ex_thermo::{AmbientState, ChemicalExergyDataset, ExergyEvaluator, PropertyModel};
use rayon::prelude::*;

use crate::boundary::SystemBoundary;
use crate::error::{AnalysisError, AnalysisResult};
use crate::network::{Network, StreamData};
use crate::options::AnalysisOptions;
use crate::results::{AnalysisReport, ComponentReport, StreamReport, SystemReport, rank};

/// Runs exergy analyses with a fixed set of collaborators.
///
/// The ambient state, property model and chemical dataset are shared
/// read-only by every worker of a run.
pub struct Analyzer<'a> {
    registry: &'a ClassifierRegistry,
    properties: &'a dyn PropertyModel,
    dataset: Option<&'a dyn ChemicalExergyDataset>,
    options: AnalysisOptions,
}

impl<'a> Analyzer<'a> {
    pub fn new(registry: &'a ClassifierRegistry, properties: &'a dyn PropertyModel) -> Self {
        Self {
            registry,
            properties,
            dataset: None,
            options: AnalysisOptions::default(),
        }
    }

    pub fn with_dataset(mut self, dataset: &'a dyn ChemicalExergyDataset) -> Self {
        self.dataset = Some(dataset);
        self
    }

    pub fn with_options(mut self, options: AnalysisOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Evaluates every stream, classifies and balances every component, then
    /// aggregates the system totals.
    ///
    /// Streams are evaluated before components; both stages run in parallel
    /// and their results keep network order, so repeated runs are identical.
    /// A stage with data or reference-data failures reports all of them.
    pub fn analyse(
        &self,
        network: &Network,
        ambient: &AmbientState,
        boundary: &SystemBoundary,
    ) -> AnalysisResult<AnalysisReport> {
        let graph = network.graph();
        let span = tracing::info_span!(
            "exergy_analysis",
            streams = graph.streams().len(),
            components = graph.components().len()
        );
        let _enter = span.enter();

        let resolved = boundary.resolve(network)?;
        let t0 = ambient.t0().value;
        let tol = self.options.tolerance.tolerances();

        let mut evaluator = ExergyEvaluator::new(ambient, self.properties)
            .with_split(self.options.split_physical_exergy);
        if self.options.chemical_exergy {
            let dataset = self.dataset.ok_or_else(|| AnalysisError::Data {
                at: "analysis".into(),
                what: "chemical exergy enabled but no dataset selected".into(),
            })?;
            evaluator = evaluator.with_chemical(dataset);
        }

        let flows: Vec<Flow> = collect_results(
            graph
                .streams()
                .par_iter()
                .map(|s| evaluate_stream(network, &evaluator, s, t0))
                .collect(),
        )?;

        let balances: Vec<ComponentBalance> = collect_results(
            graph
                .components()
                .par_iter()
                .map(|comp| -> AnalysisResult<ComponentBalance> {
                    let spec = network.component_spec(comp.id).ok_or_else(|| AnalysisError::Data {
                        at: comp.name.clone(),
                        what: "component is missing from the network data".into(),
                    })?;
                    let ctx = ClassifyContext {
                        component: &comp.name,
                        archetype: &spec.archetype,
                        inlets: comp.inlets.iter().map(|id| &flows[id.slot()]).collect(),
                        outlets: comp.outlets.iter().map(|id| &flows[id.slot()]).collect(),
                        interactions: &spec.interactions,
                        t0,
                        split: self.options.split_physical_exergy,
                        chemical: self.options.chemical_exergy,
                        dissipative: spec.dissipative,
                    };
                    let classified = self.registry.classify(&ctx)?;
                    Ok(balance(&ctx, classified, &tol)?)
                })
                .collect(),
        )?;

        for b in &balances {
            tracing::info!(
                component = %b.component,
                archetype = %b.archetype,
                fuel = b.fuel,
                product = b.product,
                loss = b.loss,
                destruction = b.destruction,
                efficiency = %b.efficiency,
                "component balance"
            );
        }

        let totals = resolved.totals(network, |id| flows[id.slot()].exergy_rate(), t0);
        let destruction = totals.fuel - totals.product - totals.loss;
        let component_destruction: f64 = balances.iter().map(|b| b.destruction).sum();
        if (component_destruction - destruction).abs() > tol.allowed(totals.fuel) {
            return Err(AnalysisError::BalanceConsistency {
                at: "system".into(),
                what: format!(
                    "sum of component destruction {component_destruction:.6} W differs from system destruction {destruction:.6} W (F={:.6}, P={:.6}, L={:.6})",
                    totals.fuel, totals.product, totals.loss
                ),
            });
        }

        let system = SystemReport {
            fuel: totals.fuel,
            product: totals.product,
            loss: totals.loss,
            destruction,
            efficiency: Fraction::of(totals.product, totals.fuel, tol.abs),
            component_destruction,
        };
        tracing::info!(
            fuel = system.fuel,
            product = system.product,
            loss = system.loss,
            destruction = system.destruction,
            efficiency = %system.efficiency,
            "system balance"
        );

        let components: Vec<ComponentReport> = balances
            .into_iter()
            .map(|b| ComponentReport {
                y: Fraction::of(b.destruction, totals.fuel, tol.abs),
                y_star: Fraction::of(b.destruction, destruction, tol.abs),
                balance: b,
            })
            .collect();
        let ranking = rank(&components);

        let streams = graph
            .streams()
            .iter()
            .zip(&flows)
            .map(|(s, f)| stream_report(s, f))
            .collect();

        Ok(AnalysisReport {
            t0,
            p0: ambient.p0().value,
            options: self.options,
            streams,
            components,
            system,
            ranking,
        })
    }
}

/// Results of one parallel stage, in network order.
///
/// Every data and reference-data failure is kept and reported together.
/// The first classification or consistency failure aborts on its own.
fn collect_results<T>(results: Vec<AnalysisResult<T>>) -> AnalysisResult<Vec<T>> {
    let mut values = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(value) => values.push(value),
            Err(err) if err.is_local() => {
                tracing::warn!(error = %err, "analysis item failed");
                failures.push(err);
            }
            Err(err) => return Err(err),
        }
    }
    match failures.len() {
        0 => Ok(values),
        1 => Err(failures.remove(0)),
        _ => Err(AnalysisError::Multiple(failures)),
    }
}

fn evaluate_stream(
    network: &Network,
    evaluator: &ExergyEvaluator<'_>,
    stream: &Stream,
    t0: f64,
) -> AnalysisResult<Flow> {
    let data = network
        .stream_data(stream.id)
        .ok_or_else(|| AnalysisError::Data {
            at: stream.name.clone(),
            what: "stream has no data".into(),
        })?;
    let flow = match data {
        StreamData::Material {
            substance,
            mass_flow,
            state,
        } => {
            let exergy = evaluator
                .evaluate(substance, state)
                .map_err(|e| AnalysisError::stream(&stream.name, e))?;
            tracing::debug!(
                stream = %stream.name,
                substance = %substance.key(),
                e_ph = exergy.physical,
                e_t = ?exergy.thermal,
                e_m = ?exergy.mechanical,
                e_ch = ?exergy.chemical.map(|c| c.value),
                "stream exergy"
            );
            Flow::Material(MaterialFlow {
                name: stream.name.clone(),
                mass_flow: *mass_flow,
                t: state.temperature().value,
                p: state.pressure().value,
                h: state.enthalpy(),
                exergy,
            })
        }
        StreamData::Power { power } => Flow::Power {
            name: stream.name.clone(),
            power: *power,
        },
        StreamData::Heat { duty, temperature } => Flow::Heat {
            name: stream.name.clone(),
            duty: *duty,
            temperature: *temperature,
            exergy: heat_exergy(*duty, *temperature, t0),
        },
    };
    Ok(flow)
}

fn stream_report(stream: &Stream, flow: &Flow) -> StreamReport {
    let kind = match stream.kind {
        StreamKind::Material => "material",
        StreamKind::Power => "power",
        StreamKind::Heat => "heat",
    };
    let material = flow.as_material();
    StreamReport {
        name: stream.name.clone(),
        kind,
        mass_flow: material.map(|m| m.mass_flow),
        exergy: material.map(|m| m.exergy),
        exergy_rate: flow.exergy_rate(),
    }
}
