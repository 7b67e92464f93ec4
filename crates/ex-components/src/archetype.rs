//! Component archetypes.

/// Kind of component, used to select a classification rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Archetype {
    Turbine,
    Compressor,
    Pump,
    HeatExchanger,
    SimpleHeatExchanger,
    CombustionChamber,
    Mixer,
    Splitter,
    CollectingHeader,
    DistributingHeader,
    FlashTank,
    Valve,
    Generator,
    Motor,
    Dissipative,
    SolarCollector,
    /// Anything else; needs a rule registered under the same name.
    Custom(String),
}

impl Archetype {
    pub const BUILTIN: [Archetype; 16] = [
        Archetype::Turbine,
        Archetype::Compressor,
        Archetype::Pump,
        Archetype::HeatExchanger,
        Archetype::SimpleHeatExchanger,
        Archetype::CombustionChamber,
        Archetype::Mixer,
        Archetype::Splitter,
        Archetype::CollectingHeader,
        Archetype::DistributingHeader,
        Archetype::FlashTank,
        Archetype::Valve,
        Archetype::Generator,
        Archetype::Motor,
        Archetype::Dissipative,
        Archetype::SolarCollector,
    ];

    pub fn key(&self) -> &str {
        match self {
            Archetype::Turbine => "Turbine",
            Archetype::Compressor => "Compressor",
            Archetype::Pump => "Pump",
            Archetype::HeatExchanger => "HeatExchanger",
            Archetype::SimpleHeatExchanger => "SimpleHeatExchanger",
            Archetype::CombustionChamber => "CombustionChamber",
            Archetype::Mixer => "Mixer",
            Archetype::Splitter => "Splitter",
            Archetype::CollectingHeader => "CollectingHeader",
            Archetype::DistributingHeader => "DistributingHeader",
            Archetype::FlashTank => "FlashTank",
            Archetype::Valve => "Valve",
            Archetype::Generator => "Generator",
            Archetype::Motor => "Motor",
            Archetype::Dissipative => "Dissipative",
            Archetype::SolarCollector => "SolarCollector",
            Archetype::Custom(name) => name,
        }
    }
}

impl From<&str> for Archetype {
    fn from(s: &str) -> Self {
        let norm: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_lowercase();
        match norm.as_str() {
            "turbine" | "expander" => Archetype::Turbine,
            "compressor" => Archetype::Compressor,
            "pump" => Archetype::Pump,
            "heatexchanger" => Archetype::HeatExchanger,
            "simpleheatexchanger" => Archetype::SimpleHeatExchanger,
            "combustionchamber" | "combustor" => Archetype::CombustionChamber,
            "mixer" => Archetype::Mixer,
            "splitter" => Archetype::Splitter,
            "collectingheader" => Archetype::CollectingHeader,
            "distributingheader" => Archetype::DistributingHeader,
            "flashtank" => Archetype::FlashTank,
            "valve" | "throttle" => Archetype::Valve,
            "generator" => Archetype::Generator,
            "motor" => Archetype::Motor,
            "dissipative" => Archetype::Dissipative,
            "solarcollector" => Archetype::SolarCollector,
            _ => Archetype::Custom(s.trim().to_string()),
        }
    }
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
