use clap::{Parser, Subcommand};
use ex_analysis::{AnalysisReport, StreamReport};
use ex_app::{AnalysisRequest, AnalysisTiming, AppError, AppResult, project_service, run_analysis};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "exflow")]
#[command(about = "exflow - exergy balance analysis of energy conversion networks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate case file syntax and structure
    Validate {
        /// Path to the case file (YAML or JSON)
        case_path: PathBuf,
    },
    /// Run the exergy analysis of a case
    Analyse {
        /// Path to the case file (YAML or JSON)
        case_path: PathBuf,
        /// Write the full report as JSON
        #[arg(long)]
        json: Option<PathBuf>,
        /// Skip the per-stream table
        #[arg(long)]
        no_streams: bool,
    },
}

fn main() -> AppResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { case_path } => cmd_validate(&case_path),
        Commands::Analyse {
            case_path,
            json,
            no_streams,
        } => cmd_analyse(&case_path, json.as_deref(), !no_streams),
    }
}

fn cmd_validate(case_path: &Path) -> AppResult<()> {
    println!("Validating case: {}", case_path.display());
    let case = project_service::load_case(case_path)?;
    let summary = project_service::summarize(&case);
    println!("✓ Case is valid: {}", summary.name);
    println!(
        "  {} substances, {} material streams, {} energy streams, {} components",
        summary.substance_count,
        summary.material_stream_count,
        summary.energy_stream_count,
        summary.component_count
    );
    if let Some(dataset) = &summary.chemical_dataset {
        println!("  Chemical exergy dataset: {}", dataset);
    }
    Ok(())
}

/// One log line per failed stream or component.
fn log_failures(err: &AppError) {
    if let AppError::Analysis(e) = err {
        for failure in e.failures() {
            tracing::error!(kind = ?failure.kind(), "{failure}");
        }
    }
}

fn cmd_analyse(case_path: &Path, json: Option<&Path>, show_streams: bool) -> AppResult<()> {
    println!("Analysing case: {}", case_path.display());

    let response = run_analysis(&AnalysisRequest {
        case_path,
        report_path: json,
    })
    .inspect_err(log_failures)?;

    println!("✓ Analysis completed: {}", response.case_name);
    print_ambient(&response.report);
    if show_streams {
        print_streams(&response.report.streams);
    }
    print_components(&response.report);
    print_system(&response.report);
    print_timing_summary(&response.timing);

    if let Some(path) = json {
        println!("Report written to {}", path.display());
    }
    Ok(())
}

fn print_ambient(report: &AnalysisReport) {
    println!();
    println!("Ambient: T0 = {:.2} K, p0 = {:.0} Pa", report.t0, report.p0);
    println!(
        "Options: split = {}, chemical = {}",
        report.options.split_physical_exergy, report.options.chemical_exergy
    );
}

fn print_streams(streams: &[StreamReport]) {
    println!();
    println!("Streams:");
    println!(
        "  {:<16} {:<9} {:>12} {:>14} {:>14} {:>14} {:>14} {:>16}",
        "name", "kind", "m [kg/s]", "e_PH [J/kg]", "e_T [J/kg]", "e_M [J/kg]", "e_CH [J/kg]", "E [W]"
    );
    for s in streams {
        let e = s.exergy.as_ref();
        println!(
            "  {:<16} {:<9} {:>12} {:>14} {:>14} {:>14} {:>14} {:>16.3}",
            s.name,
            s.kind,
            opt(s.mass_flow, 4),
            opt(e.map(|e| e.physical), 2),
            opt(e.and_then(|e| e.thermal), 2),
            opt(e.and_then(|e| e.mechanical), 2),
            opt(e.and_then(|e| e.chemical).map(|c| c.value), 2),
            s.exergy_rate
        );
    }
}

fn print_components(report: &AnalysisReport) {
    println!();
    println!("Components:");
    println!(
        "  {:<16} {:<20} {:>14} {:>14} {:>14} {:>14} {:>8} {:>8} {:>8}",
        "name", "archetype", "E_F [W]", "E_P [W]", "E_L [W]", "E_D [W]", "eps", "y", "y*"
    );
    for c in &report.components {
        let b = &c.balance;
        println!(
            "  {:<16} {:<20} {:>14.3} {:>14.3} {:>14.3} {:>14.3} {:>8} {:>8} {:>8}",
            b.component,
            b.archetype,
            b.fuel,
            b.product,
            b.loss,
            b.destruction,
            b.efficiency.to_string(),
            c.y.to_string(),
            c.y_star.to_string()
        );
    }

    println!();
    println!("Ranking by exergy destruction:");
    for (i, entry) in report.ranking.iter().enumerate() {
        println!(
            "  {:>2}. {:<16} E_D = {:>14.3} W  y* = {}",
            i + 1,
            entry.component,
            entry.destruction,
            entry.y_star
        );
    }
}

fn print_system(report: &AnalysisReport) {
    let s = &report.system;
    println!();
    println!("System:");
    println!("  E_F,tot = {:.3} W", s.fuel);
    println!("  E_P,tot = {:.3} W", s.product);
    println!("  E_L,tot = {:.3} W", s.loss);
    println!("  E_D,tot = {:.3} W", s.destruction);
    println!("  eps_tot = {}", s.efficiency);
}

fn print_timing_summary(timing: &AnalysisTiming) {
    println!();
    println!("Timing summary:");
    println!("  Load:    {:.3} s", timing.load_time_s);
    println!("  Compile: {:.3} s", timing.compile_time_s);
    println!("  Analyse: {:.3} s", timing.analyse_time_s);
    println!("  Total:   {:.3} s", timing.total_time_s);
}

fn opt(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "-".to_string(),
    }
}
