use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use vpf_core::units::{deg, m, to_deg};
use vpf_domain::{BladeKinematics, OperatingCondition, isa_atmosphere};
use vpf_study::{
    PitchSweepReport, PointEvaluation, StudyConfig, StudyResult, build_flow_state_from_isa,
    evaluate_operating_points, run_pitch_sweep_study,
};

#[derive(Parser)]
#[command(name = "vpf")]
#[command(about = "VPF study CLI - Variable pitch fan incidence toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the ISA state at an altitude
    Atmosphere {
        /// Geometric altitude in metres (0..=11000)
        #[arg(long, default_value_t = 0.0)]
        altitude: f64,
    },
    /// Print the flow state for a flight condition
    Flow {
        #[arg(long, default_value_t = 11_000.0)]
        altitude: f64,
        #[arg(long, default_value_t = 0.78)]
        mach: f64,
        /// Inlet flow angle in degrees
        #[arg(long, default_value_t = 30.0)]
        flow_angle: f64,
    },
    /// Compute blade incidence for a single condition
    Incidence {
        #[arg(long, default_value_t = 11_000.0)]
        altitude: f64,
        #[arg(long, default_value_t = 0.78)]
        mach: f64,
        /// Inlet flow angle in degrees
        #[arg(long)]
        flow_angle: f64,
        /// Blade stagger angle in degrees
        #[arg(long)]
        stagger: f64,
        /// Pitch increment in degrees (within ±8)
        #[arg(long, default_value_t = 0.0)]
        pitch: f64,
        /// Radial station r/R
        #[arg(long, default_value_t = 0.9)]
        r_over_r: f64,
    },
    /// Run the pitch-sweep incidence study
    Sweep {
        /// Study configuration YAML (defaults when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Evaluate the configured operating points
    Points {
        /// Study configuration YAML (defaults when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Write a default study configuration
    InitConfig {
        /// Output path
        #[arg(default_value = "vpf-study.yaml")]
        path: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> StudyResult<()> {
    // Logs go to stderr so JSON output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Atmosphere { altitude } => cmd_atmosphere(altitude),
        Commands::Flow {
            altitude,
            mach,
            flow_angle,
        } => cmd_flow(altitude, mach, flow_angle),
        Commands::Incidence {
            altitude,
            mach,
            flow_angle,
            stagger,
            pitch,
            r_over_r,
        } => cmd_incidence(altitude, mach, flow_angle, stagger, pitch, r_over_r),
        Commands::Sweep { config, format } => cmd_sweep(config.as_deref(), format),
        Commands::Points { config, format } => cmd_points(config.as_deref(), format),
        Commands::InitConfig { path } => cmd_init_config(&path),
    }
}

fn load_config(path: Option<&Path>) -> StudyResult<StudyConfig> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "Loading study configuration");
            vpf_study::load_yaml(path)
        }
        None => Ok(StudyConfig::default()),
    }
}

fn cmd_atmosphere(altitude: f64) -> StudyResult<()> {
    let atm = isa_atmosphere(m(altitude))?;
    println!("ISA atmosphere at {:.0} m:", altitude);
    println!("  Temperature:       {:.2} K", atm.temperature().value);
    println!("  Pressure:          {:.1} Pa", atm.pressure().value);
    println!("  Density:           {:.5} kg/m³", atm.density().value);
    println!("  Speed of sound:    {:.2} m/s", atm.speed_of_sound().value);
    println!("  Dynamic viscosity: {:.4e} Pa·s", atm.dynamic_viscosity().value);
    Ok(())
}

fn cmd_flow(altitude: f64, mach: f64, flow_angle: f64) -> StudyResult<()> {
    let flow = build_flow_state_from_isa(m(altitude), mach, deg(flow_angle))?;
    println!("Flow state at {:.0} m, M={:.3}:", altitude, mach);
    println!("  Velocity:            {:.2} m/s", flow.velocity().value);
    println!("  Flow angle:          {:.2} deg", to_deg(flow.flow_angle()));
    println!("  Mach number:         {:.4}", flow.mach_number());
    println!("  Total temperature:   {:.2} K", flow.total_temperature().value);
    println!("  Total pressure:      {:.1} Pa", flow.total_pressure().value);
    println!("  Frame:               {}", flow.frame());
    Ok(())
}

fn cmd_incidence(
    altitude: f64,
    mach: f64,
    flow_angle: f64,
    stagger: f64,
    pitch: f64,
    r_over_r: f64,
) -> StudyResult<()> {
    let atm = isa_atmosphere(m(altitude))?;
    let flow = build_flow_state_from_isa(m(altitude), mach, deg(flow_angle))?;
    let blade = BladeKinematics::from_degrees(pitch, stagger, r_over_r)?;
    let condition = OperatingCondition::try_new(atm, flow, blade)?;

    println!("{}", blade);
    println!("  Chord angle: {:.2} deg", blade.chord_angle_deg());
    println!("  Incidence:   {:.3} deg", condition.incidence_deg()?);
    Ok(())
}

fn cmd_sweep(config_path: Option<&Path>, format: OutputFormat) -> StudyResult<()> {
    let config = load_config(config_path)?;
    let report = run_pitch_sweep_study(&config)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => print_sweep_table(&report),
    }
    Ok(())
}

fn print_sweep_table(report: &PitchSweepReport) {
    println!("=== Pitch Sweep Incidence Analysis ===");
    println!(
        "Altitude: {:.0} m (ISA), Mach: {:.2}",
        report.altitude_m, report.mach
    );
    println!(
        "Nominal flow angle: {:.2} deg, off-design: {:.2} deg",
        report.nominal_flow_angle_deg, report.off_design_flow_angle_deg
    );
    println!(
        "Blade stagger: {:.2} deg at r/R = {:.3}",
        report.stagger_deg, report.r_over_r
    );
    println!();
    println!(
        "{:>10} {:>12} {:>14} {:>14}",
        "pitch", "chord", "i nominal", "i off-design"
    );
    for s in &report.samples {
        println!(
            "{:>10.3} {:>12.3} {:>14.3} {:>14.3}",
            s.pitch_deg, s.chord_angle_deg, s.incidence_nominal_deg, s.incidence_off_design_deg
        );
    }
    println!();
    println!(
        "Pitch required to recover i=0 (off-design): {:.2} deg",
        report.pitch_to_zero_deg
    );
    if report.feasible {
        println!("✓ Compensation is feasible within the pitch authority");
    } else {
        println!("✗ Required pitch exceeds the pitch authority");
    }
}

fn cmd_points(config_path: Option<&Path>, format: OutputFormat) -> StudyResult<()> {
    let config = load_config(config_path)?;
    let evals = evaluate_operating_points(&config)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&evals)?),
        OutputFormat::Table => print_points_table(&evals),
    }
    Ok(())
}

fn print_points_table(evals: &[PointEvaluation]) {
    if evals.is_empty() {
        println!("No operating points configured");
        return;
    }

    println!(
        "{:<12} {:>8} {:>6} {:>10} {:>10} {:>12} {:>10}",
        "point", "alt [m]", "M", "i [deg]", "pitch", "Re", "p(i=0)"
    );
    for e in evals {
        println!(
            "{:<12} {:>8.0} {:>6.3} {:>10.3} {:>10.2} {:>12.3e} {:>10.2}{}",
            e.name,
            e.altitude_m,
            e.mach,
            e.incidence_deg,
            e.pitch_deg,
            e.reynolds,
            e.pitch_to_zero_deg,
            if e.feasible { "" } else { "  (beyond authority)" }
        );
        if let Some(section) = &e.section {
            println!(
                "  {} CL={:.4} CD={:.5} L/D={:.1}{}",
                section.airfoil,
                section.cl,
                section.cd,
                section.lift_to_drag,
                if section.clamped { " (clamped)" } else { "" }
            );
        }
    }
}

fn cmd_init_config(path: &Path) -> StudyResult<()> {
    let config = StudyConfig::default();
    vpf_study::save_yaml(path, &config)?;
    println!("✓ Wrote default study configuration to {}", path.display());
    Ok(())
}
