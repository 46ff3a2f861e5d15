use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use pd_kinematics::{RigGeometry, derive};
use pd_results::{
    DerivedRecord, FrameRecord, StateRecord, derived_records, frame_records, state_records,
};
use pd_sim::{IntegrateOptions, IntegratorType, PulleySystem, integrate};

mod scenario;
use scenario::Scenario;

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scenario error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Simulation error: {0}")]
    Sim(#[from] pd_sim::SimError),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "pd-cli")]
#[command(about = "Pulleydyn CLI - planar pulley-spring-pendulum simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline once and export CSV trajectories
    Run {
        /// Path to a YAML scenario file (built-in reference rig if omitted)
        #[arg(long)]
        scenario: Option<PathBuf>,
        /// Output directory for the CSV files
        #[arg(long, default_value = "out")]
        out_dir: PathBuf,
        /// Integration method
        #[arg(long, value_enum, default_value = "rkf45")]
        method: Method,
    },
    /// Print the built-in reference scenario as YAML
    Scenario,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Method {
    Rk4,
    Rkf45,
}

impl From<Method> for IntegratorType {
    fn from(m: Method) -> Self {
        match m {
            Method::Rk4 => IntegratorType::Rk4,
            Method::Rkf45 => IntegratorType::Rkf45,
        }
    }
}

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            scenario,
            out_dir,
            method,
        } => cmd_run(scenario.as_deref(), &out_dir, method),
        Commands::Scenario => cmd_scenario(),
    }
}

fn cmd_scenario() -> CliResult<()> {
    print!("{}", serde_yaml::to_string(&Scenario::reference())?);
    Ok(())
}

fn cmd_run(scenario_path: Option<&Path>, out_dir: &Path, method: Method) -> CliResult<()> {
    let scenario: Scenario = match scenario_path {
        Some(path) => serde_yaml::from_str(&fs::read_to_string(path)?)?,
        None => Scenario::reference(),
    };
    let (params, initial, grid) = scenario.build()?;

    let system = PulleySystem::new(params);
    system.validate_initial(&initial)?;

    let opts = IntegrateOptions {
        integrator: method.into(),
        ..Default::default()
    };
    let trajectory = integrate(&system, &grid, initial, &opts)?;
    let derived = derive(&system, &trajectory)?;
    let frames = RigGeometry::default().sample(&trajectory);

    fs::create_dir_all(out_dir)?;
    write_states(&out_dir.join("states.csv"), &state_records(&trajectory))?;
    write_derived(
        &out_dir.join("derived.csv"),
        &derived_records(&trajectory.t, &derived),
    )?;
    write_frames(
        &out_dir.join("frames.csv"),
        &frame_records(&trajectory.t, &frames),
    )?;

    println!(
        "✓ Simulated {} samples over [{}, {}] s ({:?})",
        grid.samples(),
        grid.start(),
        grid.end(),
        IntegratorType::from(method),
    );
    println!(
        "✓ Wrote states.csv, derived.csv, frames.csv to {}",
        out_dir.display()
    );
    Ok(())
}

fn write_states(path: &Path, records: &[StateRecord]) -> CliResult<()> {
    let mut csv = String::from("time_s,x_m,phi_rad,x_dot_m_s,phi_dot_rad_s\n");
    for r in records {
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            r.time_s, r.x_m, r.phi_rad, r.x_dot_m_s, r.phi_dot_rad_s
        ));
    }
    fs::write(path, csv)?;
    Ok(())
}

fn write_derived(path: &Path, records: &[DerivedRecord]) -> CliResult<()> {
    let mut csv = String::from(
        "time_s,x_ddot_m_s2,phi_ddot_rad_s2,cord_len_m,cord_rate_m_s,n_eps_n,n_nu_n,curvature_radius_m\n",
    );
    for r in records {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{}\n",
            r.time_s,
            r.x_ddot_m_s2,
            r.phi_ddot_rad_s2,
            r.cord_len_m,
            r.cord_rate_m_s,
            r.n_eps_n,
            r.n_nu_n,
            r.curvature_radius_m
        ));
    }
    fs::write(path, csv)?;
    Ok(())
}

fn write_frames(path: &Path, records: &[FrameRecord]) -> CliResult<()> {
    let mut csv = String::from(
        "time_s,pivot_x,pivot_y,bob_x,bob_y,anchor_x,anchor_y,spring_end_x,spring_end_y\n",
    );
    for r in records {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{},{}\n",
            r.time_s,
            r.pivot_x,
            r.pivot_y,
            r.bob_x,
            r.bob_y,
            r.anchor_x,
            r.anchor_y,
            r.spring_end_x,
            r.spring_end_y
        ));
    }
    fs::write(path, csv)?;
    Ok(())
}
