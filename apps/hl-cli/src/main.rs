mod error;

use clap::{ArgGroup, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use error::{CliError, CliResult};
use hl_components::{
    ConvergencePolicy, FluidProperties, FrictionMethod, Material, PipeSegment, SegmentResult,
    SolveOptions, solve_segment_with,
};
use hl_core::units::{kgpm3, m, m3ps, pas};
use hl_project::{ElevationMatrix, ProfileAxis, compile_project, load_any};
use hl_results::{Report, save_csv, save_json};
use hl_solver::{NetworkResult, solve_network_parallel, solve_network_with};

#[derive(Parser)]
#[command(name = "hl")]
#[command(about = "Pipe network head-loss calculator (Darcy–Weisbach)", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a project file
    Validate {
        /// Path to the project file (.yaml, .yml or .json)
        project_path: PathBuf,
    },
    /// Solve every segment of a project and report the total head loss
    Solve {
        /// Path to the project file (.yaml, .yml or .json)
        project_path: PathBuf,
        /// Friction method, overrides the project (colebrook, swamee_jain)
        #[arg(long)]
        method: Option<FrictionMethod>,
        /// Fail on non-converged friction estimates
        #[arg(long)]
        strict: bool,
        /// Solve segments in parallel
        #[arg(long)]
        parallel: bool,
        /// Write the results table as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Write the full report as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Solve a single segment given on the command line
    Segment {
        /// Length in metres
        #[arg(long)]
        length: f64,
        /// Internal diameter in metres
        #[arg(long)]
        diameter: f64,
        /// Volumetric flow in m³/s
        #[arg(long, allow_negative_numbers = true)]
        flow: f64,
        /// Absolute roughness in metres
        #[arg(long, conflicts_with = "material")]
        roughness: Option<f64>,
        /// Pipe material (pvc, hdpe, galvanized_steel, concrete)
        #[arg(long)]
        material: Option<Material>,
        #[arg(long, default_value_t = FrictionMethod::Colebrook)]
        method: FrictionMethod,
        /// Dynamic viscosity in Pa·s
        #[arg(long, default_value_t = 1.0e-3)]
        viscosity: f64,
        /// Density in kg/m³
        #[arg(long, default_value_t = 1000.0)]
        density: f64,
        #[arg(long)]
        strict: bool,
    },
    /// List the pipe material catalog
    Materials,
    /// Extract a longitudinal profile from an elevation matrix file
    #[command(group(ArgGroup::new("axis").required(true).args(["row", "column"])))]
    Profile {
        /// Matrix file, one row of elevations per line
        matrix_path: PathBuf,
        /// 1-based row number
        #[arg(long)]
        row: Option<usize>,
        /// 1-based column number
        #[arg(long)]
        column: Option<usize>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: logging disabled: {err}");
    }

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> CliResult<()> {
    match command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Solve {
            project_path,
            method,
            strict,
            parallel,
            csv,
            json,
        } => cmd_solve(
            &project_path,
            method,
            strict,
            parallel,
            csv.as_deref(),
            json.as_deref(),
        ),
        Commands::Segment {
            length,
            diameter,
            flow,
            roughness,
            material,
            method,
            viscosity,
            density,
            strict,
        } => {
            let segment = match (roughness, material) {
                (Some(e), _) => PipeSegment::new(m(length), m(diameter), m3ps(flow), m(e)),
                (None, material) => PipeSegment::with_material(
                    m(length),
                    m(diameter),
                    m3ps(flow),
                    material.unwrap_or(Material::DEFAULT),
                ),
            };
            let fluid = FluidProperties::new(pas(viscosity), kgpm3(density));
            let mut options = SolveOptions::with_method(method);
            if strict {
                options = options.strict();
            }
            cmd_segment(&segment, &fluid, &options)
        }
        Commands::Materials => {
            cmd_materials();
            Ok(())
        }
        Commands::Profile {
            matrix_path,
            row,
            column,
        } => {
            let (axis, number) = match (row, column) {
                (Some(r), _) => (ProfileAxis::Row, r),
                (None, Some(c)) => (ProfileAxis::Column, c),
                (None, None) => {
                    return Err(CliError::InvalidInput(
                        "one of --row or --column is required".to_string(),
                    ));
                }
            };
            cmd_profile(&matrix_path, axis, number)
        }
    }
}

fn cmd_validate(project_path: &Path) -> CliResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = load_any(project_path)?;
    println!(
        "✓ Project '{}' is valid ({} segments)",
        project.name,
        project.segments.len()
    );
    Ok(())
}

fn cmd_solve(
    project_path: &Path,
    method: Option<FrictionMethod>,
    strict: bool,
    parallel: bool,
    csv_path: Option<&Path>,
    json_path: Option<&Path>,
) -> CliResult<()> {
    let project = load_any(project_path)?;
    let mut input = compile_project(&project)?;
    if let Some(method) = method {
        input.options.method = method;
    }
    if strict {
        input.options.policy = ConvergencePolicy::Strict;
    }

    println!(
        "Solving '{}': {} segments, {} friction",
        input.name,
        input.segments.len(),
        input.options.method
    );

    let network = if parallel {
        solve_network_parallel(&input.segments, &input.fluid, &input.options)?
    } else {
        solve_network_with(&input.segments, &input.fluid, &input.options)?
    };

    print_network(&network);

    let report = Report::build(
        &input.name,
        input.options.method,
        &input.segments,
        &network,
        input.profile.as_ref(),
    )?;
    if let Some(change) = report.net_elevation_change_m {
        println!("  Net elevation change: {:.4} m", change);
    }

    if let Some(path) = csv_path {
        save_csv(path, &report)?;
        println!("✓ CSV written to {}", path.display());
    }
    if let Some(path) = json_path {
        save_json(path, &report)?;
        println!("✓ JSON report written to {}", path.display());
    }
    Ok(())
}

fn print_network(network: &NetworkResult) {
    println!(
        "  {:>3}  {:>9}  {:>10}  {:>10}  {:>10}",
        "#", "V(m/s)", "Re", "f", "hf(m)"
    );
    for (i, s) in network.segments.iter().enumerate() {
        println!(
            "  {:>3}  {:>9.4}  {:>10.0}  {:>10.6}  {:>10.6}",
            i + 1,
            s.velocity.value,
            s.reynolds,
            s.friction_factor,
            s.head_loss.value
        );
    }
    println!("  Total head loss: {:.6} m", network.total_head_loss.value);

    if let Some((position, worst)) = network.max_head_loss_segment() {
        println!(
            "  Largest loss: segment {} ({:.6} m)",
            position, worst.head_loss.value
        );
    }
    for w in network.warnings() {
        println!("  ⚠ segment {}: {}", w.position, w.warning);
    }
}

fn cmd_segment(
    segment: &PipeSegment,
    fluid: &FluidProperties,
    options: &SolveOptions,
) -> CliResult<()> {
    let result = solve_segment_with(segment, fluid, options)?;
    print_segment(segment, fluid, &result);
    Ok(())
}

fn print_segment(segment: &PipeSegment, fluid: &FluidProperties, result: &SegmentResult) {
    if let Some(material) = segment.material {
        println!("Material:        {}", material);
    }
    println!("Roughness:       {:.3e} m", segment.roughness.value);
    println!("Area:            {:.6} m²", result.area.value);
    println!("Velocity:        {:.4} m/s", result.velocity.value);
    println!("Reynolds:        {:.0} ({:?})", result.reynolds, result.regime);
    println!(
        "Friction factor: {:.6} ({} iterations)",
        result.friction_factor, result.iterations
    );
    println!("Head loss:       {:.6} m", result.head_loss.value);
    println!(
        "Pressure drop:   {:.1} Pa",
        result.pressure_drop(fluid).value
    );
    if let Some(w) = &result.warning {
        println!("⚠ {}", w);
    }
}

fn cmd_materials() {
    println!("{:<18} {:>12}", "material", "roughness(m)");
    for material in Material::ALL {
        println!("{:<18} {:>12.1e}", material.key(), material.roughness_m());
    }
}

fn cmd_profile(matrix_path: &Path, axis: ProfileAxis, number: usize) -> CliResult<()> {
    let text = std::fs::read_to_string(matrix_path).map_err(|source| CliError::Read {
        path: matrix_path.to_path_buf(),
        source,
    })?;
    let matrix = ElevationMatrix::parse(&text)?;

    let index = number
        .checked_sub(1)
        .ok_or_else(|| CliError::InvalidInput(format!("{axis} numbers start at 1")))?;
    let profile = matrix.profile(axis, index)?;

    println!("station,elevation(m)");
    for (i, z) in profile.elevations_m.iter().enumerate() {
        println!("{},{:.4}", i + 1, z);
    }
    println!("net_change(m),{:.4}", profile.net_change());
    Ok(())
}
