// crates/parking-cli/src/main.rs
// ============================================================================
// Module: Parking Lot CLI Entry Point
// Description: Command dispatcher for config checks, availability, and the
//              gate console.
// Purpose: Provide a safe operator CLI over a configured parking lot.
// Dependencies: clap, parking-config, parking-core, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The `parking-lot` binary loads a lot from `parking-lot.toml` and either
//! validates it, reports slot availability, or runs the gate console over
//! stdin or a script file. All user-facing strings are routed through the
//! message catalog. Inputs are untrusted and validated before use.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use parking_cli::console::GateConsole;
use parking_cli::t;
use parking_config::ParkingConfig;
use parking_config::config_toml_example;
use parking_core::ClassAvailability;
use parking_core::Clock;
use parking_core::FloorId;
use parking_core::LotError;
use parking_core::ManualClock;
use parking_core::NoopAuditSink;
use parking_core::ParkingLot;
use parking_core::SizeClass;
use parking_core::SystemClock;
use parking_core::Timestamp;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "parking-lot", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Report free and total slots per floor and size class.
    Availability(AvailabilityCommand),
    /// Run gate commands against a freshly configured lot.
    Console(ConsoleCommand),
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a config file.
    Validate(ConfigValidateCommand),
    /// Print an example config file.
    Example,
}

/// Arguments for config validation.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to parking-lot.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Arguments for the availability report.
#[derive(Args, Debug)]
struct AvailabilityCommand {
    /// Optional config file path (defaults to parking-lot.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = AvailabilityFormat::Text)]
    format: AvailabilityFormat,
}

/// Output formats for the availability report.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum AvailabilityFormat {
    /// Human-readable text.
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Arguments for the gate console.
#[derive(Args, Debug)]
struct ConsoleCommand {
    /// Optional config file path (defaults to parking-lot.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Read commands from a file instead of stdin.
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,
    /// Drive tickets from a manual clock moved with `advance`.
    #[arg(long, action = ArgAction::SetTrue)]
    manual_clock: bool,
    /// Manual clock start (unix milliseconds, defaults to now).
    #[arg(long, value_name = "UNIX_MS", requires = "manual_clock")]
    start_unix_ms: Option<i64>,
}

// ============================================================================
// SECTION: Reports
// ============================================================================

/// Availability of a whole lot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct AvailabilityReport {
    /// Lot name.
    lot: String,
    /// Free slots across all floors.
    free: usize,
    /// All slots across all floors.
    total: usize,
    /// Per-floor breakdown in ascending floor order.
    floors: Vec<FloorReport>,
}

/// Availability of one floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct FloorReport {
    /// Floor identifier.
    floor_id: FloorId,
    /// Counts per size class present on the floor.
    classes: BTreeMap<SizeClass, ClassAvailability>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a catalog message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Config {
            command,
        } => command_config(&command),
        Commands::Availability(command) => command_availability(&command),
        Commands::Console(command) => command_console(&command),
    }
}

/// Emits the top-level help message for the CLI.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: &ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(command),
        ConfigCommand::Example => {
            write_stdout_line(config_toml_example().trim_end())
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    let layout = config.layout();
    write_stdout_line(&t!("config.validate.ok"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line(&t!(
        "config.validate.summary",
        name = layout.name,
        floors = layout.floors.len(),
        slots = layout.slot_count(),
        policy = config.lot.fit_policy.as_str(),
    ))
    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Availability Command
// ============================================================================

/// Executes the availability report command.
fn command_availability(command: &AvailabilityCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    let lot = ParkingLot::configure(
        &config.layout(),
        config.lot_policy(),
        Arc::new(SystemClock),
        Arc::new(NoopAuditSink),
    )
    .map_err(|err| CliError::new(t!("lot.build_failed", error = err)))?;
    let report = availability_report(&lot)
        .map_err(|err| CliError::new(t!("lot.query_failed", error = err)))?;
    let output = match command.format {
        AvailabilityFormat::Text => render_availability_text(&report),
        AvailabilityFormat::Json => serde_json::to_string_pretty(&report)
            .map_err(|err| CliError::new(t!("availability.json_failed", error = err)))?,
    };
    write_stdout_line(&output).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Collects per-floor availability from a lot.
fn availability_report(lot: &ParkingLot) -> Result<AvailabilityReport, LotError> {
    let floors: Vec<FloorReport> = lot
        .floor_availability()?
        .into_iter()
        .map(|(floor_id, classes)| FloorReport {
            floor_id,
            classes,
        })
        .collect();
    let (free, total) = floors
        .iter()
        .flat_map(|floor| floor.classes.values())
        .fold((0, 0), |(free, total), counts| (free + counts.free, total + counts.total));
    Ok(AvailabilityReport {
        lot: lot.name().to_string(),
        free,
        total,
        floors,
    })
}

/// Renders the availability report as text.
fn render_availability_text(report: &AvailabilityReport) -> String {
    let mut lines = vec![t!(
        "availability.header",
        name = report.lot,
        free = report.free,
        total = report.total
    )];
    for floor in &report.floors {
        lines.push(t!("availability.floor", floor = floor.floor_id));
        for (class, counts) in &floor.classes {
            lines.push(t!(
                "availability.class",
                class = class,
                free = counts.free,
                total = counts.total
            ));
        }
    }
    lines.join("\n")
}

// ============================================================================
// SECTION: Console Command
// ============================================================================

/// Executes the gate console over a script file or stdin.
fn command_console(command: &ConsoleCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    let manual_clock = command.manual_clock.then(|| {
        let start = command
            .start_unix_ms
            .map_or_else(|| SystemClock.now(), Timestamp::from_unix_millis);
        Arc::new(ManualClock::new(start))
    });
    let clock: Arc<dyn Clock> = match &manual_clock {
        Some(clock) => Arc::clone(clock) as Arc<dyn Clock>,
        None => Arc::new(SystemClock),
    };
    let lot = config
        .build_lot(clock)
        .map_err(|err| CliError::new(t!("lot.build_failed", error = err)))?;
    let console = GateConsole::new(lot, manual_clock);

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let failed = match &command.script {
        Some(path) => {
            let file = File::open(path).map_err(|err| {
                CliError::new(t!(
                    "console.script.read_failed",
                    path = path.display(),
                    error = err
                ))
            })?;
            console.run_script(BufReader::new(file), &mut stdout.lock(), &mut stderr.lock())
        }
        None => console.run_script(std::io::stdin().lock(), &mut stdout.lock(), &mut stderr.lock()),
    }
    .map_err(|err| CliError::new(t!("console.io_failed", error = err)))?;

    if failed > 0 {
        write_stderr_line(&t!("console.failed_lines", count = failed))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Loads and validates configuration.
fn load_config(path: Option<&Path>) -> CliResult<ParkingConfig> {
    ParkingConfig::load(path).map_err(|err| CliError::new(t!("config.load_failed", error = err)))
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
