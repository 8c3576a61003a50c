//! sisplan CLI - SIS timetable to day/hour grid converter

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use sisplan::{
    constants::{DEFAULT_INPUT, DEFAULT_OUTPUT},
    diagnostics::{check_timetable, format_diagnostics},
    ConversionError, ConversionResult, ConversionWarning, TimetableConverter, TimetableOptions,
};
#[cfg(feature = "cli")]
use std::fs;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "sisplan")]
#[command(version)]
#[command(about = "Restructure a SIS timetable page into a day/hour grid", long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Saved SIS timetable page
    #[arg(short, long, visible_aliases = ["in", "source"], default_value = DEFAULT_INPUT)]
    input: String,

    /// Output file path
    #[arg(short, long, visible_alias = "out", default_value = DEFAULT_OUTPUT)]
    output: String,

    /// Move directives, e.g. "NE 101,pn,8 -> sr,10; wt,12 -> czw,12"
    #[arg(short, long = "move")]
    moves: Option<String>,

    /// TOML settings file
    #[cfg(feature = "config-file")]
    #[arg(long)]
    config: Option<String>,

    /// Keep every hour slot as its own block
    #[arg(long)]
    no_merge: bool,

    /// Leave out day names and the corner cell
    #[arg(long)]
    no_day_names: bool,

    /// Stylesheet href for the output page
    #[arg(long)]
    stylesheet: Option<String>,

    /// Filter script src; adds the session type filter bar
    #[arg(long)]
    script: Option<String>,

    /// Strict mode: exit with error if any conversion warnings occur
    #[arg(long)]
    strict: bool,

    /// Quiet mode: suppress warning output to stderr
    #[arg(short, long)]
    quiet: bool,

    /// Use colored output for warnings
    #[arg(long)]
    color: bool,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Check a SIS page for conversion issues
    Check {
        /// Input file to check
        input: Option<String>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Show version and feature info
    Info,
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };
    std::process::exit(code);
}

#[cfg(feature = "cli")]
fn run(cli: Cli) -> ConversionResult<i32> {
    let options = build_options(&cli)?;

    // Handle subcommands first
    if let Some(cmd) = cli.command {
        return handle_subcommand(cmd, &cli.input, &options);
    }

    let input = fs::read_to_string(&cli.input)?;
    let converter = TimetableConverter::new(options)?;

    let (directives, mut warnings) = match cli.moves {
        Some(ref moves) => converter.parse_moves(moves),
        None => (Vec::new(), Vec::new()),
    };
    let output = converter.convert(&input, &directives)?;
    warnings.extend(output.warnings);

    if !warnings.is_empty() && !cli.quiet {
        print_warnings_to_stderr(&warnings, cli.color);
    }

    if cli.strict && !warnings.is_empty() {
        return Err(ConversionError::invalid(format!(
            "{} conversion warning(s) in strict mode",
            warnings.len()
        )));
    }

    fs::write(&cli.output, output.content)?;
    if !cli.quiet {
        if warnings.is_empty() {
            eprintln!("✓ Output written to: {}", cli.output);
        } else {
            eprintln!(
                "⚠ Output written to: {} ({} warning(s))",
                cli.output,
                warnings.len()
            );
        }
    }

    Ok(0)
}

/// Settings file first, then command line flags on top
#[cfg(feature = "cli")]
fn build_options(cli: &Cli) -> ConversionResult<TimetableOptions> {
    #[cfg(feature = "config-file")]
    let mut options = match cli.config {
        Some(ref path) => TimetableOptions::from_toml_file(path)?,
        None => TimetableOptions::default(),
    };
    #[cfg(not(feature = "config-file"))]
    let mut options = TimetableOptions::default();

    if cli.no_merge {
        options.merge_consecutive = false;
    }
    if cli.no_day_names {
        options.show_day_names = false;
    }
    if let Some(ref stylesheet) = cli.stylesheet {
        options.stylesheet = stylesheet.clone();
    }
    if let Some(ref script) = cli.script {
        options.script = Some(script.clone());
    }
    options.validate()?;
    Ok(options)
}

#[cfg(feature = "cli")]
fn handle_subcommand(
    cmd: Commands,
    default_input: &str,
    options: &TimetableOptions,
) -> ConversionResult<i32> {
    match cmd {
        Commands::Check { input, no_color } => {
            let path = input.as_deref().unwrap_or(default_input);
            let content = fs::read_to_string(path)?;

            let result = check_timetable(&content, options);
            println!("{}", format_diagnostics(&result, !no_color));

            if result.has_errors() {
                return Ok(1);
            }
        }

        Commands::Info => {
            println!("sisplan - SIS timetable to day/hour grid converter");
            println!("Version: {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Features:");
            println!("  ✓ Cell tokenizing (room, type, name, teacher, note)");
            println!("  ✓ Course moves with 'room,day,hour -> day,hour' directives");
            println!("  ✓ Merging of consecutive hour slots");
            println!("  ✓ Session type filter bar");
            println!("  ✓ Page diagnostics (sisplan check)");
            #[cfg(feature = "config-file")]
            println!("  ✓ TOML settings files");
            println!();
            println!("Session types:");
            for ty in sisplan::SessionType::ALL {
                println!("  {} {}", ty.tag(), ty.css_class());
            }
            println!();
            println!(
                "Grid: {} days x {} hours from {}:00",
                options.days, options.hours, options.start_hour
            );
            println!("Day tokens: {}", options.day_abbreviations.join(", "));
        }
    }

    Ok(0)
}

/// Print warnings to stderr with optional color coding.
#[cfg(feature = "cli")]
fn print_warnings_to_stderr(warnings: &[ConversionWarning], use_color: bool) {
    eprintln!();
    eprintln!(
        "{}Conversion Warnings ({}):{}",
        if use_color { "\x1b[33m" } else { "" },
        warnings.len(),
        if use_color { "\x1b[0m" } else { "" }
    );
    eprintln!();

    for warning in warnings {
        let color = if use_color { warning.color_code() } else { "" };
        let reset = if use_color { "\x1b[0m" } else { "" };

        if let Some(ref loc) = warning.location {
            eprintln!(
                "  {}[{}]{} {}: {}",
                color, warning.kind, reset, loc, warning.message
            );
        } else {
            eprintln!("  {}[{}]{} {}", color, warning.kind, reset, warning.message);
        }
    }
    eprintln!();
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install sisplan --features cli");
    eprintln!("  sisplan [-i SIS.html] [-o SIS_out.html] [-m MOVES]");
}
