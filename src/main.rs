//! landgen: compiles keyword parameter strings into PCB land patterns
//!
//! Command-line front end: picks a generator and an output backend, loads
//! optional rules/rack files, and writes the rendered footprint to stdout
//! or a file.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, warn, Level};
use tracing_subscriber::EnvFilter;

use landgen::config;
use landgen::error::Result;
use landgen::render::BackendRegistry;
use landgen::rules::{DrillRack, RulesDictionary};
use landgen::GeneratorRegistry;

/// Footprint generator: compiles keyword parameter strings into PCB land
/// patterns.
#[derive(Parser, Debug)]
#[command(name = "landgen")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Footprint generator to run (see --list)
    #[arg(value_name = "GENERATOR")]
    generator: Option<String>,

    /// Generator parameters, e.g. "pins=8, pitch=0.65mm, ..."
    #[arg(value_name = "PARAMS")]
    params: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "geda")]
    format: String,

    /// Footprint name (defaults to the generator name)
    #[arg(short, long)]
    name: Option<String>,

    /// Rules file overlaying the built-in design rules
    #[arg(long, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Drill rack: "default", "none", or a rack file
    #[arg(long, value_name = "RACK", default_value = "default")]
    rack: String,

    /// Write output here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// List the available generators and formats
    #[arg(long)]
    list: bool,

    /// Show a generator's keyword help
    #[arg(long, value_name = "GENERATOR")]
    describe: Option<String>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

fn get_log_level(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_rules(args: &Args) -> Result<RulesDictionary> {
    match &args.rules {
        Some(path) => Ok(config::load_rules(path)?),
        None => Ok(RulesDictionary::default_rules()),
    }
}

fn load_rack(args: &Args) -> Result<DrillRack> {
    match args.rack.as_str() {
        "default" => Ok(DrillRack::default_rack()),
        "none" => Ok(DrillRack::null()),
        path => Ok(config::load_rack(std::path::Path::new(path))?),
    }
}

fn run(args: &Args) -> Result<()> {
    let generators = GeneratorRegistry::builtin();
    let backends = BackendRegistry::builtin();

    if args.list {
        println!("generators:");
        for name in generators.names() {
            println!("  {name}");
        }
        println!("formats:");
        for name in backends.names() {
            println!("  {name}");
        }
        return Ok(());
    }
    if let Some(name) = &args.describe {
        let generator = generators.get(name)?;
        println!("{}", generator.helptext());
        return Ok(());
    }

    let (generator_name, params) = match (&args.generator, &args.params) {
        (Some(g), Some(p)) => (g.as_str(), p.as_str()),
        _ => {
            return Err(landgen::Error::syntax(
                "expected a generator and a parameter string (or --list)",
            ))
        }
    };
    let generator = generators.get(generator_name)?;
    let backend = backends.get(&args.format, generator_name)?;

    let rules = load_rules(args)?;
    let rack = load_rack(args)?;
    let name = args.name.as_deref().unwrap_or(generator_name);

    let mut sink = |message: &str| warn!("{message}");
    let footprint = generator.generate(name, params, &rules, &rack, &mut sink)?;
    let mut sink = |message: &str| warn!("{message}");
    let rendered = backend.render(&footprint, &mut sink)?;

    match &args.output {
        Some(path) => fs::write(path, rendered)?,
        None => print!("{rendered}"),
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(get_log_level(args.verbose, args.quiet));

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("landgen: {e}");
            ExitCode::FAILURE
        }
    }
}
