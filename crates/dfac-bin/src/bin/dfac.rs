use std::{fs, io::Read, path::PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use dfac::{
    codegen::generate_c, parser::parse_automata, validate::validate, Automaton, DeterminizeConfig,
};
use tracing::{debug, error, info, warn, Level};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Emit {
    /// C program recognizing every automaton line by line
    C,
    /// Graphviz digraphs
    Dot,
    /// the automata in their textual format
    Text,
}

/// Compiles finite automata descriptions into recognizers
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Automaton description files, stdin if none are given
    inputs: Vec<PathBuf>,

    /// Output file, stdout if absent
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Emit::C)]
    emit: Emit,

    /// Determinize every automaton before emitting it
    #[arg(long)]
    determinize: bool,

    /// Suffix appended to the name of determinized automata
    #[arg(long, requires = "determinize")]
    suffix: Option<String>,

    /// Rebuild automata that are already deterministic too
    #[arg(long, requires = "determinize")]
    always: bool,

    /// Enable verbose logging
    #[arg(short, long, conflicts_with = "debug")]
    verbose: bool,

    /// Turn on debugging information
    #[arg(short, long)]
    debug: bool,
}

fn read_inputs(inputs: &[PathBuf]) -> anyhow::Result<Vec<Automaton>> {
    let mut automata = Vec::new();

    if inputs.is_empty() {
        debug!("No input files specified, using stdin");
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Error when reading from stdin")?;
        automata.extend(parse_automata(&buf).context("<stdin>")?);
    }

    for path in inputs {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Unable to read {}", path.display()))?;
        let parsed = parse_automata(&text).with_context(|| format!("{}", path.display()))?;
        debug!("Parsed {} automata from {}", parsed.len(), path.display());
        automata.extend(parsed);
    }

    Ok(automata)
}

fn render(automata: &[Automaton], emit: Emit) -> anyhow::Result<String> {
    if automata.is_empty() {
        warn!("No automata found in the input");
    }

    match emit {
        Emit::C => {
            if let Err(errors) = validate(automata) {
                for e in errors.iter() {
                    error!("{}", e);
                }
                bail!("validation failed, no code generated");
            }
            Ok(generate_c(automata)?)
        }
        Emit::Dot => Ok(automata
            .iter()
            .map(|a| a.to_dot())
            .collect::<Vec<_>>()
            .join("\n")),
        Emit::Text => Ok(automata
            .iter()
            .map(|a| format!("{}\n", a))
            .collect::<String>()),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        Level::TRACE
    } else if args.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_level(true)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Unable to set global tracing subscriber")?;

    let mut automata = read_inputs(&args.inputs)?;
    for a in &automata {
        debug!("{}", a);
    }

    if args.determinize {
        let config = DeterminizeConfig {
            skip_if_deterministic: !args.always,
            name_suffix: args.suffix.clone(),
            ..Default::default()
        };
        automata = automata.iter().map(|a| a.determinize_with(&config)).collect();
        info!("Determinized {} automata", automata.len());
    }

    let output = render(&automata, args.emit)?;
    match &args.output {
        Some(path) => {
            fs::write(path, &output)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}, {} bytes", path.display(), output.len());
        }
        None => print!("{}", output),
    }

    Ok(())
}
