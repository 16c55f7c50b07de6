//! ABC block calculus - CLI

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use abc::backends::Shell;
use abc::codec::{decode_bytes, encode, hash_of};
use abc::reader::{read, FileResolver};
use abc::util::config::{load_config, Config};
use abc::util::logger::{self, Verbosity};
use abc::{eval_text, reduce_bytes, Outcome, NAME, VERSION};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

/// Reduce, encode and inspect ABC blocks
#[derive(Parser, Debug)]
#[command(name = "abc")]
#[command(version = VERSION)]
#[command(about = NAME, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (-v debug, -vv every rewrite step)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only report errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Configuration file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Reduce bytecode from a file or stdin
    Reduce {
        /// Bytecode file (stdin if omitted)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Maximum number of rewrites
        #[arg(short, long)]
        quota: Option<usize>,

        /// How to write the result
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Bytes)]
        output: OutputFormat,

        /// Print run statistics as JSON to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Reduce code written as text
    Eval {
        /// Code to evaluate
        #[arg(value_name = "CODE")]
        code: String,

        /// Maximum number of rewrites
        #[arg(short, long)]
        quota: Option<usize>,

        /// Print run statistics as JSON to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Write the bytecode of text
    Encode {
        /// Code to encode
        #[arg(value_name = "CODE")]
        code: String,

        /// Hex digits instead of raw bytes
        #[arg(long)]
        hex: bool,
    },

    /// Render bytecode from a file or stdin as text
    Decode {
        /// Bytecode file (stdin if omitted)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Print the content address of text
    Hash {
        /// Code to hash
        #[arg(value_name = "CODE")]
        code: String,
    },

    /// Interactive block builder
    Shell {
        /// Maximum number of rewrites per `reduce`
        #[arg(short, long)]
        quota: Option<usize>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Rendered text
    Text,
    /// Bytecode as hex digits
    Hex,
    /// Raw bytecode
    Bytes,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let verbosity = Verbosity::from_flags(args.verbose, args.quiet);
    logger::install(verbosity);
    debug!(version = VERSION, host = std::env::consts::OS, "starting");

    let mut config = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    config.reduce.trace |= verbosity.traces_steps();

    match args.command {
        Commands::Reduce {
            file,
            quota,
            output,
            stats,
        } => {
            override_quota(&mut config, quota);
            let bytes = read_input(file.as_deref())?;
            let outcome = reduce_bytes(&bytes, &config.reduce)?;
            report(&outcome, stats)?;
            write_block(&outcome, output)?;
        }
        Commands::Eval { code, quota, stats } => {
            override_quota(&mut config, quota);
            let resolver = FileResolver::new(config.resolver_root());
            let outcome = eval_text(&code, &config.reduce, &resolver)?;
            report(&outcome, stats)?;
            println!("{}", outcome.block);
        }
        Commands::Encode { code, hex } => {
            let resolver = FileResolver::new(config.resolver_root());
            let block = read(&code, &resolver).context("Failed to read code")?;
            let bytes = encode(&block).context("Failed to encode")?;
            if hex {
                println!("{}", hex::encode(bytes));
            } else {
                write_stdout(&bytes)?;
            }
        }
        Commands::Decode { file } => {
            let bytes = read_input(file.as_deref())?;
            let block = decode_bytes(&bytes).context("Failed to decode bytecode")?;
            println!("{}", block);
        }
        Commands::Hash { code } => {
            let resolver = FileResolver::new(config.resolver_root());
            let block = read(&code, &resolver).context("Failed to read code")?;
            let hash = hash_of(&block).context("Failed to encode")?;
            println!("#{}", hash.to_hex());
        }
        Commands::Shell { quota } => {
            override_quota(&mut config, quota);
            let resolver = FileResolver::new(config.resolver_root());
            let mut shell = Shell::new(config.shell, config.reduce.quota, resolver);
            shell.run().context("Shell failed")?;
        }
    }

    Ok(())
}

fn override_quota(
    config: &mut Config,
    quota: Option<usize>,
) {
    if let Some(quota) = quota {
        config.reduce.quota = quota;
    }
}

fn read_input(file: Option<&Path>) -> Result<Vec<u8>> {
    match file {
        Some(path) => {
            fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))
        }
        None => {
            let mut bytes = Vec::new();
            io::stdin()
                .read_to_end(&mut bytes)
                .context("Failed to read stdin")?;
            Ok(bytes)
        }
    }
}

fn report(
    outcome: &Outcome,
    stats: bool,
) -> Result<()> {
    if stats {
        eprintln!("{}", serde_json::to_string(&outcome.stats)?);
    }
    for tag in &outcome.tags {
        debug!(tag = %tag, "tag");
    }
    Ok(())
}

fn write_block(
    outcome: &Outcome,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => println!("{}", outcome.block),
        OutputFormat::Hex => {
            let bytes = encode(&outcome.block).context("Failed to encode result")?;
            println!("{}", hex::encode(bytes));
        }
        OutputFormat::Bytes => {
            let bytes = encode(&outcome.block).context("Failed to encode result")?;
            write_stdout(&bytes)?;
        }
    }
    Ok(())
}

fn write_stdout(bytes: &[u8]) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    stdout.write_all(bytes).context("Failed to write stdout")?;
    stdout.flush().context("Failed to write stdout")?;
    Ok(())
}
