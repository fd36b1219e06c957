//! SuanShi (算式) - CLI

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use indexmap::IndexMap;
use owo_colors::OwoColorize;
use rand::Rng;
use serde_json::{Map, Value};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use suanshi::frontend::lexer::tokenize;
use suanshi::util::config::Config;
use suanshi::util::logger::{self, LogLevel};
use suanshi::{parse_source, Compiler, NAME, VERSION};
use tracing::debug;

/// Compile arithmetic expressions and evaluate them
#[derive(Parser, Debug)]
#[command(name = "suanshi")]
#[command(version = VERSION)]
#[command(about = NAME, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./suanshi.toml, then the user config)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile an expression and evaluate it once
    Eval {
        /// Expression (read from stdin when omitted)
        #[arg(value_name = "EXPR")]
        expr: Option<String>,

        /// Variable binding, repeatable
        #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_var)]
        vars: Vec<(String, f64)>,

        /// Bindings as a JSON object; --var entries take precedence
        #[arg(long, value_name = "JSON")]
        bindings: Option<String>,
    },

    /// Print the tokens of an expression
    Tokens {
        #[arg(value_name = "EXPR")]
        expr: Option<String>,
    },

    /// Print the parsed expression fully parenthesized
    Ast {
        #[arg(value_name = "EXPR")]
        expr: Option<String>,
    },

    /// Print the generated code
    Dump {
        #[arg(value_name = "EXPR")]
        expr: Option<String>,
    },

    /// Measure evaluation throughput
    Bench {
        #[arg(value_name = "EXPR")]
        expr: Option<String>,

        /// Number of evaluations
        #[arg(short = 'n', long, default_value_t = 1_000_000)]
        iterations: usize,

        /// Variable binding, repeatable; unbound variables get random values
        #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_var)]
        vars: Vec<(String, f64)>,
    },

    /// Print version information
    Version,
}

fn parse_var(text: &str) -> Result<(String, f64)> {
    let (name, value) = text
        .split_once('=')
        .with_context(|| format!("expected NAME=VALUE, got '{}'", text))?;
    let value = value
        .trim()
        .parse::<f64>()
        .with_context(|| format!("'{}' is not a number", value))?;
    Ok((name.trim().to_string(), value))
}

fn read_expr(expr: Option<String>) -> Result<String> {
    match expr {
        Some(expr) => Ok(expr),
        None => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read expression from stdin")?;
            Ok(source)
        }
    }
}

fn build_compiler(config: &Config) -> Result<Compiler> {
    let compiler = Compiler::from_config(&config.compiler)
        .context("Failed to set up the compiler from configuration")?;
    Ok(compiler.with_vm_config(config.vm.clone()))
}

fn json_bindings(
    bindings: Option<String>,
    vars: Vec<(String, f64)>,
) -> Result<Map<String, Value>> {
    let mut map = match bindings {
        Some(text) => match serde_json::from_str::<Value>(&text).context("Invalid --bindings JSON")? {
            Value::Object(map) => map,
            other => bail!("--bindings must be a JSON object, got {}", other),
        },
        None => Map::new(),
    };
    for (name, value) in vars {
        map.insert(name, Value::from(value));
    }
    Ok(map)
}

fn eval(
    config: &Config,
    source: &str,
    bindings: Option<String>,
    vars: Vec<(String, f64)>,
) -> Result<()> {
    let compiler = build_compiler(config)?;
    let compiled = compiler.compile_source("eval", source)?;
    let bindings = json_bindings(bindings, vars)?;
    let value = compiled.compute(&bindings)?;
    println!("{}", value);
    Ok(())
}

fn bench(
    config: &Config,
    source: &str,
    iterations: usize,
    vars: Vec<(String, f64)>,
) -> Result<()> {
    let compiler = build_compiler(config)?;

    let start = Instant::now();
    let compiled = compiler.compile_source("bench", source)?;
    let compile_time = start.elapsed();

    let mut rng = rand::rng();
    let mut bindings: IndexMap<String, f64> = vars.into_iter().collect();
    for name in compiled.variables() {
        if !bindings.contains_key(name) {
            bindings.insert(name.clone(), rng.random_range(-10.0..10.0));
        }
    }
    debug!(?bindings, "benchmark bindings");

    let start = Instant::now();
    let mut sum = 0.0;
    for _ in 0..iterations {
        sum += compiled.compute(&bindings)?;
    }
    let sequential = start.elapsed();

    // The same number of evaluations, spread over rayon's pool
    let rows: Vec<IndexMap<String, f64>> = (0..iterations).map(|_| bindings.clone()).collect();
    let start = Instant::now();
    let results = compiled.compute_batch(&rows);
    let parallel = start.elapsed();
    let failures = results.iter().filter(|r| r.is_err()).count();

    let per_op = |elapsed: std::time::Duration| elapsed.as_nanos() as f64 / iterations.max(1) as f64;
    println!("compile:    {:?}", compile_time);
    println!(
        "sequential: {:?} ({:.2} ns/op, checksum {})",
        sequential,
        per_op(sequential),
        sum
    );
    println!(
        "parallel:   {:?} ({:.2} ns/op, {} failures)",
        parallel,
        per_op(parallel),
        failures
    );
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;

    let level = if args.verbose {
        LogLevel::Debug
    } else {
        config.log.level()?
    };
    logger::init_with_level(level);

    if args.verbose {
        eprintln!("{} version: {}", NAME, VERSION);
        eprintln!("Host: {}", std::env::consts::OS);
    }

    match args.command {
        Commands::Eval {
            expr,
            vars,
            bindings,
        } => {
            let source = read_expr(expr)?;
            eval(&config, &source, bindings, vars)?;
        }
        Commands::Tokens { expr } => {
            let source = read_expr(expr)?;
            for token in tokenize(&source)? {
                println!("{:<16} {:<10} {}", token.kind.describe(), token.text, token.span);
            }
        }
        Commands::Ast { expr } => {
            let source = read_expr(expr)?;
            println!("{}", parse_source(&source)?);
        }
        Commands::Dump { expr } => {
            let source = read_expr(expr)?;
            let compiled = build_compiler(&config)?.compile_source("dump", &source)?;
            print!("{}", compiled.disassemble());
        }
        Commands::Bench {
            expr,
            iterations,
            vars,
        } => {
            let source = read_expr(expr)?;
            bench(&config, &source, iterations, vars)?;
        }
        Commands::Version => {
            println!("{} {}", NAME, VERSION);
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}
