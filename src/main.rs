use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::debug;

use deferra_config::PackageDef;
use deferra_runtime::{ValueMap, collect_args, literal_inputs};
use deferra_schema::{FieldSpec, PackageSchema};

/// Deferra - Invoke provider functions with deferred arguments
#[derive(Parser)]
#[command(name = "deferra")]
#[command(version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// List the functions of a package with their inputs and outputs
  Describe {
    /// Path to the package definition (JSON)
    package_file: PathBuf,
  },

  /// Apply defaults to arguments read from stdin and print the result
  Materialize {
    /// Path to the package definition (JSON)
    package_file: PathBuf,

    /// Token of the function to materialize arguments for
    #[arg(long)]
    function: String,
  },
}

fn main() -> Result<()> {
  init_tracing();
  let cli = Cli::parse();

  match cli.command {
    Some(Commands::Describe { package_file }) => {
      describe(&package_file)?;
    }
    Some(Commands::Materialize {
      package_file,
      function,
    }) => {
      run_materialize(package_file, function)?;
    }
    None => {
      println!("deferra - use --help to see available commands");
    }
  }

  Ok(())
}

fn init_tracing() {
  let filter = tracing_subscriber::EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .try_init();
}

fn load_package(package_file: &Path) -> Result<PackageSchema> {
  let def = PackageDef::load(package_file)
    .with_context(|| format!("failed to load package file: {}", package_file.display()))?;

  PackageSchema::from_def(def)
    .with_context(|| format!("invalid package file: {}", package_file.display()))
}

fn describe(package_file: &Path) -> Result<()> {
  let package = load_package(package_file)?;

  match &package.version {
    Some(version) => println!("{} {}", package.name, version),
    None => println!("{}", package.name),
  }

  for function in package.functions.values() {
    println!();
    println!("{}{}", function.token, if function.secret { " (secret)" } else { "" });
    if let Some(description) = &function.description {
      println!("  {}", description);
    }
    print_fields("inputs", &function.inputs);
    print_fields("outputs", &function.outputs);
  }

  Ok(())
}

fn print_fields(label: &str, fields: &[FieldSpec]) {
  if fields.is_empty() {
    return;
  }

  println!("  {}:", label);
  for field in fields {
    let mut line = format!("    {}: {}", field.name, field.kind);
    if field.required {
      line.push_str(" (required)");
    }
    if let Some(default) = &field.default {
      line.push_str(&format!(" = {}", default));
    }
    println!("{}", line);
  }
}

fn run_materialize(package_file: PathBuf, function: String) -> Result<()> {
  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async { run_materialize_async(package_file, function).await })
}

async fn run_materialize_async(package_file: PathBuf, token: String) -> Result<()> {
  let package = load_package(&package_file)?;
  let function = package
    .function(&token)
    .with_context(|| format!("function '{}' not found in package", token))?
    .clone();

  // Read arguments from stdin
  let args = read_args_from_stdin()?;
  debug!(fields = ?args.keys().collect::<Vec<_>>(), "arguments read");

  let record = collect_args(function, literal_inputs(args))
    .await
    .context("failed to materialize arguments")?;

  println!("{}", serde_json::to_string_pretty(&record.flatten())?);

  Ok(())
}

fn read_args_from_stdin() -> Result<ValueMap> {
  use std::io::IsTerminal;

  if io::stdin().is_terminal() {
    // No stdin pipe, no arguments
    return Ok(ValueMap::new());
  }

  let mut input = String::new();
  io::stdin()
    .read_to_string(&mut input)
    .context("failed to read arguments from stdin")?;

  if input.trim().is_empty() {
    return Ok(ValueMap::new());
  }

  let value: serde_json::Value =
    serde_json::from_str(&input).context("failed to parse arguments JSON from stdin")?;
  match value {
    serde_json::Value::Object(map) => Ok(map.into_iter().collect()),
    other => bail!("arguments must be a JSON object, got {}", other),
  }
}
