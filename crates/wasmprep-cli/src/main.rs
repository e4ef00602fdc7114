use std::{
    fs,
    io::{self, Read, Write},
    path::PathBuf,
};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::info;
use wasmprep_rewrite::{prepare, result::decode_base64};
use wasmprep_types::{LocalMemoryPolicy, PrepareOptions};

/// Rewrite a WebAssembly module so its only memory is the host-supplied
/// `env.memory` import.
#[derive(Parser, Debug)]
#[command(name = "wasmprep", version, about)]
struct Args {
    /// Input .wasm file, or `-` for stdin
    input: String,

    /// Where to write the prepared module (stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Treat the input as base64 text
    #[arg(long)]
    base64: bool,

    /// JSON file with rewrite options
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Drop local memory declarations instead of failing
    #[arg(long)]
    discard_local_memory: bool,

    /// Validate the prepared module before writing it
    #[arg(long)]
    validate: bool,

    /// Print rewrite statistics as JSON on stderr
    #[arg(long)]
    stats: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::new()
            .filter_or("WASMPREP_LOG", "warn")
            .write_style("WASMPREP_LOG_STYLE"),
    )
    .init();

    let args = Args::parse();
    let options = load_options(&args)?;

    let input = read_input(&args.input)?;
    let wasm = if args.base64 {
        let text = String::from_utf8(input).context("base64 input is not UTF-8")?;
        decode_base64(&text)
            .with_context(|| format!("failed to decode base64 '{}'", args.input))?
    } else {
        input
    };

    let prepared = prepare(&wasm, &options)
        .with_context(|| format!("failed to prepare '{}'", args.input))?;
    info!(
        "prepared '{}': {} -> {} bytes",
        args.input,
        wasm.len(),
        prepared.wasm.len()
    );

    if args.stats {
        eprintln!("{}", serde_json::to_string_pretty(&prepared.stats)?);
    }

    match &args.output {
        Some(path) => fs::write(path, &prepared.wasm)
            .with_context(|| format!("failed to write '{}'", path.display()))?,
        None => io::stdout()
            .lock()
            .write_all(&prepared.wasm)
            .context("failed to write to stdout")?,
    }
    Ok(())
}

/// Options from `--config`, then command-line overrides.
fn load_options(args: &Args) -> Result<PrepareOptions> {
    let mut options = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read config '{}'", path.display()))?;
            PrepareOptions::from_json(&json)
                .with_context(|| format!("invalid config '{}'", path.display()))?
        }
        None => PrepareOptions::default(),
    };
    if args.discard_local_memory {
        options.local_memory = LocalMemoryPolicy::Discard;
    }
    if args.validate {
        options.validate_output = true;
    }
    Ok(options)
}

fn read_input(input: &str) -> Result<Vec<u8>> {
    if input == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    fs::read(input).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => anyhow!("Module '{}' not found", input),
        _ => anyhow::Error::new(err).context(format!("failed to read '{}'", input)),
    })
}
