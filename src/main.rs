//! `globenav` replays scripted input through the navigation controller and
//! prints the camera after each frame as JSON lines.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use globenav::options::NavigationOptions;
use globenav::replay::ReplayScript;

#[derive(Parser, Debug)]
#[command(name = "globenav", about = "Replay globe navigation input scripts")]
struct Args {
    /// Replay script (TOML, or JSON with a .json extension)
    script: Option<PathBuf>,

    /// Options preset overriding the script's [options] table
    #[arg(long)]
    options: Option<PathBuf>,

    /// Print every Nth frame (the last frame is always printed)
    #[arg(long, default_value_t = 1)]
    every: usize,

    /// Print the options JSON schema and exit
    #[arg(long)]
    schema: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if args.schema {
        let schema =
            serde_json::to_string_pretty(&NavigationOptions::json_schema())?;
        writeln!(out, "{schema}")?;
        return Ok(());
    }

    let Some(script_path) = args.script else {
        bail!("no replay script given (pass a path, or --schema)");
    };
    let mut script = ReplayScript::load(&script_path)
        .with_context(|| format!("loading {}", script_path.display()))?;
    if let Some(path) = &args.options {
        script.options = NavigationOptions::load(path)
            .with_context(|| format!("loading options {}", path.display()))?;
    }

    let records = script.run();
    log::info!(
        "replayed {} frames from {}",
        records.len(),
        script_path.display()
    );

    let every = args.every.max(1);
    let last = records.len().saturating_sub(1);
    for record in &records {
        if record.frame % every == 0 || record.frame == last {
            writeln!(out, "{}", serde_json::to_string(record)?)?;
        }
    }
    Ok(())
}
