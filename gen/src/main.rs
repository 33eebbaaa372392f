use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use rascent::{NoCustomError, ParseTables};
use rascent_gen::AscentGen;

/// Emit a recursive-ascent parser from an LALR(1) parsing-table artifact.
///
/// The parser source is written next to the artifact, as `<stem>_parser.rs`.
#[derive(Parser, Debug)]
#[command(name = "rascent-gen", version, about)]
struct Args {
    /// Path to the parsing-table artifact (JSON).
    tables: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let stem = args
        .tables
        .file_stem()
        .and_then(|stem| stem.to_str())
        .context("tables path has no file stem")?;
    let out_path = args.tables.with_file_name(format!("{stem}_parser.rs"));

    println!(
        "Creating parser \"{}\" -> \"{}\".",
        args.tables.display(),
        out_path.display()
    );

    let source = fs::read_to_string(&args.tables)
        .with_context(|| format!("could not open tables file \"{}\"", args.tables.display()))?;
    let tables = ParseTables::from_json::<NoCustomError>(&source)
        .with_context(|| format!("could not decode tables file \"{}\"", args.tables.display()))?;
    if !tables.infos.is_empty() {
        println!("{}", tables.infos);
    }

    let parser = AscentGen::new(&tables)
        .generate()
        .context("failed to emit the parser")?;
    fs::write(&out_path, parser)
        .with_context(|| format!("could not write parser \"{}\"", out_path.display()))?;

    Ok(())
}
