use anyhow::{bail, Context, Result};
use clap::Parser;
use nftbot::protection::integrity::{
    generate_manifest, verify_baseline, EntryStatus, IntegrityBaseline,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "integrity_manifest")]
#[command(about = "Generate or verify the integrity manifest for an install", long_about = None)]
struct Args {
    /// Install root that file paths are relative to
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Manifest file to write (or read with --verify)
    #[arg(short, long, default_value = "integrity.json")]
    output: PathBuf,

    /// Re-hash the files listed in an existing manifest and report differences
    #[arg(long)]
    verify: bool,

    /// Files to include, relative to the root
    files: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.verify {
        return verify(&args);
    }

    if args.files.is_empty() {
        bail!("no files given; pass the paths to include relative to --root");
    }

    let manifest = generate_manifest(&args.root, &args.files)
        .with_context(|| format!("hashing files under {}", args.root.display()))?;
    manifest
        .save(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;

    println!(
        "Wrote {} ({} files, version {})",
        args.output.display(),
        manifest.files.len(),
        manifest.version
    );
    for (path, digest) in &manifest.files {
        println!("  {}  {}", digest, path);
    }
    Ok(())
}

fn verify(args: &Args) -> Result<()> {
    let manifest = IntegrityBaseline::load(&args.output)
        .with_context(|| format!("reading {}", args.output.display()))?;

    let statuses = verify_baseline(&args.root, &manifest);

    let (mut changed, mut missing) = (0, 0);
    for (path, status) in &statuses {
        match status {
            EntryStatus::Match => {}
            EntryStatus::Missing => {
                missing += 1;
                println!("MISSING  {} (skipped at runtime)", path);
            }
            EntryStatus::Changed { found } => {
                changed += 1;
                println!(
                    "CHANGED  {}\n  expected {}\n  found    {}",
                    path, manifest.files[path], found
                );
            }
        }
    }

    if changed > 0 {
        bail!("{} of {} files differ from the manifest", changed, statuses.len());
    }
    println!(
        "OK: {} files match {} ({} missing)",
        statuses.len() - missing,
        args.output.display(),
        missing
    );
    Ok(())
}
