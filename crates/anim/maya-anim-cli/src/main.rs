//! maya-anim: batch front-end for `maya-anim-core`.

mod cli_args;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use cli_args::{Cli, Commands};
use maya_anim_core::{
    discover_inputs, read_inputs, run_batch, AnimParser, Assembler, BonePathMapping,
    ChannelTable, Config, JsonDirStore, MissingBonePolicy,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            log::error!("{err:#}");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    // RUST_LOG still wins when set.
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Returns `Ok(false)` when the command ran but some file failed.
fn run(command: Commands) -> Result<bool> {
    match command {
        Commands::Convert {
            input_dir,
            bone_paths,
            output_dir,
            config,
            abort_on_missing_bone,
            quaternion_continuity,
        } => {
            let mut cfg = match config {
                Some(path) => Config::load(&path)?,
                None => Config::default(),
            };
            if abort_on_missing_bone {
                cfg.missing_bone = MissingBonePolicy::AbortBatch;
            }
            if quaternion_continuity {
                cfg.quaternion_continuity = true;
            }
            let bone_paths = bone_paths.unwrap_or_else(|| input_dir.join(&cfg.bone_path_file));
            let output_dir = output_dir.unwrap_or_else(|| input_dir.join(&cfg.output_dir));
            convert(&input_dir, &bone_paths, &output_dir, &cfg)
        }
        Commands::Inspect { file, bone_paths } => {
            inspect(&file, &bone_paths)?;
            Ok(true)
        }
    }
}

fn convert(input_dir: &Path, bone_paths: &Path, output_dir: &Path, cfg: &Config) -> Result<bool> {
    let mapping = BonePathMapping::load(bone_paths)?;
    let files = discover_inputs(input_dir, &cfg.input_extension)?;
    if files.is_empty() {
        log::warn!(
            "no .{} files found in {}",
            cfg.input_extension,
            input_dir.display()
        );
    }
    let inputs = read_inputs(&files)?;
    let mut store = JsonDirStore::new(output_dir);
    let report = run_batch(&inputs, &ChannelTable::default(), &mapping, &mut store, cfg)
        .context("batch aborted")?;

    println!(
        "converted {} file(s) into {}",
        report.converted.len(),
        output_dir.display()
    );
    for (name, reason) in &report.failed {
        println!("failed {name}: {reason}");
    }
    if !report.missing_bones.is_empty() {
        println!("bones without a path: {}", report.missing_bones.join(", "));
    }
    Ok(report.failed.is_empty())
}

fn inspect(file: &Path, bone_paths: &Path) -> Result<()> {
    let mapping = BonePathMapping::load(bone_paths)?;
    let inputs = read_inputs(&[PathBuf::from(file)])?;
    let input = inputs
        .into_iter()
        .next()
        .context("no input was read")?;

    let table = ChannelTable::default();
    let doc = AnimParser::new(&table).parse(&input.name, &input.text)?;
    let clip = Assembler::new(&mapping, &Config::default()).assemble(doc)?;
    println!("{}", serde_json::to_string_pretty(&clip)?);
    Ok(())
}
