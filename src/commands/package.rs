use std::path::{Path, PathBuf};

use anyhow::Result;
use serde_json::json;

use terrastack::config::Config;
use terrastack::domain::ports::Packager;
use terrastack::presentation::output::emit;
use terrastack::{AssetType, LocalPackager, ASSETS_DIR};

pub struct PackageArgs {
    pub path: PathBuf,
    pub asset_type: AssetType,
    pub staging: Option<PathBuf>,
    pub hash_only: bool,
}

pub fn cmd_package(args: &PackageArgs, config: &Config, json: bool) -> Result<()> {
    let packager = LocalPackager::new();

    if args.hash_only {
        let hash = packager.hash(&args.path, args.asset_type)?;
        if json {
            emit(json!({
                "event": "complete",
                "command": "package",
                "source": args.path.display().to_string(),
                "type": args.asset_type.as_str(),
                "hash": hash.as_str(),
            }))?;
        } else {
            println!("{}", hash);
        }
        return Ok(());
    }

    let staging = staging_dir(args.staging.as_deref(), &config.outdir);
    let artifact = packager.package(&args.path, args.asset_type, &staging)?;

    if json {
        emit(json!({
            "event": "complete",
            "command": "package",
            "source": args.path.display().to_string(),
            "type": args.asset_type.as_str(),
            "hash": artifact.hash.as_str(),
            "fileName": artifact.file_name,
            "stagedPath": artifact.staged_path.display().to_string(),
        }))?;
    } else {
        println!("{}  {}", artifact.file_name, artifact.hash);
        println!("staged at {}", artifact.staged_path.display());
    }
    Ok(())
}

fn staging_dir(explicit: Option<&Path>, outdir: &Path) -> PathBuf {
    match explicit {
        Some(dir) => dir.to_path_buf(),
        None => outdir.join(ASSETS_DIR),
    }
}
