//! terrastack CLI - declare Terraform stacks and package their assets
//!
//! Usage: terrastack <COMMAND>
//!
//! Commands:
//!   package  Hash and stage a single asset
//!   synth    Build the stack declared in a stack file and write its plan

mod commands;

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use terrastack::application::STACK_FILE_NAME;
use terrastack::config::{self, Config, ENV_LOG};
use terrastack::infrastructure::fs::user_config_dir;
use terrastack::presentation::output::report_warnings;
use terrastack::presentation::{Cli, Commands};
use terrastack::StackFile;

use commands::package::{cmd_package, PackageArgs};
use commands::synth::cmd_synth;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Package {
            path,
            asset_type,
            staging,
            hash_only,
        } => {
            let project = config::project_section(Path::new(STACK_FILE_NAME))?;
            let (config, warnings) = config::load(project.as_ref())?;
            init_logging(&cli, &config);
            report_warnings(&warnings, cli.json)?;

            let args = PackageArgs {
                path: path.clone(),
                asset_type: *asset_type,
                staging: staging.clone(),
                hash_only: *hash_only,
            };
            cmd_package(&args, &config, cli.json)
        }
        Commands::Synth { file, outdir } => {
            let (stack_file, mut warnings) = StackFile::load(file)?;
            let (mut config, user_warnings) = config::load(Some(&stack_file.app))?;
            warnings.extend(user_warnings);
            if let Some(outdir) = outdir {
                config.outdir = outdir.clone();
            }
            init_logging(&cli, &config);
            report_warnings(&warnings, cli.json)?;

            cmd_synth(&stack_file, &config, cli.json)
        }
    }
}

/// Install the stderr subscriber and log the resolved configuration.
///
/// `-v` flags win over `TERRASTACK_LOG`, which is already folded into
/// `config.log` together with the config file layers.
fn init_logging(cli: &Cli, config: &Config) {
    let directive = cli.log_level().unwrap_or(config.log.as_str());
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| {
        eprintln!("warning: invalid {} filter '{}', using 'warn'", ENV_LOG, directive);
        EnvFilter::new("warn")
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!(
        outdir = %config.outdir.display(),
        log = %config.log,
        user_config_dir = ?user_config_dir(),
        "resolved configuration"
    );
}
