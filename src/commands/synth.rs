use anyhow::{Context, Result};
use serde_json::json;

use terrastack::config::Config;
use terrastack::presentation::output::emit;
use terrastack::{App, StackFile};

pub fn cmd_synth(stack_file: &StackFile, config: &Config, json: bool) -> Result<()> {
    if json {
        emit(json!({
            "event": "start",
            "command": "synth",
            "stack": stack_file.stack.name,
            "outdir": config.outdir.display().to_string(),
        }))?;
    }

    let mut app = App::new(&config.outdir);
    let stack = stack_file
        .build(&app)
        .with_context(|| format!("failed to build stack '{}'", stack_file.stack.name))?;
    app.add_stack(stack)?;
    let report = app.synth()?;

    if json {
        emit(json!({
            "event": "complete",
            "command": "synth",
            "data": report,
        }))?;
        return Ok(());
    }

    for stack in &report.stacks {
        println!(
            "{}: {} resource(s), {} asset(s), {} output(s)",
            stack.name, stack.resources, stack.assets, stack.outputs
        );
        println!("  plan     {}", stack.plan_path.display());
    }
    println!("manifest   {}", report.manifest_path.display());
    Ok(())
}
