//! Output Rendering
//!
//! `--json` mode prints one JSON object per line (NDJSON). Human-readable
//! text goes to stdout, diagnostics go to stderr through `tracing`.

use std::io::{self, Write};

use serde_json::Value;

use crate::config::ConfigWarning;

/// Write a single NDJSON event (one JSON object per line).
pub fn write_event(out: &mut impl Write, event: &Value) -> io::Result<()> {
    let line = serde_json::to_string(event).map_err(io::Error::other)?;
    out.write_all(line.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Convenience helper that writes to stdout.
pub fn emit(event: Value) -> io::Result<()> {
    let mut out = io::stdout().lock();
    write_event(&mut out, &event)
}

/// Print config warnings to stderr (or as events in JSON mode).
pub fn report_warnings(warnings: &[ConfigWarning], json: bool) -> io::Result<()> {
    for warning in warnings {
        if json {
            emit(serde_json::json!({
                "event": "warning",
                "key": warning.key,
                "file": warning.file.display().to_string(),
                "line": warning.line,
                "suggestion": warning.suggestion,
                "message": warning.to_string(),
            }))?;
        } else {
            eprintln!("warning: {}", warning);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn write_event_emits_one_line() {
        let mut buf = Vec::new();
        write_event(&mut buf, &serde_json::json!({"event": "start"})).unwrap();
        write_event(&mut buf, &serde_json::json!({"event": "complete"})).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines, vec![r#"{"event":"start"}"#, r#"{"event":"complete"}"#]);
    }

    #[test]
    fn warnings_render_with_location() {
        let warning = ConfigWarning {
            key: "outdri".to_string(),
            file: PathBuf::from("terrastack.toml"),
            line: Some(3),
            suggestion: Some("outdir".to_string()),
        };
        assert_eq!(
            warning.to_string(),
            "unknown key 'outdri' in terrastack.toml:3 (did you mean 'outdir'?)"
        );
    }
}
