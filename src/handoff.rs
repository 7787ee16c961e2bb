use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context, Result};
use tracing::info;

/// Launches the downstream automation step once the export artifact is complete.
///
/// Fire-and-forget: the child is spawned and never waited on; its exit status is the
/// downstream system's concern. The command string is split on whitespace, so the
/// script path must not contain spaces.
pub fn launch(command: &str, artifact: &Path) -> Result<()> {
    let mut parts = command.split_whitespace();
    let program = match parts.next() {
        Some(p) => p,
        None => bail!("handoff command is empty"),
    };

    info!(
        "Launching handoff command '{}' (artifact: {})",
        command,
        artifact.display()
    );
    Command::new(program)
        .args(parts)
        .spawn()
        .with_context(|| format!("spawn handoff command '{}'", command))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_command_is_rejected() {
        assert!(launch("", Path::new("out.csv")).is_err());
        assert!(launch("   ", Path::new("out.csv")).is_err());
    }

    #[test]
    fn missing_program_fails_to_spawn() {
        let result = launch("definitely-not-a-real-program-xyz --flag", Path::new("out.csv"));
        assert!(result.is_err());
    }
}
