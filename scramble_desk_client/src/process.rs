use std::ffi::OsStr;

use scramble_desk::{DeskError, Result};
use tokio::process::Command;
use tracing::debug;

/// Runs a program to completion. A spawn failure or non-zero exit is an external failure.
pub async fn run<I, S>(program: &str, args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|err| DeskError::ExternalFailure(format!("could not run {program}: {err}")))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DeskError::ExternalFailure(format!("{program} failed ({}): {}", output.status, stderr.trim())));
    }
    debug!(program, "subprocess finished");
    Ok(())
}

#[cfg(test)]
mod test {
    use super::run;

    #[tokio::test]
    async fn missing_program() {
        assert!(run("scramble-desk-no-such-program", ["--version"]).await.is_err());
    }
}
