//! Local ollama process backend.

use std::io::Read;
use std::process::{Child, Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::error::OracleError;
use crate::{Result, TextOracle, DEFAULT_MODEL};

/// Backend invoking `ollama run <model> <prompt>` once per completion.
///
/// Each call spawns a fresh process. The model server behind `ollama` is a
/// single shared resource, so callers should not fan completions out in
/// parallel.
///
/// With a timeout set, a process that has not exited by the deadline is
/// killed and the call fails with [`OracleError::Timeout`].
#[derive(Debug, Clone)]
pub struct OllamaOracle {
    program: String,
    model: String,
    timeout: Option<Duration>,
}

/// Interval between exit checks while a deadline is running.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

impl OllamaOracle {
    /// Create a backend using the `ollama` binary on `PATH`.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            program: "ollama".to_string(),
            model: model.into(),
            timeout: None,
        }
    }

    /// Use a different executable (e.g. an absolute path or a wrapper script).
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Kill the process when it runs longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for OllamaOracle {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL)
    }
}

impl TextOracle for OllamaOracle {
    fn complete(&self, prompt: &str) -> Result<String> {
        debug!(
            "Running {} run {} ({} prompt chars)",
            self.program,
            self.model,
            prompt.chars().count()
        );

        let mut command = Command::new(&self.program);
        command
            .arg("run")
            .arg(&self.model)
            .arg(prompt)
            .stdin(Stdio::null());

        let spawn_error = |source| OracleError::Spawn {
            program: self.program.clone(),
            source,
        };

        let output = match self.timeout {
            None => command.output().map_err(spawn_error)?,
            Some(limit) => {
                let child = command
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped())
                    .spawn()
                    .map_err(spawn_error)?;
                wait_with_deadline(child, limit)?
            }
        };

        if !output.status.success() {
            return Err(OracleError::ExitStatus {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!("Oracle returned {} chars", stdout.len());

        Ok(stdout)
    }

    fn name(&self) -> &str {
        &self.program
    }
}

/// Collect a child's output, killing it once `limit` has passed.
///
/// Pipes are drained on reader threads so a chatty child cannot block on a
/// full pipe. After a kill the readers are left behind: grandchildren may
/// still hold the pipes open.
fn wait_with_deadline(mut child: Child, limit: Duration) -> Result<Output> {
    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);
    let deadline = Instant::now() + limit;

    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if Instant::now() >= deadline {
            warn!("Oracle process {} timed out after {:?}, killing it", child.id(), limit);
            // The child may exit between the check and the kill.
            let _ = child.kill();
            child.wait()?;
            return Err(OracleError::Timeout(limit));
        }
        thread::sleep(POLL_INTERVAL);
    };

    let collect = |reader: Option<thread::JoinHandle<Vec<u8>>>| {
        reader.and_then(|r| r.join().ok()).unwrap_or_default()
    };

    Ok(Output {
        status,
        stdout: collect(stdout),
        stderr: collect(stderr),
    })
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        buf
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let oracle = OllamaOracle::default();
        assert_eq!(oracle.program(), "ollama");
        assert_eq!(oracle.model(), DEFAULT_MODEL);
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let oracle = OllamaOracle::new("m").with_program("docval-definitely-not-installed");
        let err = oracle.complete("prompt").unwrap_err();
        assert!(matches!(err, OracleError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_exit_status() {
        let oracle = OllamaOracle::new("m").with_program("false");
        let err = oracle.complete("prompt").unwrap_err();
        assert!(matches!(err, OracleError::ExitStatus { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_stdout_is_trimmed() {
        // `echo run <model> <prompt>` stands in for the real binary.
        let oracle = OllamaOracle::new("m").with_program("echo");
        assert_eq!(oracle.complete("{\"a\": 1}").unwrap(), "run m {\"a\": 1}");
    }

    #[cfg(unix)]
    #[test]
    fn test_output_within_deadline() {
        let oracle = OllamaOracle::new("m")
            .with_program("echo")
            .with_timeout(Duration::from_secs(10));
        assert_eq!(oracle.complete("hi").unwrap(), "run m hi");
    }

    #[cfg(unix)]
    #[test]
    fn test_slow_process_is_killed() {
        // `sleep run m 5` fails on its arguments, so use a shell.
        let dir = std::env::temp_dir().join(format!("docval-oracle-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let script = dir.join("slow.sh");
        std::fs::write(&script, "#!/bin/sh\nexec sleep 5\n").unwrap();
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        }

        let oracle = OllamaOracle::new("m")
            .with_program(script.to_string_lossy())
            .with_timeout(Duration::from_millis(300));

        let start = Instant::now();
        let err = oracle.complete("prompt").unwrap_err();
        assert!(matches!(err, OracleError::Timeout(_)), "{}", err);
        assert!(start.elapsed() < Duration::from_secs(4));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
