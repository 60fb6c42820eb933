//!
//! The benchmark executable runner.
//!

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::process::Stdio;
use std::time::Duration;
use std::time::Instant;

/// The child poll interval while a timeout is armed.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

///
/// A runner failure. A nonzero exit status is not one: it is surfaced in the
/// outcome and left to the caller's judgement.
///
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The executable could not be spawned.
    #[error("{executable:?} subprocess spawning error: {error}")]
    Spawn {
        /// The executable path.
        executable: PathBuf,
        /// The underlying IO error.
        error: std::io::Error,
    },
    /// The child's streams or status could not be collected.
    #[error("{executable:?} subprocess output error: {error}")]
    Output {
        /// The executable path.
        executable: PathBuf,
        /// The underlying IO error.
        error: std::io::Error,
    },
    /// The invocation exceeded the configured bound and was killed.
    #[error("{executable:?} timed out after {timeout:?} and was killed")]
    Timeout {
        /// The executable path.
        executable: PathBuf,
        /// The configured bound.
        timeout: Duration,
    },
}

///
/// The captured result of one executable invocation.
///
#[derive(Debug)]
pub struct RunOutcome {
    /// The captured standard output.
    pub stdout: String,
    /// The captured standard error.
    pub stderr: String,
    /// The exit status.
    pub status: ExitStatus,
}

///
/// The benchmark executable runner. Synchronous and blocking: exactly one
/// invocation is in flight at a time, so the benchmark's own timing
/// measurements are never perturbed by an overlapping sibling.
///
pub struct Runner {
    /// The executable path.
    executable: PathBuf,
    /// The directory the executable runs in; its side-effect files land here.
    working_directory: PathBuf,
    /// The per-invocation bound, if any.
    timeout: Option<Duration>,
}

impl Runner {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(executable: PathBuf, working_directory: PathBuf, timeout: Option<Duration>) -> Self {
        Self {
            executable,
            working_directory,
            timeout,
        }
    }

    ///
    /// Invokes the executable with the given arguments and captures its
    /// output. Blocks until the child exits or the timeout expires.
    ///
    pub fn invoke(&self, args: &[String]) -> Result<RunOutcome, RunnerError> {
        let mut command = std::process::Command::new(self.executable.as_path());
        command
            .args(args)
            .current_dir(self.working_directory.as_path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        match self.timeout {
            None => {
                let output = command.output().map_err(|error| RunnerError::Spawn {
                    executable: self.executable.clone(),
                    error,
                })?;
                Ok(RunOutcome {
                    stdout: String::from_utf8_lossy(output.stdout.as_slice()).to_string(),
                    stderr: String::from_utf8_lossy(output.stderr.as_slice()).to_string(),
                    status: output.status,
                })
            }
            Some(timeout) => self.invoke_bounded(command, timeout),
        }
    }

    ///
    /// Invokes with an armed timeout: the child is polled and killed on
    /// expiry. Streams are drained on reader threads, so a chatty child
    /// cannot fill a pipe and deadlock the poll loop.
    ///
    fn invoke_bounded(
        &self,
        mut command: std::process::Command,
        timeout: Duration,
    ) -> Result<RunOutcome, RunnerError> {
        let mut child = command.spawn().map_err(|error| RunnerError::Spawn {
            executable: self.executable.clone(),
            error,
        })?;

        let mut stdout_pipe = child.stdout.take().expect("Piped above");
        let mut stderr_pipe = child.stderr.take().expect("Piped above");
        let stdout_thread = std::thread::spawn(move || {
            let mut buffer = Vec::new();
            let _ = stdout_pipe.read_to_end(&mut buffer);
            buffer
        });
        let stderr_thread = std::thread::spawn(move || {
            let mut buffer = Vec::new();
            let _ = stderr_pipe.read_to_end(&mut buffer);
            buffer
        });

        let deadline = Instant::now() + timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        let _ = stdout_thread.join();
                        let _ = stderr_thread.join();
                        return Err(RunnerError::Timeout {
                            executable: self.executable.clone(),
                            timeout,
                        });
                    }
                    std::thread::sleep(POLL_INTERVAL);
                }
                Err(error) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(RunnerError::Output {
                        executable: self.executable.clone(),
                        error,
                    });
                }
            }
        };

        let stdout = stdout_thread.join().unwrap_or_default();
        let stderr = stderr_thread.join().unwrap_or_default();
        Ok(RunOutcome {
            stdout: String::from_utf8_lossy(stdout.as_slice()).to_string(),
            stderr: String::from_utf8_lossy(stderr.as_slice()).to_string(),
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use super::Runner;
    use super::RunnerError;

    #[test]
    fn captures_stdout_and_exit_status() {
        let runner = Runner::new(PathBuf::from("/bin/echo"), PathBuf::from("."), None);
        let outcome = runner
            .invoke(&["Tempo serial: 2.50s".to_owned()])
            .expect("Echo is runnable");
        assert!(outcome.status.success());
        assert!(outcome.stdout.contains("Tempo serial: 2.50s"));
    }

    #[test]
    fn nonzero_exit_is_an_outcome_not_an_error() {
        let runner = Runner::new(PathBuf::from("/bin/false"), PathBuf::from("."), None);
        let outcome = runner.invoke(&[]).expect("Launch succeeds");
        assert!(!outcome.status.success());
    }

    #[test]
    fn missing_executable_is_a_spawn_error() {
        let runner = Runner::new(
            PathBuf::from("./no-such-benchmark"),
            PathBuf::from("."),
            None,
        );
        assert!(matches!(
            runner.invoke(&[]),
            Err(RunnerError::Spawn { .. })
        ));
    }

    #[test]
    fn expired_timeout_kills_the_child() {
        let runner = Runner::new(
            PathBuf::from("/bin/sleep"),
            PathBuf::from("."),
            Some(Duration::from_millis(100)),
        );
        let started = std::time::Instant::now();
        let result = runner.invoke(&["10".to_owned()]);
        assert!(matches!(result, Err(RunnerError::Timeout { .. })));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn fast_child_beats_the_timeout() {
        let runner = Runner::new(
            PathBuf::from("/bin/echo"),
            PathBuf::from("."),
            Some(Duration::from_secs(10)),
        );
        let outcome = runner.invoke(&["done".to_owned()]).expect("Echo is fast");
        assert!(outcome.status.success());
        assert!(outcome.stdout.contains("done"));
    }
}
