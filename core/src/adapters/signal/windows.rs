//! Windows signal delivery via `taskkill` and `tasklist`.
//!
//! Uses the following system commands:
//! - `taskkill /PID xxx` for graceful termination (sends WM_CLOSE)
//!   Console processes have no window to close; taskkill refuses them and
//!   the graceful step counts as delivered so the `/F` escalation still runs.
//! - `taskkill /PID xxx /F` for forced termination (TerminateProcess)
//! - `tasklist /FI "PID eq xxx" /NH /FO CSV` to check if the process is running

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::ports::{CommandOutput, CommandRunnerPort, Signal, SignalPort};

/// Maps the termination signals onto the Windows process utilities.
pub struct WindowsSignaller<R: CommandRunnerPort> {
    runner: R,
}

impl<R: CommandRunnerPort> WindowsSignaller<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    async fn taskkill(&self, pid: u32, force: bool) -> Result<()> {
        let mut args = vec!["/PID".to_string(), pid.to_string()];
        if force {
            args.push("/F".to_string());
        }

        let output = self.runner.run("taskkill", &args).await;
        if output.success() {
            return Ok(());
        }

        Err(classify_taskkill_failure(pid, &output))
    }

    async fn is_running(&self, pid: u32) -> Result<()> {
        let args = vec![
            "/FI".to_string(),
            format!("PID eq {}", pid),
            "/NH".to_string(),
            "/FO".to_string(),
            "CSV".to_string(),
        ];

        let output = self.runner.run("tasklist", &args).await;
        if !output.success() {
            warn!(pid = pid, exit_code = output.exit_code, "tasklist failed");
            return Err(Error::CommandFailed(output.stderr.trim().to_string()));
        }

        // CSV rows look like: "node.exe","1234","Console","1","45,000 K"
        let needle = format!("\"{}\"", pid);
        if output.stdout.lines().any(|line| line.contains(&needle)) {
            Ok(())
        } else {
            Err(Error::ProcessNotFound(pid))
        }
    }
}

/// Turn a failed taskkill run into the matching error.
fn classify_taskkill_failure(pid: u32, output: &CommandOutput) -> Error {
    let combined = format!("{} {}", output.stdout, output.stderr);

    if combined.contains("not found") || combined.contains("could not be found") {
        debug!(pid = pid, "Process not found");
        return Error::ProcessNotFound(pid);
    }

    if combined.contains("Access is denied") || combined.contains("access denied") {
        warn!(pid = pid, "Access denied to kill process");
        return Error::PermissionDenied(format!("cannot terminate process {}", pid));
    }

    Error::Signal {
        pid,
        reason: combined.trim().to_string(),
    }
}

/// taskkill without `/F` refuses windowless processes with
/// "can only be terminated forcefully (with /F option)".
fn requires_force(reason: &str) -> bool {
    reason.contains("terminated forcefully") || reason.contains("/F option")
}

impl<R: CommandRunnerPort> SignalPort for WindowsSignaller<R> {
    async fn send(&self, pid: u32, signal: Signal) -> Result<()> {
        debug!(pid = pid, signal = %signal, "Delivering signal");

        match signal {
            Signal::Graceful => match self.taskkill(pid, false).await {
                Err(Error::Signal { reason, .. }) if requires_force(&reason) => {
                    debug!(pid = pid, "Process only accepts forced termination");
                    Ok(())
                }
                result => result,
            },
            Signal::Probe => self.is_running(pid).await,
            Signal::Force => self.taskkill(pid, true).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::Terminator;
    use crate::domain::TerminationOutcome;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Runner that replays a fixed output and records invocations.
    struct ScriptedRunner {
        output: CommandOutput,
        calls: Mutex<Vec<(String, Vec<String>)>>,
    }

    impl ScriptedRunner {
        fn new(exit_code: i32, stdout: &str, stderr: &str) -> Self {
            Self {
                output: CommandOutput {
                    stdout: stdout.to_string(),
                    stderr: stderr.to_string(),
                    exit_code,
                },
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl CommandRunnerPort for ScriptedRunner {
        async fn run(&self, program: &str, args: &[String]) -> CommandOutput {
            self.calls
                .lock()
                .unwrap()
                .push((program.to_string(), args.to_vec()));
            self.output.clone()
        }
    }

    /// Runner that replays one output per invocation, in order.
    struct SequenceRunner {
        outputs: Mutex<VecDeque<CommandOutput>>,
        calls: Mutex<Vec<Vec<String>>>,
    }

    impl SequenceRunner {
        fn new(outputs: Vec<(i32, &str)>) -> Self {
            Self {
                outputs: Mutex::new(
                    outputs
                        .into_iter()
                        .map(|(exit_code, text)| CommandOutput {
                            stdout: text.to_string(),
                            stderr: String::new(),
                            exit_code,
                        })
                        .collect(),
                ),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl CommandRunnerPort for SequenceRunner {
        async fn run(&self, program: &str, args: &[String]) -> CommandOutput {
            let mut call = vec![program.to_string()];
            call.extend_from_slice(args);
            self.calls.lock().unwrap().push(call);
            self.outputs
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| CommandOutput::spawn_failed("no scripted output"))
        }
    }

    const FORCE_ONLY: &str = "ERROR: The process with PID 4242 could not be terminated.\r\n\
        Reason: This process can only be terminated forcefully (with /F option).";

    #[tokio::test]
    async fn test_graceful_accepts_force_only_refusal() {
        let signaller = WindowsSignaller::new(ScriptedRunner::new(1, FORCE_ONLY, ""));

        assert!(signaller.send(4242, Signal::Graceful).await.is_ok());
        assert!(matches!(
            signaller.send(4242, Signal::Force).await,
            Err(Error::Signal { pid: 4242, .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_console_process_escalates_to_force() {
        let runner = SequenceRunner::new(vec![
            (1, FORCE_ONLY),
            (0, "\"server.exe\",\"4242\",\"Console\",\"1\",\"12,000 K\"\r\n"),
            (0, "SUCCESS: The process with PID 4242 has been terminated."),
        ]);
        let terminator = Terminator::new(WindowsSignaller::new(runner));

        let outcome = terminator.terminate(4242).await;

        assert_eq!(outcome, TerminationOutcome::succeeded());
        let calls = terminator.signaller().runner.calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0], vec!["taskkill", "/PID", "4242"]);
        assert_eq!(calls[1][0], "tasklist");
        assert_eq!(calls[2], vec!["taskkill", "/PID", "4242", "/F"]);
    }

    #[tokio::test]
    async fn test_graceful_and_force_arguments() {
        let signaller = WindowsSignaller::new(ScriptedRunner::new(0, "SUCCESS", ""));

        signaller.send(42, Signal::Graceful).await.unwrap();
        signaller.send(42, Signal::Force).await.unwrap();

        let calls = signaller.runner.calls.lock().unwrap();
        assert_eq!(calls[0].0, "taskkill");
        assert_eq!(calls[0].1, vec!["/PID", "42"]);
        assert_eq!(calls[1].1, vec!["/PID", "42", "/F"]);
    }

    #[tokio::test]
    async fn test_taskkill_not_found() {
        let signaller = WindowsSignaller::new(ScriptedRunner::new(
            128,
            "",
            "ERROR: The process \"4242\" not found.",
        ));

        let result = signaller.send(4242, Signal::Graceful).await;
        assert!(matches!(result, Err(Error::ProcessNotFound(4242))));
    }

    #[tokio::test]
    async fn test_taskkill_access_denied() {
        let signaller = WindowsSignaller::new(ScriptedRunner::new(
            1,
            "",
            "ERROR: The process with PID 4 could not be terminated.\nReason: Access is denied.",
        ));

        let result = signaller.send(4, Signal::Graceful).await;
        assert!(matches!(result, Err(Error::PermissionDenied(_))));
    }

    #[tokio::test]
    async fn test_probe_finds_running_process() {
        let signaller = WindowsSignaller::new(ScriptedRunner::new(
            0,
            "\"node.exe\",\"1234\",\"Console\",\"1\",\"45,000 K\"\r\n",
            "",
        ));

        assert!(signaller.send(1234, Signal::Probe).await.is_ok());
        assert!(matches!(
            signaller.send(123, Signal::Probe).await,
            Err(Error::ProcessNotFound(123))
        ));
    }

    #[tokio::test]
    async fn test_probe_no_match() {
        let signaller = WindowsSignaller::new(ScriptedRunner::new(
            0,
            "INFO: No tasks are running which match the specified criteria.\r\n",
            "",
        ));

        assert!(signaller.send(1234, Signal::Probe).await.is_err());
    }
}
