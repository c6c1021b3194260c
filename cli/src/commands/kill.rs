//! Kill command - terminate every process listening on a port.

use std::io::Write;

use anyhow::Result;

use super::{Deps, EXIT_FAILURE, EXIT_OK};

pub async fn run<D: Deps>(
    deps: &D,
    port: u16,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<u8> {
    let matches: Vec<_> = deps
        .list()
        .await
        .into_iter()
        .filter(|r| r.port == port)
        .collect();

    if matches.is_empty() {
        writeln!(err, "No process found on port {}", port)?;
        return Ok(EXIT_FAILURE);
    }

    let mut any_failure = false;
    for record in &matches {
        let outcome = deps.terminate(record.pid).await;
        if outcome.success {
            writeln!(
                out,
                "Killed PID {} (port {}, {})",
                record.pid, record.port, record.command
            )?;
        } else {
            any_failure = true;
            writeln!(
                err,
                "Failed to kill PID {} (port {}): {}",
                record.pid,
                record.port,
                outcome.error.as_deref().unwrap_or("unknown error")
            )?;
        }
    }

    Ok(if any_failure { EXIT_FAILURE } else { EXIT_OK })
}

#[cfg(test)]
mod tests {
    use super::super::testing::{record, FakeDeps};
    use super::*;

    async fn kill(deps: &FakeDeps, port: u16) -> (u8, String, String) {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let status = run(deps, port, &mut out, &mut err).await.unwrap();
        (
            status,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_kills_matching_processes() {
        let deps = FakeDeps {
            records: vec![
                record(99, "node", "alice", 3001),
                record(100, "node", "alice", 3001),
                record(5, "sshd", "root", 22),
            ],
            ..FakeDeps::default()
        };

        let (status, out, err) = kill(&deps, 3001).await;

        assert_eq!(status, EXIT_OK);
        assert!(out.contains("Killed PID 99 (port 3001, node)"));
        assert!(out.contains("Killed PID 100 (port 3001, node)"));
        assert!(err.is_empty());
        assert_eq!(*deps.terminated.borrow(), vec![99, 100]);
    }

    #[tokio::test]
    async fn test_no_process_on_port() {
        let deps = FakeDeps::default();

        let (status, out, err) = kill(&deps, 4000).await;

        assert_eq!(status, EXIT_FAILURE);
        assert!(out.is_empty());
        assert_eq!(err, "No process found on port 4000\n");
        assert!(deps.terminated.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_failure_sets_status() {
        let mut deps = FakeDeps {
            records: vec![record(1, "launchd", "root", 80), record(2, "nginx", "www", 80)],
            ..FakeDeps::default()
        };
        deps.failures
            .insert(1, "Permission denied: cannot send SIGTERM to process 1".to_string());

        let (status, out, err) = kill(&deps, 80).await;

        assert_eq!(status, EXIT_FAILURE);
        assert!(err.contains("Failed to kill PID 1 (port 80): Permission denied"));
        assert!(out.contains("Killed PID 2 (port 80, nginx)"));
    }
}
