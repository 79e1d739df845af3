//! Unit tests for the OpenSSH adapters.

use std::path::{Path, PathBuf};

use jhub_cli::application::ports::{KeyGenerator, RemoteShell};
use jhub_cli::domain::{ProvisionError, SshTarget};
use jhub_cli::infra::ssh::OpenSsh;

use crate::helpers::{MockCommandRunner, err_output};

fn target() -> SshTarget {
    SshTarget {
        host: "foo.centralus.cloudapp.azure.com".to_string(),
        user: "jupyterhub".to_string(),
        identity: PathBuf::from("foo/id_rsa"),
        clear_agent_socket: true,
    }
}

#[tokio::test]
async fn test_keygen_runs_unencrypted_rsa_generation() {
    let runner = MockCommandRunner::new();
    OpenSsh::new(runner.clone())
        .generate_key_pair(Path::new("foo/id_rsa"))
        .await
        .expect("keygen");

    let calls = runner.recorded_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "ssh-keygen");
    assert_eq!(calls[0].1, vec!["-t", "rsa", "-N", "", "-f", "foo/id_rsa"]);
}

#[tokio::test]
async fn test_keygen_failure_is_command_failed() {
    let runner = MockCommandRunner::new().then(err_output(1, b"Saving key failed"));
    let err = OpenSsh::new(runner)
        .generate_key_pair(Path::new("foo/id_rsa"))
        .await
        .expect_err("keygen fails");

    assert!(matches!(
        err.downcast_ref::<ProvisionError>(),
        Some(ProvisionError::CommandFailed { program, .. }) if program == "ssh-keygen"
    ));
    assert!(err.to_string().contains("Saving key failed"));
}

#[tokio::test]
async fn test_exec_passes_options_host_and_command() {
    let runner = MockCommandRunner::new();
    OpenSsh::new(runner.clone())
        .exec(&target(), "git clone https://github.com/ryanlovett/data100.git")
        .await
        .expect("exec");

    let calls = runner.recorded_calls();
    assert_eq!(calls.len(), 1);
    let (program, args, _) = &calls[0];
    assert_eq!(program, "ssh");
    assert_eq!(
        args,
        &vec![
            "-i",
            "foo/id_rsa",
            "-o",
            "UserKnownHostsFile=/dev/null",
            "-o",
            "StrictHostKeyChecking=no",
            "-o",
            "PreferredAuthentications=publickey",
            "-o",
            "User=jupyterhub",
            "foo.centralus.cloudapp.azure.com",
            "git clone https://github.com/ryanlovett/data100.git",
        ]
    );
}

#[tokio::test]
async fn test_exec_clears_agent_socket_for_the_invocation() {
    let runner = MockCommandRunner::new();
    OpenSsh::new(runner.clone())
        .exec(&target(), "true")
        .await
        .expect("exec");

    let calls = runner.recorded_calls();
    assert_eq!(
        calls[0].2,
        vec![("SSH_AUTH_SOCK".to_string(), String::new())]
    );
}

#[tokio::test]
async fn test_exec_keeps_environment_when_agent_allowed() {
    let runner = MockCommandRunner::new();
    let mut target = target();
    target.clear_agent_socket = false;
    OpenSsh::new(runner.clone())
        .exec(&target, "true")
        .await
        .expect("exec");

    assert!(runner.recorded_calls()[0].2.is_empty());
}

#[tokio::test]
async fn test_exec_non_zero_exit_is_remote_command_failed() {
    let runner = MockCommandRunner::new().with_status(255);
    let err = OpenSsh::new(runner)
        .exec(&target(), "true")
        .await
        .expect_err("ssh fails");

    let Some(ProvisionError::RemoteCommandFailed {
        host,
        command,
        code,
    }) = err.downcast_ref::<ProvisionError>()
    else {
        panic!("expected RemoteCommandFailed, got {err:#}");
    };
    assert_eq!(host, "foo.centralus.cloudapp.azure.com");
    assert_eq!(command, "true");
    assert_eq!(code, "exit code 255");
}
