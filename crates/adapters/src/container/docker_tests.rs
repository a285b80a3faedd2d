// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::container::BindMount;
use parking_lot::Mutex;
use serial_test::serial;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Stand-in for the docker CLI: logs its arguments and answers per subcommand.
const FAKE_CLI: &str = r#"#!/bin/sh
echo "$@" >> "$(dirname "$0")/calls.log"
case "$1" in
  image) [ -f "$(dirname "$0")/present" ] ;;
  pull)
    [ -f "$(dirname "$0")/slow-pull" ] && sleep 1
    echo pulled
    ;;
  create) echo abc123 ;;
  start) exit 0 ;;
  wait) echo 3 ;;
  logs)
    if [ "$2" = "--follow" ]; then
      echo "line one"
      echo "line two" >&2
    else
      echo "all logs"
    fi
    ;;
  stop) exit 0 ;;
  rm) echo "Error: No such container: $3" >&2; exit 1 ;;
  *) echo "unknown command $1" >&2; exit 2 ;;
esac
"#;

fn fake_cli() -> (TempDir, DockerAdapter) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("docker");
    std::fs::write(&path, FAKE_CLI).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    let adapter = DockerAdapter::new().with_bin(path.display().to_string());
    (dir, adapter)
}

fn calls(dir: &Path) -> Vec<String> {
    std::fs::read_to_string(dir.join("calls.log"))
        .unwrap_or_default()
        .lines()
        .map(String::from)
        .collect()
}

fn spec() -> ContainerSpec {
    ContainerSpec {
        name: Some("vulcan-build".to_string()),
        image: "alpine:3.19".to_string(),
        workdir: "/workdir".to_string(),
        command: vec!["/bin/vexec".to_string(), "--job-id".to_string(), "build".to_string()],
        env: vec![("CI".to_string(), "true".to_string())],
        mounts: vec![BindMount::new("/home/u/proj/.vulcan", "/workdir/.vulcan")],
        extra_hosts: vec![("registry.local".to_string(), "10.0.0.5".to_string())],
    }
}

#[test]
fn create_args_place_options_before_image_and_command() {
    assert_eq!(
        create_args(&spec()),
        [
            "--name",
            "vulcan-build",
            "--workdir",
            "/workdir",
            "--env",
            "CI=true",
            "--mount",
            "type=bind,source=/home/u/proj/.vulcan,target=/workdir/.vulcan",
            "--add-host",
            "registry.local:10.0.0.5",
            "alpine:3.19",
            "/bin/vexec",
            "--job-id",
            "build",
        ]
    );
}

#[test]
fn create_args_skip_empty_optionals() {
    let spec = ContainerSpec {
        image: "busybox".to_string(),
        ..ContainerSpec::default()
    };
    assert_eq!(create_args(&spec), ["busybox"]);
}

#[tokio::test]
#[serial]
async fn lifecycle_commands_reach_the_cli() {
    let (dir, docker) = fake_cli();
    let id = docker.create(&spec()).await.unwrap();
    assert_eq!(id, "abc123");
    docker.start(&id).await.unwrap();
    assert_eq!(docker.wait(&id).await.unwrap(), 3);
    docker.stop(&id, Duration::from_secs(30)).await.unwrap();

    let calls = calls(dir.path());
    assert_eq!(calls[0], "image inspect --format {{.Id}} alpine:3.19");
    assert_eq!(calls[1], "pull alpine:3.19");
    assert!(calls[2].starts_with("create --name vulcan-build"), "{calls:?}");
    assert_eq!(calls[3], "start abc123");
    assert_eq!(calls[4], "wait abc123");
    assert_eq!(calls[5], "stop --time 30 abc123");
}

#[tokio::test]
#[serial]
async fn present_image_is_not_pulled() {
    let (dir, docker) = fake_cli();
    std::fs::write(dir.path().join("present"), "").unwrap();
    docker.create(&spec()).await.unwrap();

    let calls = calls(dir.path());
    assert_eq!(calls.len(), 2, "{calls:?}");
    assert!(calls[1].starts_with("create "), "{calls:?}");
}

#[tokio::test]
#[serial]
async fn pull_is_bounded_by_its_own_timeout() {
    let (dir, docker) = fake_cli();
    std::fs::write(dir.path().join("slow-pull"), "").unwrap();

    let docker = docker
        .with_timeout(Duration::from_millis(300))
        .with_pull_timeout(Duration::from_secs(10));
    assert_eq!(docker.create(&spec()).await.unwrap(), "abc123");

    let err = docker
        .with_pull_timeout(Duration::from_millis(300))
        .create(&spec())
        .await
        .unwrap_err();
    assert!(
        matches!(&err, ContainerError::CreateFailed(msg) if msg.contains("docker pull timed out")),
        "{err:?}"
    );
}

#[tokio::test]
#[serial]
async fn logs_concatenate_output() {
    let (_dir, docker) = fake_cli();
    assert_eq!(docker.logs("abc123").await.unwrap(), "all logs\n");
}

#[tokio::test]
#[serial]
async fn follow_logs_forwards_both_streams() {
    let (dir, docker) = fake_cli();
    let seen: Arc<Mutex<Vec<(LogStream, String)>>> = Arc::default();
    let sink_seen = Arc::clone(&seen);
    let sink: LogSink = Arc::new(move |stream: LogStream, line: &str| {
        sink_seen.lock().push((stream, line.to_string()));
    });
    docker.follow_logs("abc123", 20, sink).await.unwrap();

    let mut seen = seen.lock().clone();
    seen.sort_by_key(|(s, _)| *s == LogStream::Stderr);
    assert_eq!(
        seen,
        [
            (LogStream::Stdout, "line one".to_string()),
            (LogStream::Stderr, "line two".to_string()),
        ]
    );
    assert_eq!(calls(dir.path()), ["logs --follow --tail 20 abc123"]);
}

#[tokio::test]
#[serial]
async fn missing_container_maps_to_not_found() {
    let (_dir, docker) = fake_cli();
    let err = docker.remove("gone").await.unwrap_err();
    assert_eq!(err, ContainerError::NotFound("gone".to_string()));
}

#[tokio::test]
#[serial]
async fn missing_cli_is_a_create_failure() {
    let docker = DockerAdapter::new().with_bin("/nonexistent/docker");
    let err = docker.create(&spec()).await.unwrap_err();
    assert!(matches!(err, ContainerError::CreateFailed(_)), "{err:?}");
}

#[tokio::test]
#[serial]
async fn missing_cli_wait_is_a_wait_failure() {
    let docker = DockerAdapter::new().with_bin("/nonexistent/docker");
    let err = docker.wait("abc123").await.unwrap_err();
    assert!(matches!(err, ContainerError::WaitFailed(_)), "{err:?}");
}
