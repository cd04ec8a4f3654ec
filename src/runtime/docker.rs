//! Docker CLI backend
//!
//! Listings use `--format '{{json .}}'` so each line is one JSON record.

use crate::image::version::{is_image_repository, Version, IMAGE_REPOSITORY};
use crate::runtime::gateway::{
    ContainerFilter, ContainerRecord, ImageRecord, RunSpec, RuntimeGateway,
};
use crate::{GrokError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Overrides the runtime binary, e.g. `podman`
pub const DOCKER_BIN_ENV: &str = "GROKMAN_DOCKER";

const JSON_FORMAT: &str = "{{json .}}";

/// One line of `docker images --format '{{json .}}'`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ImageLine {
    repository: String,
    tag: String,
    #[serde(rename = "ID")]
    id: String,
    #[serde(default)]
    size: String,
    #[serde(default)]
    created_since: String,
}

/// One line of `docker ps --format '{{json .}}'`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ContainerLine {
    #[serde(rename = "ID")]
    id: String,
    image: String,
    #[serde(default)]
    names: String,
    #[serde(default)]
    state: String,
}

/// Talks to the container runtime through its command line
#[derive(Debug, Clone)]
pub struct DockerCli {
    bin: PathBuf,
}

impl DockerCli {
    /// Use `$GROKMAN_DOCKER`, or `docker` from `PATH`
    pub fn from_env() -> Self {
        let bin = std::env::var_os(DOCKER_BIN_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("docker"));
        Self::new(bin)
    }

    pub fn new(bin: impl AsRef<Path>) -> Self {
        Self {
            bin: bin.as_ref().to_path_buf(),
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        tracing::debug!("Running {} {}", self.bin.display(), args.join(" "));
        let mut cmd = Command::new(&self.bin);
        cmd.args(args);
        cmd
    }

    /// Run a command and return its stdout
    async fn capture(&self, args: &[&str]) -> Result<String> {
        let output = self
            .command(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GrokError::Runtime(format!(
                "`{} {}` failed: {}",
                self.bin.display(),
                args.join(" "),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run a command with output passed through to the terminal
    async fn passthrough(&self, args: &[&str]) -> Result<()> {
        let status = self
            .command(args)
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if !status.success() {
            return Err(GrokError::Runtime(format!(
                "`{} {}` exited with {}",
                self.bin.display(),
                args.join(" "),
                status
            )));
        }
        Ok(())
    }

    fn spawn_error(&self, e: std::io::Error) -> GrokError {
        GrokError::Runtime(format!(
            "could not execute {}: {} (set {} to use another runtime)",
            self.bin.display(),
            e,
            DOCKER_BIN_ENV
        ))
    }
}

impl RuntimeGateway for DockerCli {
    async fn list_images(&self) -> Result<Vec<ImageRecord>> {
        let stdout = self
            .capture(&["images", "--format", JSON_FORMAT, IMAGE_REPOSITORY])
            .await?;
        parse_images(&stdout)
    }

    async fn list_containers(&self, filter: &ContainerFilter) -> Result<Vec<ContainerRecord>> {
        let mut args = vec!["ps", "--no-trunc", "--format", JSON_FORMAT];
        if !filter.running_only {
            args.push("--all");
        }
        let stdout = self.capture(&args).await?;
        let containers = parse_containers(&stdout)?;
        Ok(containers.into_iter().filter(|c| filter.matches(c)).collect())
    }

    async fn build(&self, version: &Version, context: &Path) -> Result<()> {
        let tag = version.image_ref();
        let context = context.to_string_lossy();
        self.passthrough(&["build", "--tag", &tag, &context]).await
    }

    async fn run(&self, spec: &RunSpec) -> Result<String> {
        let volume = spec.volume_arg();
        let publish = spec.publish_arg();
        let image = spec.version.image_ref();
        let stdout = self
            .capture(&[
                "run", "--detach", "--volume", &volume, "--publish", &publish, &image,
            ])
            .await?;
        Ok(stdout.trim().to_string())
    }

    async fn stop(&self, container_id: &str) -> Result<()> {
        self.capture(&["stop", container_id]).await.map(drop)
    }

    async fn remove_container(&self, container_id: &str) -> Result<()> {
        self.capture(&["rm", "--force", container_id])
            .await
            .map(drop)
    }

    async fn remove_image(&self, version: &Version) -> Result<()> {
        let image = version.image_ref();
        self.capture(&["rmi", &image]).await.map(drop)
    }
}

/// Parse image listing output, keeping tagged OpenGrok images only
fn parse_images(stdout: &str) -> Result<Vec<ImageRecord>> {
    let mut images = Vec::new();
    for line in stdout.lines().filter(|l| !l.trim().is_empty()) {
        let parsed: ImageLine = serde_json::from_str(line)?;
        if !is_image_repository(&parsed.repository) {
            continue;
        }
        let Some(version) = Version::from_tag(&parsed.tag) else {
            continue;
        };
        images.push(ImageRecord {
            version,
            id: parsed.id,
            size: parsed.size,
            created_since: parsed.created_since,
        });
    }
    images.sort_by(|a, b| a.version.cmp(&b.version));
    Ok(images)
}

fn parse_containers(stdout: &str) -> Result<Vec<ContainerRecord>> {
    stdout
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|line| -> Result<ContainerRecord> {
            let parsed: ContainerLine = serde_json::from_str(line)?;
            Ok(ContainerRecord {
                id: parsed.id,
                image: parsed.image,
                names: parsed.names,
                state: parsed.state,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGES: &str = r#"{"Containers":"N/A","CreatedAt":"2024-05-02 10:11:12 +0200 CEST","CreatedSince":"2 weeks ago","Digest":"<none>","ID":"3f1a2b4c5d6e","Repository":"opengrok","SharedSize":"N/A","Size":"812MB","Tag":"1.13.7","UniqueSize":"N/A","VirtualSize":"812MB"}
{"Containers":"N/A","CreatedAt":"2024-04-01 09:00:00 +0200 CEST","CreatedSince":"6 weeks ago","Digest":"<none>","ID":"aa11bb22cc33","Repository":"opengrok","SharedSize":"N/A","Size":"790MB","Tag":"<none>","UniqueSize":"N/A","VirtualSize":"790MB"}
{"Containers":"N/A","CreatedAt":"2024-03-01 09:00:00 +0200 CEST","CreatedSince":"2 months ago","Digest":"<none>","ID":"0123456789ab","Repository":"opengrok","SharedSize":"N/A","Size":"780MB","Tag":"1.12.0","UniqueSize":"N/A","VirtualSize":"780MB"}
"#;

    const CONTAINERS: &str = r#"{"Command":"\"/scripts/start.py\"","CreatedAt":"2024-05-02 11:00:00 +0200 CEST","ID":"c0ffee","Image":"opengrok:1.13.7","Labels":"","LocalVolumes":"1","Mounts":"/home/me/src","Names":"eager_bohr","Networks":"bridge","Ports":"0.0.0.0:8080->8080/tcp","RunningFor":"2 hours ago","Size":"0B","State":"running","Status":"Up 2 hours"}
{"Command":"\"docker-entrypoint.s…\"","CreatedAt":"2024-05-01 08:00:00 +0200 CEST","ID":"deadbeef","Image":"postgres:16","Labels":"","LocalVolumes":"1","Mounts":"","Names":"db","Networks":"bridge","Ports":"","RunningFor":"1 day ago","Size":"0B","State":"exited","Status":"Exited (0) 1 day ago"}"#;

    #[test]
    fn test_parse_images_skips_untagged() {
        let images = parse_images(IMAGES).unwrap();
        let versions: Vec<_> = images.iter().map(|i| i.version.as_str()).collect();
        assert_eq!(versions, vec!["1.12.0", "1.13.7"]);
        assert_eq!(images[1].id, "3f1a2b4c5d6e");
        assert_eq!(images[1].size, "812MB");
        assert_eq!(images[1].created_since, "2 weeks ago");
    }

    #[test]
    fn test_parse_images_podman_localhost() {
        let line = r#"{"Repository":"localhost/opengrok","Tag":"1.0","ID":"9c8b7a6f5e4d","Size":"801 MB","CreatedSince":"3 hours ago"}"#;
        let images = parse_images(line).unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].version, Version::parse("1.0").unwrap());
    }

    #[test]
    fn test_parse_containers_podman_localhost() {
        let line = r#"{"ID":"f00d","Image":"localhost/opengrok:1.0","Names":"quirky_lamarr","State":"running"}"#;
        let containers = parse_containers(line).unwrap();
        assert_eq!(
            containers[0].version(),
            Some(Version::parse("1.0").unwrap())
        );
    }

    #[test]
    fn test_parse_images_empty() {
        assert!(parse_images("").unwrap().is_empty());
        assert!(parse_images("\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_images_rejects_garbage() {
        assert!(matches!(
            parse_images("REPOSITORY TAG IMAGE ID"),
            Err(GrokError::Json(_))
        ));
    }

    #[test]
    fn test_parse_containers() {
        let containers = parse_containers(CONTAINERS).unwrap();
        assert_eq!(containers.len(), 2);
        assert_eq!(containers[0].id, "c0ffee");
        assert!(containers[0].is_running());
        assert_eq!(
            containers[0].version(),
            Some(Version::parse("1.13.7").unwrap())
        );
        assert_eq!(containers[1].version(), None);
    }

    #[tokio::test]
    async fn test_missing_binary_is_runtime_error() {
        let docker = DockerCli::new("/nonexistent/grokman-docker");
        let err = docker.list_images().await.unwrap_err();
        assert!(matches!(err, GrokError::Runtime(_)));
        assert!(err.to_string().contains("GROKMAN_DOCKER"));
    }
}
