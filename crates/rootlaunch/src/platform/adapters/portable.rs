use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use super::Platform;
use crate::error::{LaunchError, LaunchResult};
use crate::platform::types::SdkVersion;

/// Upper bound for one `pm` or `getprop` invocation.
const TOOL_TIMEOUT: Duration = Duration::from_secs(10);

/// Platform adapter that reaches the system through its command-line tools.
///
/// Package-manager lookups go through `pm`, the SDK level through `getprop`.
/// Binder access needs an in-process runtime, so system service lookups are
/// reported as unsupported here.
#[derive(Debug, Clone)]
pub struct PortablePlatform {
    sdk: SdkVersion,
}

impl PortablePlatform {
    pub fn with_sdk(sdk: SdkVersion) -> Self {
        Self { sdk }
    }

    /// Reads `ro.build.version.sdk`; hosts without `getprop` report SDK 0.
    pub async fn detect() -> Self {
        let sdk = run_tool("getprop", &["ro.build.version.sdk"])
            .await
            .ok()
            .and_then(|output| output.trim().parse::<u32>().ok())
            .unwrap_or(0);
        Self::with_sdk(SdkVersion(sdk))
    }

    fn is_android(&self) -> bool {
        self.sdk.0 > 0
    }
}

#[async_trait]
impl Platform for PortablePlatform {
    fn id(&self) -> &str {
        if self.is_android() {
            "android"
        } else {
            "unsupported"
        }
    }

    fn sdk(&self) -> SdkVersion {
        self.sdk
    }

    async fn packages_for_uid(&self, uid: u32) -> LaunchResult<Vec<String>> {
        if !self.is_android() {
            return Err(LaunchError::NotImplemented);
        }
        let output = run_tool("pm", &["list", "packages", "--uid", &uid.to_string()]).await?;
        Ok(parse_package_list(&output)
            .into_iter()
            .filter(|(_, package_uid)| *package_uid == Some(uid))
            .map(|(package, _)| package)
            .collect())
    }

    async fn application_uid(&self, package: &str) -> LaunchResult<u32> {
        if !self.is_android() {
            return Err(LaunchError::NotImplemented);
        }
        let output = run_tool("pm", &["list", "packages", "-U", package]).await?;
        parse_package_list(&output)
            .into_iter()
            .find(|(name, _)| name == package)
            .and_then(|(_, uid)| uid)
            .ok_or_else(|| LaunchError::Transport(format!("package not installed: {package}")))
    }

    async fn own_identity(&self) -> LaunchResult<(u32, String)> {
        if !self.is_android() {
            return Err(LaunchError::NotImplemented);
        }
        let status = tokio::fs::read_to_string("/proc/self/status")
            .await
            .map_err(|error| LaunchError::Transport(format!("failed to read status: {error}")))?;
        let uid = parse_status_uid(&status)
            .ok_or_else(|| LaunchError::Transport("uid missing from status".to_string()))?;
        let cmdline = tokio::fs::read("/proc/self/cmdline")
            .await
            .map_err(|error| LaunchError::Transport(format!("failed to read cmdline: {error}")))?;
        let package = cmdline
            .split(|byte| *byte == 0)
            .next()
            .map(|name| String::from_utf8_lossy(name).into_owned())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| LaunchError::Transport("process name unavailable".to_string()))?;
        Ok((uid, package))
    }
}

async fn run_tool(program: &str, args: &[&str]) -> LaunchResult<String> {
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|error| LaunchError::Transport(format!("failed to run {program}: {error}")))?;

    let output = match tokio::time::timeout(TOOL_TIMEOUT, child.wait_with_output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(error)) => {
            return Err(LaunchError::Transport(format!("{program} failed: {error}")));
        }
        Err(_) => {
            tracing::warn!(program, "platform tool timed out");
            return Err(LaunchError::Transport(format!(
                "{program} timed out after {}s",
                TOOL_TIMEOUT.as_secs()
            )));
        }
    };
    if !output.status.success() {
        return Err(LaunchError::Transport(format!(
            "{program} failed with status {}",
            output.status
        )));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Parses `pm list packages` lines of the form `package:<name> [uid:<uid>]`.
fn parse_package_list(output: &str) -> Vec<(String, Option<u32>)> {
    output
        .lines()
        .filter_map(|line| {
            let rest = line.trim().strip_prefix("package:")?;
            let mut parts = rest.split_whitespace();
            let name = parts.next()?.to_string();
            let uid = parts
                .find_map(|part| part.strip_prefix("uid:"))
                .and_then(|uid| uid.split(',').next())
                .and_then(|uid| uid.parse().ok());
            Some((name, uid))
        })
        .collect()
}

fn parse_status_uid(status: &str) -> Option<u32> {
    status
        .lines()
        .find_map(|line| line.strip_prefix("Uid:"))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|uid| uid.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_package_lines_with_and_without_uid() {
        let output = "package:com.android.shell uid:2000\npackage:com.example\n\nnoise\n";
        assert_eq!(
            parse_package_list(output),
            vec![
                ("com.android.shell".to_string(), Some(2000)),
                ("com.example".to_string(), None),
            ]
        );
    }

    #[test]
    fn parses_shared_uid_lists() {
        let output = "package:com.rosan.dhizuku uid:10234,10235";
        assert_eq!(
            parse_package_list(output),
            vec![("com.rosan.dhizuku".to_string(), Some(10234))]
        );
    }

    #[test]
    fn parses_real_uid_from_status() {
        let status = "Name:\tapp\nUid:\t10123\t10123\t10123\t10123\nGid:\t10123\n";
        assert_eq!(parse_status_uid(status), Some(10123));
    }

    #[tokio::test]
    async fn non_android_host_reports_unsupported_lookups() {
        let adapter = PortablePlatform::with_sdk(SdkVersion(0));
        assert_eq!(adapter.id(), "unsupported");
        assert_eq!(adapter.packages_for_uid(2000).await, Err(LaunchError::NotImplemented));
        assert_eq!(adapter.application_uid("pkg").await, Err(LaunchError::NotImplemented));
        assert_eq!(adapter.own_identity().await, Err(LaunchError::NotImplemented));
        assert!(adapter.system_service("activity").is_err());
    }

    #[tokio::test]
    async fn missing_tool_is_a_transport_error() {
        assert!(matches!(
            run_tool("rootlaunch-no-such-tool", &[]).await,
            Err(LaunchError::Transport(_))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn tool_output_is_read_without_blocking_the_runtime() {
        let ticker = tokio::spawn(async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            "ticked"
        });
        let output = run_tool("sh", &["-c", "sleep 0.2; echo package:com.example uid:10001"])
            .await
            .expect("run sh");
        assert!(ticker.is_finished());
        assert_eq!(
            parse_package_list(&output),
            vec![("com.example".to_string(), Some(10001))]
        );
    }
}
