use std::fmt;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;

/// Executables the pipelines shell out to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    YtDlp,
    Ffmpeg,
}

impl Tool {
    pub fn executable(self) -> &'static str {
        match self {
            Tool::YtDlp => "yt-dlp",
            Tool::Ffmpeg => "ffmpeg",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.executable())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Linux,
    MacOs,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        match std::env::consts::OS {
            "windows" => Platform::Windows,
            "linux" => Platform::Linux,
            "macos" => Platform::MacOs,
            _ => Platform::Other,
        }
    }
}

#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("{tool} is required but was not found in PATH.\n{guidance}")]
    MissingDependency { tool: Tool, guidance: String },
}

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("failed to start {tool}: {source}")]
    Spawn {
        tool: Tool,
        #[source]
        source: std::io::Error,
    },
    #[error("{tool} exited with {status}")]
    Failed { tool: Tool, status: ExitStatus },
    #[error("{tool} produced unreadable output: {reason}")]
    Output { tool: Tool, reason: String },
}

/// Locate `tool` on the execution path.
pub fn require_tool(tool: Tool) -> Result<PathBuf, DependencyError> {
    match which::which(tool.executable()) {
        Ok(path) => {
            log::info!("{tool} found at {}", path.display());
            Ok(path)
        }
        Err(_) => {
            log::error!("{tool} is not installed or not found in PATH.");
            Err(DependencyError::MissingDependency {
                tool,
                guidance: install_guidance(tool, Platform::current()),
            })
        }
    }
}

/// Human-readable installation hints for `tool` on `platform`.
pub fn install_guidance(tool: Tool, platform: Platform) -> String {
    let download_page = match tool {
        Tool::YtDlp => "https://github.com/yt-dlp/yt-dlp#installation",
        Tool::Ffmpeg => "https://ffmpeg.org/download.html",
    };
    let name = tool.executable();
    match platform {
        Platform::Windows => format!(
            "Please install it from: {download_page}\n\
             Make sure to add {name} to your system PATH during installation.\n\
             Note: if you have Chocolatey installed, you can also run: choco install {name}"
        ),
        Platform::Linux => {
            let install = match tool {
                Tool::YtDlp => "python3 -m pip install -U yt-dlp".to_string(),
                Tool::Ffmpeg => "sudo apt update && sudo apt install ffmpeg".to_string(),
            };
            format!(
                "You can install {name} using your package manager.\n\
                 For example, on Ubuntu or Debian: {install}\n\
                 (You can also download the latest version from: {download_page})"
            )
        }
        Platform::MacOs => format!(
            "You can install {name} using Homebrew.\n\
             Install Homebrew from https://brew.sh/ if you haven't already, then run: brew install {name}\n\
             (You can also download the latest version from: {download_page})"
        ),
        Platform::Other => format!("Download {name} from: {download_page}"),
    }
}

/// Run `command` to completion with inherited stdio, failing on a non-zero exit.
pub fn run_tool(tool: Tool, command: &mut Command) -> Result<(), ToolError> {
    log::debug!("Running {command:?}");
    let status = command
        .status()
        .map_err(|source| ToolError::Spawn { tool, source })?;
    if !status.success() {
        return Err(ToolError::Failed { tool, status });
    }
    Ok(())
}

/// Run `command` and return its trimmed standard output.
pub fn capture_tool_output(tool: Tool, command: &mut Command) -> Result<String, ToolError> {
    log::debug!("Running {command:?}");
    let output = command
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .output()
        .map_err(|source| ToolError::Spawn { tool, source })?;
    if !output.status.success() {
        return Err(ToolError::Failed {
            tool,
            status: output.status,
        });
    }
    String::from_utf8(output.stdout)
        .map(|s| s.trim().to_string())
        .map_err(|e| ToolError::Output {
            tool,
            reason: e.to_string(),
        })
}
