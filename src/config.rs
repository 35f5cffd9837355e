// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snapgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snapgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Command-line options and the validated runtime configuration built from them.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::api::DEFAULT_HTTP_PORT;

pub const SIMILARITY_URL_ENV: &str = "SNAPGRAPH_SIMILARITY_URL";
pub const LOG_FILTER_ENV: &str = "SNAPGRAPH_LOG";
pub const DEFAULT_SIMILARITY_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOG_FILE_NAME: &str = "snapgraph.log";

#[derive(Debug, Parser)]
#[command(name = "snapgraph", version)]
#[command(about = "Plot student progress graphs and compare code snapshots in the terminal.")]
pub struct Cli {
    /// Directory holding `<Language>/<assignment>/<student>.csv` (default: current directory).
    #[arg(value_name = "CONTENT_ROOT")]
    pub content_root: Option<PathBuf>,

    /// Base URL of the AST similarity service (it must answer `POST <url>/similarity`).
    #[arg(long, env = SIMILARITY_URL_ENV)]
    pub similarity_url: Option<String>,

    /// Port of the local HTTP API (0 = ephemeral).
    #[arg(long, default_value_t = DEFAULT_HTTP_PORT)]
    pub http_port: u16,

    /// Do not start the local HTTP API next to the dashboard.
    #[arg(long, conflicts_with = "serve")]
    pub no_http: bool,

    /// Serve the HTTP API only, without the dashboard.
    #[arg(long)]
    pub serve: bool,

    /// Timeout for one similarity request, in seconds.
    #[arg(long, default_value_t = DEFAULT_SIMILARITY_TIMEOUT_SECS)]
    pub similarity_timeout_secs: u64,

    /// Log file for dashboard mode (default: `<temp dir>/snapgraph.log`).
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// Terminal dashboard, optionally with the HTTP API alongside.
    Dashboard { http_port: Option<u16> },
    /// HTTP API only.
    Serve { http_port: u16 },
}

impl RunMode {
    pub fn http_port(&self) -> Option<u16> {
        match self {
            Self::Dashboard { http_port } => *http_port,
            Self::Serve { http_port } => Some(*http_port),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub content_root: PathBuf,
    pub similarity_url: Option<String>,
    pub similarity_timeout: Duration,
    pub mode: RunMode,
    pub log_target: LogTarget,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("content root {} does not exist", .0.display())]
    MissingContentRoot(PathBuf),
    #[error("content root {} is not a directory", .0.display())]
    ContentRootNotDirectory(PathBuf),
    #[error("similarity URL `{0}` must start with http:// or https://")]
    InvalidSimilarityUrl(String),
    #[error("--similarity-timeout-secs must be greater than zero")]
    ZeroTimeout,
}

impl Cli {
    pub fn into_config(self) -> Result<AppConfig, ConfigError> {
        let content_root = self.content_root.unwrap_or_else(|| PathBuf::from("."));
        if !content_root.exists() {
            return Err(ConfigError::MissingContentRoot(content_root));
        }
        if !content_root.is_dir() {
            return Err(ConfigError::ContentRootNotDirectory(content_root));
        }

        let similarity_url = self
            .similarity_url
            .map(|url| url.trim().to_owned())
            .filter(|url| !url.is_empty());
        if let Some(url) = &similarity_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidSimilarityUrl(url.clone()));
            }
        }

        if self.similarity_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let (mode, log_target) = if self.serve {
            (RunMode::Serve { http_port: self.http_port }, LogTarget::Stderr)
        } else {
            let http_port = (!self.no_http).then_some(self.http_port);
            let log_file = self
                .log_file
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_FILE_NAME));
            (RunMode::Dashboard { http_port }, LogTarget::File(log_file))
        };

        Ok(AppConfig {
            content_root,
            similarity_url,
            similarity_timeout: Duration::from_secs(self.similarity_timeout_secs),
            mode,
            log_target,
        })
    }
}
