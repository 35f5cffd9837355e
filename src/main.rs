// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snapgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snapgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Snapgraph CLI entrypoint.
//!
//! By default this runs the terminal dashboard and serves the local HTTP API at
//! `http://127.0.0.1:<port>/api`. Use `--serve` to run the HTTP API alone.

use std::error::Error;
use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing_subscriber::EnvFilter;

use snapgraph::api::{self, ApiState};
use snapgraph::config::{AppConfig, Cli, LogTarget, RunMode, LOG_FILTER_ENV};
use snapgraph::similarity::{HttpSimilarityClient, SimilarityScorer};
use snapgraph::store::{ContentRoot, SeriesLoader};

fn init_logging(target: &LogTarget) -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new("snapgraph=info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    // The dashboard owns the terminal, so its logs go to a file.
    let _ = match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
    };
    Ok(())
}

async fn bind_api(port: u16) -> std::io::Result<TcpListener> {
    TcpListener::bind(("127.0.0.1", port)).await
}

async fn run(config: AppConfig) -> Result<(), Box<dyn Error>> {
    let content_root = ContentRoot::new(config.content_root.clone());
    let scorer: Arc<dyn SimilarityScorer> = Arc::new(HttpSimilarityClient::new(
        config.similarity_url.as_deref(),
        config.similarity_timeout,
    )?);
    if config.similarity_url.is_none() {
        tracing::warn!(
            event = "config.similarity.unset",
            "no similarity URL configured; comparisons will show an AST error"
        );
    }
    let state = Arc::new(ApiState::new(content_root.clone(), scorer.clone()));

    let (http_port, dashboard) = match config.mode {
        RunMode::Serve { http_port } => (Some(http_port), false),
        RunMode::Dashboard { http_port } => (http_port, true),
    };

    if !dashboard {
        let listener = bind_api(http_port.unwrap_or(api::DEFAULT_HTTP_PORT)).await?;
        let local = listener.local_addr()?;
        eprintln!("snapgraph: serving http://{local}/api (Ctrl-C to stop)");
        api::serve(listener, state, async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
        return Ok(());
    }

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let server_handle = match http_port {
        Some(port) => {
            let listener = bind_api(port).await?;
            Some(tokio::spawn(async move {
                let shutdown = async move {
                    let _ = shutdown_rx.await;
                };
                if let Err(err) = api::serve(listener, state, shutdown).await {
                    tracing::error!(event = "api.failed", error = %err, "http api error");
                }
            }))
        }
        None => None,
    };

    let loader: Arc<dyn SeriesLoader> = Arc::new(content_root);
    let runtime = tokio::runtime::Handle::current();
    let tui_join = tokio::task::spawn_blocking(move || {
        snapgraph::tui::run(loader, scorer, runtime).map_err(|err| err.to_string())
    })
    .await;

    let _ = shutdown_tx.send(());
    if let Some(handle) = server_handle {
        let _ = handle.await;
    }

    let tui_result = tui_join.map_err(|err| -> Box<dyn Error> { Box::new(err) })?;
    tui_result.map_err(|err| -> Box<dyn Error> { err.into() })?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let config = match cli.into_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("snapgraph: {err}");
            std::process::exit(2);
        }
    };

    let result = (|| -> Result<(), Box<dyn Error>> {
        init_logging(&config.log_target)?;
        tracing::info!(
            event = "snapgraph.start",
            content_root = %config.content_root.display(),
            mode = ?config.mode,
            "starting"
        );

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        runtime.block_on(run(config))
    })();

    if let Err(err) = result {
        tracing::error!(event = "snapgraph.failed", error = %err, "exiting with error");
        eprintln!("snapgraph: {err}");
        std::process::exit(1);
    }
}
