use std::path::PathBuf;

use log::{info, LevelFilter};
use serde::Serialize;
use thiserror::Error;

use crate::categories::TaskCommands;
use crate::config::{self, Config, ConfigError};
use crate::contract::{BuildRequest, CoreRequest};
use crate::destinations::{CommittedList, MemoryDestinationList, MemoryHistory};
use crate::history::{self, HistoryPruner, PruneOutcome};
use crate::jump_list::{JumpList, ListOptions};
use crate::logging::{self, LoggingError};
use crate::model::HistoryClassification;
use crate::platform::SystemHostLocator;
use crate::transport::{self, TransportResponse};

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to read request {}: {source}", .path.display())]
    Request {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeOptions {
    pub config_path: Option<PathBuf>,
    pub request_path: Option<PathBuf>,
    pub delete_now: bool,
    pub verbose: bool,
}

pub fn parse_cli_args(args: &[String]) -> Result<RuntimeOptions, String> {
    let mut options = RuntimeOptions::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let value = iter.next().ok_or("--config requires a path")?;
                options.config_path = Some(PathBuf::from(value));
            }
            "--request" => {
                let value = iter.next().ok_or("--request requires a path")?;
                options.request_path = Some(PathBuf::from(value));
            }
            "--delete-now" => options.delete_now = true,
            "--verbose" => options.verbose = true,
            other => return Err(format!("unknown argument '{other}'")),
        }
    }

    Ok(options)
}

/// Printed after a run: the list the shell would show plus the transport reply.
#[derive(Debug, Serialize)]
pub struct Preview {
    pub app_id: String,
    pub history: Vec<(HistoryClassification, String)>,
    pub response: TransportResponse,
    pub list: Option<CommittedList>,
}

pub fn run_with_options(options: RuntimeOptions) -> Result<(), RuntimeError> {
    let config = config::load(options.config_path.as_deref())?;
    let level = if options.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logging::init(&logging::logs_dir(), level)?;
    info!(
        "startup app_id={} config_path={}",
        config.app_id,
        config.config_path.display()
    );

    let request = match &options.request_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path).map_err(|source| RuntimeError::Request {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str::<CoreRequest>(&raw)?
        }
        None => CoreRequest::Build(BuildRequest {
            options: None,
            bookmarks: String::new(),
            playlists: Vec::new(),
        }),
    };

    let preview = preview(&config, options.delete_now, request);
    let encoded = serde_json::to_string_pretty(&preview)?;
    println!("{encoded}");
    Ok(())
}

/// Runs `request` against in-memory destination services configured from `config`.
pub fn preview(config: &Config, delete_now: bool, request: CoreRequest) -> Preview {
    let pruner = HistoryPruner::new(
        config::roaming_app_data_dir().map(|dir| history::shell_recent_dir(&dir)),
        config.history_cache_id.clone(),
    );
    let mut history = MemoryHistory::new();
    let commands = TaskCommands {
        play: config.play_command.clone(),
        open: config.open_command.clone(),
    };

    let mut jump_list = JumpList::new(
        &config.app_id,
        MemoryDestinationList::new(10),
        &mut history,
        &pruner,
        commands,
        delete_now || config.delete_on_start,
    );

    let defaults = ListOptions::from_config(config);
    let response =
        transport::handle_request(&mut jump_list, &SystemHostLocator, &defaults, request);

    Preview {
        app_id: jump_list.app_id().to_string(),
        history: jump_list
            .prune_outcomes()
            .iter()
            .map(|(classification, outcome)| (*classification, describe(outcome)))
            .collect(),
        response,
        list: jump_list.list().committed().cloned(),
    }
}

fn describe(outcome: &PruneOutcome) -> String {
    match outcome {
        PruneOutcome::Pruned { removed, failed } => {
            format!("pruned removed={removed} failed={failed}")
        }
        PruneOutcome::FallbackDeleted(path) => format!("deleted {}", path.display()),
        PruneOutcome::FallbackFailed { reason, .. } => format!("fallback failed: {reason}"),
    }
}
