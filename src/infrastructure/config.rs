//! TOML configuration: API endpoint, logging, UI timing and playground defaults.

use crate::application::Playground;
use crate::domain::{EnabledModel, RetrieverDescriptor};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_PROMPT_TEMPLATE: &str =
    "Answer the question based only on the following context:\nContext: {context} \nQuestion: {question}";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiSettings,
    pub log: LogSettings,
    pub ui: UiSettings,
    pub playground: PlaygroundSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `EnvFilter` directive, e.g. `info` or `ragapp=debug`
    pub level: String,
    /// Log file; defaults to the platform data directory
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// How long a notification stays on screen, in ticks
    pub toast_ticks: u32,
    pub tick_millis: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            toast_ticks: 40,
            tick_millis: 100,
        }
    }
}

/// Initial playground selections.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaygroundSettings {
    pub collection: String,
    pub models: Vec<EnabledModel>,
    /// Defaults to the first enabled model
    pub selected_model: Option<String>,
    pub model_config: String,
    pub retrievers: Vec<RetrieverDescriptor>,
    pub selected_retriever: Option<String>,
    pub retriever_config: String,
    pub prompt_template: String,
    pub query_controller: String,
}

impl Default for PlaygroundSettings {
    fn default() -> Self {
        Self {
            collection: String::new(),
            models: Vec::new(),
            selected_model: None,
            model_config: "{}".to_string(),
            retrievers: Vec::new(),
            selected_retriever: None,
            retriever_config: "{}".to_string(),
            prompt_template: DEFAULT_PROMPT_TEMPLATE.to_string(),
            query_controller: "basic-rag".to_string(),
        }
    }
}

impl PlaygroundSettings {
    pub fn into_playground(self) -> Playground {
        let selected_model = self
            .selected_model
            .or_else(|| self.models.first().map(|model| model.name.clone()))
            .unwrap_or_default();
        let selected_retriever = self
            .selected_retriever
            .and_then(|name| self.retrievers.iter().position(|r| r.name == name));

        Playground {
            collection: self.collection,
            models: self.models,
            selected_model,
            model_config_text: self.model_config,
            retrievers: self.retrievers,
            selected_retriever,
            retriever_config_text: self.retriever_config,
            prompt_template: self.prompt_template,
            query_controller: self.query_controller,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "ragapp")
}

impl Settings {
    /// `config.toml` in the platform config directory.
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Loads settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn log_file(&self) -> PathBuf {
        self.log.file.clone().unwrap_or_else(|| {
            project_dirs()
                .map(|dirs| dirs.data_local_dir().join("ragapp.log"))
                .unwrap_or_else(|| PathBuf::from("ragapp.log"))
        })
    }
}
