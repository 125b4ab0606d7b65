//! The `as3ts.json` project file and the settings merged from it and the
//! command line.

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Deserialize;
use thiserror::Error;

/// Name of the project file looked up in the working directory.
pub const PROJECT_FILE_NAME: &str = "as3ts.json";

/// How a parsed tree is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented node dump.
    #[default]
    Tree,
    /// The tree serialized as JSON.
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Tree => "tree",
            OutputFormat::Json => "json",
        }
    }
}

/// Contents of an `as3ts.json` file. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Input files, relative to the project file.
    pub files: Option<Vec<String>>,
    /// Directory to write output files to, relative to the project file.
    pub out_dir: Option<String>,
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read project file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid project file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("no input files")]
    NoInputFiles,
}

/// Parse project file contents.
pub fn parse_project(content: &str) -> Result<ProjectConfig, serde_json::Error> {
    serde_json::from_str(content)
}

/// Read and parse a project file from disk.
pub fn load_project(path: &Path) -> Result<ProjectConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_project(&content).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// What the command line asked for, before the project file is applied.
#[derive(Debug, Default)]
pub struct Overrides {
    pub files: Vec<String>,
    pub project: Option<String>,
    pub out_dir: Option<String>,
    pub format: Option<OutputFormat>,
}

/// Fully resolved run settings.
#[derive(Debug, PartialEq, Eq)]
pub struct Settings {
    pub files: Vec<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub format: OutputFormat,
}

impl Settings {
    /// Merge command line values over a project file.
    ///
    /// The project file is the one passed with `--project`, or
    /// `as3ts.json` in the working directory when no files are given.
    pub fn resolve(overrides: Overrides) -> Result<Self, ConfigError> {
        let project_path = match &overrides.project {
            Some(path) => Some(PathBuf::from(path)),
            None if overrides.files.is_empty() && Path::new(PROJECT_FILE_NAME).exists() => {
                Some(PathBuf::from(PROJECT_FILE_NAME))
            }
            None => None,
        };
        let project = match &project_path {
            Some(path) => Some((load_project(path)?, project_root(path))),
            None => None,
        };
        Self::merge(overrides, project)
    }

    /// Combine command line values with an already loaded project, whose
    /// relative paths are taken from `root`.
    pub fn merge(
        overrides: Overrides,
        project: Option<(ProjectConfig, PathBuf)>,
    ) -> Result<Self, ConfigError> {
        let (config, root) = project.unwrap_or_default();

        let files: Vec<PathBuf> = if !overrides.files.is_empty() {
            overrides.files.iter().map(PathBuf::from).collect()
        } else {
            config
                .files
                .iter()
                .flatten()
                .map(|file| root.join(file))
                .collect()
        };
        if files.is_empty() {
            return Err(ConfigError::NoInputFiles);
        }

        let out_dir = match overrides.out_dir {
            Some(dir) => Some(PathBuf::from(dir)),
            None => config.out_dir.map(|dir| root.join(dir)),
        };
        let format = overrides.format.or(config.format).unwrap_or_default();

        Ok(Settings { files, out_dir, format })
    }
}

fn project_root(path: &Path) -> PathBuf {
    path.parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
