// std imports
use std::{
    include_str,
    path::{Path, PathBuf},
    sync::LazyLock,
};

// third-party imports
use config::{Config, File, FileFormat};
use serde::Deserialize;

// local imports
use crate::{
    appdirs::AppDirs,
    error::Result,
    geometry::MapMode,
    session::Options,
    surface::StyleSheet,
};

pub const APP_NAME: &str = "termshell";

static DEFAULT_SETTINGS_RAW: &str = include_str!("assets/config.toml");
const DEFAULT_SETTINGS_FORMAT: FileFormat = FileFormat::Toml;
static DEFAULT_SETTINGS: LazyLock<Settings> = LazyLock::new(|| {
    Settings::load([]).expect("embedded default configuration must be valid")
});

/// Get the default settings.
pub fn default() -> &'static Settings {
    Default::default()
}

/// Load settings from the given files on top of the platform configuration files.
pub fn at<I, P>(paths: I) -> Loader
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    Loader::new(paths.into_iter().map(|path| path.as_ref().into()).collect())
}

/// Load settings from the platform configuration files.
pub fn load() -> Result<Settings> {
    Loader::new(Vec::new()).load()
}

/// Get the application platform-specific directories.
pub fn app_dirs() -> Option<AppDirs> {
    AppDirs::new(APP_NAME)
}

pub mod global {
    use super::*;
    use std::sync::{Mutex, PoisonError};

    static PENDING: Mutex<Option<Settings>> = Mutex::new(None);
    static RESOLVED: LazyLock<Settings> = LazyLock::new(|| {
        PENDING
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .unwrap_or_default()
    });

    /// Call initialize before any calls to get otherwise it will have no effect.
    pub fn initialize(cfg: Settings) {
        *PENDING.lock().unwrap_or_else(PoisonError::into_inner) = Some(cfg);
    }

    /// Get the resolved config.
    /// If initialized was called before, then that config will be returned.
    /// Otherwise, the default config will be returned.
    pub fn get() -> &'static Settings {
        &RESOLVED
    }
}

/// Settings structure containing all configuration options.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    pub session: SessionSettings,
    pub editor: EditorSettings,
    pub transcript: TranscriptSettings,
    pub style: StyleSheet,
}

impl Settings {
    /// Load settings from the provided sources on top of the embedded defaults.
    pub fn load<I>(sources: I) -> Result<Self>
    where
        I: IntoIterator<Item = Source>,
    {
        let mut builder = Config::builder().add_source(File::from_str(
            DEFAULT_SETTINGS_RAW,
            DEFAULT_SETTINGS_FORMAT,
        ));

        for source in sources {
            builder = match source {
                Source::File(SourceFile { filename, required }) => {
                    log::debug!(
                        "added configuration file {} search path: {}",
                        if required { "required" } else { "optional" },
                        filename.display(),
                    );
                    builder.add_source(File::from(filename.as_path()).required(required))
                }
                Source::String(value, format) => builder.add_source(File::from_str(&value, format)),
            };
        }

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Session parameters described by these settings.
    pub fn session_options(&self) -> Options {
        Options {
            prompt: self.session.prompt.clone(),
            wrap: self.session.wrap,
            replace: self.editor.replace,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        DEFAULT_SETTINGS.clone()
    }
}

impl Default for &'static Settings {
    fn default() -> Self {
        &DEFAULT_SETTINGS
    }
}

/// Prompt and line layout.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct SessionSettings {
    pub prompt: String,
    pub wrap: MapMode,
}

/// Line editor settings.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct EditorSettings {
    pub replace: bool,
}

/// How commands and their results are echoed.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct TranscriptSettings {
    pub input_prefix: String,
    pub output_prefix: String,
    pub error_prefix: String,
    pub separators: bool,
}

impl Default for TranscriptSettings {
    fn default() -> Self {
        DEFAULT_SETTINGS.transcript.clone()
    }
}

// ---

/// Loader structure for loading settings.
pub struct Loader {
    paths: Vec<PathBuf>,
    no_default: bool,
    dirs: Option<AppDirs>,
}

impl Loader {
    fn new(paths: Vec<PathBuf>) -> Self {
        Self {
            paths,
            no_default: false,
            dirs: app_dirs(),
        }
    }

    /// Set whether to skip the system and user configuration files.
    pub fn no_default(mut self, val: bool) -> Self {
        self.no_default = val;
        self
    }

    /// Load the settings.
    pub fn load(self) -> Result<Settings> {
        if self.no_default {
            Settings::load(self.custom())
        } else {
            Settings::load(self.system().chain(self.user()).chain(self.custom()))
        }
    }

    fn system(&self) -> impl Iterator<Item = Source> {
        self.dirs
            .as_ref()
            .map(|dirs| dirs.system_config_dirs.clone())
            .unwrap_or_default()
            .into_iter()
            .map(|dir| SourceFile::new(Self::config(&dir)).required(false).into())
    }

    fn user(&self) -> impl Iterator<Item = Source> {
        self.dirs
            .as_ref()
            .map(|dirs| {
                SourceFile::new(Self::config(&dirs.config_dir))
                    .required(false)
                    .into()
            })
            .into_iter()
    }

    fn custom(&self) -> impl Iterator<Item = Source> {
        self.paths
            .iter()
            .map(|path| SourceFile::new(path).required(true).into())
    }

    // Extension is resolved by the config crate.
    fn config(dir: &Path) -> PathBuf {
        dir.join("config")
    }
}

/// Configuration source.
#[derive(Debug, Clone)]
pub enum Source {
    File(SourceFile),
    String(String, FileFormat),
}

impl Source {
    /// Create a new string source.
    pub fn string<S>(value: S, format: FileFormat) -> Self
    where
        S: Into<String>,
    {
        Self::String(value.into(), format)
    }
}

impl From<SourceFile> for Source {
    fn from(file: SourceFile) -> Self {
        Self::File(file)
    }
}

/// Configuration file source.
#[derive(Debug, Clone)]
pub struct SourceFile {
    filename: PathBuf,
    required: bool,
}

impl SourceFile {
    pub fn new<P>(filename: P) -> Self
    where
        P: AsRef<Path>,
    {
        Self {
            filename: filename.as_ref().into(),
            required: true,
        }
    }

    /// Set whether the source file is required.
    pub fn required(self, required: bool) -> Self {
        Self { required, ..self }
    }
}

/// Trait for patching settings.
pub trait Patch {
    fn patch(&self, settings: Settings) -> Settings;
}

#[cfg(test)]
mod tests;
