use std::fmt::Display;
use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use simplelog::{LevelFilter, WriteLogger};

use crate::autocomplete::Autocomplete;
use crate::color::RGBColor;
use crate::completion::Autocompletions;
use crate::slots::{DropdownList, MarkerListItem, PromptInput};
use crate::yamlread::{self, YamlRead};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Read(#[from] yamlread::Error),
    #[error("Unknown log level \"{0}\"")]
    LogLevel(String),
    #[error("Failed to create log file \"{0}\": {1}")]
    LogFile(String, #[source] std::io::Error),
    #[error("Failed to install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub autocompletions: Autocompletions,
    pub prompt: String,
    pub max_items: usize,
    pub highlight: Option<RGBColor>,
    pub log_file: Option<PathBuf>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            autocompletions: Autocompletions::default(),
            prompt: "> ".to_string(),
            max_items: 8,
            highlight: None,
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl YamlRead for Config {}

impl Config {
    pub fn load<P: Display + AsRef<Path>>(path: P) -> Result<Self, Error> {
        Ok(Self::read_yaml(path)?)
    }

    pub fn log_level(&self) -> Result<LevelFilter, Error> {
        self.log_level.parse().map_err(|_| Error::LogLevel(self.log_level.clone()))
    }

    /// Logs to `log_file` when one is set. Never logs to the terminal, which
    /// belongs to the widget.
    pub fn init_logging(&self) -> Result<(), Error> {
        let Some(path) = &self.log_file else {
            return Ok(());
        };
        let level = self.log_level()?;
        let file = File::create(path).map_err(|err| Error::LogFile(path.display().to_string(), err))?;
        WriteLogger::init(level, simplelog::Config::default(), file)?;
        log::info!("logging at {level} to {}", path.display());
        Ok(())
    }

    pub fn autocomplete(&self, on_submit: impl FnMut(String) + 'static) -> Autocomplete {
        let list_item = match self.highlight {
            Some(color) => MarkerListItem::with_highlight(color.into()),
            None => MarkerListItem::default(),
        };
        Autocomplete::new(self.autocompletions.clone(), on_submit)
            .with_input(PromptInput::new(self.prompt.clone()))
            .with_list(DropdownList::new(self.max_items))
            .with_list_item(list_item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.prompt, "> ");
        assert_eq!(config.max_items, 8);
        assert_eq!(config.log_level().unwrap(), LevelFilter::Info);
        assert_eq!(config.autocompletions.triggers().count(), 0);
    }

    #[test]
    fn full_document() {
        let config: Config = serde_yaml::from_str(
            "autocompletions:\n  '@': [Walmart]\n  '#': [Grosseries, DinnerWithFriends]\n\
             prompt: 'note: '\nmax_items: 3\nhighlight: '#336699'\nlog_level: debug\n",
        )
        .unwrap();
        assert_eq!(config.prompt, "note: ");
        assert_eq!(config.max_items, 3);
        assert_eq!(config.highlight, Some("336699".parse().unwrap()));
        assert_eq!(config.log_level().unwrap(), LevelFilter::Debug);
        assert_eq!(config.autocompletions.candidates('#').map(<[String]>::len), Some(2));
    }

    #[test]
    fn bad_values_are_reported() {
        assert!(serde_yaml::from_str::<Config>("highlight: nope\n").is_err());
        assert!(serde_yaml::from_str::<Config>("colour: ff0000\n").is_err());

        let config: Config = serde_yaml::from_str("log_level: loud\n").unwrap();
        assert!(matches!(config.log_level(), Err(Error::LogLevel(level)) if level == "loud"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = Config::load("/nonexistent/autocomplete.yaml").unwrap_err();
        assert!(matches!(err, Error::Read(yamlread::Error::FileError(..))));
        assert!(err.to_string().contains("/nonexistent/autocomplete.yaml"));
    }

    #[test]
    fn malformed_file_names_the_path() {
        let path = std::env::temp_dir().join(format!("symcomplete-malformed-{}.yaml", std::process::id()));
        std::fs::write(&path, "autocompletions: [unclosed\n").unwrap();

        let path = path.display().to_string();
        let err = Config::load(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);

        assert!(matches!(err, Error::Read(yamlread::Error::YamlError(..))));
        assert!(err.to_string().contains(&path));
    }

    #[test]
    fn widget_is_built_from_the_table() {
        let config: Config = serde_yaml::from_str("autocompletions:\n  '@': [Walmart]\n").unwrap();
        let mut widget = config.autocomplete(|_| ());
        widget.set_value("@w");
        widget.set_caret(2);
        assert_eq!(widget.suggestions(), vec!["Walmart"]);
    }
}
