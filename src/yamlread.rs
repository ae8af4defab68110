use std::fmt::Display;
use std::fs::File;
use std::path::Path;

use serde::de::DeserializeOwned;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to open \"{0}\": {1}")]
    FileError(String, #[source] std::io::Error),
    #[error("Failed to parse \"{0}\": {1}")]
    YamlError(String, #[source] serde_yaml::Error),
}

pub trait YamlRead: DeserializeOwned {
    fn read_yaml<P: Display + AsRef<Path>>(path: P) -> Result<Self, Error> {
        let file = File::open(&path).map_err(|err| Error::FileError(path.to_string(), err))?;
        serde_yaml::from_reader(file).map_err(|err| Error::YamlError(path.to_string(), err))
    }
}
