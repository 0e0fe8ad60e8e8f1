use std::fmt;
use std::fs;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server answered with status {0}")]
    Status(u16),
}

/// Where an input lives: a local file or an http(s) URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Location {
    File(PathBuf),
    Url(String),
}

impl Location {
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Self::Url(raw.to_owned())
        } else {
            Self::File(PathBuf::from(raw))
        }
    }

    pub fn join(&self, name: &str) -> Self {
        match self {
            Self::File(dir) => Self::File(dir.join(name)),
            Self::Url(base) => Self::Url(format!("{}/{name}", base.trim_end_matches('/'))),
        }
    }

    pub fn read_bytes(&self) -> Result<Vec<u8>, ReadError> {
        match self {
            Self::File(path) => Ok(fs::read(path)?),
            Self::Url(url) => {
                let response = reqwest::blocking::get(url)?;
                let status = response.status();
                if !status.is_success() {
                    return Err(ReadError::Status(status.as_u16()));
                }
                Ok(response.bytes()?.to_vec())
            }
        }
    }

    pub fn read_text(&self) -> Result<String, ReadError> {
        let bytes = self.read_bytes()?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}
