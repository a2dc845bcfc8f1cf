use std::fmt::{Display, Formatter, Result};
use std::io;
use std::path::PathBuf;

use reqwest::StatusCode;

/// Why a single record could not be fetched. Never fatal to a build.
#[derive(Debug)]
pub enum FetchError {
  Transport(reqwest::Error),
  BadStatus(StatusCode),
  Decode(serde_json::Error),
}

/// Failures while replacing the store file at the end of a build.
#[derive(Debug)]
pub enum StoreError {
  CreateDir(PathBuf, io::Error),
  Write(PathBuf, io::Error),
  Serialize(serde_json::Error),
  Replace(PathBuf, io::Error),
}

#[derive(Debug)]
pub enum LookupError {
  StoreUnavailable(PathBuf, io::Error),
  Corrupt(serde_json::Error),
  NotFound(u32),
}

#[derive(Debug)]
pub enum Error {
  ReqwestError(reqwest::Error),
  TemplateError(indicatif::style::TemplateError),
  Store(StoreError),
  Lookup(LookupError),
}

impl std::error::Error for FetchError {}
impl std::error::Error for StoreError {}
impl std::error::Error for LookupError {}
impl std::error::Error for Error {}

impl Display for FetchError {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    match self {
      FetchError::Transport(e) => write!(f, "request failed: {e}"),
      FetchError::BadStatus(status) => write!(f, "bad response status code: {status}"),
      FetchError::Decode(e) => write!(f, "could not decode record: {e}"),
    }
  }
}

impl Display for StoreError {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    match self {
      StoreError::CreateDir(path, e) => {
        write!(f, "could not create directory `{}`: {e}", path.display())
      }
      StoreError::Write(path, e) => write!(f, "could not write `{}`: {e}", path.display()),
      StoreError::Serialize(e) => write!(f, "could not serialize records: {e}"),
      StoreError::Replace(path, e) => {
        write!(f, "could not replace store `{}`: {e}", path.display())
      }
    }
  }
}

impl Display for LookupError {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    match self {
      LookupError::StoreUnavailable(path, e) => {
        write!(f, "could not open store `{}`: {e}", path.display())
      }
      LookupError::Corrupt(e) => write!(f, "store is corrupt: {e}"),
      LookupError::NotFound(id) => write!(f, "{id} not found in store, try to rebuild it"),
    }
  }
}

impl Display for Error {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    match self {
      Error::ReqwestError(e) => std::fmt::Display::fmt(e, f),
      Error::TemplateError(e) => std::fmt::Display::fmt(e, f),
      Error::Store(e) => std::fmt::Display::fmt(e, f),
      Error::Lookup(e) => std::fmt::Display::fmt(e, f),
    }
  }
}

impl From<reqwest::Error> for FetchError {
  fn from(reqwest_error: reqwest::Error) -> Self {
    FetchError::Transport(reqwest_error)
  }
}

impl From<serde_json::Error> for FetchError {
  fn from(serde_json_error: serde_json::Error) -> Self {
    FetchError::Decode(serde_json_error)
  }
}

impl From<reqwest::Error> for Error {
  fn from(reqwest_error: reqwest::Error) -> Self {
    Error::ReqwestError(reqwest_error)
  }
}

impl From<indicatif::style::TemplateError> for Error {
  fn from(template_error: indicatif::style::TemplateError) -> Self {
    Error::TemplateError(template_error)
  }
}

impl From<StoreError> for Error {
  fn from(store_error: StoreError) -> Self {
    Error::Store(store_error)
  }
}

impl From<LookupError> for Error {
  fn from(lookup_error: LookupError) -> Self {
    Error::Lookup(lookup_error)
  }
}
