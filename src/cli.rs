use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use comic_store::config::{self, Config};

/// Downloading xkcd comic records into a local json store and searching their transcripts.
#[derive(Parser)]
pub(crate) struct Cli {
  /// Fetch every comic from 1 to `--max-id` and replace the store with the ones that could be
  /// fetched.
  #[clap(long, short)]
  pub(crate) build: bool,
  /// Number of the comic to search in the store. Its transcript is printed if found.
  #[clap(long, short, value_parser = clap::value_parser!(u32).range(1..))]
  pub(crate) search: Option<u32>,
  /// Location of the json store.
  #[clap(long, env = "COMIC_STORE_PATH", default_value = config::DEFAULT_STORE_PATH)]
  pub(crate) store: PathBuf,
  /// Url of a single comic, `{id}` is replaced by the comic number.
  #[clap(long, env = "COMIC_STORE_URL_TEMPLATE", default_value = config::DEFAULT_URL_TEMPLATE)]
  pub(crate) url_template: String,
  /// Highest comic number fetched by a build. [default: 1000]
  #[clap(long, env = "COMIC_STORE_MAX_ID", default_value = "1000")]
  pub(crate) max_id: u32,
  /// Maximum number of requests in flight during a build. [default: 32]
  #[clap(long, env = "COMIC_STORE_CONCURRENCY", default_value = "32")]
  pub(crate) concurrency: usize,
  /// Timeout of a single request in seconds. [default: 10]
  #[clap(long, env = "COMIC_STORE_TIMEOUT_SECS", default_value = "10")]
  pub(crate) timeout_secs: u64,
}

impl Cli {
  pub(crate) fn config(&self) -> Config {
    Config {
      url_template: self.url_template.clone(),
      store_path: self.store.clone(),
      max_id: self.max_id,
      concurrency: self.concurrency,
      request_timeout: Duration::from_secs(self.timeout_secs),
    }
  }
}
