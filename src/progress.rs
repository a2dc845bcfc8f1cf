use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::error::Error;

pub struct ProgressHelper;

impl ProgressHelper {
  /// Progress bar that advances once per finished fetch.
  pub fn create(len: u64, message: String) -> Result<ProgressBar, Error> {
    let bar = ProgressBar::new(len);
    bar.enable_steady_tick(Duration::from_millis(120));
    bar.set_style(
      ProgressStyle::with_template(
        "{spinner:.blue} {msg} [{bar:40.cyan/blue}] {pos}/{len} ({elapsed})",
      )?
      .progress_chars("#>-"),
    );
    bar.set_message(message);
    Ok(bar)
  }
}
