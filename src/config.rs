use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_URL_TEMPLATE: &str = "https://xkcd.com/{id}/info.0.json";
pub const DEFAULT_STORE_PATH: &str = "db.json";
pub const DEFAULT_MAX_ID: u32 = 1000;
pub const DEFAULT_CONCURRENCY: usize = 32;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const ID_PLACEHOLDER: &str = "{id}";

/// Settings shared by the fetcher, the coordinator and the store.
#[derive(Debug, Clone)]
pub struct Config {
    /// Request target for a single record, `{id}` is replaced by the identifier.
    pub url_template: String,
    pub store_path: PathBuf,
    /// Builds fetch every identifier in `1..=max_id`.
    pub max_id: u32,
    /// Number of fetches in flight at once.
    pub concurrency: usize,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            url_template: String::from(DEFAULT_URL_TEMPLATE),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            max_id: DEFAULT_MAX_ID,
            concurrency: DEFAULT_CONCURRENCY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl Config {
    pub fn url_for(&self, id: u32) -> String {
        self.url_template.replace(ID_PLACEHOLDER, &id.to_string())
    }

    /// Worker pool size, never below one.
    pub fn workers(&self) -> usize {
        self.concurrency.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn given_default_config_when_url_for_then_point_at_xkcd() {
        let config = Config::default();

        assert_eq!(config.url_for(353), "https://xkcd.com/353/info.0.json");
    }

    #[test]
    fn given_custom_template_when_url_for_then_substitute_every_placeholder() {
        let config = Config {
            url_template: String::from("http://localhost:1234/{id}/info.json?check={id}"),
            ..Config::default()
        };

        assert_eq!(config.url_for(5), "http://localhost:1234/5/info.json?check=5");
    }

    #[test]
    fn given_zero_concurrency_when_workers_then_use_one() {
        let config = Config { concurrency: 0, ..Config::default() };

        assert_eq!(config.workers(), 1);
    }
}
