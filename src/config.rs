//! Support for library configuration options

use url::Url;

use crate::error::Error;
use crate::task::TaskId;

/// The environment variable [`Config::from_env`] reads the base URL from
pub const BASE_URL_VAR: &str = "TASK_BOARD_URL";

/// The base URL used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/";

/// Where the remote task collection lives.
///
/// The collection is expected at `<base URL>/tasks`, and each task at `<base URL>/tasks/<id>`.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    base_url: Url,
}

impl Config {
    pub fn new<S: AsRef<str>>(base_url: S) -> Result<Self, Error> {
        let base_url = Url::parse(base_url.as_ref())?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }
        Ok(Self { base_url })
    }

    /// Read the base URL from the `TASK_BOARD_URL` environment variable, or use [`DEFAULT_BASE_URL`]
    pub fn from_env() -> Result<Self, Error> {
        match std::env::var(BASE_URL_VAR) {
            Ok(url) if url.trim().is_empty() == false => {
                log::debug!("Using base URL {} from {}", url, BASE_URL_VAR);
                Self::new(url.trim())
            },
            _ => Self::new(DEFAULT_BASE_URL),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The URL of the whole collection
    pub fn tasks_url(&self) -> Url {
        self.url_with_segments(&["tasks"])
    }

    /// The URL of a single task
    pub fn task_url(&self, id: &TaskId) -> Url {
        self.url_with_segments(&["tasks", &id.to_string()])
    }

    fn url_with_segments(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        // `Config::new` rejected cannot-be-a-base URLs, so the path can always be extended
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { base_url: Url::parse(DEFAULT_BASE_URL).unwrap(/* this is a valid constant URL */) }
    }
}
