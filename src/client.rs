//! This module provides a client to connect to a remote task collection over HTTP

use async_trait::async_trait;
use reqwest::Response;
use url::Url;

use crate::config::Config;
use crate::error::Error;
use crate::task::{Task, TaskDraft, TaskId};
use crate::traits::TaskCollection;

/// A task collection that fetches its data from a REST server
///
/// | Verb   | Path          | Body        |
/// |--------|---------------|-------------|
/// | GET    | `/tasks`      |             |
/// | POST   | `/tasks`      | a draft     |
/// | PUT    | `/tasks/{id}` | a full task |
/// | DELETE | `/tasks/{id}` |             |
#[derive(Clone, Debug)]
pub struct Client {
    config: Config,
    http: reqwest::Client,
}

impl Client {
    /// Create a client. This does not start a connection
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Create a client for the collection hosted under `base_url`
    pub fn from_url<S: AsRef<str>>(base_url: S) -> Result<Self, Error> {
        Ok(Self::new(Config::new(base_url)?))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Turn non-2xx responses into errors
fn check_status(response: Response, url: &Url) -> Result<Response, Error> {
    let status = response.status();
    if status.is_success() == false {
        return Err(Error::Status { status, url: url.to_string() });
    }
    Ok(response)
}

#[async_trait]
impl TaskCollection for Client {
    async fn get_tasks(&self) -> Result<Vec<Task>, Error> {
        let url = self.config.tasks_url();
        log::debug!("GET {}", url);

        let response = self.http
            .get(url.clone())
            .send()
            .await?;
        let text = check_status(response, &url)?.text().await?;

        // Some collections answer `null` (or nothing at all) when they are empty
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let tasks: Option<Vec<Task>> = serde_json::from_str(&text)?;
        Ok(tasks.unwrap_or_default())
    }

    async fn create_task(&self, draft: &TaskDraft) -> Result<Task, Error> {
        let url = self.config.tasks_url();
        log::debug!("POST {} ({:?})", url, draft.text());

        let response = self.http
            .post(url.clone())
            .json(draft)
            .send()
            .await?;
        let text = check_status(response, &url)?.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn update_task(&self, task: &Task) -> Result<Task, Error> {
        let url = self.config.task_url(task.id());
        log::debug!("PUT {}", url);

        let response = self.http
            .put(url.clone())
            .json(task)
            .send()
            .await?;
        let text = check_status(response, &url)?.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), Error> {
        let url = self.config.task_url(id);
        log::debug!("DELETE {}", url);

        let response = self.http
            .delete(url.clone())
            .send()
            .await?;
        check_status(response, &url)?;
        Ok(())
    }
}
