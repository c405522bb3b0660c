use crate::models::VideoRecord;
use anyhow::{bail, Result};
use log::info;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

const TASK_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Write client for one Algolia index.
pub struct AlgoliaClient {
    http: Client,
    app_id: String,
    api_key: String,
    index_name: String,
    base_url: String,
}

#[derive(Serialize)]
struct BatchRequest<'a> {
    requests: Vec<BatchOperation<'a>>,
}

#[derive(Serialize)]
struct BatchOperation<'a> {
    action: &'static str,
    body: &'a VideoRecord,
}

/// Every write endpoint answers with the id of a queued indexing task.
#[derive(Deserialize)]
struct TaskCreated {
    #[serde(rename = "taskID")]
    task_id: u64,
}

#[derive(Deserialize)]
struct TaskStatus {
    status: String,
}

impl AlgoliaClient {
    pub fn new(app_id: String, api_key: String, index_name: String) -> Self {
        let base_url = format!("https://{}.algolia.net", app_id.to_lowercase());
        Self::with_base_url(app_id, api_key, index_name, base_url)
    }

    pub fn with_base_url(
        app_id: String,
        api_key: String,
        index_name: String,
        base_url: String,
    ) -> Self {
        AlgoliaClient {
            http: Client::new(),
            app_id,
            api_key,
            index_name,
            base_url,
        }
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("X-Algolia-Application-Id", &self.app_id)
            .header("X-Algolia-API-Key", &self.api_key)
    }

    /// Upserts every record keyed by its objectID (create-or-replace), then
    /// waits for the indexing task to publish. Re-running with the same
    /// records replaces documents in place, so the whole import is
    /// idempotent.
    pub async fn save_objects(&self, records: &[VideoRecord]) -> Result<()> {
        // https://www.algolia.com/doc/rest-api/search/#tag/Records/operation/batch
        let url = format!("{}/1/indexes/{}/batch", self.base_url, self.index_name);
        let body = BatchRequest {
            requests: records
                .iter()
                .map(|record| BatchOperation {
                    action: "updateObject",
                    body: record,
                })
                .collect(),
        };

        let response = self.authed(self.http.post(&url)).json(&body).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            bail!("Algolia batch upsert failed with status {status}: {text}");
        }

        let task: TaskCreated = response.json().await?;
        self.wait_task(task.task_id).await?;
        info!("Upserted {} records into index {}", records.len(), self.index_name);
        Ok(())
    }

    /// Re-applies the index configuration: only title and description are
    /// searchable, everything else is retrievable-only. Applied on every
    /// run; the operation is idempotent on the service side.
    pub async fn set_settings(&self) -> Result<()> {
        // https://www.algolia.com/doc/rest-api/search/#tag/Indices/operation/setSettings
        let url = format!("{}/1/indexes/{}/settings", self.base_url, self.index_name);
        let settings = json!({
            "searchableAttributes": ["title", "description"],
            "indexLanguages": ["ja"],
            "queryLanguages": ["ja"],
        });

        let response = self
            .authed(self.http.put(&url))
            .json(&settings)
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            bail!("Algolia settings update failed with status {status}: {text}");
        }

        let task: TaskCreated = response.json().await?;
        self.wait_task(task.task_id).await?;
        info!("Applied settings to index {}", self.index_name);
        Ok(())
    }

    /// Algolia write operations are queued; polls the task endpoint until
    /// the change is durably published.
    async fn wait_task(&self, task_id: u64) -> Result<()> {
        // https://www.algolia.com/doc/rest-api/search/#tag/Indices/operation/getTask
        let url = format!(
            "{}/1/indexes/{}/task/{task_id}",
            self.base_url, self.index_name
        );

        loop {
            let status: TaskStatus = self
                .authed(self.http.get(&url))
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;

            if status.status == "published" {
                return Ok(());
            }
            tokio::time::sleep(TASK_POLL_INTERVAL).await;
        }
    }
}
