use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use swimlane_core::{SwimlaneError, SwimlaneResult};
use swimlane_domain::{HistoryEntry, NewTask, Task};

use crate::routes::Routes;
use crate::traits::TaskApi;

/// Talks to the task backend over HTTP with JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: Client,
    routes: Routes,
}

impl HttpTaskApi {
    pub fn new(base_url: &str) -> SwimlaneResult<Self> {
        Ok(Self::with_client(Client::new(), Routes::new(base_url)?))
    }

    pub fn with_client(client: Client, routes: Routes) -> Self {
        Self { client, routes }
    }

    async fn send(&self, request: RequestBuilder) -> SwimlaneResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| SwimlaneError::Connection(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .ok()
            .filter(|body| !body.trim().is_empty())
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());
        Err(SwimlaneError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> SwimlaneResult<T> {
        self.send(request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| SwimlaneError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list_tasks(&self) -> SwimlaneResult<Vec<Task>> {
        tracing::debug!("GET {}", self.routes.tasks());
        self.send_json(self.client.get(self.routes.tasks())).await
    }

    async fn create_task(&self, task: &NewTask) -> SwimlaneResult<Task> {
        tracing::debug!("POST {}", self.routes.tasks());
        self.send_json(self.client.post(self.routes.tasks()).json(task))
            .await
    }

    async fn update_task(&self, task: &Task) -> SwimlaneResult<Task> {
        let url = self.routes.task(&task.id);
        tracing::debug!("PUT {}", url);
        self.send_json(self.client.put(url).json(task)).await
    }

    async fn delete_task(&self, id: &str) -> SwimlaneResult<()> {
        let url = self.routes.task(id);
        tracing::debug!("DELETE {}", url);
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    async fn list_history(&self, title: &str) -> SwimlaneResult<Vec<HistoryEntry>> {
        let url = self.routes.history_for(title);
        tracing::debug!("GET {}", url);
        self.send_json(self.client.get(url)).await
    }

    async fn append_history(&self, entry: &HistoryEntry) -> SwimlaneResult<HistoryEntry> {
        tracing::debug!("POST {}", self.routes.history());
        self.send_json(self.client.post(self.routes.history()).json(entry))
            .await
    }
}
