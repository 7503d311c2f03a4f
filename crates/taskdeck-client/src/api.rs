//! Request/response API client for the board service.
//!
//! Plain CRUD over JSON; no retry or backoff here. The event stream is
//! a separate channel (`stream` module) and the board remains fully
//! usable through this client while the stream is down.

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use taskdeck_core::agent::{AgentRun, AgentStopOutcome};
use taskdeck_core::settings::BackendSettings;
use taskdeck_core::schema::{EntitySchema, SchemaEnums};
use taskdeck_core::wire::{WireTask, WireTaskCreate, WireTaskUpdate};
use taskdeck_core::{Task, TaskCreate, TaskUpdate, TaskdeckError, TaskdeckResult};

use crate::config::ClientConfig;

#[derive(serde::Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// HTTP client for the board service's CRUD endpoints.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the configured service.
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> TaskdeckResult<Option<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{path}", self.base_url);
        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TaskdeckError::network(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail)
                .unwrap_or_else(|| "Request failed".to_string());
            return Err(TaskdeckError::api(status.as_u16(), detail));
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let value = response
            .json::<T>()
            .await
            .map_err(|e| TaskdeckError::serialization(format!("invalid response body: {e}")))?;
        Ok(Some(value))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> TaskdeckResult<T> {
        let value: Option<T> = self.request(Method::GET, path, None::<&()>).await?;
        value.ok_or_else(|| TaskdeckError::serialization("unexpected empty response"))
    }

    fn domain_task(wire: WireTask) -> TaskdeckResult<Task> {
        wire.into_task()
            .map_err(|e| TaskdeckError::serialization(e.to_string()))
    }

    /// Fetch all tasks.
    pub async fn list_tasks(&self) -> TaskdeckResult<Vec<Task>> {
        let wire: Vec<WireTask> = self.get("/api/tasks").await?;
        wire.into_iter().map(Self::domain_task).collect()
    }

    /// Fetch a single task by id.
    pub async fn get_task(&self, id: &str) -> TaskdeckResult<Task> {
        let wire: WireTask = self.get(&format!("/api/tasks/{id}")).await?;
        Self::domain_task(wire)
    }

    /// Create a new task.
    pub async fn create_task(&self, create: TaskCreate) -> TaskdeckResult<Task> {
        let payload = WireTaskCreate::from(create);
        let wire: WireTask = self
            .request(Method::POST, "/api/tasks", Some(&payload))
            .await?
            .ok_or_else(|| TaskdeckError::serialization("unexpected empty response"))?;
        Self::domain_task(wire)
    }

    /// Apply a partial update to an existing task.
    ///
    /// Unset fields never reach the wire, so server state the caller
    /// did not touch stays untouched.
    pub async fn update_task(&self, id: &str, update: TaskUpdate) -> TaskdeckResult<Task> {
        let payload = WireTaskUpdate::from(update);
        let wire: WireTask = self
            .request(Method::PUT, &format!("/api/tasks/{id}"), Some(&payload))
            .await?
            .ok_or_else(|| TaskdeckError::serialization("unexpected empty response"))?;
        Self::domain_task(wire)
    }

    /// Delete a task.
    pub async fn delete_task(&self, id: &str) -> TaskdeckResult<()> {
        let _: Option<serde_json::Value> = self
            .request(Method::DELETE, &format!("/api/tasks/{id}"), None::<&()>)
            .await?;
        Ok(())
    }

    /// Fetch the subtasks of a parent task.
    pub async fn list_subtasks(&self, parent_id: &str) -> TaskdeckResult<Vec<Task>> {
        let wire: Vec<WireTask> = self
            .get(&format!("/api/tasks/{parent_id}/subtasks"))
            .await?;
        wire.into_iter().map(Self::domain_task).collect()
    }

    /// Start an agent run against a task.
    pub async fn start_agent_run(&self, task_id: &str) -> TaskdeckResult<AgentRun> {
        let payload = serde_json::json!({ "task_id": task_id });
        self.request(Method::POST, "/api/agent/run", Some(&payload))
            .await?
            .ok_or_else(|| TaskdeckError::serialization("unexpected empty response"))
    }

    /// Stop a running agent.
    pub async fn stop_agent_run(&self, run_id: &str) -> TaskdeckResult<AgentStopOutcome> {
        self.request(Method::POST, &format!("/api/agent/stop/{run_id}"), None::<&()>)
            .await?
            .ok_or_else(|| TaskdeckError::serialization("unexpected empty response"))
    }

    /// Fetch agent runs, optionally narrowed to one task.
    pub async fn list_agent_runs(&self, task_id: Option<&str>) -> TaskdeckResult<Vec<AgentRun>> {
        let path = match task_id {
            Some(id) => format!("/api/agent/runs?task_id={id}"),
            None => "/api/agent/runs".to_string(),
        };
        self.get(&path).await
    }

    /// Fetch a single agent run by id.
    pub async fn get_agent_run(&self, run_id: &str) -> TaskdeckResult<AgentRun> {
        self.get(&format!("/api/agent/runs/{run_id}")).await
    }

    /// Fetch the current service-side settings.
    pub async fn fetch_settings(&self) -> TaskdeckResult<BackendSettings> {
        self.get("/api/settings").await
    }

    /// Save service-side settings, returning the stored document.
    pub async fn save_settings(
        &self,
        settings: &BackendSettings,
    ) -> TaskdeckResult<BackendSettings> {
        self.request(Method::POST, "/api/settings", Some(settings))
            .await?
            .ok_or_else(|| TaskdeckError::serialization("unexpected empty response"))
    }

    /// Fetch the task entity schema.
    pub async fn fetch_task_schema(&self) -> TaskdeckResult<EntitySchema> {
        self.get("/api/schema/task").await
    }

    /// Fetch the project entity schema.
    pub async fn fetch_project_schema(&self) -> TaskdeckResult<EntitySchema> {
        self.get("/api/schema/project").await
    }

    /// Fetch enum metadata for all vocabularies.
    pub async fn fetch_enums(&self) -> TaskdeckResult<SchemaEnums> {
        self.get("/api/schema/enums").await
    }
}
