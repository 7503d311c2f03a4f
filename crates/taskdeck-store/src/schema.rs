//! Lazily-populated cache for service schema metadata.
//!
//! Schema and enum metadata change only when the service is redeployed,
//! so each key is fetched once and memoized. The cache is an explicitly
//! owned value with one explicit [`invalidate`](SchemaCache::invalidate)
//! operation; there is deliberately no time- or event-based invalidation
//! policy.

use async_trait::async_trait;
use tokio::sync::Mutex;

use taskdeck_client::ApiClient;
use taskdeck_core::schema::{EntitySchema, SchemaEnums};
use taskdeck_core::TaskdeckResult;

/// Where schema metadata comes from.
///
/// The production source is [`ApiClient`]; tests substitute their own.
#[async_trait]
pub trait SchemaSource: Send + Sync {
    /// Fetch the task entity schema.
    async fn task_schema(&self) -> TaskdeckResult<EntitySchema>;
    /// Fetch the project entity schema.
    async fn project_schema(&self) -> TaskdeckResult<EntitySchema>;
    /// Fetch enum metadata.
    async fn enums(&self) -> TaskdeckResult<SchemaEnums>;
}

#[async_trait]
impl SchemaSource for ApiClient {
    async fn task_schema(&self) -> TaskdeckResult<EntitySchema> {
        self.fetch_task_schema().await
    }

    async fn project_schema(&self) -> TaskdeckResult<EntitySchema> {
        self.fetch_project_schema().await
    }

    async fn enums(&self) -> TaskdeckResult<SchemaEnums> {
        self.fetch_enums().await
    }
}

/// Memoizing wrapper over a [`SchemaSource`].
///
/// Failed fetches are not cached; the next call retries the source.
pub struct SchemaCache<S> {
    source: S,
    task_schema: Mutex<Option<EntitySchema>>,
    project_schema: Mutex<Option<EntitySchema>>,
    enums: Mutex<Option<SchemaEnums>>,
}

impl<S: SchemaSource> SchemaCache<S> {
    /// Create an empty cache over a source.
    pub fn new(source: S) -> Self {
        Self {
            source,
            task_schema: Mutex::new(None),
            project_schema: Mutex::new(None),
            enums: Mutex::new(None),
        }
    }

    /// Task entity schema, fetched on first use.
    pub async fn task_schema(&self) -> TaskdeckResult<EntitySchema> {
        let mut slot = self.task_schema.lock().await;
        if let Some(schema) = slot.as_ref() {
            return Ok(schema.clone());
        }
        let schema = self.source.task_schema().await?;
        *slot = Some(schema.clone());
        Ok(schema)
    }

    /// Project entity schema, fetched on first use.
    pub async fn project_schema(&self) -> TaskdeckResult<EntitySchema> {
        let mut slot = self.project_schema.lock().await;
        if let Some(schema) = slot.as_ref() {
            return Ok(schema.clone());
        }
        let schema = self.source.project_schema().await?;
        *slot = Some(schema.clone());
        Ok(schema)
    }

    /// Enum metadata, fetched on first use.
    pub async fn enums(&self) -> TaskdeckResult<SchemaEnums> {
        let mut slot = self.enums.lock().await;
        if let Some(enums) = slot.as_ref() {
            return Ok(enums.clone());
        }
        let enums = self.source.enums().await?;
        *slot = Some(enums.clone());
        Ok(enums)
    }

    /// Drop every memoized value; the next reads hit the source again.
    pub async fn invalidate(&self) {
        *self.task_schema.lock().await = None;
        *self.project_schema.lock().await = None;
        *self.enums.lock().await = None;
    }
}
