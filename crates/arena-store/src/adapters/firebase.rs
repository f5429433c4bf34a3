//! Firebase Realtime Database adapter over the REST protocol.
//!
//! Every node is addressable as `{base}/{path}.json`. The port primitives
//! map onto the protocol directly:
//!
//! - `get`        → `GET`
//! - `patch`      → `PATCH` (merge semantics)
//! - `increment`  → `PUT {".sv": {"increment": n}}` (server-side atomic)
//! - `append_child` → `PUT` under a client-generated push key, as the SDK does
//! - `conditional_update` → ETag read (`X-Firebase-ETag: true`) + `if-match`
//!   write; HTTP 412 means the node changed under us and the loop retries
//! - `query_equal` → `?orderBy="field"&equalTo="value"` indexed query
//!
//! Timeouts are applied per call by the client and surface as
//! `StoreError::Timeout`, distinct from `Unavailable`.

use crate::adapters::{push_key, substitute_child_key};
use crate::domain::config::{ConfigError, StoreConfig};
use crate::domain::path::StorePath;
use crate::ports::{DocumentStore, TxnDecision, TxnOutcome, UpdateFn};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::{json, Map, Value};
use shared_types::StoreError;
use tracing::{debug, warn};

/// REST client for the hosted store.
pub struct FirebaseRtdb {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
    cas_retries: u32,
}

impl FirebaseRtdb {
    /// Build an adapter from validated configuration.
    pub fn new(config: StoreConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.normalized_url().to_string(),
            auth_token: config.auth_token,
            cas_retries: config.cas_retries,
        })
    }

    fn url(&self, path: &StorePath) -> String {
        format!("{}/{}.json", self.base_url, path)
    }

    /// Attach the auth token, if configured.
    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => builder.query(&[("auth", token.as_str())]),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder, op: &str) -> Result<Response, StoreError> {
        let response = builder.send().await.map_err(|e| transport(op, &e))?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(StoreError::Unavailable(format!(
                "{op}: HTTP {}",
                response.status()
            )))
        }
    }
}

#[async_trait]
impl DocumentStore for FirebaseRtdb {
    async fn get(&self, path: &StorePath) -> Result<Option<Value>, StoreError> {
        let op = format!("GET {path}");
        debug!(%path, "store get");
        let response = self
            .send(self.authed(self.client.get(self.url(path))), &op)
            .await?;
        let value: Value = response
            .json()
            .await
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(if value.is_null() { None } else { Some(value) })
    }

    async fn patch(
        &self,
        path: &StorePath,
        fields: Map<String, Value>,
    ) -> Result<(), StoreError> {
        let op = format!("PATCH {path}");
        debug!(%path, fields = fields.len(), "store patch");
        self.send(
            self.authed(self.client.patch(self.url(path)))
                .json(&Value::Object(fields)),
            &op,
        )
        .await?;
        Ok(())
    }

    async fn increment(&self, path: &StorePath, delta: i64) -> Result<(), StoreError> {
        let op = format!("INCR {path}");
        debug!(%path, delta, "store increment");
        self.send(
            self.authed(self.client.put(self.url(path)))
                .json(&json!({ ".sv": { "increment": delta } })),
            &op,
        )
        .await?;
        Ok(())
    }

    async fn append_child(&self, path: &StorePath, value: Value) -> Result<String, StoreError> {
        let key = push_key();
        let mut value = value;
        substitute_child_key(&mut value, &key);

        let child_path = path.clone().child(&key)?;
        let op = format!("PUT {child_path}");
        debug!(%child_path, "store append");
        self.send(
            self.authed(self.client.put(self.url(&child_path))).json(&value),
            &op,
        )
        .await?;
        Ok(key)
    }

    async fn conditional_update(
        &self,
        path: &StorePath,
        apply: UpdateFn<'_>,
    ) -> Result<TxnOutcome, StoreError> {
        let url = self.url(path);
        let op = format!("CAS {path}");

        for attempt in 0..self.cas_retries {
            let response = self
                .send(
                    self.authed(self.client.get(&url)).header("X-Firebase-ETag", "true"),
                    &op,
                )
                .await?;
            let etag = response
                .headers()
                .get("ETag")
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| StoreError::Unavailable(format!("{op}: missing ETag")))?
                .to_string();
            let current: Value = response
                .json()
                .await
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            let current = if current.is_null() { None } else { Some(current) };

            let new_value = match apply(current.as_ref()) {
                TxnDecision::Abort => return Ok(TxnOutcome::Aborted),
                TxnDecision::Commit(value) => value,
            };

            let commit = self
                .authed(self.client.put(&url))
                .header("if-match", &etag)
                .json(&new_value)
                .send()
                .await
                .map_err(|e| transport(&op, &e))?;

            if commit.status() == StatusCode::PRECONDITION_FAILED {
                warn!(%path, attempt, "conditional update lost the race, retrying");
                continue;
            }
            if !commit.status().is_success() {
                return Err(StoreError::Unavailable(format!(
                    "{op}: HTTP {}",
                    commit.status()
                )));
            }
            return Ok(TxnOutcome::Committed { new_value });
        }

        Err(StoreError::Conflict {
            retries: self.cas_retries,
        })
    }

    async fn query_equal(
        &self,
        path: &StorePath,
        child_key: &str,
        equals: &str,
    ) -> Result<Vec<(String, Value)>, StoreError> {
        let op = format!("QUERY {path} by {child_key}");
        debug!(%path, child_key, "store query");
        // The query grammar wants JSON-encoded operands, quotes included.
        let order_by = serde_json::to_string(child_key)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let equal_to = serde_json::to_string(equals)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let response = self
            .send(
                self.authed(self.client.get(self.url(path)))
                    .query(&[("orderBy", order_by.as_str()), ("equalTo", equal_to.as_str())]),
                &op,
            )
            .await?;
        let value: Value = response
            .json()
            .await
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        match value {
            Value::Null => Ok(Vec::new()),
            Value::Object(children) => Ok(children.into_iter().collect()),
            other => Err(StoreError::Serialization(format!(
                "{op}: expected object, got {other}"
            ))),
        }
    }

    fn server_timestamp(&self) -> Value {
        json!({ ".sv": "timestamp" })
    }
}

fn transport(op: &str, err: &reqwest::Error) -> StoreError {
    if err.is_timeout() {
        StoreError::Timeout(op.to_string())
    } else {
        StoreError::Unavailable(format!("{op}: {err}"))
    }
}
