//! # Key-Value REST Store
//!
//! Keeps the whole collection as one JSON string under a single key of a hosted
//! Redis-compatible REST API (Upstash / Vercel KV).
//!
//! | Operation | Request | Reply |
//! |-----------|---------|-------|
//! | load | `GET {url}/get/{key}` | `{"result": "<json array>" \| null}` |
//! | save | `POST {url}/set/{key}`, body = JSON array | `{"result": "OK"}` |
//!
//! Both requests carry `Authorization: Bearer {token}`. A reply with an `error` field or
//! a non-2xx status is a store error. Nothing is retried.

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use resource_actor::{ActorEntity, CollectionStore, StoreError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::marker::PhantomData;
use tracing::debug;

/// Reply envelope of the REST API.
#[derive(Debug, Deserialize)]
struct KvReply {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

pub struct KvRestStore<T> {
    http: reqwest::Client,
    base_url: Url,
    token: String,
    key: String,
    _entity: PhantomData<fn() -> T>,
}

impl<T> KvRestStore<T> {
    pub fn new(base_url: Url, token: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            token: token.into(),
            key: key.into(),
            _entity: PhantomData,
        }
    }

    fn endpoint(&self, command: &str) -> Result<Url, StoreError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::Unavailable(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .push(command)
            .push(&self.key);
        Ok(url)
    }
}

#[async_trait]
impl<T> CollectionStore<T> for KvRestStore<T>
where
    T: ActorEntity + Serialize + DeserializeOwned,
{
    async fn load(&self) -> Result<Vec<T>, StoreError> {
        let response = self
            .http
            .get(self.endpoint("get")?)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StoreError::Read(e.to_string()))?;

        let items = decode_collection(status, &body)?;
        debug!(key = %self.key, size = items.len(), "Loaded collection");
        Ok(items)
    }

    async fn save(&self, items: &[T]) -> Result<(), StoreError> {
        let payload = serde_json::to_string(items).map_err(|e| StoreError::Codec(e.to_string()))?;

        let response = self
            .http
            .post(self.endpoint("set")?)
            .bearer_auth(&self.token)
            .body(payload)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;

        check_write(status, &body)?;
        debug!(key = %self.key, size = items.len(), "Saved collection");
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "kv-rest"
    }
}

/// Decodes a `get` reply. A missing or null result is an empty collection.
fn decode_collection<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<Vec<T>, StoreError> {
    let reply = parse_reply(status, body).map_err(StoreError::Read)?;

    match reply.result {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(encoded)) => {
            serde_json::from_str(&encoded).map_err(|e| StoreError::Codec(e.to_string()))
        }
        Some(array @ Value::Array(_)) => {
            serde_json::from_value(array).map_err(|e| StoreError::Codec(e.to_string()))
        }
        Some(other) => Err(StoreError::Codec(format!(
            "expected a JSON array, got {other}"
        ))),
    }
}

fn check_write(status: StatusCode, body: &str) -> Result<(), StoreError> {
    parse_reply(status, body).map(|_| ()).map_err(StoreError::Write)
}

fn parse_reply(status: StatusCode, body: &str) -> Result<KvReply, String> {
    let reply = serde_json::from_str::<KvReply>(body);

    if let Ok(KvReply {
        error: Some(error), ..
    }) = &reply
    {
        return Err(format!("{status}: {error}"));
    }
    if !status.is_success() {
        return Err(format!("{status}: {body}"));
    }
    reply.map_err(|e| format!("unreadable reply: {e}"))
}
