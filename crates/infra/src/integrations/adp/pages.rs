//! Paged list endpoints
//!
//! List responses wrap their items in a named array (`workers`,
//! `timeCards`, ...). Totals, when present, come either as top-level
//! `totalRecords`/`totalPages` or as `meta.totalNumber`.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use hrsync_core::{Page, PageCursor, PageSource};
use hrsync_domain::{HrSyncError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::api::RateLimitedGateway;

/// One paged list endpoint, fetched through the gateway.
pub struct CollectionPages<T> {
    gateway: Arc<RateLimitedGateway>,
    path: &'static str,
    key: &'static str,
    cancel: CancellationToken,
    _item: PhantomData<fn() -> T>,
}

impl<T> CollectionPages<T> {
    pub fn new(
        gateway: Arc<RateLimitedGateway>,
        path: &'static str,
        key: &'static str,
        cancel: CancellationToken,
    ) -> Self {
        Self { gateway, path, key, cancel, _item: PhantomData }
    }
}

#[async_trait]
impl<T> PageSource for CollectionPages<T>
where
    T: DeserializeOwned + Send + 'static,
{
    type Item = T;

    fn endpoint(&self) -> &str {
        self.path
    }

    async fn fetch_page(&self, cursor: PageCursor) -> Result<Page<T>> {
        let query = [("$skip", cursor.skip.to_string()), ("$top", cursor.top.to_string())];
        let body: Option<Value> = self.gateway.get_optional(self.path, &query, &self.cancel).await?;
        decode_page(body, self.key)
    }
}

/// Decode one list response.
///
/// No body, or a body without `key`, is an empty page.
///
/// # Errors
/// `HrSyncError::Deserialization` when `key` is not an array of `T`.
pub fn decode_page<T: DeserializeOwned>(body: Option<Value>, key: &str) -> Result<Page<T>> {
    let Some(mut body) = body else {
        return Ok(Page::new(Vec::new()));
    };

    let items = match body.get_mut(key).map(Value::take) {
        None | Some(Value::Null) => Vec::new(),
        Some(list @ Value::Array(_)) => serde_json::from_value(list).map_err(|err| {
            HrSyncError::Deserialization(format!("`{key}` entries do not match: {err}"))
        })?,
        Some(_) => {
            return Err(HrSyncError::Deserialization(format!("`{key}` is not an array")));
        }
    };

    let total_records = body
        .get("totalRecords")
        .and_then(Value::as_u64)
        .or_else(|| body.pointer("/meta/totalNumber").and_then(Value::as_u64));
    let total_pages = body.get("totalPages").and_then(Value::as_u64);

    Ok(Page::new(items).with_total_records(total_records).with_total_pages(total_pages))
}
