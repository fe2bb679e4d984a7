//! HTTP plumbing shared by all collections of the hosted data store.

use std::fmt;

use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::Error;

/// A client for the hosted data store's auto-generated REST row API.
///
/// Cheap to clone. The per-collection methods live in the sibling modules of
/// this one. No call is ever retried; a failure surfaces once to the caller,
/// which is responsible for leaving the in-memory state unchanged.
#[derive(Clone)]
pub struct StoreClient {
    client: Client,
    base_url: String,
    api_key: String,
}

// The api key must not end up in logs, so Debug is written by hand.
impl fmt::Debug for StoreClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl StoreClient {
    /// Create a client for the store at `base_url`, authenticating with `api_key`.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            client: Client::new(),
            base_url,
            api_key: api_key.into(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Fetch rows from `table` with the given query string parameters.
    pub(super) async fn get_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, Error> {
        let request = self.authorize(self.client.get(self.table_url(table)).query(query));
        let response = request.send().await.map_err(unreachable_error)?;

        parse_rows(response).await
    }

    /// Insert `row` into `table` and return the stored representation, which
    /// carries the store-assigned id and timestamp.
    pub(super) async fn insert_row<B, T>(&self, table: &str, row: &B) -> Result<T, Error>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        self.write_row(table, row, "return=representation").await
    }

    /// Insert-or-replace `row` in `table`, keyed on its primary key
    /// (last-write-wins), and return the stored representation.
    pub(super) async fn upsert_row<B, T>(&self, table: &str, row: &B) -> Result<T, Error>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        self.write_row(table, row, "resolution=merge-duplicates,return=representation")
            .await
    }

    async fn write_row<B, T>(&self, table: &str, row: &B, prefer: &str) -> Result<T, Error>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let request = self
            .authorize(self.client.post(self.table_url(table)))
            .header("Prefer", prefer)
            .json(row);
        let response = request.send().await.map_err(unreachable_error)?;

        let mut rows: Vec<T> = parse_rows(response).await?;
        rows.pop()
            .ok_or_else(|| Error::UnexpectedResponse("write returned no rows".to_owned()))
    }

    /// Delete the row of `table` with the given id.
    ///
    /// # Errors
    /// Returns [Error::NotFound] when no row had that id, including when it
    /// was already deleted by an earlier request; the two cases are not
    /// distinguished.
    pub(super) async fn delete_row(&self, table: &str, id: &str) -> Result<(), Error> {
        let id_filter = format!("eq.{id}");
        let request = self
            .authorize(
                self.client
                    .delete(self.table_url(table))
                    .query(&[("id", id_filter.as_str())]),
            )
            .header("Prefer", "return=representation");
        let response = request.send().await.map_err(unreachable_error)?;

        let rows: Vec<serde_json::Value> = parse_rows(response).await?;
        if rows.is_empty() {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}

fn unreachable_error(error: reqwest::Error) -> Error {
    Error::Unreachable(error.to_string())
}

async fn parse_rows<T: DeserializeOwned>(response: Response) -> Result<Vec<T>, Error> {
    let status = response.status();
    let body = response.text().await.map_err(unreachable_error)?;

    if !status.is_success() {
        return Err(Error::Remote(StoreErrorPayload::from_body(
            status.as_u16(),
            &body,
        )));
    }

    serde_json::from_str(&body).map_err(|error| Error::UnexpectedResponse(error.to_string()))
}

/// The error payload of a failed store call.
///
/// The store answers errors with a JSON object; when the body is not JSON the
/// raw text is kept as the message so nothing is lost.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreErrorPayload {
    /// Human-readable description of the failure.
    pub message: String,
    /// The store's error code, e.g. "23505" for a unique violation.
    #[serde(default)]
    pub code: Option<String>,
    /// Extra detail about the failing row or constraint.
    #[serde(default)]
    pub details: Option<String>,
    /// A suggested fix, when the store offers one.
    #[serde(default)]
    pub hint: Option<String>,
    /// The HTTP status of the response.
    #[serde(skip)]
    pub status: u16,
}

impl StoreErrorPayload {
    fn from_body(status: u16, body: &str) -> Self {
        let mut payload =
            serde_json::from_str::<StoreErrorPayload>(body).unwrap_or_else(|_| StoreErrorPayload {
                message: body.trim().to_owned(),
                code: None,
                details: None,
                hint: None,
                status: 0,
            });

        if payload.message.is_empty() {
            payload.message = "the data store returned an empty error response".to_owned();
        }
        payload.status = status;

        payload
    }
}

impl fmt::Display for StoreErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.message)?;

        if let Some(code) = &self.code {
            write!(f, " (code {code})")?;
        }

        Ok(())
    }
}
