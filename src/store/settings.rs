//! Store access for the singleton branding settings row.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error,
    branding::{BrandingSetting, Logo},
    store::StoreClient,
};

const TABLE: &str = "settings";

/// The fixed id of the only settings row that ever exists.
const SETTINGS_ID: &str = "global";

/// The `settings` row as the store serves it.
#[derive(Debug, Serialize, Deserialize)]
struct SettingsRow {
    id: String,
    #[serde(default)]
    logo_url: Option<String>,
    #[serde(default)]
    logo_dims: Option<LogoDimsColumn>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    updated_at: Option<OffsetDateTime>,
}

/// The JSON object stored in the `logo_dims` column.
#[derive(Debug, Serialize, Deserialize)]
struct LogoDimsColumn {
    w: u32,
    h: u32,
}

impl From<SettingsRow> for BrandingSetting {
    fn from(row: SettingsRow) -> Self {
        // The payload and its dimensions are only meaningful together; a row
        // missing either half counts as having no logo.
        let logo = match (row.logo_url, row.logo_dims) {
            (Some(payload), Some(dims)) => Some(Logo::from_parts(payload, dims.w, dims.h)),
            _ => None,
        };

        Self {
            logo,
            updated_at: row.updated_at,
        }
    }
}

impl StoreClient {
    /// Fetch the branding setting, or `None` when it has never been written.
    pub async fn get_branding(&self) -> Result<Option<BrandingSetting>, Error> {
        let mut rows: Vec<SettingsRow> = self
            .get_rows(TABLE, &[("select", "*"), ("id", "eq.global")])
            .await?;

        Ok(rows.pop().map(BrandingSetting::from))
    }

    /// Replace the branding setting unconditionally (last write wins) and
    /// return it as stored.
    pub async fn upsert_branding(&self, logo: &Logo) -> Result<BrandingSetting, Error> {
        let row = SettingsRow {
            id: SETTINGS_ID.to_owned(),
            logo_url: Some(logo.payload.clone()),
            logo_dims: Some(LogoDimsColumn {
                w: logo.width,
                h: logo.height,
            }),
            updated_at: Some(OffsetDateTime::now_utc()),
        };
        let stored: SettingsRow = self.upsert_row(TABLE, &row).await?;

        Ok(stored.into())
    }
}

#[cfg(test)]
mod settings_store_tests {
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, headers, method, path, query_param},
    };

    use crate::{branding::Logo, store::StoreClient};

    #[tokio::test]
    async fn missing_row_means_no_branding() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/settings"))
            .and(query_param("id", "eq.global"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let client = StoreClient::new(server.uri(), "key");

        assert_eq!(client.get_branding().await.unwrap(), None);
    }

    #[tokio::test]
    async fn row_with_only_half_a_logo_counts_as_no_logo() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "id": "global",
                    "logo_url": "data:image/png;base64,aGk=",
                    "logo_dims": null,
                    "updated_at": "2025-03-05T12:00:00+00:00",
                },
            ])))
            .mount(&server)
            .await;

        let client = StoreClient::new(server.uri(), "key");
        let branding = client.get_branding().await.unwrap().unwrap();

        assert_eq!(branding.logo, None);
        assert!(branding.updated_at.is_some());
    }

    #[tokio::test]
    async fn upsert_sends_merge_duplicates_and_returns_the_stored_row() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/settings"))
            .and(headers(
                "Prefer",
                vec!["resolution=merge-duplicates", "return=representation"],
            ))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!([
                {
                    "id": "global",
                    "logo_url": "data:image/png;base64,aGk=",
                    "logo_dims": { "w": 4, "h": 2 },
                    "updated_at": "2025-03-05T12:00:00+00:00",
                },
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = StoreClient::new(server.uri(), "key");
        let logo = Logo::from_parts("data:image/png;base64,aGk=".to_owned(), 4, 2);

        let stored = client.upsert_branding(&logo).await.unwrap();

        let stored_logo = stored.logo.unwrap();
        assert_eq!((stored_logo.width, stored_logo.height), (4, 2));
    }
}
