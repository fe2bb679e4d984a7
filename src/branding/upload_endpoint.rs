//! Defines the endpoint for uploading a new logo.

use std::sync::{Arc, RwLock};

use axum::{
    extract::{FromRef, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    AppState, Error,
    branding::{BrandingSetting, Logo},
    endpoints,
    store::StoreClient,
};

/// The state needed to replace the logo.
#[derive(Debug, Clone)]
pub struct UploadLogoState {
    /// The gateway to the hosted data store.
    pub store: StoreClient,
    /// The cached branding setting.
    pub branding: Arc<RwLock<Option<BrandingSetting>>>,
}

impl FromRef<AppState> for UploadLogoState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            branding: state.branding.clone(),
        }
    }
}

/// A route handler for uploading a new logo.
///
/// The image is decoded to measure its pixel dimensions, then upserted as the
/// singleton branding row (last write wins). Only once the store confirms the
/// write is the cached setting replaced; on success the client is redirected
/// back to the settings page.
///
/// # Panics
///
/// Panics if the lock for the branding setting is poisoned.
pub async fn upload_logo_endpoint(
    State(state): State<UploadLogoState>,
    multipart: Multipart,
) -> Response {
    let bytes = match read_logo_field(multipart).await {
        Ok(bytes) => bytes,
        Err(error) => return error.into_alert_response(),
    };

    let logo = match Logo::from_upload(&bytes) {
        Ok(logo) => logo,
        Err(error) => return error.into_alert_response(),
    };

    match state.store.upsert_branding(&logo).await {
        Ok(stored) => {
            *state.branding.write().unwrap() = Some(stored);

            (
                HxRedirect(endpoints::SETTINGS_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("could not replace the logo: {error}");
            error.into_alert_response()
        }
    }
}

/// Pull the bytes of the `logo` field out of the multipart form.
async fn read_logo_field(mut multipart: Multipart) -> Result<Vec<u8>, Error> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|error| Error::MultipartError(error.to_string()))?
    {
        if field.name() == Some("logo") {
            let bytes = field
                .bytes()
                .await
                .map_err(|error| Error::MultipartError(error.to_string()))?;

            return Ok(bytes.to_vec());
        }
    }

    Err(Error::MissingField("logo"))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, RwLock};

    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
        routing::post,
    };
    use tower::ServiceExt;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    use crate::{branding::core::test_png_bytes, store::StoreClient};

    use super::{UploadLogoState, upload_logo_endpoint};

    const BOUNDARY: &str = "test-boundary";

    fn multipart_body(field_name: &str, file_bytes: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field_name}\"; filename=\"logo.png\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
        body.extend_from_slice(file_bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn app(state: UploadLogoState) -> Router {
        Router::new()
            .route("/api/settings/logo", post(upload_logo_endpoint))
            .with_state(state)
    }

    async fn post_upload(router: Router, body: Vec<u8>) -> axum::response::Response {
        router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/settings/logo")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={BOUNDARY}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn valid_upload_is_upserted_and_cached() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/settings"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!([
                {
                    "id": "global",
                    "logo_url": "data:image/png;base64,aGk=",
                    "logo_dims": { "w": 6, "h": 4 },
                    "updated_at": "2025-03-05T12:00:00+00:00",
                }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let state = UploadLogoState {
            store: StoreClient::new(server.uri(), "key"),
            branding: Arc::new(RwLock::new(None)),
        };

        let response = post_upload(
            app(state.clone()),
            multipart_body("logo", &test_png_bytes(6, 4)),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let branding = state.branding.read().unwrap();
        let logo = branding.as_ref().unwrap().logo.as_ref().unwrap();
        assert_eq!((logo.width, logo.height), (6, 4));
    }

    #[tokio::test]
    async fn non_image_upload_is_rejected_without_calling_the_store() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let state = UploadLogoState {
            store: StoreClient::new(server.uri(), "key"),
            branding: Arc::new(RwLock::new(None)),
        };

        let response = post_upload(
            app(state.clone()),
            multipart_body("logo", b"definitely not an image"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(state.branding.read().unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_logo_field_is_rejected() {
        let server = MockServer::start().await;
        let state = UploadLogoState {
            store: StoreClient::new(server.uri(), "key"),
            branding: Arc::new(RwLock::new(None)),
        };

        let response = post_upload(
            app(state),
            multipart_body("something_else", &test_png_bytes(2, 2)),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
