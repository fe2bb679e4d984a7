//! Defines the settings page for managing the report branding.

use std::sync::{Arc, RwLock};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::Response,
};
use maud::html;
use time::macros::format_description;

use crate::{
    AppState,
    branding::BrandingSetting,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, PAGE_CONTAINER_STYLE, base, render},
    navigation::NavBar,
};

/// The state needed to display the settings page.
#[derive(Debug, Clone)]
pub struct SettingsPageState {
    /// The cached branding setting.
    pub branding: Arc<RwLock<Option<BrandingSetting>>>,
}

impl FromRef<AppState> for SettingsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            branding: state.branding.clone(),
        }
    }
}

/// A route handler for the branding settings page: the current logo preview
/// and the upload form.
///
/// # Panics
///
/// Panics if the lock for the branding setting is poisoned.
pub async fn get_settings_page(State(state): State<SettingsPageState>) -> Response {
    let branding = state.branding.read().unwrap().clone();
    let nav_bar = NavBar::new(endpoints::SETTINGS_VIEW).into_html();

    let updated_format = format_description!("[day] [month repr:short] [year] [hour]:[minute]");
    let updated_label = branding
        .as_ref()
        .and_then(|branding| branding.updated_at)
        .and_then(|updated_at| updated_at.format(updated_format).ok());

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-md space-y-4"
            {
                h1 class="text-xl font-bold" { "Report Branding" }

                @match branding.as_ref().and_then(|branding| branding.logo.as_ref()) {
                    Some(logo) => {
                        figure class="space-y-2"
                        {
                            img
                                src=(logo.data_url())
                                alt="Current report logo"
                                class="max-w-full rounded border border-gray-300 dark:border-gray-600";

                            figcaption class="text-sm text-gray-500 dark:text-gray-400"
                            {
                                (logo.width) " × " (logo.height) " px"

                                @if let Some(updated_label) = &updated_label {
                                    ", updated " (updated_label)
                                }
                            }
                        }
                    }
                    None => {
                        p class="text-sm text-gray-500 dark:text-gray-400"
                        {
                            "No logo uploaded yet. Reports will show the business name only."
                        }
                    }
                }

                form
                    class="space-y-4"
                    hx-post=(endpoints::UPLOAD_LOGO)
                    hx-encoding="multipart/form-data"
                    hx-target-error="#alert-container"
                {
                    div
                    {
                        label
                            for="logo"
                            class=(FORM_LABEL_STYLE)
                        {
                            "Logo image"
                        }

                        input
                            name="logo"
                            id="logo"
                            type="file"
                            accept="image/*"
                            required
                            class="block w-full text-sm text-gray-900 dark:text-white";
                    }

                    button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Upload" }
                }
            }
        }
    );

    render(StatusCode::OK, base("Settings", &content))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, RwLock};

    use axum::{extract::State, http::StatusCode};

    use crate::branding::{BrandingSetting, Logo};

    use super::{SettingsPageState, get_settings_page};

    async fn body_of(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn shows_the_upload_form_when_no_logo_exists() {
        let state = SettingsPageState {
            branding: Arc::new(RwLock::new(None)),
        };

        let response = get_settings_page(State(state)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_of(response).await;
        assert!(body.contains("No logo uploaded yet."));
        assert!(body.contains("name=\"logo\""));
    }

    #[tokio::test]
    async fn previews_the_current_logo_with_its_dimensions() {
        let state = SettingsPageState {
            branding: Arc::new(RwLock::new(Some(BrandingSetting {
                logo: Some(Logo::from_parts(
                    "data:image/png;base64,aGk=".to_owned(),
                    120,
                    60,
                )),
                updated_at: None,
            }))),
        };

        let response = get_settings_page(State(state)).await;

        let body = body_of(response).await;
        assert!(body.contains("data:image/png;base64,aGk="));
        assert!(body.contains("120"));
        assert!(body.contains("60"));
    }
}
