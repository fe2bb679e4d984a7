//! PDF report export.
//!
//! Each report kind renders already-computed monthly figures into a paginated
//! tabular document with a shared header template: brand name, the uploaded
//! logo (scaled to a maximum width, aspect ratio preserved), the issue
//! date-time and the reporting month.

pub mod cash;
pub mod inventory;
mod pdf;

pub use pdf::ReportMeta;

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

/// Serve `bytes` as a downloadable PDF attachment named `file_name`.
pub fn pdf_attachment_response(file_name: &str, bytes: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

#[cfg(test)]
mod attachment_tests {
    use axum::http::header;

    use super::pdf_attachment_response;

    #[test]
    fn sets_download_headers() {
        let response = pdf_attachment_response("cash-report-2025-03.pdf", vec![1, 2, 3]);

        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/pdf"
        );
        assert_eq!(
            response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"cash-report-2025-03.pdf\""
        );
    }
}
