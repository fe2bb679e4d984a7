//! The report branding setting: an uploaded logo and its pixel dimensions.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use printpdf::image_crate::{self, GenericImageView, ImageFormat};
use time::OffsetDateTime;

use crate::Error;

/// The singleton branding record.
///
/// Exactly one instance exists in the store; it is never deleted, only
/// replaced whole.
#[derive(Debug, Clone, PartialEq)]
pub struct BrandingSetting {
    /// The uploaded logo, if one has been set.
    pub logo: Option<Logo>,
    /// When the setting was last replaced.
    pub updated_at: Option<OffsetDateTime>,
}

/// An uploaded logo with its pixel dimensions.
///
/// The payload and the dimensions travel together so that one can never be
/// persisted without the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logo {
    /// The image as a `data:` URL (base64 payload with its MIME type).
    pub payload: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Logo {
    /// Decode an uploaded file into a logo, measuring its pixel dimensions.
    ///
    /// # Errors
    /// Returns [Error::InvalidLogo] when the bytes are not a decodable image.
    pub fn from_upload(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.is_empty() {
            return Err(Error::InvalidLogo("the uploaded file was empty".to_owned()));
        }

        let format = image_crate::guess_format(bytes)
            .map_err(|error| Error::InvalidLogo(error.to_string()))?;
        let image = image_crate::load_from_memory(bytes)
            .map_err(|error| Error::InvalidLogo(error.to_string()))?;
        let (width, height) = image.dimensions();

        let payload = format!(
            "data:{};base64,{}",
            mime_type(format),
            BASE64.encode(bytes)
        );

        Ok(Self {
            payload,
            width,
            height,
        })
    }

    /// Rebuild a logo from persisted fields.
    pub fn from_parts(payload: String, width: u32, height: u32) -> Self {
        Self {
            payload,
            width,
            height,
        }
    }

    /// The `src` value for an `<img>` preview.
    pub fn data_url(&self) -> &str {
        &self.payload
    }

    /// The raw image bytes, decoded from the stored payload.
    ///
    /// # Errors
    /// Returns [Error::InvalidLogo] when the stored payload is not valid
    /// base64.
    pub fn image_bytes(&self) -> Result<Vec<u8>, Error> {
        let encoded = self
            .payload
            .split_once(";base64,")
            .map(|(_, encoded)| encoded)
            .unwrap_or(&self.payload);

        BASE64
            .decode(encoded)
            .map_err(|error| Error::InvalidLogo(error.to_string()))
    }
}

fn mime_type(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Png => "image/png",
        ImageFormat::Jpeg => "image/jpeg",
        ImageFormat::Gif => "image/gif",
        ImageFormat::WebP => "image/webp",
        ImageFormat::Bmp => "image/bmp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
pub(crate) fn test_png_bytes(width: u32, height: u32) -> Vec<u8> {
    use printpdf::image_crate::{DynamicImage, RgbImage};
    use std::io::Cursor;

    let image = DynamicImage::ImageRgb8(RgbImage::new(width, height));
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, ImageFormat::Png)
        .expect("could not encode test PNG");

    bytes.into_inner()
}

#[cfg(test)]
mod logo_tests {
    use crate::Error;

    use super::{Logo, test_png_bytes};

    #[test]
    fn measures_dimensions_from_the_upload() {
        let bytes = test_png_bytes(8, 5);

        let logo = Logo::from_upload(&bytes).unwrap();

        assert_eq!((logo.width, logo.height), (8, 5));
        assert!(logo.payload.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn image_bytes_recovers_the_original_upload() {
        let bytes = test_png_bytes(2, 2);

        let logo = Logo::from_upload(&bytes).unwrap();

        assert_eq!(logo.image_bytes().unwrap(), bytes);
    }

    #[test]
    fn rejects_non_image_bytes() {
        let result = Logo::from_upload(b"not an image");

        assert!(matches!(result, Err(Error::InvalidLogo(_))));
    }

    #[test]
    fn rejects_empty_uploads() {
        let result = Logo::from_upload(&[]);

        assert!(matches!(result, Err(Error::InvalidLogo(_))));
    }
}
