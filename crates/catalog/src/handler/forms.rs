use crate::storage::UploadedFile;
use axum::extract::Multipart;
use axum::http::{HeaderMap, header};
use shared::errors::HttpError;
use std::collections::HashMap;

/// A fully drained multipart form: text fields by name plus uploaded files
/// by field name.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl MultipartForm {
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn require_text(&self, name: &str) -> Result<String, HttpError> {
        self.text(name)
            .map(str::to_owned)
            .ok_or_else(|| HttpError::BadRequest(format!("{name}: This field is required.")))
    }

    pub fn require_i64(&self, name: &str) -> Result<i64, HttpError> {
        self.require_text(name)?
            .parse::<i64>()
            .map_err(|_| HttpError::BadRequest(format!("{name}: A valid integer is required.")))
    }

    pub fn require_i32(&self, name: &str) -> Result<i32, HttpError> {
        i32::try_from(self.require_i64(name)?)
            .map_err(|_| HttpError::BadRequest(format!("{name}: A valid integer is required.")))
    }

    pub fn bool_flag(&self, name: &str) -> bool {
        matches!(
            self.text(name).map(str::to_ascii_lowercase).as_deref(),
            Some("true") | Some("1") | Some("on") | Some("yes")
        )
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }
}

pub fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"))
}

pub async fn read_multipart(multipart: &mut Multipart) -> Result<MultipartForm, HttpError> {
    let mut form = MultipartForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| HttpError::BadRequest(format!("Invalid multipart payload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if let Some(file_name) = field.file_name().map(str::to_owned) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| HttpError::BadRequest(format!("Invalid multipart payload: {e}")))?;
            form.files.insert(
                name,
                UploadedFile {
                    file_name,
                    bytes: bytes.to_vec(),
                },
            );
        } else {
            let text = field
                .text()
                .await
                .map_err(|e| HttpError::BadRequest(format!("Invalid multipart payload: {e}")))?;
            form.fields.insert(name, text);
        }
    }

    Ok(form)
}
