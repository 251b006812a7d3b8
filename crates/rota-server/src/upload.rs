//! `/analyze` form handling: multipart parsing and upload persistence.

use std::path::{Path, PathBuf};

use crate::error::AnalyzeError;

/// A file part of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// File name as sent by the client. May be empty.
    pub file_name: String,
    pub contents: Vec<u8>,
}

/// The recognized fields of an `/analyze` submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisForm {
    pub file: Option<UploadedFile>,
    pub date: Option<String>,
    pub shift: Option<String>,
}

/// Parse a `multipart/form-data` body. Unknown fields are skipped.
///
/// # Errors
///
/// Returns [`AnalyzeError::Form`] if the content type carries no boundary or
/// the body is not valid multipart.
pub async fn parse_form(
    content_type: Option<&str>,
    body: Vec<u8>,
) -> Result<AnalysisForm, AnalyzeError> {
    let boundary = multer::parse_boundary(content_type.unwrap_or_default())?;
    let stream = futures_util::stream::once(async move { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut form = AnalysisForm::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                let contents = field.bytes().await?.to_vec();
                form.file = Some(UploadedFile {
                    file_name,
                    contents,
                });
            }
            Some("date") => form.date = Some(field.text().await?),
            Some("shift") => form.shift = Some(field.text().await?),
            _ => {}
        }
    }
    Ok(form)
}

/// The name an upload is stored under: the client's file name with any
/// directory components removed. `None` if nothing usable remains.
#[must_use]
pub fn stored_file_name(client_name: &str) -> Option<&str> {
    let name = client_name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default();
    (!name.is_empty() && name != "." && name != "..").then_some(name)
}

/// Write `contents` to `uploads_dir/file_name`, creating the directory if
/// needed. An existing file of the same name is overwritten.
///
/// # Errors
///
/// Returns [`AnalyzeError::Persist`] if the directory or file cannot be written.
pub async fn persist(
    uploads_dir: &Path,
    file_name: &str,
    contents: &[u8],
) -> Result<PathBuf, AnalyzeError> {
    tokio::fs::create_dir_all(uploads_dir)
        .await
        .map_err(|source| AnalyzeError::Persist {
            path: uploads_dir.to_path_buf(),
            source,
        })?;

    let path = uploads_dir.join(file_name);
    tokio::fs::write(&path, contents)
        .await
        .map_err(|source| AnalyzeError::Persist {
            path: path.clone(),
            source,
        })?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "upload saved");
    Ok(path)
}
