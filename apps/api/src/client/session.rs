//! Upload session: drives one upload at a time through extraction and the request client.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::client::{ClientError, ParseClient};
use crate::extraction::{media_type, spawn_extract, ExtractionError};
use crate::parsing::models::CandidateProfile;
use crate::presentation::widget::UploadWidget;

/// A file offered to the upload widget.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub declared_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Reads a file from disk. The declared type comes from `declared_type` or
    /// the extension, and a non-PDF is rejected before the file is opened.
    pub async fn from_path(path: &Path, declared_type: Option<&str>) -> Result<Self, ClientError> {
        let declared_type = declared_type
            .map(str::to_string)
            .unwrap_or_else(|| media_type::declared_from_path(path).to_string());
        if !media_type::is_pdf(&declared_type) {
            return Err(ExtractionError::InvalidFileType {
                declared: declared_type,
            }
            .into());
        }

        let bytes = tokio::fs::read(path).await.map_err(|source| ClientError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            name,
            declared_type,
            bytes,
        })
    }
}

/// Owns the upload widget state for one user. At most one upload is in flight;
/// a second submit while processing is refused with `ClientError::Busy`.
pub struct UploadSession {
    client: ParseClient,
    widget: Mutex<UploadWidget>,
    cancel: CancellationToken,
}

impl UploadSession {
    pub fn new(client: ParseClient) -> Self {
        Self {
            client,
            widget: Mutex::new(UploadWidget::new()),
            cancel: CancellationToken::new(),
        }
    }

    /// Aborts the in-flight upload and refuses later ones: every `submit`
    /// pending or issued after this returns `Cancelled`.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Extracts text from `file`, requests its profile, and returns it.
    /// The widget is back in `Idle` when this returns, whatever the outcome.
    pub async fn submit(&self, file: UploadFile) -> Result<CandidateProfile, ClientError> {
        if !media_type::is_pdf(&file.declared_type) {
            return Err(ExtractionError::InvalidFileType {
                declared: file.declared_type,
            }
            .into());
        }

        let token = self.cancel.child_token();
        if token.is_cancelled() {
            return Err(ClientError::Cancelled);
        }

        if !lock(&self.widget).begin_processing(&file.name) {
            return Err(ClientError::Busy);
        }
        let _processing = ProcessingGuard {
            widget: &self.widget,
        };

        let file_name = file.name.clone();
        let result = tokio::select! {
            biased;
            _ = token.cancelled() => Err(ClientError::Cancelled),
            result = self.extract_and_request(file) => result,
        };

        match &result {
            Ok(profile) => info!(file = %file_name, name = %profile.name, "Upload processed"),
            Err(e) => error!(file = %file_name, "Error processing resume: {e}"),
        }
        result
    }

    async fn extract_and_request(&self, file: UploadFile) -> Result<CandidateProfile, ClientError> {
        let extracted = spawn_extract(file.bytes, file.declared_type).await?;
        info!(
            pages = extracted.page_count,
            chars = extracted.text.len(),
            "Extracted resume text"
        );
        self.client.request_profile(&extracted.text).await
    }
}

/// Returns the widget to idle when the upload future completes or is dropped.
struct ProcessingGuard<'a> {
    widget: &'a Mutex<UploadWidget>,
}

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        lock(self.widget).finish();
    }
}

#[cfg(test)]
impl UploadSession {
    pub fn widget_state(&self) -> crate::presentation::widget::WidgetState {
        lock(&self.widget).state().clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
