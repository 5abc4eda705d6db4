//! Upload widget state machine: idle → processing → idle.
//!
//! The dragging state only exists where drag events do: the upload page script
//! toggles the `dragging` class on the drop zone and submits the dropped file.

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WidgetState {
    #[default]
    Idle,
    Processing {
        file_name: String,
    },
}

#[derive(Debug, Default)]
pub struct UploadWidget {
    state: WidgetState,
}

impl UploadWidget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn is_processing(&self) -> bool {
        matches!(self.state, WidgetState::Processing { .. })
    }

    /// Enters `processing` for an accepted file. Returns `false`, leaving the
    /// state untouched, if a file is already being processed.
    pub fn begin_processing(&mut self, file_name: &str) -> bool {
        if self.is_processing() {
            return false;
        }
        self.state = WidgetState::Processing {
            file_name: file_name.to_string(),
        };
        true
    }

    /// Back to idle once the request resolves or rejects, whatever the outcome.
    pub fn finish(&mut self) {
        self.state = WidgetState::Idle;
    }
}
