use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient notification about the outcome of one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn parsed() -> Self {
        Notice {
            kind: NoticeKind::Success,
            title: "Resume parsed successfully".to_string(),
            description: "Candidate information extracted".to_string(),
        }
    }

    pub fn invalid_file_type() -> Self {
        Notice {
            kind: NoticeKind::Error,
            title: "Invalid file type".to_string(),
            description: "Please upload a PDF file".to_string(),
        }
    }

    pub fn failed(description: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Error,
            title: "Processing failed".to_string(),
            description: description.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}
