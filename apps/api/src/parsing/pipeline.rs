//! Structured-Data pipeline: validate input → query model → parse and normalize output.

use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::{locate_json_object, strip_json_fences, CompletionModel};
use crate::parsing::models::CandidateProfile;
use crate::parsing::prompts::{resume_parse_prompt, RESUME_PARSE_SYSTEM};

/// Turns raw resume text into a normalized `CandidateProfile` using the language model.
/// One model call, no retries; either a full profile or an error comes back.
pub async fn structure_resume(
    resume_text: &str,
    model: &dyn CompletionModel,
) -> Result<CandidateProfile, AppError> {
    if resume_text.trim().is_empty() {
        return Err(AppError::MissingInput);
    }

    let request_id = Uuid::new_v4();
    info!(%request_id, chars = resume_text.len(), "Processing resume with language model");

    let completion = model
        .complete(RESUME_PARSE_SYSTEM, &resume_parse_prompt(resume_text))
        .await?;
    debug!(%request_id, chars = completion.len(), "Received model completion");

    let profile = decode_completion(&completion)?;
    info!(%request_id, name = %profile.name, "Resume parsed successfully");
    Ok(profile)
}

/// Locates the JSON object in a completion and coerces it into a profile.
///
/// The first-`{`-to-last-`}` span is tried first, then the literal fence trim.
pub fn decode_completion(completion: &str) -> Result<CandidateProfile, AppError> {
    let candidates = locate_json_object(completion)
        .into_iter()
        .chain(std::iter::once(strip_json_fences(completion)));

    let mut last_error = None;
    for candidate in candidates {
        match serde_json::from_str::<serde_json::Value>(candidate) {
            Ok(value) => {
                return CandidateProfile::from_model_value(value)
                    .map_err(AppError::MalformedModelOutput);
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(AppError::MalformedModelOutput(
        last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "empty completion".to_string()),
    ))
}

#[cfg(test)]
pub(crate) mod stub {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::llm_client::{CompletionModel, LlmError};

    /// Replays a fixed completion and records every prompt it was sent.
    pub struct StubModel {
        reply: Result<String, fn() -> LlmError>,
        pub prompts: Mutex<Vec<(String, String)>>,
    }

    impl StubModel {
        pub fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(make_error: fn() -> LlmError) -> Self {
            Self {
                reply: Err(make_error),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn call_count(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CompletionModel for StubModel {
        async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
            self.prompts
                .lock()
                .unwrap()
                .push((system.to_string(), prompt.to_string()));
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(make_error) => Err(make_error()),
            }
        }
    }
}
