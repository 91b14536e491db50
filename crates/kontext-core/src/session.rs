use crate::composer::compose;
use crate::error::{ExtractError, SessionError, EMPTY_INPUT_MESSAGE};
use crate::llm::PartsExtractor;
use crate::types::{AssistStatus, PromptField, PromptParts};
use serde::Serialize;

/// Caller-owned form state: the prompt fields plus the assistant's input, status and last error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub parts: PromptParts,
    pub assist_input: String,
    pub status: AssistStatus,
    pub error: Option<String>,
}

/// Everything the UI needs to render, including the composed prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub parts: PromptParts,
    pub assist_input: String,
    pub status: AssistStatus,
    pub error: Option<String>,
    pub prompt: String,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_field(&mut self, field: PromptField, value: impl Into<String>) {
        self.parts.set(field, value);
    }

    pub fn set_assist_input(&mut self, input: impl Into<String>) {
        self.assist_input = input.into();
    }

    pub fn prompt(&self) -> String {
        compose(&self.parts)
    }

    pub fn is_in_flight(&self) -> bool {
        self.status == AssistStatus::InFlight
    }

    /// Move to in-flight and hand back the text to send.
    ///
    /// Blank input records a validation error and must not reach the extractor.
    pub fn begin_assist(&mut self) -> Result<String, SessionError> {
        if self.is_in_flight() {
            return Err(SessionError::Busy);
        }

        if self.assist_input.trim().is_empty() {
            self.error = Some(EMPTY_INPUT_MESSAGE.to_string());
            return Err(SessionError::Validation(EMPTY_INPUT_MESSAGE.to_string()));
        }

        self.error = None;
        self.status = AssistStatus::InFlight;
        log::debug!("Assistant request started");
        Ok(self.assist_input.clone())
    }

    /// Apply an extraction result. Parts are only replaced on success.
    pub fn finish_assist(&mut self, result: Result<PromptParts, ExtractError>) {
        match result {
            Ok(parts) => {
                log::debug!("Assistant request succeeded");
                self.parts = parts;
            }
            Err(e) => {
                log::warn!("Assistant request failed: {}", e);
                self.error = Some(e.to_string());
            }
        }
        self.status = AssistStatus::Idle;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            parts: self.parts.clone(),
            assist_input: self.assist_input.clone(),
            status: self.status,
            error: self.error.clone(),
            prompt: self.prompt(),
        }
    }
}

/// Run one assistant round trip against `session`.
///
/// Extraction failures are recorded in `session.error`; only the guard
/// failures (blank input, request already running) are returned.
pub async fn run_assist(
    session: &mut Session,
    extractor: &dyn PartsExtractor,
) -> Result<(), SessionError> {
    let input = session.begin_assist()?;
    let result = extractor.extract(&input).await;
    session.finish_assist(result);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubExtractor {
        result: Result<PromptParts, ExtractError>,
        calls: AtomicUsize,
    }

    impl StubExtractor {
        fn new(result: Result<PromptParts, ExtractError>) -> Self {
            Self {
                result,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl PartsExtractor for StubExtractor {
        async fn extract(&self, _raw_input: &str) -> Result<PromptParts, ExtractError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.result {
                Ok(parts) => Ok(parts.clone()),
                Err(_) => Err(ExtractError::Transport("connection refused".to_string())),
            }
        }
    }

    fn filled_session() -> Session {
        let mut session = Session::new();
        session.set_field(PromptField::Target, "car");
        session.set_field(PromptField::Change, "black");
        session
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = Session::new();
        assert_eq!(session.parts, PromptParts::default());
        assert_eq!(session.status, AssistStatus::Idle);
        assert_eq!(session.prompt(), "");
        assert!(session.error.is_none());
    }

    #[test]
    fn test_prompt_follows_field_edits() {
        let mut session = filled_session();
        assert_eq!(session.prompt(), "Transform the car to black.");
        session.set_field(PromptField::Style, "4k");
        assert_eq!(session.snapshot().prompt, "Transform the car to black. Style: 4k.");
    }

    #[tokio::test]
    async fn test_blank_input_never_calls_extractor() {
        let extractor = StubExtractor::new(Ok(PromptParts::new("x", "y", "", "")));
        let mut session = filled_session();
        session.set_assist_input("   \n");

        let result = run_assist(&mut session, &extractor).await;

        assert!(matches!(result, Err(SessionError::Validation(_))));
        assert_eq!(extractor.calls.load(Ordering::SeqCst), 0);
        assert_eq!(session.error.as_deref(), Some(EMPTY_INPUT_MESSAGE));
        assert_eq!(session.parts.target, "car");
        assert_eq!(session.status, AssistStatus::Idle);
    }

    #[tokio::test]
    async fn test_success_replaces_parts_wholesale() {
        let extracted = PromptParts::new("dress", "blue color", "face, background", "");
        let extractor = StubExtractor::new(Ok(extracted.clone()));
        let mut session = filled_session();
        session.set_field(PromptField::Style, "old style");
        session.error = Some("previous failure".to_string());
        session.set_assist_input("make the dress blue");

        run_assist(&mut session, &extractor).await.unwrap();

        assert_eq!(session.parts, extracted);
        assert!(session.error.is_none());
        assert_eq!(session.status, AssistStatus::Idle);
        assert_eq!(extractor.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_leaves_parts_untouched() {
        let extractor = StubExtractor::new(Err(ExtractError::Unknown));
        let mut session = filled_session();
        let before = session.parts.clone();
        session.set_assist_input("make it night");

        run_assist(&mut session, &extractor).await.unwrap();

        assert_eq!(session.parts, before);
        assert_eq!(
            session.error.as_deref(),
            Some("Failed to generate prompt parts: connection refused")
        );
        assert_eq!(session.status, AssistStatus::Idle);
    }

    #[test]
    fn test_in_flight_rejects_second_request() {
        let mut session = filled_session();
        session.set_assist_input("make it night");
        assert!(session.begin_assist().is_ok());
        assert!(session.is_in_flight());

        assert_eq!(session.begin_assist(), Err(SessionError::Busy));
        assert!(session.is_in_flight());

        session.finish_assist(Err(ExtractError::EmptyResponse));
        assert!(!session.is_in_flight());
        assert!(session.begin_assist().is_ok());
    }

    #[test]
    fn test_new_attempt_clears_previous_error() {
        let mut session = filled_session();
        session.set_assist_input("make it night");
        session.begin_assist().unwrap();
        session.finish_assist(Err(ExtractError::EmptyResponse));
        assert!(session.error.is_some());

        session.begin_assist().unwrap();
        assert!(session.error.is_none());
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let mut session = filled_session();
        session.set_assist_input("night");
        session.begin_assist().unwrap();

        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["assistInput"], "night");
        assert_eq!(json["status"], "in_flight");
        assert_eq!(json["prompt"], "Transform the car to black.");
        assert_eq!(json["parts"]["target"], "car");
        assert!(json["error"].is_null());
    }
}
