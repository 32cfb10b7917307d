use gloo_net::http::Request;
use log::{error, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
pub const SUCCESS_STATUS: &str = "success";
pub const SUBMITTING: &str = "⏳ Submitting...";
pub const SUBMIT_FAILED: &str = "❌ Submission failed. Please try again.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("❗ Please enter a numeric employee ID.")]
    Id,

    #[error("❗ Please enter an English word (letters only).")]
    Word,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("could not encode form: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),

    #[error("request failed: {0}")]
    Network(String),

    #[error("unreadable response: {0}")]
    Parse(String),
}

/// The two fields the logging endpoint accepts, already validated.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SubmissionForm {
    id: String,
    word: String,
}

impl SubmissionForm {
    pub fn validate(id: &str, word: &str) -> Result<Self, ValidationError> {
        let id = id.trim();
        let word = word.trim();

        if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::Id);
        }
        if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::Word);
        }

        Ok(Self {
            id: id.to_string(),
            word: word.to_string(),
        })
    }

    pub fn encode(&self) -> Result<String, SubmitError> {
        Ok(serde_urlencoded::to_string(self)?)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SubmitResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl SubmitResponse {
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }
}

pub trait Submitter {
    async fn post_form(&self, body: String) -> Result<SubmitResponse, SubmitError>;
}

pub struct HttpSubmitter {
    endpoint: String,
}

impl HttpSubmitter {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
        }
    }
}

impl Submitter for HttpSubmitter {
    async fn post_form(&self, body: String) -> Result<SubmitResponse, SubmitError> {
        let resp = Request::post(&self.endpoint)
            .header("Content-Type", FORM_CONTENT_TYPE)
            .body(body)
            .map_err(|e| SubmitError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        // The endpoint reports failures in the body, so the HTTP status is not checked.
        let text = resp
            .text()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| SubmitError::Parse(e.to_string()))
    }
}

pub async fn send<T: Submitter>(
    submitter: &T,
    form: &SubmissionForm,
) -> Result<SubmitResponse, SubmitError> {
    submitter.post_form(form.encode()?).await
}

/// Submit button state plus the status line under it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubmissionGate {
    disabled: bool,
    status: Option<String>,
}

impl SubmissionGate {
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Validates the inputs and, on success, locks the button for the
    /// request. Returns `None` when nothing should be sent.
    pub fn begin(&mut self, id: &str, word: &str) -> Option<SubmissionForm> {
        if self.disabled {
            return None;
        }
        match SubmissionForm::validate(id, word) {
            Ok(form) => {
                self.disabled = true;
                self.status = Some(SUBMITTING.to_string());
                Some(form)
            }
            Err(e) => {
                self.status = Some(e.to_string());
                None
            }
        }
    }

    pub fn finish(&mut self, result: Result<SubmitResponse, SubmitError>) {
        match result {
            Ok(resp) => {
                info!("Submission answered {:?}", resp.status);
                self.disabled = resp.is_success();
                self.status = Some(resp.message);
            }
            Err(e) => {
                error!("Submission error: {e}");
                self.disabled = false;
                self.status = Some(SUBMIT_FAILED.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use futures::executor::block_on;

    use super::*;

    struct RecordingSubmitter {
        reply: &'static str,
        bodies: RefCell<Vec<String>>,
    }

    impl RecordingSubmitter {
        fn replying(reply: &'static str) -> Self {
            Self {
                reply,
                bodies: RefCell::new(Vec::new()),
            }
        }
    }

    impl Submitter for RecordingSubmitter {
        async fn post_form(&self, body: String) -> Result<SubmitResponse, SubmitError> {
            self.bodies.borrow_mut().push(body);
            serde_json::from_str(self.reply).map_err(|e| SubmitError::Parse(e.to_string()))
        }
    }

    fn run(gate: &mut SubmissionGate, submitter: &RecordingSubmitter, id: &str, word: &str) {
        if let Some(form) = gate.begin(id, word) {
            assert!(gate.is_disabled());
            let result = block_on(send(submitter, &form));
            gate.finish(result);
        }
    }

    #[test]
    fn non_numeric_id_is_rejected_locally() {
        let submitter = RecordingSubmitter::replying(r#"{"status":"success","message":"ok"}"#);
        let mut gate = SubmissionGate::default();

        run(&mut gate, &submitter, "abc", "ok");

        assert_eq!(gate.status(), Some("❗ Please enter a numeric employee ID."));
        assert!(!gate.is_disabled());
        assert!(submitter.bodies.borrow().is_empty());
    }

    #[test]
    fn non_letter_word_is_rejected_locally() {
        let submitter = RecordingSubmitter::replying(r#"{"status":"success","message":"ok"}"#);
        let mut gate = SubmissionGate::default();

        run(&mut gate, &submitter, "123", "foo1");

        assert_eq!(
            gate.status(),
            Some("❗ Please enter an English word (letters only).")
        );
        assert!(submitter.bodies.borrow().is_empty());
    }

    #[test]
    fn success_posts_once_and_stays_disabled() {
        let submitter =
            RecordingSubmitter::replying(r#"{"status":"success","message":"Thanks, logged!"}"#);
        let mut gate = SubmissionGate::default();

        run(&mut gate, &submitter, " 123 ", "ok");

        assert_eq!(*submitter.bodies.borrow(), vec!["id=123&word=ok"]);
        assert!(gate.is_disabled());
        assert_eq!(gate.status(), Some("Thanks, logged!"));

        // Locked: a second click sends nothing.
        run(&mut gate, &submitter, "123", "ok");
        assert_eq!(submitter.bodies.borrow().len(), 1);
    }

    #[test]
    fn other_status_reenables() {
        let submitter =
            RecordingSubmitter::replying(r#"{"status":"duplicate","message":"Already submitted"}"#);
        let mut gate = SubmissionGate::default();

        run(&mut gate, &submitter, "123", "ok");

        assert_eq!(submitter.bodies.borrow().len(), 1);
        assert!(!gate.is_disabled());
        assert_eq!(gate.status(), Some("Already submitted"));
    }

    #[test]
    fn unreadable_response_reenables_with_generic_message() {
        let submitter = RecordingSubmitter::replying("<html>Service unavailable</html>");
        let mut gate = SubmissionGate::default();

        run(&mut gate, &submitter, "42", "Plane");

        assert!(!gate.is_disabled());
        assert_eq!(gate.status(), Some(SUBMIT_FAILED));
    }

    #[test]
    fn validation_rejects_empty_and_non_ascii() {
        assert_eq!(SubmissionForm::validate("", "ok"), Err(ValidationError::Id));
        assert_eq!(SubmissionForm::validate("１２３", "ok"), Err(ValidationError::Id));
        assert_eq!(SubmissionForm::validate("7", "  "), Err(ValidationError::Word));
        assert_eq!(SubmissionForm::validate("7", "café"), Err(ValidationError::Word));
    }
}
