//! AI assistant contract
//!
//! The assistant is a black-box request/response service over the selected
//! text. This module builds requests from explicit settings and validates
//! what comes back; transport lives behind [`AssistantService`].

use crate::config::AssistantSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What the assistant is asked to do with the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssistAction {
    Rewrite,
    Summarize,
    Continue,
}

impl AssistAction {
    /// Instruction placed ahead of the selected text
    pub fn instruction(&self) -> &'static str {
        match self {
            AssistAction::Rewrite => {
                "Rewrite the following text to improve clarity and flow. Keep its meaning and language."
            }
            AssistAction::Summarize => "Summarize the following text in a few sentences.",
            AssistAction::Continue => {
                "Continue writing after the following text in the same style and voice."
            }
        }
    }
}

/// Assistant failures surfaced to the user
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssistError {
    #[error("no API key configured")]
    MissingCredential,

    #[error("no text selected")]
    EmptySelection,

    #[error("the assistant returned an empty completion")]
    EmptyCompletion,

    #[error("network error: {0}")]
    Network(String),
}

/// A validated assistant request
#[derive(Clone, PartialEq, Eq)]
pub struct AssistRequest {
    pub action: AssistAction,
    pub model: String,
    pub endpoint: String,
    pub prompt: String,
    api_key: String,
}

impl std::fmt::Debug for AssistRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistRequest")
            .field("action", &self.action)
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("prompt", &self.prompt)
            .finish_non_exhaustive()
    }
}

impl AssistRequest {
    pub fn new(
        action: AssistAction,
        selection: &str,
        settings: &AssistantSettings,
    ) -> Result<Self, AssistError> {
        let api_key = settings.api_key().ok_or(AssistError::MissingCredential)?;

        let selection = selection.trim();
        if selection.is_empty() {
            return Err(AssistError::EmptySelection);
        }

        Ok(Self {
            action,
            model: settings.model.clone(),
            endpoint: settings.endpoint.clone(),
            prompt: format!("{}\n\n{}", action.instruction(), selection),
            api_key: api_key.to_string(),
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

/// Remote completion service
pub trait AssistantService {
    /// Send the request and return the raw completion text
    fn complete(&self, request: &AssistRequest) -> Result<String, AssistError>;
}

/// Reject blank completions; trims surrounding whitespace
pub fn accept_completion(raw: &str) -> Result<String, AssistError> {
    let text = raw.trim();
    if text.is_empty() {
        Err(AssistError::EmptyCompletion)
    } else {
        Ok(text.to_string())
    }
}

/// Build, send and validate one assistant call
pub fn assist<S: AssistantService + ?Sized>(
    service: &S,
    action: AssistAction,
    selection: &str,
    settings: &AssistantSettings,
) -> Result<String, AssistError> {
    let request = AssistRequest::new(action, selection, settings)?;
    let raw = service.complete(&request)?;
    accept_completion(&raw)
}
