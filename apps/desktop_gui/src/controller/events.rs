//! Backend-to-UI events and error modeling for the desktop controller.

use shared::protocol::AnalysisReport;

use crate::controller::reducer::SessionId;

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    Error(UiError),
    AnalysisCompleted {
        session: SessionId,
        report: AnalysisReport,
    },
    AnalysisFailed {
        session: SessionId,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Config,
    Auth,
    Transport,
    Quota,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Analysis,
    General,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("api key")
            || message_lower.contains("settings")
            || message_lower.contains("oracle.toml")
        {
            UiErrorCategory::Config
        } else if message_lower.contains("401")
            || message_lower.contains("403")
            || message_lower.contains("permission")
            || message_lower.contains("unauthenticated")
        {
            UiErrorCategory::Auth
        } else if message_lower.contains("429")
            || message_lower.contains("quota")
            || message_lower.contains("resource_exhausted")
        {
            UiErrorCategory::Quota
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("transport")
            || message_lower.contains("disconnected")
            || message_lower.contains("failed to reach")
            || message_lower.contains("dns")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    /// Configuration problems cannot be fixed by retrying.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self.category,
            UiErrorCategory::Config | UiErrorCategory::Auth
        )
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_line(&self) -> String {
        match self.category {
            UiErrorCategory::Config => format!("Configuration problem: {}", self.message),
            UiErrorCategory::Auth => format!("The API key was rejected: {}", self.message),
            UiErrorCategory::Quota => format!("Generation quota exhausted: {}", self.message),
            UiErrorCategory::Transport | UiErrorCategory::Unknown => self.message.clone(),
        }
    }
}
