//! User-initiated retry of a failed action.
//!
//! Nothing is retried automatically. A failed action keeps its last error;
//! the screen turns that into a [`Notification`] and offers a retry button
//! only when running the same request again could succeed.

use std::fmt;
use std::future::Future;

use async_trait::async_trait;

use super::error::ApiError;

/// One API action that can be run again
#[async_trait]
pub trait Action: Send + Sync {
    type Output: Send;

    async fn execute(&self) -> Result<Self::Output, ApiError>;
}

/// Adapts an async closure into an [`Action`]
pub struct FnAction<F>(pub F);

#[async_trait]
impl<F, Fut, T> Action for FnAction<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<T, ApiError>> + Send,
    T: Send,
{
    type Output = T;

    async fn execute(&self) -> Result<T, ApiError> {
        (self.0)().await
    }
}

pub struct RetryableAction<A: Action> {
    label: String,
    action: A,
    attempts: u32,
    last_error: Option<ApiError>,
}

impl<A: Action> RetryableAction<A> {
    pub fn new(label: impl Into<String>, action: A) -> Self {
        Self {
            label: label.into(),
            action,
            attempts: 0,
            last_error: None,
        }
    }

    /// Execute once, remembering the outcome
    pub async fn run(&mut self) -> Result<A::Output, ApiError> {
        self.attempts += 1;
        match self.action.execute().await {
            Ok(output) => {
                self.last_error = None;
                Ok(output)
            }
            Err(e) => {
                log::warn!("{} failed (attempt {}): {}", self.label, self.attempts, e);
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Run again if the last failure was retryable; `None` otherwise
    pub async fn retry(&mut self) -> Option<Result<A::Output, ApiError>> {
        if !self.can_retry() {
            return None;
        }
        log::info!("Retrying {}", self.label);
        Some(self.run().await)
    }

    pub fn can_retry(&self) -> bool {
        self.last_error.as_ref().is_some_and(ApiError::is_retryable)
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn last_error(&self) -> Option<&ApiError> {
        self.last_error.as_ref()
    }

    /// Toast for the last failure
    pub fn notification(&self) -> Option<Notification> {
        self.last_error
            .as_ref()
            .map(|e| Notification::from_error(&self.label, e))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NotificationLevel::Info => "info",
            NotificationLevel::Success => "success",
            NotificationLevel::Warning => "warning",
            NotificationLevel::Error => "error",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub retryable: bool,
}

impl Notification {
    /// Input problems are warnings; everything else is an error
    pub fn from_error(label: &str, error: &ApiError) -> Self {
        let level = match error {
            ApiError::Validation(_) => NotificationLevel::Warning,
            _ => NotificationLevel::Error,
        };
        Self {
            level,
            message: format!("{}: {}", label, error),
            retryable: error.is_retryable(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
            retryable: false,
        }
    }
}
