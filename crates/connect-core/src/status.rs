//! View Status
//!
//! Loading flag plus at most one banner. Error and success are variants of
//! the same value, so they can never be shown together.

use serde::{Deserialize, Serialize};

/// Transient message above a view
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum Banner {
    Error(String),
    Success(String),
}

impl Banner {
    pub fn message(&self) -> &str {
        match self {
            Banner::Error(msg) | Banner::Success(msg) => msg,
        }
    }

    /// CSS class of the alert box
    pub fn class(&self) -> &'static str {
        match self {
            Banner::Error(_) => "alert alert-error",
            Banner::Success(_) => "alert alert-success",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Banner::Error(_))
    }
}

/// Loading/error/success state of one view
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewStatus {
    pub loading: bool,
    pub banner: Option<Banner>,
}

impl ViewStatus {
    /// Start of an action: clear the previous banner
    pub fn begin(&mut self) {
        self.banner = None;
    }

    /// Start of an action that shows a spinner
    pub fn begin_loading(&mut self) {
        self.begin();
        self.loading = true;
    }

    /// Start of a reload: drop a stale error but keep a success message
    pub fn begin_refresh(&mut self) {
        if self.banner.as_ref().is_some_and(Banner::is_error) {
            self.banner = None;
        }
        self.loading = true;
    }

    pub fn finish(&mut self) {
        self.loading = false;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.banner = Some(Banner::Error(message.into()));
    }

    pub fn succeed(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.banner = Some(Banner::Success(message.into()));
    }

    pub fn error(&self) -> Option<&str> {
        match &self.banner {
            Some(Banner::Error(msg)) => Some(msg),
            _ => None,
        }
    }

    pub fn success(&self) -> Option<&str> {
        match &self.banner {
            Some(Banner::Success(msg)) => Some(msg),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_replaces_error() {
        let mut status = ViewStatus::default();
        status.fail("boom");
        assert_eq!(status.error(), Some("boom"));

        status.succeed("done");
        assert_eq!(status.error(), None);
        assert_eq!(status.success(), Some("done"));
    }

    #[test]
    fn test_begin_loading_clears_banner() {
        let mut status = ViewStatus::default();
        status.succeed("done");
        status.begin_loading();
        assert!(status.loading);
        assert!(status.banner.is_none());

        status.finish();
        assert!(!status.loading);
    }

    #[test]
    fn test_refresh_keeps_success() {
        let mut status = ViewStatus::default();
        status.succeed("Withdrawal request created!");
        status.begin_refresh();
        assert_eq!(status.success(), Some("Withdrawal request created!"));

        status.fail("boom");
        status.begin_refresh();
        assert!(status.banner.is_none());
        assert!(status.loading);
    }
}
