//! Session Management
//!
//! Operator-supplied organization id and bearer token, plus the shell
//! state that owns them and persists the token between reloads.

use serde::{Deserialize, Serialize};

use crate::error::{ConsoleError, Result};

/// Local storage key holding the pasted bearer token
pub const TOKEN_STORAGE_KEY: &str = "jwtToken";

/// Header scoping every request to an organization
pub const ORGANIZATION_HEADER: &str = "X-Organization-ID";

/// Credentials forwarded on every request
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub organization_id: String,
    pub token: String,
}

impl Session {
    pub fn new(organization_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            organization_id: organization_id.into(),
            token: token.into(),
        }
    }

    pub fn has_token(&self) -> bool {
        !self.token.trim().is_empty()
    }

    /// Precondition of every action: a token must have been pasted
    pub fn require_token(&self) -> Result<&str> {
        if self.has_token() {
            Ok(self.token.trim())
        } else {
            Err(ConsoleError::MissingToken)
        }
    }

    /// Value of the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token.trim())
    }
}

/// Persistence for the bearer token
pub trait TokenStore {
    /// Load the stored token, if any
    fn load(&self) -> Option<String>;

    /// Store the token (an empty string clears it)
    fn save(&self, token: &str) -> Result<()>;
}

/// In-memory token store (for tests and native tooling)
#[derive(Default)]
pub struct MemoryTokenStore {
    token: std::sync::RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: std::sync::RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        let mut slot = self
            .token
            .write()
            .map_err(|e| ConsoleError::Validation(format!("token store poisoned: {e}")))?;
        *slot = Some(token.to_string());
        Ok(())
    }
}

/// Role views of the console
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    /// Payee: onboarding, wallet, withdrawals
    #[default]
    Developer,
    /// Payer: function execution payments
    User,
}

impl Tab {
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Developer => "👨‍💻 Developer Dashboard",
            Tab::User => "👤 User Dashboard",
        }
    }

    pub fn all() -> [Tab; 2] {
        [Tab::Developer, Tab::User]
    }
}

/// Global console state owned by the shell
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShellState {
    pub active_tab: Tab,
    pub organization_id: String,
    pub token: String,
}

impl ShellState {
    /// Start from whatever token survived the last reload
    pub fn restore(store: &dyn TokenStore) -> Self {
        Self {
            token: store.load().unwrap_or_default(),
            ..Default::default()
        }
    }

    /// Update the token and persist it
    pub fn set_token(&mut self, token: impl Into<String>, store: &dyn TokenStore) -> Result<()> {
        self.token = token.into();
        store.save(&self.token)
    }

    pub fn set_organization_id(&mut self, organization_id: impl Into<String>) {
        self.organization_id = organization_id.into();
    }

    pub fn select(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    /// Drives the missing-token warning banner
    pub fn needs_token(&self) -> bool {
        self.token.trim().is_empty()
    }

    pub fn session(&self) -> Session {
        Session::new(self.organization_id.clone(), self.token.clone())
    }
}
