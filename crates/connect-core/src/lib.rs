//! # connect-core
//!
//! Model, session and view logic of the Stripe Connect testing console.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        ShellState                            │
//! │        (active tab, organization id, bearer token)           │
//! │  ┌──────────────────────┐      ┌───────────────────────┐     │
//! │  │   DeveloperState     │      │      UserState        │     │
//! │  │ status/balance/hist. │      │ payment form/receipt  │     │
//! │  └──────────┬───────────┘      └───────────┬───────────┘     │
//! │             └──────────┬───────────────────┘                 │
//! │                 ConnectApi (Strategy)                        │
//! └────────────────────────┼─────────────────────────────────────┘
//!                          ▼
//!              remote payments backend (HTTP)
//! ```
//!
//! Nothing here touches the DOM: every view exposes a `panels()` render
//! model so the web frontend only maps it to markup.

pub mod api;
pub mod developer;
pub mod error;
pub mod format;
pub mod model;
pub mod session;
pub mod status;
pub mod user;

pub use api::{API_BASE_PATH, ConnectApi, DEFAULT_HISTORY_LIMIT, MockConnectApi};
pub use developer::{DeveloperPanels, DeveloperState};
pub use error::{ConsoleError, Result};
pub use session::{Session, ShellState, Tab, TokenStore};
pub use status::{Banner, ViewStatus};
pub use user::{PaymentForm, UserPanels, UserState};
