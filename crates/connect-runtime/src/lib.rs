//! # connect-runtime
//!
//! Runtime backends for the connect console.
//!
//! ## Backends
//!
//! - **HTTP** (default): `reqwest` against the payments API; browser fetch
//!   when compiled to WASM
//! - **Mock**: scripted responses, see `connect_core::MockConnectApi`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use connect_runtime::HttpConnectApi;
//! use connect_core::{DeveloperState, Session};
//!
//! let api = HttpConnectApi::for_origin("http://localhost:3000");
//! let mut state = DeveloperState::new();
//! state.load_dashboard_data(&api, &Session::new("org-1", token)).await;
//! ```

pub mod http;

pub use http::{ClientConfig, HttpConnectApi};

// Re-export core types for convenience
pub use connect_core::{ConnectApi, ConsoleError, Result, Session};
