//! Typed REST client for the lab administration backend.
//!
//! Every backend response is wrapped in a `{code, msg, data}` envelope
//! ([`envelope`]); paginated listings come in two wire shapes that are
//! unified behind [`pagination::Page`]. Requests travel through the
//! [`transport::Transport`] seam so the same resource clients run over
//! reqwest in production and over in-memory fakes in tests.

pub mod api;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod models;
pub mod pagination;
pub mod schema;
pub mod transport;

pub use client::LabClient;
pub use error::{ClientError, ClientResult};
pub use pagination::{Page, PageRequest};
