//! Per-resource API clients.
//!
//! Each client is a thin wrapper over a [`crate::LabClient`] clone that
//! knows one resource's paths and DTOs. Obtain them through the
//! accessors on `LabClient` (`client.users()`, `client.projects()`, ...).

pub mod achievements;
pub mod categories;
pub mod dicts;
pub mod my_achievements;
pub mod news;
pub mod projects;
pub mod public;
pub mod users;
