//! Headless list/dialog controllers for the lab administration console.
//!
//! Every management screen is the same machine: a filter model, one page
//! of records, a create/edit dialog and a handful of mutations. [`Pager`]
//! owns the read side, [`ListController`] adds the dialog and mutations,
//! and the types in [`resources`] bind both to the lab backend through
//! [`labadmin_client::LabClient`]. Rendering is left to the shell.

pub mod controller;
pub mod error;
pub mod forms;
pub mod notify;
pub mod pager;
pub mod resource;
pub mod resources;

pub use controller::{Dialog, ListController};
pub use error::{ControllerError, ControllerResult};
pub use notify::{Confirmer, Notice, NoticeLevel, Notifier};
pub use pager::{LoadState, Pager, PagerSnapshot};
pub use resource::{DialogForm, DialogMode, Flag, FlagSource, ListSource, ResourceApi};
