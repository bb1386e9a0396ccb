//! Resource bindings from the generic controllers to the lab backend.
//!
//! Each type wraps a [`labadmin_client::LabClient`] and implements the
//! seams in [`crate::resource`] for one management screen.

pub mod categories;
pub mod my_achievements;
pub mod news;
pub mod papers;
pub mod projects;
pub mod public;
pub mod users;

pub use categories::CategoriesResource;
pub use my_achievements::MyAchievementsResource;
pub use news::NewsResource;
pub use papers::PapersResource;
pub use projects::ProjectsResource;
pub use public::PublicAchievementsSource;
pub use users::UsersResource;

use labadmin_client::models::achievement::Achievement;

use crate::resource::Flag;

/// Flags shared by every achievement-backed listing.
pub(crate) fn achievement_flag(item: &Achievement, flag: Flag) -> Option<bool> {
    match flag {
        Flag::Published => Some(item.published),
        Flag::Verified => Some(item.is_verified),
        Flag::Visibility => Some(item.visible_to_me()),
        Flag::Active => None,
    }
}

pub(crate) fn set_achievement_flag(item: &mut Achievement, flag: Flag, value: bool) {
    match flag {
        Flag::Published => item.published = value,
        Flag::Verified => item.is_verified = value,
        Flag::Visibility => item.my_visibility = Some(value),
        Flag::Active => {}
    }
}

/// `"title"` for prompts, falling back to the id.
pub(crate) fn achievement_label(item: &Achievement) -> String {
    if item.title.trim().is_empty() {
        format!("#{}", item.id)
    } else {
        item.title.clone()
    }
}
