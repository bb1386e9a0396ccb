use async_trait::async_trait;
use labadmin_client::models::category::{
    Category, CategoryQuery, CreateCategoryCommand, SortItem, UpdateCategoryCommand,
};
use labadmin_client::{LabClient, Page, PageRequest};
use labadmin_core::types::DbId;

use crate::error::{ControllerError, ControllerResult};
use crate::forms::CategoryForm;
use crate::resource::{Flag, FlagSource, ListSource, ResourceApi};

/// Achievement category screen.
#[derive(Debug, Clone)]
pub struct CategoriesResource {
    client: LabClient,
}

impl CategoriesResource {
    pub fn new(client: LabClient) -> Self {
        Self { client }
    }

    /// The two-level tree used by category pickers.
    pub async fn tree(&self, include_inactive: bool) -> ControllerResult<Vec<Category>> {
        Ok(self.client.categories().tree(include_inactive).await?)
    }

    /// Persist a new ordering; `ids` are assigned `0..n` in sequence.
    pub async fn reorder(&self, ids: &[DbId]) -> ControllerResult<()> {
        let items = ids
            .iter()
            .zip(0..)
            .map(|(&id, sort_order)| SortItem { id, sort_order })
            .collect();
        Ok(self.client.categories().batch_sort(items).await?)
    }
}

/// The edit dialog shares the create body; the update endpoint takes
/// every field as optional.
fn update_command(cmd: CreateCategoryCommand) -> UpdateCategoryCommand {
    UpdateCategoryCommand {
        parent_id: cmd.parent_id,
        category_code: None,
        category_name: Some(cmd.category_name),
        category_name_en: cmd.category_name_en,
        description: cmd.description,
        sort_order: cmd.sort_order,
        is_active: cmd.is_active,
        icon: cmd.icon,
        color: cmd.color,
    }
}

#[async_trait]
impl ListSource for CategoriesResource {
    type Item = Category;
    type Filters = CategoryQuery;

    fn name(&self) -> &'static str {
        "categories"
    }

    fn id_of(item: &Category) -> DbId {
        item.id
    }

    async fn fetch(&self, filters: &CategoryQuery, page: PageRequest) -> ControllerResult<Page<Category>> {
        Ok(self.client.categories().list(filters, page).await?)
    }
}

#[async_trait]
impl FlagSource for CategoriesResource {
    fn flag(item: &Category, flag: Flag) -> Option<bool> {
        (flag == Flag::Active).then_some(item.is_active)
    }

    fn set_flag_local(item: &mut Category, flag: Flag, value: bool) {
        if flag == Flag::Active {
            item.is_active = value;
        }
    }

    async fn set_flag(&self, id: DbId, flag: Flag, value: bool) -> ControllerResult<()> {
        match flag {
            Flag::Active => Ok(self.client.categories().set_active(id, value).await?),
            other => Err(ControllerError::UnsupportedFlag(other)),
        }
    }
}

#[async_trait]
impl ResourceApi for CategoriesResource {
    type Form = CategoryForm;

    fn describe(item: &Category) -> String {
        item.category_name.clone()
    }

    async fn create(&self, payload: CreateCategoryCommand) -> ControllerResult<()> {
        let id = self.client.categories().create(&payload).await?;
        tracing::debug!(category_id = id, "Category created");
        Ok(())
    }

    async fn update(&self, id: DbId, payload: CreateCategoryCommand) -> ControllerResult<()> {
        let body = update_command(payload);
        Ok(self.client.categories().update(id, &body).await?)
    }

    async fn delete(&self, id: DbId) -> ControllerResult<()> {
        Ok(self.client.categories().delete(id).await?)
    }
}
