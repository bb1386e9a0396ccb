use async_trait::async_trait;
use labadmin_client::models::user::{LabUser, UserQuery};
use labadmin_client::{LabClient, Page, PageRequest};
use labadmin_core::error::CoreError;
use labadmin_core::session::SessionContext;
use labadmin_core::types::DbId;

use crate::error::{ControllerError, ControllerResult};
use crate::forms::{UserForm, UserPayload};
use crate::resource::{Flag, FlagSource, ListSource, ResourceApi};

/// User management screen (`/lab/users/crud`).
#[derive(Debug, Clone)]
pub struct UsersResource {
    client: LabClient,
}

impl UsersResource {
    pub fn new(client: LabClient) -> Self {
        Self { client }
    }

    /// Soft-delete several users at once.
    pub async fn batch_delete(&self, ids: &[DbId]) -> ControllerResult<()> {
        self.client.users().batch_delete(ids).await?;
        Ok(())
    }

    /// Enable or disable several accounts at once.
    pub async fn batch_set_active(&self, ids: &[DbId], active: bool) -> ControllerResult<()> {
        self.client.users().set_active(ids, active).await?;
        Ok(())
    }

    pub async fn reset_password(&self, id: DbId, password: &str) -> ControllerResult<()> {
        self.client.users().reset_password(id, password).await?;
        Ok(())
    }
}

#[async_trait]
impl ListSource for UsersResource {
    type Item = LabUser;
    type Filters = UserQuery;

    fn name(&self) -> &'static str {
        "users"
    }

    fn id_of(item: &LabUser) -> DbId {
        item.id
    }

    async fn fetch(&self, filters: &UserQuery, page: PageRequest) -> ControllerResult<Page<LabUser>> {
        Ok(self.client.users().list(filters, page).await?)
    }
}

#[async_trait]
impl FlagSource for UsersResource {
    fn flag(item: &LabUser, flag: Flag) -> Option<bool> {
        (flag == Flag::Active).then_some(item.is_active)
    }

    fn set_flag_local(item: &mut LabUser, flag: Flag, value: bool) {
        if flag == Flag::Active {
            item.is_active = value;
        }
    }

    async fn set_flag(&self, id: DbId, flag: Flag, value: bool) -> ControllerResult<()> {
        match flag {
            Flag::Active => Ok(self.client.users().set_active(&[id], value).await?),
            other => Err(ControllerError::UnsupportedFlag(other)),
        }
    }
}

#[async_trait]
impl ResourceApi for UsersResource {
    type Form = UserForm;

    fn describe(item: &LabUser) -> String {
        item.display_name().to_string()
    }

    fn authorize_edit(&self, id: DbId, session: &SessionContext) -> Result<(), CoreError> {
        if session.can_edit_user(id) {
            Ok(())
        } else {
            Err(CoreError::Forbidden("Only admins can edit other users".into()))
        }
    }

    async fn create(&self, payload: UserPayload) -> ControllerResult<()> {
        match payload {
            UserPayload::Create(body) => Ok(self.client.users().create(&body).await?),
            UserPayload::Update(_) => Err(mismatched()),
        }
    }

    async fn update(&self, id: DbId, payload: UserPayload) -> ControllerResult<()> {
        match payload {
            UserPayload::Update(body) => Ok(self.client.users().update(id, &body).await?),
            UserPayload::Create(_) => Err(mismatched()),
        }
    }

    async fn delete(&self, id: DbId) -> ControllerResult<()> {
        Ok(self.client.users().delete(id).await?)
    }
}

fn mismatched() -> ControllerError {
    CoreError::Internal("User payload does not match the dialog mode".into()).into()
}
