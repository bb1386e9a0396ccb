//! Lab user administration (`/lab/users/crud`).

use labadmin_core::types::DbId;

use crate::client::LabClient;
use crate::error::ClientResult;
use crate::models::user::{
    ChangePasswordRequest, CreateUserRequest, LabUser, ResetPasswordRequest, UpdateProfileRequest,
    UpdateUserRequest, UserProfile, UserQuery, UserSummary,
};
use crate::pagination::{Page, PageRequest};
use crate::schema::UserRow;
use crate::transport::ApiRequest;

const BASE: &str = "/lab/users/crud";

#[derive(Debug, Clone)]
pub struct UsersApi {
    client: LabClient,
}

impl UsersApi {
    pub(crate) fn new(client: LabClient) -> Self {
        Self { client }
    }

    /// One page of users. Rows in the legacy snake_case shape are mapped
    /// onto [`LabUser`].
    pub async fn list(&self, query: &UserQuery, page: PageRequest) -> ClientResult<Page<LabUser>> {
        let rows: Page<UserRow> = self
            .client
            .call_page(&format!("{BASE}/list"), query, page)
            .await?;
        Ok(rows.map(LabUser::from))
    }

    /// Keyword search over name, username and email. The backend caps
    /// results at 20 active users.
    pub async fn search(&self, keyword: &str) -> ClientResult<Vec<UserSummary>> {
        let request = ApiRequest::get(format!("{BASE}/search")).param("keyword", keyword);
        self.client.call(request).await
    }

    pub async fn create(&self, body: &CreateUserRequest) -> ClientResult<()> {
        self.client
            .call_unit(ApiRequest::post(BASE).json(body)?)
            .await
    }

    pub async fn update(&self, id: DbId, body: &UpdateUserRequest) -> ClientResult<()> {
        self.client.put(&format!("{BASE}/{id}"), body).await
    }

    /// Soft delete.
    pub async fn delete(&self, id: DbId) -> ClientResult<()> {
        self.client.delete(&format!("{BASE}/{id}")).await
    }

    pub async fn batch_delete(&self, ids: &[DbId]) -> ClientResult<()> {
        let request = ApiRequest::delete(format!("{BASE}/batch")).json(ids)?;
        self.client.call_unit(request).await
    }

    /// Enable or disable accounts in bulk.
    pub async fn set_active(&self, ids: &[DbId], active: bool) -> ClientResult<()> {
        let request = ApiRequest::put(format!("{BASE}/batch/status"))
            .param("isActive", active)
            .json(ids)?;
        self.client.call_unit(request).await
    }

    /// Administrator password reset.
    pub async fn reset_password(&self, id: DbId, password: &str) -> ClientResult<()> {
        let body = ResetPasswordRequest {
            user_id: id,
            password: password.to_string(),
        };
        self.client.put(&format!("{BASE}/{id}/password"), &body).await
    }

    pub async fn update_profile(&self, body: &UpdateProfileRequest) -> ClientResult<()> {
        self.client.put(&format!("{BASE}/profile"), body).await
    }

    pub async fn change_password(&self, body: &ChangePasswordRequest) -> ClientResult<()> {
        self.client.put(&format!("{BASE}/password"), body).await
    }

    /// The signed-in user's profile.
    pub async fn profile(&self) -> ClientResult<UserProfile> {
        self.client.get("/lab/users/profile").await
    }
}
