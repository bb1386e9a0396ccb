//! [`LabClient`]: the cheap-clone handle every resource client hangs off.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::api::achievements::AchievementsApi;
use crate::api::categories::CategoriesApi;
use crate::api::dicts::DictsApi;
use crate::api::my_achievements::MyAchievementsApi;
use crate::api::news::NewsApi;
use crate::api::projects::ProjectsApi;
use crate::api::public::PublicApi;
use crate::api::users::UsersApi;
use crate::config::ClientConfig;
use crate::envelope;
use crate::error::ClientResult;
use crate::pagination::{Page, PageRequest, RawPage};
use crate::schema::SchemaVersion;
use crate::transport::{ApiRequest, HttpTransport, Transport};

/// Client for the lab REST backend.
///
/// Cloning is cheap: clones share the transport (and its connection
/// pool).
#[derive(Clone)]
pub struct LabClient {
    transport: Arc<dyn Transport>,
    schema: SchemaVersion,
}

impl LabClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            schema: SchemaVersion::default(),
        }
    }

    /// Build a reqwest-backed client from configuration.
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::new(Arc::new(transport)))
    }

    /// Select the achievement write API version.
    pub fn with_schema(mut self, schema: SchemaVersion) -> Self {
        self.schema = schema;
        self
    }

    pub fn schema(&self) -> SchemaVersion {
        self.schema
    }

    /// Execute a request and unwrap the envelope's `data`.
    pub async fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> ClientResult<T> {
        let body = self.execute(request).await?;
        envelope::decode(body)
    }

    /// Execute a request whose payload is irrelevant.
    pub async fn call_unit(&self, request: ApiRequest) -> ClientResult<()> {
        let body = self.execute(request).await?;
        envelope::decode_unit(body)
    }

    /// Fetch one page of a listing, whichever page shape the backend
    /// uses.
    pub async fn call_page<T, Q>(
        &self,
        path: &str,
        filters: &Q,
        page: PageRequest,
    ) -> ClientResult<Page<T>>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = ApiRequest::get(path)
            .params(filters)?
            .pairs(page.query_pairs());
        let raw: RawPage<T> = self.call(request).await?;
        Ok(raw.into_page(page))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.call(ApiRequest::get(path)).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.call(ApiRequest::post(path).json(body)?).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<()> {
        self.call_unit(ApiRequest::put(path).json(body)?).await
    }

    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        self.call_unit(ApiRequest::delete(path)).await
    }

    async fn execute(&self, request: ApiRequest) -> ClientResult<Value> {
        let method = request.method;
        let path = request.path.clone();
        match self.transport.execute(request).await {
            Ok(body) => Ok(body),
            Err(e) => {
                tracing::warn!(%method, %path, error = %e, "Lab API request failed");
                Err(e)
            }
        }
    }

    pub fn users(&self) -> UsersApi {
        UsersApi::new(self.clone())
    }

    pub fn achievements(&self) -> AchievementsApi {
        AchievementsApi::new(self.clone())
    }

    pub fn projects(&self) -> ProjectsApi {
        ProjectsApi::new(self.clone())
    }

    pub fn my_achievements(&self) -> MyAchievementsApi {
        MyAchievementsApi::new(self.clone())
    }

    pub fn public(&self) -> PublicApi {
        PublicApi::new(self.clone())
    }

    pub fn categories(&self) -> CategoriesApi {
        CategoriesApi::new(self.clone())
    }

    pub fn news(&self) -> NewsApi {
        NewsApi::new(self.clone())
    }

    pub fn dicts(&self) -> DictsApi {
        DictsApi::new(self.clone())
    }
}

impl std::fmt::Debug for LabClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabClient")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}
