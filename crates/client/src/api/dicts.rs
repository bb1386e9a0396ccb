use crate::client::LabClient;
use crate::error::ClientResult;
use crate::models::dict::DictItem;

/// Backend dictionaries used to fill select options.
#[derive(Debug, Clone)]
pub struct DictsApi {
    client: LabClient,
}

impl DictsApi {
    pub(crate) fn new(client: LabClient) -> Self {
        Self { client }
    }

    pub async fn project_types(&self) -> ClientResult<Vec<DictItem>> {
        self.client.get("/lab/dicts/project-types").await
    }
}
