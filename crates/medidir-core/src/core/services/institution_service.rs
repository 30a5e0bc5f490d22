use crate::api::client::DirectoryClient;
use crate::api::filters::InstitutionFilters;
use crate::api::models::{Doctor, Institution, Page};
use crate::core::services::traits::{GetService, PageFetcher};
use crate::core::services::types::ServiceError;
use async_trait::async_trait;
use std::sync::Arc;

pub struct InstitutionService {
    client: Arc<DirectoryClient>,
}

impl InstitutionService {
    pub fn new(client: Arc<DirectoryClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher<Institution, InstitutionFilters> for InstitutionService {
    async fn fetch_page(
        &self,
        page: u32,
        size: u32,
        filters: &InstitutionFilters,
    ) -> Result<Page<Institution>, ServiceError> {
        Ok(self.client.list_institutions(page, size, filters).await?)
    }
}

#[async_trait]
impl GetService<Institution> for InstitutionService {
    fn resource_name(&self) -> &'static str {
        "Institute"
    }

    async fn get(&self, id: u64) -> Result<Institution, ServiceError> {
        if id == 0 {
            return Err(ServiceError::invalid_id(self.resource_name()));
        }

        self.client
            .get_institution(id)
            .await
            .map_err(|e| ServiceError::from_lookup(e, self.resource_name(), id))
    }
}

crate::sub_list_fetcher!(
    /// Doctors teaching at an institute.
    InstituteFaculty,
    Doctor,
    list_doctors_by_institute
);

crate::sub_list_fetcher!(
    /// Doctors who earned a degree at an institute.
    InstituteAlumni,
    Doctor,
    list_alumni_by_institute
);
