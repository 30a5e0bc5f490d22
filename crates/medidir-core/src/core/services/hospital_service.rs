use crate::api::client::DirectoryClient;
use crate::api::filters::HospitalFilters;
use crate::api::models::{Doctor, Hospital, MedicalTest, Page};
use crate::core::services::traits::{GetService, PageFetcher};
use crate::core::services::types::ServiceError;
use async_trait::async_trait;
use std::sync::Arc;

pub struct HospitalService {
    client: Arc<DirectoryClient>,
}

impl HospitalService {
    pub fn new(client: Arc<DirectoryClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher<Hospital, HospitalFilters> for HospitalService {
    async fn fetch_page(
        &self,
        page: u32,
        size: u32,
        filters: &HospitalFilters,
    ) -> Result<Page<Hospital>, ServiceError> {
        Ok(self.client.list_hospitals(page, size, filters).await?)
    }
}

#[async_trait]
impl GetService<Hospital> for HospitalService {
    fn resource_name(&self) -> &'static str {
        "Hospital"
    }

    async fn get(&self, id: u64) -> Result<Hospital, ServiceError> {
        if id == 0 {
            return Err(ServiceError::invalid_id(self.resource_name()));
        }

        self.client
            .get_hospital(id)
            .await
            .map_err(|e| ServiceError::from_lookup(e, self.resource_name(), id))
    }
}

crate::sub_list_fetcher!(
    /// Doctors working at a hospital.
    HospitalDoctors,
    Doctor,
    list_doctors_by_hospital
);

crate::sub_list_fetcher!(
    /// Diagnostic tests offered by a hospital.
    HospitalTests,
    MedicalTest,
    list_tests_by_hospital
);
