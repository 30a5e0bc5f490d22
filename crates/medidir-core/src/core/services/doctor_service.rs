use crate::api::client::DirectoryClient;
use crate::api::filters::DoctorFilters;
use crate::api::models::{Doctor, Page};
use crate::core::services::traits::{GetService, PageFetcher};
use crate::core::services::types::ServiceError;
use async_trait::async_trait;
use std::sync::Arc;

pub struct DoctorService {
    client: Arc<DirectoryClient>,
}

impl DoctorService {
    pub fn new(client: Arc<DirectoryClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher<Doctor, DoctorFilters> for DoctorService {
    async fn fetch_page(
        &self,
        page: u32,
        size: u32,
        filters: &DoctorFilters,
    ) -> Result<Page<Doctor>, ServiceError> {
        Ok(self.client.list_doctors(page, size, filters).await?)
    }
}

#[async_trait]
impl GetService<Doctor> for DoctorService {
    fn resource_name(&self) -> &'static str {
        "Doctor"
    }

    async fn get(&self, id: u64) -> Result<Doctor, ServiceError> {
        if id == 0 {
            return Err(ServiceError::invalid_id(self.resource_name()));
        }

        self.client
            .get_doctor(id)
            .await
            .map_err(|e| ServiceError::from_lookup(e, self.resource_name(), id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::token::MemoryTokenStore;

    #[tokio::test]
    async fn test_get_rejects_zero_id() {
        let client = DirectoryClient::new(
            "http://test.example".to_string(),
            Arc::new(MemoryTokenStore::new()),
        )
        .unwrap();
        let service = DoctorService::new(Arc::new(client));

        match service.get(0).await {
            Err(ServiceError::Validation { field, .. }) => assert_eq!(field, "id"),
            other => panic!("Expected validation error for ID = 0, got {:?}", other),
        }
    }
}
