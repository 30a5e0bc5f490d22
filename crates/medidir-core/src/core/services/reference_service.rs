use crate::api::client::DirectoryClient;
use crate::api::filters::ReferenceList;
use crate::api::models::{Degree, District, Hospital, HospitalType, OrganizationType, Speciality};
use crate::core::services::traits::OptionsSource;
use crate::error::ApiError;
use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;

/// Dropdown contents for a filter form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    pub hospitals: Vec<Hospital>,
    pub degrees: Vec<Degree>,
    pub specialities: Vec<Speciality>,
    pub districts: Vec<District>,
    pub hospital_types: Vec<HospitalType>,
    pub organization_types: Vec<OrganizationType>,
    /// Lists that could not be loaded, with the reason.
    pub failed: Vec<(ReferenceList, String)>,
}

impl FilterOptions {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

enum Loaded {
    Hospitals(Vec<Hospital>),
    Degrees(Vec<Degree>),
    Specialities(Vec<Speciality>),
    Districts(Vec<District>),
    HospitalTypes(Vec<HospitalType>),
    OrganizationTypes(Vec<OrganizationType>),
}

pub struct ReferenceService {
    client: Arc<DirectoryClient>,
}

impl ReferenceService {
    pub fn new(client: Arc<DirectoryClient>) -> Self {
        Self { client }
    }

    async fn load_one(&self, list: ReferenceList) -> (ReferenceList, Result<Loaded, ApiError>) {
        let result = match list {
            ReferenceList::Hospitals => self.client.hospital_options().await.map(Loaded::Hospitals),
            ReferenceList::Degrees => self.client.list_degrees().await.map(Loaded::Degrees),
            ReferenceList::Specialities => self
                .client
                .list_specialities()
                .await
                .map(Loaded::Specialities),
            ReferenceList::Districts => self.client.list_districts().await.map(Loaded::Districts),
            ReferenceList::HospitalTypes => self
                .client
                .list_hospital_types()
                .await
                .map(Loaded::HospitalTypes),
            ReferenceList::OrganizationTypes => self
                .client
                .list_organization_types()
                .await
                .map(Loaded::OrganizationTypes),
        };
        (list, result)
    }
}

#[async_trait]
impl OptionsSource for ReferenceService {
    async fn load_options(&self, lists: &[ReferenceList]) -> FilterOptions {
        let results = join_all(lists.iter().map(|list| self.load_one(*list))).await;

        let mut options = FilterOptions::default();
        for (list, result) in results {
            match result {
                Ok(Loaded::Hospitals(items)) => options.hospitals = items,
                Ok(Loaded::Degrees(items)) => options.degrees = items,
                Ok(Loaded::Specialities(items)) => options.specialities = items,
                Ok(Loaded::Districts(items)) => options.districts = items,
                Ok(Loaded::HospitalTypes(items)) => options.hospital_types = items,
                Ok(Loaded::OrganizationTypes(items)) => options.organization_types = items,
                Err(e) => {
                    log::error!("Failed to load {:?} filter options: {}", list, e);
                    options.failed.push((list, e.message()));
                }
            }
        }
        options
    }
}
