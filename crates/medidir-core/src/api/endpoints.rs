//! One fetcher per backend resource.
//!
//! Every fetcher propagates [`ApiError`]; none of them swallows a failure
//! into an empty envelope. Callers decide what an error means for the view.

use crate::api::client::DirectoryClient;
use crate::api::filters::{DoctorFilters, Filters, HospitalFilters, InstitutionFilters};
use crate::api::models::{
    Degree, District, Doctor, Hospital, HospitalType, Institution, ListOrPage, LoginRequest,
    LoginResponse, MedicalTest, OrganizationType, Page, Speciality, User,
};
use crate::api::query::FilterMap;
use crate::error::ApiError;

/// Page size used when a whole reference list is pulled for a dropdown.
pub const REFERENCE_PAGE_SIZE: u32 = 1000;

/// `page` and `size` always lead the query string.
pub fn page_query(page: u32, size: u32) -> FilterMap {
    FilterMap::new()
        .with("page", Some(page))
        .with("size", Some(size))
}

fn filtered_page_query<F: Filters>(page: u32, size: u32, filters: &F) -> FilterMap {
    let mut query = page_query(page, size);
    query.extend(filters.to_filter_map());
    query
}

impl DirectoryClient {
    async fn get_page<T>(&self, path: &str, query: FilterMap) -> Result<Page<T>, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        self.get_json::<Page<T>>(path, &query).await
    }

    async fn get_reference_list<T>(&self, path: &str) -> Result<Vec<T>, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let list: ListOrPage<T> = self
            .get_json(path, &page_query(0, REFERENCE_PAGE_SIZE))
            .await?;
        Ok(list.into_items())
    }

    // Doctors

    pub async fn list_doctors(
        &self,
        page: u32,
        size: u32,
        filters: &DoctorFilters,
    ) -> Result<Page<Doctor>, ApiError> {
        self.get_page("/doctors", filtered_page_query(page, size, filters))
            .await
    }

    pub async fn get_doctor(&self, id: u64) -> Result<Doctor, ApiError> {
        self.get_json(&format!("/doctors/{}", id), &FilterMap::new())
            .await
    }

    // Hospitals

    pub async fn list_hospitals(
        &self,
        page: u32,
        size: u32,
        filters: &HospitalFilters,
    ) -> Result<Page<Hospital>, ApiError> {
        self.get_page("/hospitals", filtered_page_query(page, size, filters))
            .await
    }

    pub async fn get_hospital(&self, id: u64) -> Result<Hospital, ApiError> {
        self.get_json(&format!("/hospitals/{}", id), &FilterMap::new())
            .await
    }

    pub async fn list_doctors_by_hospital(
        &self,
        hospital_id: u64,
        page: u32,
        size: u32,
    ) -> Result<Page<Doctor>, ApiError> {
        self.get_page(
            &format!("/hospitals/{}/doctors", hospital_id),
            page_query(page, size),
        )
        .await
    }

    pub async fn list_tests_by_hospital(
        &self,
        hospital_id: u64,
        page: u32,
        size: u32,
    ) -> Result<Page<MedicalTest>, ApiError> {
        self.get_page(
            &format!("/hospitals/{}/medical-tests", hospital_id),
            page_query(page, size),
        )
        .await
    }

    // Institutions

    pub async fn list_institutions(
        &self,
        page: u32,
        size: u32,
        filters: &InstitutionFilters,
    ) -> Result<Page<Institution>, ApiError> {
        self.get_page("/institutions", filtered_page_query(page, size, filters))
            .await
    }

    pub async fn get_institution(&self, id: u64) -> Result<Institution, ApiError> {
        self.get_json(&format!("/institutions/{}", id), &FilterMap::new())
            .await
    }

    pub async fn list_doctors_by_institute(
        &self,
        institution_id: u64,
        page: u32,
        size: u32,
    ) -> Result<Page<Doctor>, ApiError> {
        self.get_page(
            &format!("/institutions/{}/doctors", institution_id),
            page_query(page, size),
        )
        .await
    }

    pub async fn list_alumni_by_institute(
        &self,
        institution_id: u64,
        page: u32,
        size: u32,
    ) -> Result<Page<Doctor>, ApiError> {
        self.get_page(
            &format!("/institutions/{}/alumni", institution_id),
            page_query(page, size),
        )
        .await
    }

    // Reference data

    pub async fn list_degrees(&self) -> Result<Vec<Degree>, ApiError> {
        self.get_reference_list("/degrees").await
    }

    pub async fn list_specialities(&self) -> Result<Vec<Speciality>, ApiError> {
        self.get_reference_list("/specialities").await
    }

    pub async fn list_districts(&self) -> Result<Vec<District>, ApiError> {
        self.get_reference_list("/districts").await
    }

    pub async fn list_hospital_types(&self) -> Result<Vec<HospitalType>, ApiError> {
        self.get_reference_list("/hospital-types").await
    }

    pub async fn list_organization_types(&self) -> Result<Vec<OrganizationType>, ApiError> {
        self.get_reference_list("/organization-types").await
    }

    /// Every hospital, for the doctor filter's hospital dropdown.
    pub async fn hospital_options(&self) -> Result<Vec<Hospital>, ApiError> {
        self.get_reference_list("/hospitals").await
    }

    // Session

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.post_json("/auth/login", request).await
    }

    pub async fn get_current_user(&self) -> Result<User, ApiError> {
        self.get_json("/users/me", &FilterMap::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::query::build_query_string;

    #[test]
    fn test_page_query_leads() {
        let filters = DoctorFilters {
            name: Some("Sarah".to_string()),
            ..Default::default()
        };
        assert_eq!(
            build_query_string(&filtered_page_query(0, 10, &filters)),
            "page=0&size=10&name=Sarah"
        );
    }

    #[test]
    fn test_page_query_without_filters() {
        assert_eq!(
            build_query_string(&filtered_page_query(2, 25, &HospitalFilters::default())),
            "page=2&size=25"
        );
    }
}
