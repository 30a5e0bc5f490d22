use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Authentication models
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "accessToken")]
    pub token: Option<String>,
}

/// Paged response envelope; `current_page` is 0-based.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_items: u64,
}

impl<T> Page<T> {
    /// Zeroed envelope, the state of a list before its first fetch.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            current_page: 0,
            total_pages: 0,
            total_items: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Reference-list endpoints answer with either a bare array or an envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListOrPage<T> {
    List(Vec<T>),
    Page(Page<T>),
}

impl<T> ListOrPage<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListOrPage::List(items) => items,
            ListOrPage::Page(page) => page.items,
        }
    }
}

// Geographic hierarchy: Union ⊂ Upazila ⊂ District ⊂ Division
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Division {
    pub id: u64,
    pub name: String,
    pub bn_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct District {
    pub id: u64,
    pub name: String,
    pub bn_name: Option<String>,
    pub division: Option<Division>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Upazila {
    pub id: u64,
    pub name: String,
    pub bn_name: Option<String>,
    pub district: Option<District>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Union {
    pub id: u64,
    pub name: String,
    pub bn_name: Option<String>,
    pub upazila: Option<Upazila>,
}

impl District {
    pub fn division_name(&self) -> Option<&str> {
        self.division.as_ref().map(|d| d.name.as_str())
    }
}

// Classification reference data
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct HospitalType {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct OrganizationType {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Degree {
    pub id: u64,
    pub name: String,
    pub abbreviation: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Speciality {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct MedicalTest {
    pub id: u64,
    pub name: String,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    pub id: u64,
    pub name: String,
    pub bn_name: Option<String>,
    #[serde(default)]
    pub number_of_bed: u32,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub district: Option<District>,
    pub hospital_type: Option<HospitalType>,
    pub organization_type: Option<OrganizationType>,
    pub website_url: Option<String>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub facilities: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Institution {
    pub id: u64,
    pub name: String,
    pub bn_name: Option<String>,
    pub acronym: Option<String>,
    pub established_year: Option<u16>,
    #[serde(default)]
    pub number_of_bed: u32,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub district: Option<District>,
    pub hospital_type: Option<HospitalType>,
    pub organization_type: Option<OrganizationType>,
    pub website_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: u64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub blood_group: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DoctorDegree {
    pub id: u64,
    pub degree: Degree,
    pub speciality: Option<Speciality>,
    pub institution: Option<Institution>,
    pub passing_year: Option<u16>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DoctorWorkplace {
    pub id: u64,
    pub designation: Option<String>,
    pub department: Option<String>,
    pub hospital: Option<Hospital>,
    pub institution: Option<Institution>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl DoctorWorkplace {
    /// Name of the hospital or institution this workplace points at.
    pub fn place_name(&self) -> Option<&str> {
        self.hospital
            .as_ref()
            .map(|h| h.name.as_str())
            .or_else(|| self.institution.as_ref().map(|i| i.name.as_str()))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: u64,
    pub bmdc_no: Option<String>,
    pub experience: Option<u32>,
    pub specializations: Option<String>,
    pub degrees: Option<String>,
    pub profile: Profile,
    #[serde(default)]
    pub doctor_degrees: Vec<DoctorDegree>,
    #[serde(default)]
    pub doctor_workplaces: Vec<DoctorWorkplace>,
}

impl Doctor {
    pub fn name(&self) -> &str {
        &self.profile.name
    }
}

/// Authenticated user profile.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub blood_group: Option<String>,
    pub division: Option<Division>,
    pub district: Option<District>,
    pub upazila: Option<Upazila>,
    pub union: Option<Union>,
    pub created_at: Option<DateTime<Utc>>,
}
