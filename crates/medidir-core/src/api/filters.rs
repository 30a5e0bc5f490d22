//! Per-entity filter forms and the reference lists their dropdowns need.

use crate::api::query::FilterMap;

/// Reference data loaded alongside a list view to populate its filter form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceList {
    Hospitals,
    Degrees,
    Specialities,
    Districts,
    HospitalTypes,
    OrganizationTypes,
}

/// A filter form. `Default` is the cleared state.
pub trait Filters: Default + Clone + Send + Sync + 'static {
    /// Reference lists the form's dropdowns are populated from.
    const REFERENCE_LISTS: &'static [ReferenceList];

    /// Filter fields in their fixed wire order.
    fn to_filter_map(&self) -> FilterMap;

    fn is_active(&self) -> bool {
        !self.to_filter_map().is_blank()
    }
}

fn trimmed(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DoctorFilters {
    pub name: Option<String>,
    pub bmdc_no: Option<String>,
    pub hospital_id: Option<u64>,
    pub degree_id: Option<u64>,
    pub speciality_id: Option<u64>,
    pub district_id: Option<u64>,
}

impl Filters for DoctorFilters {
    const REFERENCE_LISTS: &'static [ReferenceList] = &[
        ReferenceList::Hospitals,
        ReferenceList::Degrees,
        ReferenceList::Specialities,
        ReferenceList::Districts,
    ];

    fn to_filter_map(&self) -> FilterMap {
        FilterMap::new()
            .with("name", trimmed(&self.name))
            .with("bmdcNo", trimmed(&self.bmdc_no))
            .with("hospitalId", self.hospital_id)
            .with("degreeId", self.degree_id)
            .with("specialityId", self.speciality_id)
            .with("districtId", self.district_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HospitalFilters {
    pub name: Option<String>,
    pub district_id: Option<u64>,
    pub hospital_type_id: Option<u64>,
    pub organization_type_id: Option<u64>,
}

impl Filters for HospitalFilters {
    const REFERENCE_LISTS: &'static [ReferenceList] = &[
        ReferenceList::Districts,
        ReferenceList::HospitalTypes,
        ReferenceList::OrganizationTypes,
    ];

    fn to_filter_map(&self) -> FilterMap {
        FilterMap::new()
            .with("name", trimmed(&self.name))
            .with("districtId", self.district_id)
            .with("hospitalTypeId", self.hospital_type_id)
            .with("organizationTypeId", self.organization_type_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstitutionFilters {
    pub name: Option<String>,
    pub district_id: Option<u64>,
    pub organization_type_id: Option<u64>,
}

impl Filters for InstitutionFilters {
    const REFERENCE_LISTS: &'static [ReferenceList] =
        &[ReferenceList::Districts, ReferenceList::OrganizationTypes];

    fn to_filter_map(&self) -> FilterMap {
        FilterMap::new()
            .with("name", trimmed(&self.name))
            .with("districtId", self.district_id)
            .with("organizationTypeId", self.organization_type_id)
    }
}
