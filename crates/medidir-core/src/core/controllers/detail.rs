//! Single-entity views with lazily loaded, tab-scoped sub-lists.

use crate::api::models::{Doctor, DoctorDegree, DoctorWorkplace, Hospital, Institution, MedicalTest};
use crate::core::controllers::pagination::{FetchOutcome, PagedState, Pagination, ui_to_api};
use crate::core::services::traits::{GetService, SubListFetcher};
use crate::core::services::types::{Notice, ServiceError};
use std::sync::Arc;

/// What a view renders when its entity does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    /// Route of the list page to go back to.
    pub back_link: &'static str,
}

/// The entity half of a detail view.
pub struct EntityDetail<T> {
    service: Arc<dyn GetService<T>>,
    entity: Option<T>,
    loading: bool,
    not_found: bool,
}

impl<T> EntityDetail<T> {
    pub fn new(service: Arc<dyn GetService<T>>) -> Self {
        Self {
            service,
            entity: None,
            loading: false,
            not_found: false,
        }
    }

    pub fn entity(&self) -> Option<&T> {
        self.entity.as_ref()
    }

    pub fn entity_mut(&mut self) -> Option<&mut T> {
        self.entity.as_mut()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn not_found(&self) -> bool {
        self.not_found
    }

    pub fn resource_name(&self) -> &'static str {
        self.service.resource_name()
    }

    /// Fetch the entity, dropping whatever was loaded before.
    ///
    /// A missing entity (404 or an unusable id) becomes the empty state and
    /// produces no notice. Any other failure is logged and returned as a notice.
    pub async fn load(&mut self, id: u64) -> (FetchOutcome, Option<Notice>) {
        self.entity = None;
        self.not_found = false;
        self.loading = true;
        let result = self.service.get(id).await;
        self.loading = false;

        match result {
            Ok(entity) => {
                self.entity = Some(entity);
                (FetchOutcome::Applied, None)
            }
            Err(ServiceError::NotFound { .. }) | Err(ServiceError::Validation { .. }) => {
                log::debug!("{} {} not found", self.resource_name(), id);
                self.not_found = true;
                (FetchOutcome::NotFound, None)
            }
            Err(e) => {
                log::error!("Failed to load {} {}: {}", self.resource_name(), id, e);
                let notice = Notice::error(format!(
                    "Failed to load {}: {}",
                    self.resource_name().to_lowercase(),
                    e.notice_text()
                ));
                (FetchOutcome::Failed, Some(notice))
            }
        }
    }

    pub fn empty_state(&self, back_link: &'static str) -> Option<EmptyState> {
        self.not_found.then(|| EmptyState {
            message: format!("{} not found", self.resource_name()),
            back_link,
        })
    }
}

/// A paged list hanging off the entity, fetched the first time its tab is shown.
pub struct SubList<T> {
    label: &'static str,
    fetcher: Arc<dyn SubListFetcher<T>>,
    state: PagedState<T>,
    loaded: bool,
}

impl<T> SubList<T> {
    pub fn new(label: &'static str, fetcher: Arc<dyn SubListFetcher<T>>, page_size: u32) -> Self {
        Self {
            label,
            fetcher,
            state: PagedState::new(page_size),
            loaded: false,
        }
    }

    pub fn items(&self) -> &[T] {
        self.state.items()
    }

    pub fn loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn loaded(&self) -> bool {
        self.loaded
    }

    pub fn pagination(&self) -> Pagination {
        self.state.pagination()
    }

    /// Forget everything fetched for a previous parent.
    pub fn reset(&mut self) {
        self.state = PagedState::new(self.state.page_size());
        self.loaded = false;
    }

    /// Fetch `page` (0-based) for `parent_id`.
    pub async fn load_page(&mut self, parent_id: u64, page: u32) -> (FetchOutcome, Option<Notice>) {
        let generation = self.state.begin(page);
        let result = self
            .fetcher
            .fetch_sub_page(parent_id, page, self.state.page_size())
            .await;
        let (outcome, notice) = self.state.complete(generation, result, self.label);
        if outcome != FetchOutcome::Stale {
            self.loaded = true;
        }
        (outcome, notice)
    }

    /// Fetch the first page unless a page was already fetched.
    pub async fn activate(&mut self, parent_id: u64) -> Option<(FetchOutcome, Option<Notice>)> {
        if self.loaded {
            return None;
        }
        Some(self.load_page(parent_id, 0).await)
    }

    pub async fn change_page(
        &mut self,
        parent_id: u64,
        ui_page: u32,
    ) -> Result<(FetchOutcome, Option<Notice>), ServiceError> {
        let page = ui_to_api(ui_page)?;
        Ok(self.load_page(parent_id, page).await)
    }
}

fn record(notices: &mut Vec<Notice>, (outcome, notice): (FetchOutcome, Option<Notice>)) -> FetchOutcome {
    if let Some(notice) = notice {
        notices.push(notice);
    }
    outcome
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HospitalTab {
    #[default]
    Overview,
    Doctors,
    MedicalTests,
}

pub struct HospitalDetailController {
    detail: EntityDetail<Hospital>,
    tab: HospitalTab,
    doctors: SubList<Doctor>,
    tests: SubList<MedicalTest>,
    notices: Vec<Notice>,
}

impl HospitalDetailController {
    pub const BACK_LINK: &'static str = "/hospitals";

    pub fn new(
        service: Arc<dyn GetService<Hospital>>,
        doctors: Arc<dyn SubListFetcher<Doctor>>,
        tests: Arc<dyn SubListFetcher<MedicalTest>>,
        page_size: u32,
    ) -> Self {
        Self {
            detail: EntityDetail::new(service),
            tab: HospitalTab::default(),
            doctors: SubList::new("doctors", doctors, page_size),
            tests: SubList::new("medical tests", tests, page_size),
            notices: Vec::new(),
        }
    }

    pub fn hospital(&self) -> Option<&Hospital> {
        self.detail.entity()
    }

    pub fn detail(&self) -> &EntityDetail<Hospital> {
        &self.detail
    }

    pub fn tab(&self) -> HospitalTab {
        self.tab
    }

    pub fn doctors(&self) -> &SubList<Doctor> {
        &self.doctors
    }

    pub fn tests(&self) -> &SubList<MedicalTest> {
        &self.tests
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Load the hospital, then the active tab's list if it has one.
    pub async fn load(&mut self, id: u64) -> FetchOutcome {
        self.doctors.reset();
        self.tests.reset();
        let outcome = record(&mut self.notices, self.detail.load(id).await);
        self.activate_current().await;
        outcome
    }

    /// Switch tabs. Returns `None` when nothing was fetched.
    pub async fn select_tab(&mut self, tab: HospitalTab) -> Option<FetchOutcome> {
        self.tab = tab;
        self.activate_current().await
    }

    async fn activate_current(&mut self) -> Option<FetchOutcome> {
        let id = self.detail.entity()?.id;
        let result = match self.tab {
            HospitalTab::Overview => None,
            HospitalTab::Doctors => self.doctors.activate(id).await,
            HospitalTab::MedicalTests => self.tests.activate(id).await,
        }?;
        Some(record(&mut self.notices, result))
    }

    /// Move the active tab's list to a 1-based page.
    pub async fn change_tab_page(&mut self, ui_page: u32) -> Result<Option<FetchOutcome>, ServiceError> {
        let Some(id) = self.detail.entity().map(|h| h.id) else {
            return Ok(None);
        };
        let result = match self.tab {
            HospitalTab::Overview => return Ok(None),
            HospitalTab::Doctors => self.doctors.change_page(id, ui_page).await?,
            HospitalTab::MedicalTests => self.tests.change_page(id, ui_page).await?,
        };
        Ok(Some(record(&mut self.notices, result)))
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        self.detail.empty_state(Self::BACK_LINK)
    }

    pub fn empty_state_message(&self) -> Option<String> {
        self.empty_state().map(|state| state.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstituteTab {
    #[default]
    Overview,
    Faculty,
    Alumni,
}

pub struct InstituteDetailController {
    detail: EntityDetail<Institution>,
    tab: InstituteTab,
    faculty: SubList<Doctor>,
    alumni: SubList<Doctor>,
    notices: Vec<Notice>,
}

impl InstituteDetailController {
    pub const BACK_LINK: &'static str = "/institutes";

    pub fn new(
        service: Arc<dyn GetService<Institution>>,
        faculty: Arc<dyn SubListFetcher<Doctor>>,
        alumni: Arc<dyn SubListFetcher<Doctor>>,
        page_size: u32,
    ) -> Self {
        Self {
            detail: EntityDetail::new(service),
            tab: InstituteTab::default(),
            faculty: SubList::new("faculty", faculty, page_size),
            alumni: SubList::new("alumni", alumni, page_size),
            notices: Vec::new(),
        }
    }

    pub fn institution(&self) -> Option<&Institution> {
        self.detail.entity()
    }

    pub fn detail(&self) -> &EntityDetail<Institution> {
        &self.detail
    }

    pub fn tab(&self) -> InstituteTab {
        self.tab
    }

    pub fn faculty(&self) -> &SubList<Doctor> {
        &self.faculty
    }

    pub fn alumni(&self) -> &SubList<Doctor> {
        &self.alumni
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub async fn load(&mut self, id: u64) -> FetchOutcome {
        self.faculty.reset();
        self.alumni.reset();
        let outcome = record(&mut self.notices, self.detail.load(id).await);
        self.activate_current().await;
        outcome
    }

    pub async fn select_tab(&mut self, tab: InstituteTab) -> Option<FetchOutcome> {
        self.tab = tab;
        self.activate_current().await
    }

    async fn activate_current(&mut self) -> Option<FetchOutcome> {
        let id = self.detail.entity()?.id;
        let result = match self.tab {
            InstituteTab::Overview => None,
            InstituteTab::Faculty => self.faculty.activate(id).await,
            InstituteTab::Alumni => self.alumni.activate(id).await,
        }?;
        Some(record(&mut self.notices, result))
    }

    pub async fn change_tab_page(&mut self, ui_page: u32) -> Result<Option<FetchOutcome>, ServiceError> {
        let Some(id) = self.detail.entity().map(|i| i.id) else {
            return Ok(None);
        };
        let result = match self.tab {
            InstituteTab::Overview => return Ok(None),
            InstituteTab::Faculty => self.faculty.change_page(id, ui_page).await?,
            InstituteTab::Alumni => self.alumni.change_page(id, ui_page).await?,
        };
        Ok(Some(record(&mut self.notices, result)))
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        self.detail.empty_state(Self::BACK_LINK)
    }

    pub fn empty_state_message(&self) -> Option<String> {
        self.empty_state().map(|state| state.message)
    }
}

/// Doctor profile view.
///
/// Workplace and degree edits change the in-memory copy only; nothing is
/// sent to the backend.
pub struct DoctorDetailController {
    detail: EntityDetail<Doctor>,
    notices: Vec<Notice>,
}

impl DoctorDetailController {
    pub const BACK_LINK: &'static str = "/doctors";

    pub fn new(service: Arc<dyn GetService<Doctor>>) -> Self {
        Self {
            detail: EntityDetail::new(service),
            notices: Vec::new(),
        }
    }

    pub fn doctor(&self) -> Option<&Doctor> {
        self.detail.entity()
    }

    pub fn detail(&self) -> &EntityDetail<Doctor> {
        &self.detail
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub async fn load(&mut self, id: u64) -> FetchOutcome {
        record(&mut self.notices, self.detail.load(id).await)
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        self.detail.empty_state(Self::BACK_LINK)
    }

    pub fn empty_state_message(&self) -> Option<String> {
        self.empty_state().map(|state| state.message)
    }

    fn doctor_mut(&mut self) -> Result<&mut Doctor, ServiceError> {
        self.detail.entity_mut().ok_or_else(|| ServiceError::Validation {
            field: "doctor".to_string(),
            message: "No doctor is loaded".to_string(),
        })
    }

    fn done(&mut self, message: &str) {
        self.notices.push(Notice::success(message));
    }

    /// Append a workplace; returns the id assigned to it.
    pub fn add_workplace(&mut self, mut workplace: DoctorWorkplace) -> Result<u64, ServiceError> {
        let doctor = self.doctor_mut()?;
        workplace.id = next_id(doctor.doctor_workplaces.iter().map(|w| w.id))?;
        let id = workplace.id;
        doctor.doctor_workplaces.push(workplace);
        self.done("Workplace added successfully");
        Ok(id)
    }

    pub fn update_workplace(&mut self, id: u64, mut workplace: DoctorWorkplace) -> Result<(), ServiceError> {
        let doctor = self.doctor_mut()?;
        let slot = doctor
            .doctor_workplaces
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| missing("Workplace", id))?;
        workplace.id = id;
        *slot = workplace;
        self.done("Workplace updated successfully");
        Ok(())
    }

    pub fn remove_workplace(&mut self, id: u64) -> Result<(), ServiceError> {
        let doctor = self.doctor_mut()?;
        let before = doctor.doctor_workplaces.len();
        doctor.doctor_workplaces.retain(|w| w.id != id);
        if doctor.doctor_workplaces.len() == before {
            return Err(missing("Workplace", id));
        }
        self.done("Workplace deleted successfully");
        Ok(())
    }

    pub fn add_degree(&mut self, mut degree: DoctorDegree) -> Result<u64, ServiceError> {
        let doctor = self.doctor_mut()?;
        degree.id = next_id(doctor.doctor_degrees.iter().map(|d| d.id))?;
        let id = degree.id;
        doctor.doctor_degrees.push(degree);
        self.done("Degree added successfully");
        Ok(id)
    }

    pub fn update_degree(&mut self, id: u64, mut degree: DoctorDegree) -> Result<(), ServiceError> {
        let doctor = self.doctor_mut()?;
        let slot = doctor
            .doctor_degrees
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| missing("Degree", id))?;
        degree.id = id;
        *slot = degree;
        self.done("Degree updated successfully");
        Ok(())
    }

    pub fn remove_degree(&mut self, id: u64) -> Result<(), ServiceError> {
        let doctor = self.doctor_mut()?;
        let before = doctor.doctor_degrees.len();
        doctor.doctor_degrees.retain(|d| d.id != id);
        if doctor.doctor_degrees.len() == before {
            return Err(missing("Degree", id));
        }
        self.done("Degree deleted successfully");
        Ok(())
    }
}

fn next_id(ids: impl Iterator<Item = u64>) -> Result<u64, ServiceError> {
    ids.max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or_else(|| ServiceError::Validation {
            field: "id".to_string(),
            message: "No local ids left to assign".to_string(),
        })
}

fn missing(resource_type: &str, id: u64) -> ServiceError {
    ServiceError::NotFound {
        resource_type: resource_type.to_string(),
        id,
    }
}
