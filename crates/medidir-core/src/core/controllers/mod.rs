//! View controllers: the state and effect logic behind each page.
//!
//! Controllers own their state and are driven through `&mut self`; they
//! never share locks across views.

pub mod detail;
pub mod list;
pub mod pagination;

pub use detail::{
    DoctorDetailController, EmptyState, EntityDetail, HospitalDetailController, HospitalTab,
    InstituteDetailController, InstituteTab, SubList,
};
pub use list::{ListController, PageRequest};
pub use pagination::{FetchOutcome, Pagination, api_to_ui, ui_to_api};
