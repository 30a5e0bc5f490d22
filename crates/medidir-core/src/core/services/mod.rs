pub mod doctor_service;
pub mod hospital_service;
pub mod institution_service;
pub mod reference_service;
pub mod traits;
pub mod types;
