//! Controllers driven end to end through the real services and client.

use medidir_core::api::client::DirectoryClient;
use medidir_core::api::filters::DoctorFilters;
use medidir_core::api::models::Doctor;
use medidir_core::core::auth::AuthContext;
use medidir_core::core::controllers::{
    FetchOutcome, HospitalDetailController, HospitalTab, InstituteDetailController, InstituteTab,
    ListController,
};
use medidir_core::core::services::doctor_service::DoctorService;
use medidir_core::core::services::hospital_service::{
    HospitalDoctors, HospitalService, HospitalTests,
};
use medidir_core::core::services::institution_service::{
    InstituteAlumni, InstituteFaculty, InstitutionService,
};
use medidir_core::core::services::reference_service::ReferenceService;
use medidir_core::storage::token::{MemoryTokenStore, TokenProvider};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client(server: &MockServer) -> Arc<DirectoryClient> {
    Arc::new(
        DirectoryClient::new(
            format!("{}/api", server.uri()),
            Arc::new(MemoryTokenStore::new()),
        )
        .unwrap(),
    )
}

fn empty_page() -> serde_json::Value {
    json!({"items": [], "currentPage": 0, "totalPages": 0, "totalItems": 0})
}

#[tokio::test]
async fn test_doctor_list_mount_and_paging() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/doctors"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": 11, "profile": {"id": 3, "name": "Sarah Rahman"}}],
            "currentPage": 0,
            "totalPages": 2,
            "totalItems": 11
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/doctors"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": 12, "profile": {"id": 4, "name": "Karim Hasan"}}],
            "currentPage": 1,
            "totalPages": 2,
            "totalItems": 11
        })))
        .mount(&server)
        .await;
    for reference in ["/api/hospitals", "/api/degrees", "/api/specialities", "/api/districts"] {
        Mock::given(method("GET"))
            .and(path(reference))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "name": "Any"}])))
            .mount(&server)
            .await;
    }

    let client = client(&server).await;
    let mut list: ListController<Doctor, DoctorFilters> =
        ListController::new("doctors", Arc::new(DoctorService::new(client.clone())), 10)
            .with_options(Arc::new(ReferenceService::new(client)));

    assert_eq!(list.mount().await, FetchOutcome::Applied);
    assert_eq!(list.display_page(), 1);
    assert_eq!(list.items()[0].name(), "Sarah Rahman");
    let options = list.options().data().unwrap();
    assert!(options.is_complete());
    assert_eq!(options.degrees.len(), 1);
    assert_eq!(options.hospitals.len(), 1);

    assert_eq!(list.change_page(2).await.unwrap(), FetchOutcome::Applied);
    assert_eq!(list.pagination().current, 1);
    assert_eq!(list.display_page(), 2);
    assert_eq!(list.items()[0].name(), "Karim Hasan");
}

#[tokio::test]
async fn test_doctor_list_failure_surfaces_notice() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/doctors"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({"message": "Maintenance window"})),
        )
        .mount(&server)
        .await;

    let client = client(&server).await;
    let mut list: ListController<Doctor, DoctorFilters> =
        ListController::new("doctors", Arc::new(DoctorService::new(client)), 10);

    assert_eq!(list.load_page(0).await, FetchOutcome::Failed);
    assert!(list.items().is_empty());
    let notices = list.take_notices();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].message.contains("Maintenance window"));
}

#[tokio::test]
async fn test_unknown_hospital_renders_empty_state_without_tab_fetches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/hospitals/77"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "not found"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/hospitals/77/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_page()))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/hospitals/77/medical-tests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_page()))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server).await;
    let mut controller = HospitalDetailController::new(
        Arc::new(HospitalService::new(client.clone())),
        Arc::new(HospitalDoctors::new(client.clone())),
        Arc::new(HospitalTests::new(client)),
        10,
    );

    controller.load(77).await;
    assert!(controller.hospital().is_none());
    assert_eq!(controller.empty_state_message().as_deref(), Some("Hospital not found"));
    assert!(controller.select_tab(HospitalTab::Doctors).await.is_none());
    assert!(controller.select_tab(HospitalTab::MedicalTests).await.is_none());
    assert!(controller.take_notices().is_empty());
}

#[tokio::test]
async fn test_hospital_tests_tab_loads_lazily() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/hospitals/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5,
            "name": "Dhaka Medical College Hospital"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/hospitals/5/medical-tests"))
        .and(query_param("page", "0"))
        .and(query_param("size", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": 1, "name": "CBC", "price": 400.0}],
            "currentPage": 0,
            "totalPages": 1,
            "totalItems": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server).await;
    let mut controller = HospitalDetailController::new(
        Arc::new(HospitalService::new(client.clone())),
        Arc::new(HospitalDoctors::new(client.clone())),
        Arc::new(HospitalTests::new(client)),
        10,
    );

    controller.load(5).await;
    assert_eq!(controller.hospital().map(|h| h.id), Some(5));
    assert!(!controller.tests().loaded());

    controller.select_tab(HospitalTab::MedicalTests).await;
    controller.select_tab(HospitalTab::Overview).await;
    controller.select_tab(HospitalTab::MedicalTests).await;

    assert_eq!(controller.tests().items()[0].name, "CBC");
    assert_eq!(controller.tests().pagination().display_page(), 1);
}

#[tokio::test]
async fn test_institute_faculty_tab() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/institutions/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9,
            "name": "Dhaka Medical College",
            "acronym": "DMC"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/institutions/9/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": 11, "profile": {"id": 3, "name": "Sarah Rahman"}}],
            "currentPage": 0,
            "totalPages": 1,
            "totalItems": 1
        })))
        .mount(&server)
        .await;

    let client = client(&server).await;
    let mut controller = InstituteDetailController::new(
        Arc::new(InstitutionService::new(client.clone())),
        Arc::new(InstituteFaculty::new(client.clone())),
        Arc::new(InstituteAlumni::new(client)),
        10,
    );

    controller.load(9).await;
    assert_eq!(
        controller.select_tab(InstituteTab::Faculty).await,
        Some(FetchOutcome::Applied)
    );
    assert_eq!(controller.faculty().items().len(), 1);
    assert!(!controller.alumni().loaded());
}

#[tokio::test]
async fn test_login_stores_token_and_fetches_profile() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"email": "sarah@example.com", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "tok-1"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .and(wiremock::matchers::header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "name": "Sarah Rahman",
            "email": "sarah@example.com"
        })))
        .mount(&server)
        .await;

    let tokens = Arc::new(MemoryTokenStore::new());
    let client = Arc::new(
        DirectoryClient::new(format!("{}/api", server.uri()), tokens.clone()).unwrap(),
    );
    let mut auth = AuthContext::for_client(client);

    let user = auth.login("sarah@example.com", "secret").await.unwrap();
    assert_eq!(user.name, "Sarah Rahman");
    assert!(auth.is_authenticated());
    assert_eq!(tokens.token().unwrap().as_deref(), Some("tok-1"));

    auth.logout().unwrap();
    assert!(auth.user().is_none());
    assert_eq!(tokens.token().unwrap(), None);
}
