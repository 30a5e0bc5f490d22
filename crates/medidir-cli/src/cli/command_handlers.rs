use crate::cli::dispatcher::Session;
use crate::cli::main_types::{
    AuthCommands, ConfigCommands, DoctorCommands, DoctorListArgs, HospitalCommands,
    HospitalListArgs, HospitalTabArg, InstituteCommands, InstituteListArgs, InstituteTabArg,
    OutputFormat, PageArgs,
};
use medidir_core::api::client::DirectoryClient;
use medidir_core::api::filters::{DoctorFilters, Filters, HospitalFilters, InstitutionFilters};
use medidir_core::api::models::{Doctor, Hospital, Institution};
use medidir_core::core::auth::AuthContext;
use medidir_core::core::controllers::{
    DoctorDetailController, EmptyState, FetchOutcome, HospitalDetailController, HospitalTab,
    InstituteDetailController, InstituteTab, ListController, Pagination, SubList, ui_to_api,
};
use medidir_core::core::services::doctor_service::DoctorService;
use medidir_core::core::services::hospital_service::{
    HospitalDoctors, HospitalService, HospitalTests,
};
use medidir_core::core::services::institution_service::{
    InstituteAlumni, InstituteFaculty, InstitutionService,
};
use medidir_core::core::services::reference_service::ReferenceService;
use medidir_core::core::services::traits::{OptionsSource, PageFetcher};
use medidir_core::core::services::types::{Notice, NoticeLevel};
use medidir_core::display::TableDisplay;
use medidir_core::error::{AppError, CliError, ConfigError};
use medidir_core::storage::config::{Config, ENV_API_URL, ENV_PAGE_SIZE};
use medidir_core::utils::validation::{MAX_PAGE_SIZE, validate_page_size, validate_url};
use serde::Serialize;
use serde_json::json;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

/// Print informational notices and turn a failed fetch into an error.
///
/// Error notices are already user-facing text, so they become the error
/// message verbatim.
fn finish(
    display: &TableDisplay,
    notices: Vec<Notice>,
    outcome: Option<FetchOutcome>,
) -> Result<(), AppError> {
    let (errors, others): (Vec<Notice>, Vec<Notice>) = notices
        .into_iter()
        .partition(|n| n.level == NoticeLevel::Error);

    for notice in &others {
        eprintln!("{}", display.render_notice(notice));
    }

    if outcome == Some(FetchOutcome::Failed) {
        let message = errors
            .iter()
            .map(|n| n.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(CliError::RequestFailed(message).into());
    }

    for notice in &errors {
        eprintln!("{}", display.render_notice(notice));
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::InvalidArguments(format!("Failed to serialize output: {}", e)))?;
    println!("{}", text);
    Ok(())
}

fn page_json<T: Serialize>(pagination: Pagination, items: &[T]) -> serde_json::Value {
    json!({
        "page": pagination.display_page(),
        "pageSize": pagination.page_size,
        "totalPages": pagination.total_pages(),
        "totalItems": pagination.total,
        "items": items,
    })
}

/// Fetch one page of a list view and print it.
async fn run_list<T, F>(
    label: &'static str,
    fetcher: Arc<dyn PageFetcher<T, F>>,
    filters: F,
    paging: &PageArgs,
    page_size: u32,
    render: impl Fn(&TableDisplay, &[T]) -> String,
) -> Result<(), AppError>
where
    T: Serialize,
    F: Filters,
{
    let display = TableDisplay::new();
    let mut list = ListController::new(label, fetcher, page_size).with_filters(filters);
    log::debug!("Listing {} page {} (size {})", label, paging.page, page_size);

    let outcome = list.change_page(paging.page).await?;
    let notices = list.take_notices();
    finish(&display, notices, Some(outcome))?;

    match paging.format {
        OutputFormat::Json => print_json(&page_json(list.pagination(), list.items())),
        OutputFormat::Table => {
            println!("{}", render(&display, list.items()));
            println!("{}", display.render_page_footer(&list.pagination(), list.items().len()));
            Ok(())
        }
    }
}

/// Print the IDs the list filters of `F` accept.
async fn run_options<F: Filters>(client: Arc<DirectoryClient>) -> Result<(), AppError> {
    let display = TableDisplay::new();
    let options = ReferenceService::new(client)
        .load_options(F::REFERENCE_LISTS)
        .await;
    println!("{}", display.render_filter_options(&options));
    Ok(())
}

/// Print the sub-list behind a detail tab.
fn print_tab<T: Serialize>(
    display: &TableDisplay,
    list: &SubList<T>,
    format: OutputFormat,
    render: impl Fn(&TableDisplay, &[T]) -> String,
) -> Result<(), AppError> {
    match format {
        OutputFormat::Json => print_json(&page_json(list.pagination(), list.items())),
        OutputFormat::Table => {
            println!();
            println!("{}", render(display, list.items()));
            println!("{}", display.render_page_footer(&list.pagination(), list.items().len()));
            Ok(())
        }
    }
}

fn print_heading(icon: &str, parent: Option<&str>, title: &str) {
    if let Some(parent) = parent {
        println!("{} {} · {}", icon, parent, title);
    }
}

fn print_empty_state(
    display: &TableDisplay,
    state: &EmptyState,
    format: OutputFormat,
) -> Result<(), AppError> {
    match format {
        OutputFormat::Json => print_json(&json!({
            "error": state.message,
            "backLink": state.back_link,
        })),
        OutputFormat::Table => {
            println!("{}", display.render_empty_state(state));
            Ok(())
        }
    }
}

#[derive(Default)]
pub struct DoctorHandler;

impl DoctorHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn requested_size(&self, command: &DoctorCommands) -> Option<u32> {
        match command {
            DoctorCommands::List(args) => args.paging.size,
            _ => None,
        }
    }

    pub async fn handle(
        &self,
        command: DoctorCommands,
        client: Arc<DirectoryClient>,
        page_size: u32,
    ) -> Result<(), AppError> {
        match command {
            DoctorCommands::List(args) => self.handle_list(args, client, page_size).await,
            DoctorCommands::Show { id, format } => self.handle_show(id, format, client).await,
            DoctorCommands::Options => run_options::<DoctorFilters>(client).await,
        }
    }

    async fn handle_list(
        &self,
        args: DoctorListArgs,
        client: Arc<DirectoryClient>,
        page_size: u32,
    ) -> Result<(), AppError> {
        let filters = DoctorFilters {
            name: args.name,
            bmdc_no: args.bmdc_no,
            hospital_id: args.hospital,
            degree_id: args.degree,
            speciality_id: args.speciality,
            district_id: args.district,
        };
        run_list::<Doctor, DoctorFilters>(
            "doctors",
            Arc::new(DoctorService::new(client)),
            filters,
            &args.paging,
            page_size,
            |display, items| display.render_doctor_list(items),
        )
        .await
    }

    async fn handle_show(
        &self,
        id: u64,
        format: OutputFormat,
        client: Arc<DirectoryClient>,
    ) -> Result<(), AppError> {
        let display = TableDisplay::new();
        let mut controller = DoctorDetailController::new(Arc::new(DoctorService::new(client)));
        let outcome = controller.load(id).await;
        finish(&display, controller.take_notices(), Some(outcome))?;

        if let Some(state) = controller.empty_state() {
            return print_empty_state(&display, &state, format);
        }
        let Some(doctor) = controller.doctor() else {
            return Ok(());
        };
        match format {
            OutputFormat::Json => print_json(doctor),
            OutputFormat::Table => {
                println!("{}", display.render_doctor_detail(doctor));
                Ok(())
            }
        }
    }
}

#[derive(Default)]
pub struct HospitalHandler;

impl HospitalHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn requested_size(&self, command: &HospitalCommands) -> Option<u32> {
        match command {
            HospitalCommands::List(args) => args.paging.size,
            _ => None,
        }
    }

    pub async fn handle(
        &self,
        command: HospitalCommands,
        client: Arc<DirectoryClient>,
        page_size: u32,
    ) -> Result<(), AppError> {
        match command {
            HospitalCommands::List(args) => self.handle_list(args, client, page_size).await,
            HospitalCommands::Show {
                id,
                tab,
                tab_page,
                format,
            } => {
                self.handle_show(id, tab, tab_page, format, client, page_size)
                    .await
            }
            HospitalCommands::Options => run_options::<HospitalFilters>(client).await,
        }
    }

    async fn handle_list(
        &self,
        args: HospitalListArgs,
        client: Arc<DirectoryClient>,
        page_size: u32,
    ) -> Result<(), AppError> {
        let filters = HospitalFilters {
            name: args.name,
            district_id: args.district,
            hospital_type_id: args.hospital_type,
            organization_type_id: args.organization_type,
        };
        run_list::<Hospital, HospitalFilters>(
            "hospitals",
            Arc::new(HospitalService::new(client)),
            filters,
            &args.paging,
            page_size,
            |display, items| display.render_hospital_list(items),
        )
        .await
    }

    async fn handle_show(
        &self,
        id: u64,
        tab: HospitalTabArg,
        tab_page: u32,
        format: OutputFormat,
        client: Arc<DirectoryClient>,
        page_size: u32,
    ) -> Result<(), AppError> {
        ui_to_api(tab_page)?;
        let display = TableDisplay::new();
        let mut controller = HospitalDetailController::new(
            Arc::new(HospitalService::new(client.clone())),
            Arc::new(HospitalDoctors::new(client.clone())),
            Arc::new(HospitalTests::new(client)),
            page_size,
        );

        let outcome = controller.load(id).await;
        finish(&display, controller.take_notices(), Some(outcome))?;
        if let Some(state) = controller.empty_state() {
            return print_empty_state(&display, &state, format);
        }

        let selected = match tab {
            HospitalTabArg::Overview => HospitalTab::Overview,
            HospitalTabArg::Doctors => HospitalTab::Doctors,
            HospitalTabArg::Tests => HospitalTab::MedicalTests,
        };
        let mut tab_outcome = controller.select_tab(selected).await;
        if tab_page > 1 {
            tab_outcome = controller.change_tab_page(tab_page).await?;
        }
        finish(&display, controller.take_notices(), tab_outcome)?;

        match selected {
            HospitalTab::Overview => {
                let Some(hospital) = controller.hospital() else {
                    return Ok(());
                };
                match format {
                    OutputFormat::Json => print_json(hospital),
                    OutputFormat::Table => {
                        println!("{}", display.render_hospital_detail(hospital));
                        Ok(())
                    }
                }
            }
            HospitalTab::Doctors => {
                if format == OutputFormat::Table {
                    print_heading("🏥", controller.hospital().map(|h| h.name.as_str()), "Doctors");
                }
                print_tab(&display, controller.doctors(), format, |d, items| {
                    d.render_doctor_list(items)
                })
            }
            HospitalTab::MedicalTests => {
                if format == OutputFormat::Table {
                    print_heading("🏥", controller.hospital().map(|h| h.name.as_str()), "Medical tests");
                }
                print_tab(&display, controller.tests(), format, |d, items| {
                    d.render_medical_tests(items)
                })
            }
        }
    }
}

#[derive(Default)]
pub struct InstituteHandler;

impl InstituteHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn requested_size(&self, command: &InstituteCommands) -> Option<u32> {
        match command {
            InstituteCommands::List(args) => args.paging.size,
            _ => None,
        }
    }

    pub async fn handle(
        &self,
        command: InstituteCommands,
        client: Arc<DirectoryClient>,
        page_size: u32,
    ) -> Result<(), AppError> {
        match command {
            InstituteCommands::List(args) => self.handle_list(args, client, page_size).await,
            InstituteCommands::Show {
                id,
                tab,
                tab_page,
                format,
            } => {
                self.handle_show(id, tab, tab_page, format, client, page_size)
                    .await
            }
            InstituteCommands::Options => run_options::<InstitutionFilters>(client).await,
        }
    }

    async fn handle_list(
        &self,
        args: InstituteListArgs,
        client: Arc<DirectoryClient>,
        page_size: u32,
    ) -> Result<(), AppError> {
        let filters = InstitutionFilters {
            name: args.name,
            district_id: args.district,
            organization_type_id: args.organization_type,
        };
        run_list::<Institution, InstitutionFilters>(
            "institutes",
            Arc::new(InstitutionService::new(client)),
            filters,
            &args.paging,
            page_size,
            |display, items| display.render_institution_list(items),
        )
        .await
    }

    async fn handle_show(
        &self,
        id: u64,
        tab: InstituteTabArg,
        tab_page: u32,
        format: OutputFormat,
        client: Arc<DirectoryClient>,
        page_size: u32,
    ) -> Result<(), AppError> {
        ui_to_api(tab_page)?;
        let display = TableDisplay::new();
        let mut controller = InstituteDetailController::new(
            Arc::new(InstitutionService::new(client.clone())),
            Arc::new(InstituteFaculty::new(client.clone())),
            Arc::new(InstituteAlumni::new(client)),
            page_size,
        );

        let outcome = controller.load(id).await;
        finish(&display, controller.take_notices(), Some(outcome))?;
        if let Some(state) = controller.empty_state() {
            return print_empty_state(&display, &state, format);
        }

        let selected = match tab {
            InstituteTabArg::Overview => InstituteTab::Overview,
            InstituteTabArg::Faculty => InstituteTab::Faculty,
            InstituteTabArg::Alumni => InstituteTab::Alumni,
        };
        let mut tab_outcome = controller.select_tab(selected).await;
        if tab_page > 1 {
            tab_outcome = controller.change_tab_page(tab_page).await?;
        }
        finish(&display, controller.take_notices(), tab_outcome)?;

        let name = controller.institution().map(|i| i.name.clone());
        let heading = |title: &str| {
            if format == OutputFormat::Table {
                print_heading("🎓", name.as_deref(), title);
            }
        };

        match selected {
            InstituteTab::Overview => {
                let Some(institution) = controller.institution() else {
                    return Ok(());
                };
                match format {
                    OutputFormat::Json => print_json(institution),
                    OutputFormat::Table => {
                        println!("{}", display.render_institution_detail(institution));
                        Ok(())
                    }
                }
            }
            InstituteTab::Faculty => {
                heading("Faculty");
                print_tab(&display, controller.faculty(), format, |d, items| {
                    d.render_doctor_list(items)
                })
            }
            InstituteTab::Alumni => {
                heading("Alumni");
                print_tab(&display, controller.alumni(), format, |d, items| {
                    d.render_doctor_list(items)
                })
            }
        }
    }
}

#[derive(Default)]
pub struct AuthHandler;

impl AuthHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        command: AuthCommands,
        client: Arc<DirectoryClient>,
    ) -> Result<(), AppError> {
        let mut auth = AuthContext::for_client(client);
        match command {
            AuthCommands::Login { email } => {
                let email = match email {
                    Some(email) => email,
                    None => prompt_line("Email: ")?,
                };
                let password = rpassword::prompt_password("Password: ").map_err(|e| {
                    CliError::InvalidArguments(format!("Failed to read password: {}", e))
                })?;

                let user = auth.login(&email, &password).await?;
                println!("✅ Signed in as {} <{}>", user.name, user.email);
                Ok(())
            }
            AuthCommands::Logout => {
                auth.logout()?;
                println!("✅ Signed out");
                Ok(())
            }
            AuthCommands::Status => {
                auth.hydrate().await?;
                match auth.user() {
                    Some(user) => {
                        println!("Signed in as {} <{}>", user.name, user.email);
                        if let Some(district) = &user.district {
                            println!("District: {}", district.name);
                        }
                    }
                    None => println!("Not signed in"),
                }
                Ok(())
            }
        }
    }
}

fn prompt_line(prompt: &str) -> Result<String, AppError> {
    print!("{}", prompt);
    io::stdout()
        .flush()
        .map_err(|e| CliError::InvalidArguments(format!("Failed to write prompt: {}", e)))?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| CliError::InvalidArguments(format!("Failed to read input: {}", e)))?;
    Ok(line.trim().to_string())
}

#[derive(Default)]
pub struct ConfigHandler;

impl ConfigHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(&self, command: ConfigCommands, session: &Session) -> Result<(), AppError> {
        match command {
            ConfigCommands::Show => {
                let config = &session.config;
                let path = match &session.config_path {
                    Some(path) => path.clone(),
                    None => Config::config_file_path()?,
                };

                println!("Current Configuration:");
                println!("=====================");
                println!("Config file: {}", path.display());
                println!("API URL:     {}", config.api_url(session.api_url.as_deref()));
                println!("Page size:   {}", config.page_size(None));
                println!("Timeout:     {}s", config.timeout_secs());
                println!(
                    "Profile:     {}",
                    config.profile_name(session.profile.as_deref())
                );
                println!();
                println!("Environment overrides: {}, {}", ENV_API_URL, ENV_PAGE_SIZE);
                Ok(())
            }
            ConfigCommands::Set { page_size } => {
                let mut config = session.config.clone();
                let mut updated_fields = Vec::new();

                if let Some(url) = session.api_url.as_deref() {
                    validate_url(url)?;
                    config.set_api_url(url.to_string());
                    updated_fields.push(format!("API URL to: {}", url));
                }

                if let Some(size) = page_size {
                    validate_page_size(size).map_err(|_| ConfigError::InvalidValue {
                        field: "page_size".to_string(),
                        value: size.to_string(),
                        reason: format!("must be between 1 and {}", MAX_PAGE_SIZE),
                    })?;
                    config.set_page_size(size);
                    updated_fields.push(format!("page size to: {}", size));
                }

                if updated_fields.is_empty() {
                    return Err(ConfigError::MissingField {
                        field: "api_url or page_size".to_string(),
                        hint: "Pass --api-url and/or --page-size".to_string(),
                    }
                    .into());
                }

                config.save(session.config_path.clone())?;
                println!("✅ Set {}", updated_fields.join(", "));
                println!("Configuration saved successfully.");
                Ok(())
            }
        }
    }
}
