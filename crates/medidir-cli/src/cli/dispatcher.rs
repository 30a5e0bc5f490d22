use crate::cli::command_handlers::{
    AuthHandler, ConfigHandler, DoctorHandler, HospitalHandler, InstituteHandler,
};
use crate::cli::main_types::Commands;
use medidir_core::api::client::DirectoryClient;
use medidir_core::error::AppError;
use medidir_core::storage::config::Config;
use medidir_core::storage::token::{KeyringTokenStore, MemoryTokenStore, TokenProvider};
use medidir_core::utils::validation::{validate_page_size, validate_url};
use std::path::PathBuf;
use std::sync::Arc;

/// Global options that shape how every command reaches the backend.
pub struct Session {
    pub config: Config,
    /// Explicit config file location from `--config-dir`.
    pub config_path: Option<PathBuf>,
    pub api_url: Option<String>,
    pub profile: Option<String>,
    pub no_keyring: bool,
}

pub struct Dispatcher {
    session: Session,
}

impl Dispatcher {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    fn token_store(&self) -> Arc<dyn TokenProvider> {
        if self.session.no_keyring {
            log::debug!("Using in-memory token store");
            Arc::new(MemoryTokenStore::new())
        } else {
            let profile = self.session.config.profile_name(self.session.profile.as_deref());
            log::debug!("Using keychain token store for profile '{}'", profile);
            Arc::new(KeyringTokenStore::new(profile))
        }
    }

    fn create_client(&self) -> Result<Arc<DirectoryClient>, AppError> {
        let url = self.session.config.api_url(self.session.api_url.as_deref());
        validate_url(&url)?;
        log::debug!("Using API at {}", url);
        let client =
            DirectoryClient::with_timeout(url, self.token_store(), self.session.config.timeout_secs())?;
        Ok(Arc::new(client))
    }

    /// Page size for list commands, `--size` winning over configuration.
    fn page_size(&self, cli_size: Option<u32>) -> Result<u32, AppError> {
        let size = self.session.config.page_size(cli_size);
        validate_page_size(size)?;
        Ok(size)
    }

    pub async fn dispatch(&self, command: Commands) -> Result<(), AppError> {
        match command {
            Commands::Doctors { command } => {
                let handler = DoctorHandler::new();
                let size = self.page_size(handler.requested_size(&command))?;
                handler.handle(command, self.create_client()?, size).await
            }
            Commands::Hospitals { command } => {
                let handler = HospitalHandler::new();
                let size = self.page_size(handler.requested_size(&command))?;
                handler.handle(command, self.create_client()?, size).await
            }
            Commands::Institutes { command } => {
                let handler = InstituteHandler::new();
                let size = self.page_size(handler.requested_size(&command))?;
                handler.handle(command, self.create_client()?, size).await
            }
            Commands::Auth { command } => {
                let handler = AuthHandler::new();
                handler.handle(command, self.create_client()?).await
            }
            Commands::Config { command } => {
                let handler = ConfigHandler::new();
                handler.handle(command, &self.session).await
            }
        }
    }
}
