//! Wiring shared by every command: storage, gateway, session, resources.

use std::sync::Arc;

use tracing::debug;

use qams_auth::SessionManager;
use qams_client::resources::{
    AccreditationsApi, ActivityLogsApi, AuthApi, ClientsApi, DepartmentsApi, QuestionsApi,
    RolesApi, TemplatesApi, UsersApi,
};
use qams_client::{ApiGateway, FileStorage};
use qams_core::config::{AppConfig, ConsoleConfig};
use qams_core::error::AppError;
use qams_core::result::AppResult;
use qams_core::traits::{DurableStorage, SignInNavigator};
use qams_console::{AssumeYes, Confirmation};
use qams_entity::user::User;

use crate::output::OutputFormat;
use crate::prompt::{TerminalConfirmation, TerminalNavigator};

/// Shown when a command needs a session and none can be verified.
pub const NOT_SIGNED_IN: &str = "You are not signed in. Run `qams-admin login` first.";

/// Everything a command needs to talk to the backend.
pub struct Console {
    config: AppConfig,
    format: OutputFormat,
    gateway: Arc<ApiGateway>,
    session: SessionManager,
    confirmation: Box<dyn Confirmation>,
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("base_url", &self.config.api.base_url)
            .field("format", &self.format)
            .finish()
    }
}

impl Console {
    /// Build the terminal console: file-backed storage at
    /// `session.storage_path`, terminal prompts, and `--yes` handling.
    pub fn build(config: AppConfig, format: OutputFormat, assume_yes: bool) -> AppResult<Self> {
        let storage: Arc<dyn DurableStorage> =
            Arc::new(FileStorage::open(&config.session.storage_path)?);
        let navigator: Arc<dyn SignInNavigator> =
            Arc::new(TerminalNavigator::new(config.session.sign_in_path.clone()));
        let confirmation: Box<dyn Confirmation> = if assume_yes {
            Box::new(AssumeYes)
        } else {
            Box::new(TerminalConfirmation)
        };
        Self::with_parts(config, format, storage, navigator, confirmation)
    }

    /// Build a console from explicit parts.
    pub fn with_parts(
        config: AppConfig,
        format: OutputFormat,
        storage: Arc<dyn DurableStorage>,
        navigator: Arc<dyn SignInNavigator>,
        confirmation: Box<dyn Confirmation>,
    ) -> AppResult<Self> {
        let gateway = Arc::new(ApiGateway::new(
            &config.api,
            &config.session,
            storage.clone(),
            navigator.clone(),
        )?);
        let session = SessionManager::new(
            Arc::new(AuthApi::new(gateway.clone())),
            storage,
            navigator,
            &config.session,
        );
        debug!(base_url = %config.api.base_url, "Console initialised");

        Ok(Self {
            config,
            format,
            gateway,
            session,
            confirmation,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn console_config(&self) -> &ConsoleConfig {
        &self.config.console
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn confirmation(&self) -> &dyn Confirmation {
        self.confirmation.as_ref()
    }

    /// Re-validate the stored credential and return the signed-in user.
    pub async fn require_session(&self) -> AppResult<User> {
        let session = self.session.initialize_auth().await;
        match session.user() {
            Some(user) if session.is_authenticated() => Ok(user.clone()),
            _ => Err(AppError::authentication(NOT_SIGNED_IN)),
        }
    }

    pub fn clients(&self) -> Arc<ClientsApi> {
        Arc::new(ClientsApi::new(self.gateway.clone()))
    }

    pub fn users(&self) -> Arc<UsersApi> {
        Arc::new(UsersApi::new(self.gateway.clone()))
    }

    pub fn roles(&self) -> Arc<RolesApi> {
        Arc::new(RolesApi::new(self.gateway.clone()))
    }

    pub fn departments(&self) -> Arc<DepartmentsApi> {
        Arc::new(DepartmentsApi::new(self.gateway.clone()))
    }

    pub fn questions(&self) -> Arc<QuestionsApi> {
        Arc::new(QuestionsApi::new(self.gateway.clone()))
    }

    pub fn templates(&self) -> Arc<TemplatesApi> {
        Arc::new(TemplatesApi::new(self.gateway.clone()))
    }

    pub fn accreditations(&self) -> AccreditationsApi {
        AccreditationsApi::new(self.gateway.clone())
    }

    pub fn activity_logs(&self) -> Arc<ActivityLogsApi> {
        Arc::new(ActivityLogsApi::new(self.gateway.clone()))
    }
}
