//! Terminal implementations of the console's interactive seams.

use tracing::warn;

use qams_core::error::AppError;
use qams_core::result::AppResult;
use qams_core::traits::SignInNavigator;
use qams_console::Confirmation;

use crate::output;

/// Asks for confirmation on the terminal; defaults to "no".
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalConfirmation;

impl Confirmation for TerminalConfirmation {
    fn confirm(&self, prompt: &str) -> bool {
        match dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
        {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "Confirmation prompt failed; treating as declined");
                false
            }
        }
    }
}

/// "Navigates" to sign-in by telling the operator to log in again.
#[derive(Debug, Clone)]
pub struct TerminalNavigator {
    sign_in_path: String,
}

impl TerminalNavigator {
    pub fn new(sign_in_path: impl Into<String>) -> Self {
        Self {
            sign_in_path: sign_in_path.into(),
        }
    }
}

impl SignInNavigator for TerminalNavigator {
    fn redirect_to_sign_in(&self) {
        output::print_warning(&format!(
            "You have been signed out. Run `qams-admin login` to sign in again ({}).",
            self.sign_in_path
        ));
    }
}

/// Prompt for a line of text.
pub fn input(prompt: &str) -> AppResult<String> {
    dialoguer::Input::<String>::new()
        .with_prompt(prompt)
        .interact_text()
        .map_err(|e| AppError::internal(format!("Input error: {}", e)))
}

/// Prompt for a secret without echo.
pub fn password(prompt: &str) -> AppResult<String> {
    dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {}", e)))
}
