use config::Config;
use domain::UserService;
use frontend::{Confirmation, FormController, StatusBanner};
use infrastructure::InMemoryUserRepository;
use mockable::{Clock, DefaultClock};
use tracing::debug;

/// Registration Application - wires the store, clock and dialogs into the form controller
pub struct RegistrationApp {
    pub controller: FormController,
}

impl RegistrationApp {
    /// Build the page with a fresh store and the system clock.
    pub fn new(config: &Config, confirmation: Box<dyn Confirmation>) -> Self {
        Self::with_clock(config, Box::new(DefaultClock), confirmation)
    }

    pub fn with_clock(
        config: &Config,
        clock: Box<dyn Clock>,
        confirmation: Box<dyn Confirmation>,
    ) -> Self {
        // Infrastructure layer - in-memory store, discarded with the process
        let user_repository = Box::new(InMemoryUserRepository::new());
        let user_service = UserService::new(user_repository);

        let banner = StatusBanner::new(config.banner_show_delay, config.banner_hide_delay);
        let controller = FormController::new(user_service, banner, clock, confirmation);
        debug!(
            show_delay = ?config.banner_show_delay,
            hide_delay = ?config.banner_hide_delay,
            "Registration form ready"
        );

        Self { controller }
    }
}
