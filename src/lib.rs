use zeroize::Zeroizing;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod telemetry;

pub use domain::{entities, use_cases, validation};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{email, limiter, utils};

use email::relay::HttpEmailRelay;
use limiter::rate_limiter::RateLimiter;
use repositories::json_file_repo::JsonFileMessageRepo;
use use_cases::{contact::{ContactHandler, DeliveryOptions}, messages::MessagesHandler};
use validation::DisposableDomains;

pub struct AppState {
    pub contact_handler: AppContactHandler,
    pub messages_handler: AppMessagesHandler,
    pub admin_token: Option<Zeroizing<String>>,
    pub trust_forwarded_headers: bool,
    pub service_name: String,
}

pub type AppContactHandler = ContactHandler<JsonFileMessageRepo, HttpEmailRelay>;
pub type AppMessagesHandler = MessagesHandler<JsonFileMessageRepo>;

impl AppState {
    pub fn new(config: &settings::AppConfig) -> anyhow::Result<Self> {
        let email_relay = HttpEmailRelay::from_config(config)?;
        Ok(Self::with_relay(config, email_relay))
    }

    /// Wires the handlers around a caller-supplied relay (`None` stores
    /// messages without sending notifications).
    pub fn with_relay(config: &settings::AppConfig, email_relay: Option<HttpEmailRelay>) -> Self {
        let message_repo = JsonFileMessageRepo::new(config.messages_file.clone());

        let contact_handler = ContactHandler::new(
            message_repo.clone(),
            email_relay,
            RateLimiter::new(config.rate_limit_max_requests, config.rate_limit_window()),
            DisposableDomains::new(&config.disposable_domains),
            DeliveryOptions {
                notify_to: config.email_to.clone(),
                site_url: config.site_url.clone(),
                require_delivery: config.require_delivery,
                expose_details: config.is_development(),
            },
        );

        let admin_token = config.admin_token
            .as_ref()
            .filter(|t| !t.trim().is_empty())
            .map(|t| Zeroizing::new(t.clone()));

        AppState {
            contact_handler,
            messages_handler: MessagesHandler::new(message_repo),
            admin_token,
            trust_forwarded_headers: config.trust_forwarded_headers,
            service_name: config.name.clone(),
        }
    }
}
