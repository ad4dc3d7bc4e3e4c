use crate::{
    constants::CONTACT_SUCCESS_MESSAGE,
    email::{relay::EmailSender, template::build_notification},
    entities::{
        contact_form::{ContactForm, ContactResponse},
        message::NewMessage,
    },
    errors::{AppError, DeliveryError},
    limiter::rate_limiter::{RateDecision, RateLimiter},
    repositories::message::MessageRepository,
    validation::{validate_submission, DisposableDomains},
};

/// Where and how notification e-mails go out.
#[derive(Debug, Clone, Default)]
pub struct DeliveryOptions {
    pub notify_to: String,
    pub site_url: String,
    /// Treat a missing relay as a server error instead of storing only.
    pub require_delivery: bool,
    /// Include provider error text in 500 responses.
    pub expose_details: bool,
}

pub struct ContactHandler<R, E>
where
    R: MessageRepository,
    E: EmailSender,
{
    pub message_repo: R,
    pub email_sender: Option<E>,
    pub rate_limiter: RateLimiter,
    pub disposable_domains: DisposableDomains,
    pub delivery: DeliveryOptions,
}

impl<R, E> ContactHandler<R, E>
where
    R: MessageRepository,
    E: EmailSender,
{
    pub fn new(
        message_repo: R,
        email_sender: Option<E>,
        rate_limiter: RateLimiter,
        disposable_domains: DisposableDomains,
        delivery: DeliveryOptions,
    ) -> Self {
        ContactHandler {
            message_repo,
            email_sender,
            rate_limiter,
            disposable_domains,
            delivery,
        }
    }

    /// Throttle, validate, store, then notify. Storing and notifying are
    /// independent: a failed e-mail leaves the stored message in place.
    pub async fn submit(&self, origin: &str, form: ContactForm) -> Result<ContactResponse, AppError> {
        if let RateDecision::Limited { retry_after } = self.rate_limiter.check(origin) {
            tracing::warn!(origin, retry_after, "Contact submission rate limited");
            return Err(AppError::RateLimited { retry_after });
        }

        let submission = validate_submission(&form, &self.disposable_domains).map_err(|e| {
            tracing::debug!(origin, code = %e.code, "Contact submission rejected");
            AppError::from(e)
        })?;

        let message = self.message_repo
            .append(NewMessage {
                name: submission.name,
                email: submission.email,
                subject: submission.subject,
                body: submission.body,
            })
            .await?;

        match &self.email_sender {
            Some(sender) => {
                let email = build_notification(&message, &self.delivery.notify_to, &self.delivery.site_url);
                if let Err(e) = sender.send(&email).await {
                    tracing::error!(id = message.id, "Notification email failed: {}", e);
                    return Err(self.delivery_error("Failed to send email. Please try again later.", &e));
                }
            }
            None if self.delivery.require_delivery => {
                tracing::error!(id = message.id, "Email relay required but not configured");
                return Err(self.delivery_error("Email service not configured", &DeliveryError::NotConfigured));
            }
            None => {
                tracing::debug!(id = message.id, "No email relay configured, message stored only");
            }
        }

        Ok(ContactResponse {
            success: true,
            message: CONTACT_SUCCESS_MESSAGE.to_string(),
        })
    }

    fn delivery_error(&self, error: &str, cause: &DeliveryError) -> AppError {
        AppError::Delivery {
            error: error.to_string(),
            details: self.delivery.expose_details.then(|| cause.to_string()),
        }
    }
}
