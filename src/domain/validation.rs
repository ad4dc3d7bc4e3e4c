use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

use crate::{
    constants::{
        DEFAULT_DISPOSABLE_DOMAINS, EMAIL_LOCAL_MAX_LEN, EMAIL_MAX_LEN, MESSAGE_MAX_CHARS,
        MESSAGE_MIN_CHARS, NAME_MAX_CHARS, NAME_MIN_CHARS,
    },
    entities::{contact_form::{ContactForm, ValidatedSubmission}, message::Subject},
};

static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex compiles"));

fn invalid(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// Deny-list of throwaway e-mail providers. Matching is a case-insensitive
/// substring test against the address domain.
#[derive(Debug, Clone)]
pub struct DisposableDomains {
    domains: Vec<String>,
}

impl DisposableDomains {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let domains = domains
            .into_iter()
            .map(|d| d.as_ref().trim().to_lowercase())
            .filter(|d| !d.is_empty())
            .collect();
        DisposableDomains { domains }
    }

    pub fn empty() -> Self {
        DisposableDomains { domains: Vec::new() }
    }

    pub fn contains(&self, domain: &str) -> bool {
        let domain = domain.to_lowercase();
        self.domains.iter().any(|d| domain.contains(d.as_str()))
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

impl Default for DisposableDomains {
    fn default() -> Self {
        DisposableDomains::new(DEFAULT_DISPOSABLE_DOMAINS)
    }
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let name = name.trim();
    let chars = name.chars().count();

    if chars < NAME_MIN_CHARS {
        return Err(invalid(
            "name_length",
            format!("Name must be at least {} characters long", NAME_MIN_CHARS),
        ));
    }
    if chars > NAME_MAX_CHARS {
        return Err(invalid(
            "name_length",
            format!("Name is too long (max {} characters)", NAME_MAX_CHARS),
        ));
    }
    if !name.chars().any(char::is_alphabetic) {
        return Err(invalid("name_format", "Please enter a valid name"));
    }

    Ok(())
}

pub fn validate_email(email: &str, disposable: &DisposableDomains) -> Result<(), ValidationError> {
    if !EMAIL_SHAPE.is_match(email) {
        return Err(invalid("email_format", "Invalid email format"));
    }
    if email.len() > EMAIL_MAX_LEN {
        return Err(invalid("email_length", "Email address is too long"));
    }

    // the shape check guarantees exactly one '@'
    let (local, domain) = email.split_once('@').unwrap_or((email, ""));

    if local.len() > EMAIL_LOCAL_MAX_LEN {
        return Err(invalid("email_length", "Email local part is too long"));
    }
    if disposable.contains(domain) {
        return Err(invalid("email_disposable", "Disposable email addresses are not allowed"));
    }

    Ok(())
}

pub fn validate_message_body(body: &str) -> Result<(), ValidationError> {
    let chars = body.trim().chars().count();

    if chars < MESSAGE_MIN_CHARS {
        return Err(invalid(
            "message_length",
            format!("Message must be at least {} characters long", MESSAGE_MIN_CHARS),
        ));
    }
    if chars > MESSAGE_MAX_CHARS {
        return Err(invalid(
            "message_length",
            format!("Message is too long (max {} characters)", MESSAGE_MAX_CHARS),
        ));
    }

    Ok(())
}

pub fn validate_subject(subject: &str) -> Result<Subject, ValidationError> {
    subject
        .parse::<Subject>()
        .map_err(|_| invalid("subject_choice", "Please select a valid subject"))
}

/// Runs every intake check in order and stops at the first failure.
pub fn validate_submission(
    form: &ContactForm,
    disposable: &DisposableDomains,
) -> Result<ValidatedSubmission, ValidationError> {
    if [&form.name, &form.email, &form.subject, &form.message]
        .iter()
        .any(|field| field.is_empty())
    {
        return Err(invalid("required", "All fields are required"));
    }

    let name = form.name.trim();
    validate_name(name)?;

    let email = form.email.trim().to_lowercase();
    validate_email(&email, disposable)?;

    let body = form.message.trim();
    validate_message_body(body)?;

    let subject = validate_subject(&form.subject)?;

    Ok(ValidatedSubmission {
        name: name.to_string(),
        email,
        subject,
        body: body.to_string(),
    })
}
