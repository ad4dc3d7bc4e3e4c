use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The closed set of categories a visitor can pick on the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Project,
    Job,
    Collaboration,
    Other,
}

impl Subject {
    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Project => "project",
            Subject::Job => "job",
            Subject::Collaboration => "collaboration",
            Subject::Other => "other",
        }
    }

    /// Human readable label used in notification e-mails.
    pub fn label(&self) -> &'static str {
        match self {
            Subject::Project => "Project Inquiry",
            Subject::Job => "Job Opportunity",
            Subject::Collaboration => "Collaboration Request",
            Subject::Other => "General Message",
        }
    }
}

impl FromStr for Subject {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "project" => Ok(Subject::Project),
            "job" => Ok(Subject::Job),
            "collaboration" => Ok(Subject::Collaboration),
            "other" => Ok(Subject::Other),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted contact-form submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub name: String,
    pub email: String,
    pub subject: Subject,
    #[serde(rename = "message")]
    pub body: String,
    pub read: bool,
}

/// A validated submission that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMessage {
    pub name: String,
    pub email: String,
    pub subject: Subject,
    pub body: String,
}

impl NewMessage {
    pub fn into_message(self, id: i64, timestamp: DateTime<Utc>) -> Message {
        Message {
            id,
            timestamp,
            name: self.name,
            email: self.email,
            subject: self.subject,
            body: self.body,
            read: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadStatus {
    #[default]
    All,
    Unread,
    Read,
}

impl ReadStatus {
    pub fn matches(&self, message: &Message) -> bool {
        match self {
            ReadStatus::All => true,
            ReadStatus::Unread => !message.read,
            ReadStatus::Read => message.read,
        }
    }
}

/// Inbox filter: read state plus a case-insensitive search over name, email
/// and body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageQuery {
    #[serde(default)]
    pub status: ReadStatus,

    #[serde(default)]
    pub q: Option<String>,
}

impl MessageQuery {
    pub fn matches(&self, message: &Message) -> bool {
        if !self.status.matches(message) {
            return false;
        }

        match self.q.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                [&message.name, &message.email, &message.body]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MessageStats {
    pub total: usize,
    pub unread: usize,
    pub read: usize,
}

impl MessageStats {
    pub fn from_messages(messages: &[Message]) -> Self {
        let unread = messages.iter().filter(|m| !m.read).count();
        MessageStats {
            total: messages.len(),
            unread,
            read: messages.len() - unread,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateReadRequest {
    pub id: i64,

    /// Absent or `null` means "mark as read".
    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub read: bool,
}

fn default_true() -> bool {
    true
}

fn null_as_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

#[derive(Debug, Serialize)]
pub struct UpdateReadResponse {
    pub success: bool,
    pub message: Message,
}
