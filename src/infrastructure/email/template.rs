use chrono::{DateTime, Utc};

use crate::entities::message::Message;

use super::relay::OutgoingEmail;

pub fn notification_subject(message: &Message) -> String {
    format!("[Portfolio] {} from {}", message.subject.label(), message.name)
}

/// Renders the owner notification for a stored submission. All visitor
/// supplied text is HTML-escaped.
pub fn render_notification(message: &Message, site_url: &str) -> String {
    let label = message.subject.label();
    let name = ammonia::clean_text(&message.name);
    let email = ammonia::clean_text(&message.email);
    let body = ammonia::clean_text(&message.body);
    let site = ammonia::clean_text(site_url);
    let reply_subject = urlencoding::encode(&format!("Re: {}", label)).into_owned();

    format!(
        r#"<html>
  <body style="font-family: 'Segoe UI', Arial, sans-serif; color: #333; max-width: 600px; margin: 0 auto;">
    <div style="background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); padding: 30px; border-radius: 10px 10px 0 0;">
      <h1 style="color: white; margin: 0; font-size: 24px;">New Contact Form Message</h1>
    </div>
    <div style="background-color: #f8f9fa; padding: 30px; border: 1px solid #e9ecef;">
      <div style="background: white; padding: 20px; border-radius: 8px; margin-bottom: 20px;">
        <h2 style="color: #495057; margin-top: 0; font-size: 18px; border-bottom: 2px solid #667eea; padding-bottom: 10px;">{label}</h2>
        <table style="width: 100%; border-collapse: collapse;">
          <tr><td style="padding: 10px 0; color: #6c757d; width: 100px;"><strong>From:</strong></td><td style="padding: 10px 0;">{name}</td></tr>
          <tr><td style="padding: 10px 0; color: #6c757d;"><strong>Email:</strong></td><td style="padding: 10px 0;"><a href="mailto:{email}" style="color: #667eea; text-decoration: none;">{email}</a></td></tr>
          <tr><td style="padding: 10px 0; color: #6c757d;"><strong>Date:</strong></td><td style="padding: 10px 0;">{date}</td></tr>
        </table>
      </div>
      <div style="background: white; padding: 20px; border-radius: 8px;">
        <h3 style="color: #495057; margin-top: 0; font-size: 16px;">Message:</h3>
        <p style="white-space: pre-wrap; line-height: 1.8; margin: 0;">{body}</p>
      </div>
      <div style="margin-top: 20px; text-align: center;">
        <a href="mailto:{email}?subject={reply_subject}" style="display: inline-block; background: #667eea; color: white; padding: 12px 30px; border-radius: 25px; text-decoration: none; font-weight: bold;">Reply to {name}</a>
      </div>
    </div>
    <div style="background-color: #343a40; padding: 20px; border-radius: 0 0 10px 10px; text-align: center;">
      <p style="color: #adb5bd; font-size: 12px; margin: 0;">Sent from the portfolio contact form at <a href="{site}" style="color: #667eea;">{site}</a></p>
    </div>
  </body>
</html>"#,
        date = format_date(&message.timestamp),
    )
}

fn format_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%A, %B %-d, %Y at %-I:%M %p UTC").to_string()
}

pub fn build_notification(message: &Message, to: &str, site_url: &str) -> OutgoingEmail {
    OutgoingEmail {
        to: to.to_string(),
        subject: notification_subject(message),
        html_body: render_notification(message, site_url),
        reply_to: message.email.clone(),
    }
}
