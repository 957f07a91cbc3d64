use bon::Builder;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::env;
use std::future::Future;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("{0} environment variable not found")]
    MissingVar(&'static str),
    #[error("invalid mailbox: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("invalid content type: {0}")]
    ContentType(#[from] lettre::message::header::ContentTypeErr),
    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("smtp transport failed: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// One outbound report: an HTML body plus files attached by name.
#[derive(Debug, Clone, Copy)]
pub struct Notification<'a> {
    pub subject: &'a str,
    pub html_body: &'a str,
    pub attachments: &'a [PathBuf],
}

pub trait Notifier {
    fn notify(
        &self,
        notification: &Notification<'_>,
    ) -> impl Future<Output = Result<(), NotificationError>> + Send;
}

#[derive(Debug, Clone, Builder)]
#[builder(on(String, into))]
pub struct EmailConfig {
    from_email: String,
    to_email: String,
    #[builder(default)]
    cc_emails: Vec<String>,
    smtp_password: String,
    #[builder(default = DEFAULT_SMTP_HOST.to_string())]
    smtp_host: String,
}

impl EmailConfig {
    pub fn from_env() -> Result<Self, NotificationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the `SMTP_*` settings through `lookup`. `SMTP_CC_EMAILS` and
    /// `SMTP_HOST` are optional.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, NotificationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &'static str| lookup(key).ok_or(NotificationError::MissingVar(key));

        let from_email = require("SMTP_FROM_EMAIL")?;
        let to_email = require("SMTP_TO_EMAIL")?;
        let smtp_password = require("SMTP_PASSWORD")?;

        let cc_emails = lookup("SMTP_CC_EMAILS")
            .map(|list| {
                list.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let smtp_host = lookup("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string());

        Ok(EmailConfig {
            from_email,
            to_email,
            cc_emails,
            smtp_password,
            smtp_host,
        })
    }

    pub fn to_email(&self) -> &str {
        &self.to_email
    }

    /// Builds the multipart message. Attachments that cannot be read are
    /// logged and left out.
    pub fn compose(&self, notification: &Notification<'_>) -> Result<Message, NotificationError> {
        let mut builder = Message::builder()
            .from(self.from_email.parse::<Mailbox>()?)
            .to(self.to_email.parse::<Mailbox>()?);

        for cc_email in &self.cc_emails {
            builder = builder.cc(cc_email.parse::<Mailbox>()?);
        }

        let mut body = MultiPart::mixed().singlepart(SinglePart::html(
            notification.html_body.to_string(),
        ));

        let octet_stream = ContentType::parse("application/octet-stream")?;
        for path in notification.attachments {
            let content = match std::fs::read(path) {
                Ok(content) => content,
                Err(error) => {
                    warn!(path = %path.display(), %error, "skipping unreadable attachment");
                    continue;
                }
            };
            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());

            body = body.singlepart(Attachment::new(filename).body(content, octet_stream.clone()));
        }

        Ok(builder.subject(notification.subject).multipart(body)?)
    }
}

impl Notifier for EmailConfig {
    async fn notify(&self, notification: &Notification<'_>) -> Result<(), NotificationError> {
        let email = self.compose(notification)?;

        let creds = Credentials::new(self.from_email.clone(), self.smtp_password.clone());

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.smtp_host)?
            .credentials(creds)
            .build();

        mailer.send(email).await?;
        info!(
            to = %self.to_email,
            cc = self.cc_emails.len(),
            host = %self.smtp_host,
            "report email sent"
        );

        Ok(())
    }
}
