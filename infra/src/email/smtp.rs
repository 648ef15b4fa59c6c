//! SMTP code sender

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{error, info};

use vg_core::CodeSender;
use vg_shared::email::mask_email;
use vg_shared::EmailConfig;

use crate::InfrastructureError;

/// Port used for implicit TLS; everything else negotiates STARTTLS
const IMPLICIT_TLS_PORT: u16 = 465;

/// Sends codes through an authenticated SMTP relay
pub struct SmtpCodeSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    subject: String,
    ttl_minutes: u64,
}

impl SmtpCodeSender {
    /// Build from the email configuration section
    ///
    /// `ttl_seconds` is only used for the validity line in the message body.
    pub fn from_config(config: &EmailConfig, ttl_seconds: u64) -> Result<Self, InfrastructureError> {
        let host = config
            .host
            .as_deref()
            .ok_or_else(|| InfrastructureError::Config("EMAIL_HOST not set".to_string()))?;

        let from: Mailbox = config
            .from
            .parse()
            .map_err(|e| InfrastructureError::Config(format!("Invalid from address: {}", e)))?;

        let builder = if config.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
        }
        .map_err(|e| InfrastructureError::Config(e.to_string()))?;

        let mut builder = builder.port(config.port);
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from,
            subject: config.subject.clone(),
            ttl_minutes: ttl_seconds.div_ceil(60).max(1),
        })
    }

    /// Fresh `Message-ID` on the sender's domain
    pub fn new_message_id(&self) -> String {
        format!("<{}@{}>", uuid::Uuid::new_v4(), self.from.email.domain())
    }

    /// Build the message for `recipient`
    pub fn build_message(
        &self,
        recipient: &str,
        code: &str,
        message_id: &str,
    ) -> Result<Message, InfrastructureError> {
        let to: Mailbox = recipient
            .parse()
            .map_err(|e| InfrastructureError::Email(format!("Invalid recipient: {}", e)))?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(self.subject.clone())
            .message_id(Some(message_id.to_string()))
            .header(ContentType::TEXT_PLAIN)
            .body(message_body(code, self.ttl_minutes))
            .map_err(|e| InfrastructureError::Email(e.to_string()))
    }

    async fn deliver(&self, recipient: &str, code: &str) -> Result<String, InfrastructureError> {
        let message_id = self.new_message_id();
        let message = self.build_message(recipient, code, &message_id)?;
        self.transport
            .send(message)
            .await
            .map_err(|e| InfrastructureError::Email(e.to_string()))?;

        Ok(message_id)
    }
}

fn message_body(code: &str, ttl_minutes: u64) -> String {
    let unit = if ttl_minutes == 1 { "minute" } else { "minutes" };
    format!(
        "Your OTP is: {}\n\nThis code expires in {} {}. If you did not request it, you can ignore this email.\n",
        code, ttl_minutes, unit
    )
}

#[async_trait]
impl CodeSender for SmtpCodeSender {
    async fn send_code(&self, recipient: &str, code: &str) -> Result<String, String> {
        match self.deliver(recipient, code).await {
            Ok(reference) => {
                info!(
                    target: "email_service",
                    provider = "smtp",
                    recipient = %mask_email(recipient),
                    "Verification email sent"
                );
                Ok(reference)
            }
            Err(e) => {
                error!("SMTP delivery to {} failed: {}", mask_email(recipient), e);
                Err(e.to_string())
            }
        }
    }
}
