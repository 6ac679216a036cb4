//! Email tool: sends a drafted email to the single configured receiver.
//!
//! Mail goes out over SMTP, authenticated as the sender with their address
//! and passkey (for Gmail, an app password). Missing identity fields are
//! reported as not configured, and the draft stays in the conversation for
//! the user to send by hand.

use async_trait::async_trait;
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::info;
use uniassist_config::EmailConfig;
use uniassist_core::error::ToolError;
use uniassist_core::tool::{Tool, ToolResult};

const SMTP_TIMEOUT_SECS: u64 = 30;
const IMPLICIT_TLS_PORT: u16 = 465;

pub struct EmailTool {
    config: EmailConfig,
}

impl EmailTool {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    fn require<'a>(value: &'a Option<String>, what: &str) -> Result<&'a str, ToolError> {
        value
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ToolError::NotConfigured(format!("email {what} is not set")))
    }

    fn address(raw: &str, what: &str) -> Result<Address, ToolError> {
        raw.parse()
            .map_err(|e| ToolError::NotConfigured(format!("email {what} '{raw}' is invalid: {e}")))
    }

    /// The message as it will be sent: `From` is the sender's name and
    /// address, `To` is the configured receiver.
    fn compose(&self, subject: &str, body: &str) -> Result<Message, ToolError> {
        let sender = Self::address(Self::require(&self.config.sender_email, "sender")?, "sender")?;
        let receiver = Self::address(
            Self::require(&self.config.receiver_email, "receiver")?,
            "receiver",
        )?;

        Message::builder()
            .from(Mailbox::new(self.config.sender_name.clone(), sender))
            .to(Mailbox::new(None, receiver))
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| ToolError::ExecutionFailed {
                tool_name: "send_email".into(),
                reason: format!("Failed to build message: {e}"),
            })
    }

    fn transport(&self, sender: &str, passkey: &str) -> Result<AsyncSmtpTransport<Tokio1Executor>, ToolError> {
        let host = self.config.smtp_host.as_str();
        let builder = if self.config.smtp_port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
        }
        .map_err(|e| ToolError::ExecutionFailed {
            tool_name: "send_email".into(),
            reason: format!("Failed to set up SMTP for {host}: {e}"),
        })?;

        Ok(builder
            .port(self.config.smtp_port)
            .credentials(Credentials::new(sender.to_string(), passkey.to_string()))
            .timeout(Some(Duration::from_secs(SMTP_TIMEOUT_SECS)))
            .build())
    }
}

#[async_trait]
impl Tool for EmailTool {
    fn name(&self) -> &str {
        "send_email"
    }

    fn description(&self) -> &str {
        "Send an email to the configured recipient. Only call this after the user \
         has confirmed the final draft."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "subject": {
                    "type": "string",
                    "description": "The email subject line"
                },
                "body": {
                    "type": "string",
                    "description": "The full email body, including greeting and closing"
                }
            },
            "required": ["subject", "body"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let subject = arguments["subject"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'subject' argument".into()))?;
        let body = arguments["body"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'body' argument".into()))?;

        let message = self.compose(subject, body)?;
        let sender = Self::require(&self.config.sender_email, "sender")?;
        let passkey = Self::require(&self.config.sender_passkey, "sender passkey")?;
        let receiver = Self::require(&self.config.receiver_email, "receiver")?;

        self.transport(sender, passkey)?
            .send(message)
            .await
            .map_err(|e| ToolError::ExecutionFailed {
                tool_name: "send_email".into(),
                reason: e.to_string(),
            })?;

        info!(to = receiver, subject, host = %self.config.smtp_host, "Email sent");
        Ok(ToolResult::text(format!("Email sent to {receiver} with subject \"{subject}\".")))
    }
}
