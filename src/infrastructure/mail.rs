pub mod log_sender;
pub mod sender;
pub mod smtp;

use std::sync::Arc;

use crate::settings::AppConfig;
use log_sender::LogEmailSender;
use sender::{EmailSender, MailError};
use smtp::SmtpEmailSender;

/// Picks the transport from configuration: authenticated relay when
/// credentials are present, plain local relay when only a host is set,
/// log-only otherwise.
pub fn email_sender_from_config(config: &AppConfig) -> Result<Arc<dyn EmailSender>, MailError> {
    let Some(host) = config.smtp_host.as_deref().filter(|h| !h.trim().is_empty()) else {
        return Ok(Arc::new(LogEmailSender));
    };

    match (config.smtp_username.as_deref(), config.smtp_password.as_deref()) {
        (Some(username), Some(password)) => Ok(Arc::new(SmtpEmailSender::new(
            host,
            config.smtp_port,
            username,
            password,
        )?)),
        _ => Ok(Arc::new(SmtpEmailSender::new_local(host, config.smtp_port))),
    }
}
