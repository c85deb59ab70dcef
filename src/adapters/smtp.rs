use crate::config::mail::{MailConfig, SmtpSecurity};
use crate::core::{MailSession, MailTransport, OutgoingMessage, Result};
use crate::utils::error::SantaError;
use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::PoolConfig;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;

const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

/// SMTP transport over lettre. Each dial builds a transport whose pool holds
/// at most one connection, so the batch reuses a single SMTP session.
pub struct SmtpMailTransport {
    config: MailConfig,
}

impl SmtpMailTransport {
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }

    fn build(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
        let host = self.config.host.as_str();
        let builder = match self.config.security {
            SmtpSecurity::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(host),
            SmtpSecurity::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host),
            SmtpSecurity::None => Ok(AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)),
        }
        .map_err(|e| SantaError::TransportUnavailable {
            message: format!("TLS setup for {} failed: {}", host, e),
        })?;

        let mut builder = builder
            .port(self.config.port)
            .timeout(Some(SMTP_TIMEOUT))
            .pool_config(PoolConfig::new().max_size(1));
        if self.config.has_credentials() {
            builder = builder.credentials(Credentials::new(
                self.config.user.clone(),
                self.config.password.clone(),
            ));
        }

        Ok(builder.build())
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    type Session = SmtpSession;

    async fn dial(&self) -> Result<SmtpSession> {
        let from: Mailbox =
            self.config
                .from_address
                .parse()
                .map_err(|e| SantaError::InvalidConfigValueError {
                    field: "EMAIL_FROM".to_string(),
                    value: self.config.from_address.clone(),
                    reason: format!("{}", e),
                })?;
        let transport = self.build()?;

        tracing::debug!(
            "Connecting to {}:{} ({:?})",
            self.config.host,
            self.config.port,
            self.config.security
        );
        match transport.test_connection().await {
            Ok(true) => Ok(SmtpSession { transport, from }),
            Ok(false) => Err(SantaError::TransportUnavailable {
                message: format!(
                    "{}:{} did not respond to NOOP",
                    self.config.host, self.config.port
                ),
            }),
            Err(e) => Err(SantaError::TransportUnavailable {
                message: format!("{}:{}: {}", self.config.host, self.config.port, e),
            }),
        }
    }
}

pub struct SmtpSession {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpSession {
    fn build_message(&self, message: &OutgoingMessage) -> Result<Message> {
        let address: Address =
            message
                .to_address
                .parse()
                .map_err(|e| SantaError::SendRejected {
                    address: message.to_address.clone(),
                    message: format!("invalid address: {}", e),
                })?;
        let to = Mailbox::new(Some(message.to_name.clone()), address);

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject.as_str())
            .header(ContentType::TEXT_HTML)
            .body(message.html_body.clone())
            .map_err(|e| SantaError::SendRejected {
                address: message.to_address.clone(),
                message: format!("could not build message: {}", e),
            })
    }
}

#[async_trait]
impl MailSession for SmtpSession {
    async fn send(&mut self, message: &OutgoingMessage) -> Result<()> {
        let email = self.build_message(message)?;

        self.transport
            .send(email)
            .await
            .map(|_| ())
            .map_err(|e| SantaError::SendRejected {
                address: message.to_address.clone(),
                message: e.to_string(),
            })
    }

    async fn close(self) -> Result<()> {
        // Dropping the transport shuts down its pool and the pooled connection.
        drop(self.transport);
        tracing::debug!("SMTP session closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(port: u16) -> MailConfig {
        MailConfig {
            host: "127.0.0.1".to_string(),
            port,
            user: String::new(),
            password: String::new(),
            from_address: "Santa <santa@example.org>".to_string(),
            security: SmtpSecurity::None,
        }
    }

    fn session() -> SmtpSession {
        SmtpSession {
            transport: AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous("127.0.0.1").build(),
            from: "Santa <santa@example.org>".parse().unwrap(),
        }
    }

    fn message(to_address: &str) -> OutgoingMessage {
        OutgoingMessage {
            to_name: "A".to_string(),
            to_address: to_address.to_string(),
            subject: "Your Secret Santa Match!".to_string(),
            html_body: "<p>Hi A</p>".to_string(),
        }
    }

    #[test]
    fn test_transport_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SmtpMailTransport>();
        assert_send_sync::<SmtpSession>();
    }

    #[tokio::test]
    async fn test_dial_refused_is_unavailable() {
        // Bind then drop a listener to get a port nobody is listening on.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let transport = SmtpMailTransport::new(config(port));

        let result = transport.dial().await;

        assert!(matches!(
            result,
            Err(SantaError::TransportUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_message_headers() {
        let email = session().build_message(&message("a@x.org")).unwrap();
        let raw = String::from_utf8(email.formatted()).unwrap();

        assert!(raw.contains("To: \"A\" <a@x.org>") || raw.contains("To: A <a@x.org>"));
        assert!(raw.contains("Subject: Your Secret Santa Match!"));
        assert!(raw.contains("Content-Type: text/html"));
    }

    #[tokio::test]
    async fn test_invalid_recipient_is_rejected_per_message() {
        let result = session().build_message(&message("not an address"));
        assert!(matches!(result, Err(SantaError::SendRejected { .. })));
    }
}
