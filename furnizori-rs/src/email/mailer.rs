//! SMTP submission for offer requests
//!
//! One authenticated STARTTLS transport per send or test call; the transport
//! is dropped on every exit path. Transport and authentication failures are
//! folded into [`EmailResult`] values instead of propagating as faults, so a
//! bulk batch can always run to completion.

use crate::config::SmtpConfig;
use crate::email::composer;
use crate::email::types::{BulkEmailResult, EmailResult, OfferRequest, UserData};
use crate::error::{DirectoryError, Result};
use lettre::message::{header::ContentType, Attachment, Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::{info, warn};

pub struct Mailer {
    defaults: SmtpConfig,
}

impl Mailer {
    /// Create a mailer with service-wide SMTP defaults
    pub fn new(defaults: SmtpConfig) -> Self {
        Self { defaults }
    }

    /// Compose and send one offer request to its declared recipients
    pub async fn send(&self, request: &OfferRequest) -> EmailResult {
        match self
            .dispatch(request, &request.recipients, &request.cc)
            .await
        {
            Ok(()) => EmailResult::ok("Cererea de ofertă a fost trimisă"),
            Err(e) => {
                warn!("Offer request send failed: {}", e);
                EmailResult::failure(e.to_string())
            }
        }
    }

    /// Send one message per target, continuing past individual failures.
    ///
    /// Targets are the per-supplier contact lists when supplied, otherwise
    /// each declared recipient on its own.
    pub async fn send_bulk(&self, request: &OfferRequest) -> BulkEmailResult {
        let mut results = Vec::new();

        match request.supplier_contacts.as_deref() {
            Some(contacts) if !contacts.is_empty() => {
                for target in contacts {
                    let result = match self
                        .dispatch(request, &target.emails, &target.cc_emails)
                        .await
                    {
                        Ok(()) => EmailResult::ok("Cererea de ofertă a fost trimisă"),
                        Err(e) => {
                            warn!("Send to supplier '{}' failed: {}", target.name, e);
                            EmailResult::failure(e.to_string())
                        }
                    };
                    results.push(result.with_recipient(target.name.clone()));
                }
            }
            _ => {
                for recipient in &request.recipients {
                    let result = match self
                        .dispatch(request, std::slice::from_ref(recipient), &request.cc)
                        .await
                    {
                        Ok(()) => EmailResult::ok("Cererea de ofertă a fost trimisă"),
                        Err(e) => {
                            warn!("Send to {} failed: {}", recipient, e);
                            EmailResult::failure(e.to_string())
                        }
                    };
                    results.push(result.with_recipient(recipient.clone()));
                }
            }
        }

        let success = !results.is_empty() && results.iter().all(|r| r.success);
        BulkEmailResult { success, results }
    }

    /// Connect, STARTTLS and authenticate without sending a message
    pub async fn test_connection(&self, user: &UserData) -> EmailResult {
        let transport = match self.build_transport(user) {
            Ok(t) => t,
            Err(e) => return EmailResult::failure(e.to_string()),
        };

        match transport.test_connection().await {
            Ok(true) => EmailResult::ok("Conexiunea SMTP funcționează"),
            Ok(false) => EmailResult::failure("Serverul SMTP a refuzat conexiunea"),
            Err(e) => {
                warn!("SMTP connection test failed: {}", e);
                EmailResult::failure(e.to_string())
            }
        }
    }

    async fn dispatch(&self, request: &OfferRequest, to: &[String], cc: &[String]) -> Result<()> {
        if to.is_empty() {
            return Err(DirectoryError::Validation(
                "No recipient addresses".to_string(),
            ));
        }

        let message = self.build_message(request, to, cc).await?;
        let transport = self.build_transport(&request.user)?;

        transport
            .send(message)
            .await
            .map_err(|e| DirectoryError::Mail(e.to_string()))?;

        info!("Sent offer request '{}' to {}", request.subject, to.join(", "));
        Ok(())
    }

    fn build_transport(&self, user: &UserData) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
        let server = user
            .smtp_server
            .clone()
            .unwrap_or_else(|| self.defaults.server.clone());
        let port = user.smtp_port.unwrap_or(self.defaults.port);

        let credentials = Credentials::new(user.email.clone(), user.smtp_pass.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&server)
            .map_err(|e| DirectoryError::Mail(e.to_string()))?
            .port(port)
            .credentials(credentials)
            .timeout(Some(Duration::from_secs(self.defaults.timeout_secs)))
            .build();

        Ok(transport)
    }

    async fn build_message(
        &self,
        request: &OfferRequest,
        to: &[String],
        cc: &[String],
    ) -> Result<Message> {
        let sender = Mailbox::new(
            Some(request.user.name.clone()),
            request
                .user
                .email
                .parse()
                .map_err(|_| DirectoryError::InvalidEmail(request.user.email.clone()))?,
        );

        let mut builder = Message::builder()
            .from(sender)
            .subject(request.subject.clone());

        for address in to {
            builder = builder.to(address
                .parse()
                .map_err(|_| DirectoryError::InvalidEmail(address.clone()))?);
        }
        for address in cc {
            builder = builder.cc(address
                .parse()
                .map_err(|_| DirectoryError::InvalidEmail(address.clone()))?);
        }

        let text = composer::compose_text(request);
        let html = request
            .custom_html
            .clone()
            .unwrap_or_else(|| composer::compose_html(request));

        let mut body = MultiPart::mixed().multipart(MultiPart::alternative_plain_html(text, html));

        for document in &request.documents {
            let content = tokio::fs::read(&document.path).await.map_err(|e| {
                DirectoryError::Mail(format!("Cannot read attachment {}: {}", document.path, e))
            })?;

            let content_type = ContentType::parse("application/octet-stream")
                .map_err(|e| DirectoryError::Mail(e.to_string()))?;

            body = body.singlepart(
                Attachment::new(document.display_name.clone()).body(content, content_type),
            );
        }

        builder
            .multipart(body)
            .map_err(|e| DirectoryError::Mail(e.to_string()))
    }
}
