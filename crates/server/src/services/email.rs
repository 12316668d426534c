//! Order confirmation email.
//!
//! Uses SMTP via lettre for delivery with Askama HTML templates. Dispatch is
//! fire-and-forget from the order flow: the outcome is logged and nothing
//! else observes it.

use askama::Template;
use chrono::{Datelike, Utc};
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;
use velvet_bean_core::{NewOrder, OrderId};

use crate::config::SmtpConfig;

const SENDER_NAME: &str = "Velvet Bean";

/// HTML template for the order confirmation email.
#[derive(Template)]
#[template(path = "email/order_confirmation.html")]
struct OrderConfirmationHtml<'a> {
    name: &'a str,
    order_id: OrderId,
    date: &'a str,
    address: &'a str,
    lines: &'a [ConfirmationLine],
    total: &'a str,
    year: i32,
}

/// Plain text template for the order confirmation email.
#[derive(Template)]
#[template(path = "email/order_confirmation.txt")]
struct OrderConfirmationText<'a> {
    name: &'a str,
    order_id: OrderId,
    date: &'a str,
    address: &'a str,
    lines: &'a [ConfirmationLine],
    total: &'a str,
}

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// One itemized line of a confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationLine {
    pub name: String,
    pub quantity: u32,
    /// Line subtotal (unit price x quantity), two decimals.
    pub subtotal: String,
}

/// Everything the confirmation templates need, computed once so the
/// background send owns its data.
#[derive(Debug, Clone)]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    pub customer_name: String,
    pub address: String,
    /// Long-form placement date, e.g. "Monday, January 5, 2026".
    pub placed_on: String,
    pub lines: Vec<ConfirmationLine>,
    /// Grand total, two decimals.
    pub total: String,
}

impl OrderConfirmation {
    #[must_use]
    pub fn new(order_id: OrderId, order: &NewOrder) -> Self {
        let lines = order
            .items
            .iter()
            .map(|item| ConfirmationLine {
                name: item.name.clone(),
                quantity: item.quantity,
                subtotal: format!("{:.2}", item.price * f64::from(item.quantity)),
            })
            .collect();

        Self {
            order_id,
            customer_name: order.name.clone(),
            address: order.address.clone(),
            placed_on: Utc::now().format("%A, %B %-d, %Y").to_string(),
            lines,
            total: format!("{:.2}", order.total),
        }
    }
}

/// Email service for sending transactional emails.
#[derive(Clone)]
pub struct EmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl EmailService {
    /// Create a new email service from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the relay cannot be constructed or the sender
    /// address is invalid.
    pub fn new(config: &SmtpConfig) -> Result<Self, EmailError> {
        let credentials = Credentials::new(
            config.username.clone(),
            config.password.expose_secret().to_string(),
        );

        let builder = if config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
        };
        let mailer = builder.port(config.port).credentials(credentials).build();

        let address = config
            .username
            .parse()
            .map_err(|_| EmailError::InvalidAddress(config.username.clone()))?;

        Ok(Self {
            mailer,
            from: Mailbox::new(Some(SENDER_NAME.to_string()), address),
        })
    }

    /// Send an order confirmation.
    ///
    /// # Errors
    ///
    /// Returns error if the email fails to send or a template fails to
    /// render.
    pub async fn send_order_confirmation(
        &self,
        to: &str,
        confirmation: &OrderConfirmation,
    ) -> Result<(), EmailError> {
        let html = OrderConfirmationHtml {
            name: &confirmation.customer_name,
            order_id: confirmation.order_id,
            date: &confirmation.placed_on,
            address: &confirmation.address,
            lines: &confirmation.lines,
            total: &confirmation.total,
            year: Utc::now().year(),
        }
        .render()?;
        let text = OrderConfirmationText {
            name: &confirmation.customer_name,
            order_id: confirmation.order_id,
            date: &confirmation.placed_on,
            address: &confirmation.address,
            lines: &confirmation.lines,
            total: &confirmation.total,
        }
        .render()?;

        let subject = format!("Order Confirmation #{} - Velvet Bean", confirmation.order_id);
        self.send_multipart_email(to, &subject, &text, &html).await
    }

    /// Send a multipart email with both plain text and HTML versions.
    async fn send_multipart_email(
        &self,
        to: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(to
                .parse()
                .map_err(|_| EmailError::InvalidAddress(to.to_string()))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )?;

        self.mailer.send(email).await?;

        tracing::info!(to = %to, subject = %subject, "Email sent successfully");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use velvet_bean_core::{OrderItem, ProductId};

    use super::*;

    fn sample_order() -> NewOrder {
        NewOrder {
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            address: "1 St".to_string(),
            total: 5.0,
            items: vec![OrderItem {
                id: ProductId::new(1),
                name: "X".to_string(),
                price: 2.5,
                quantity: 2,
            }],
        }
    }

    #[test]
    fn test_confirmation_computes_line_subtotals() {
        let confirmation = OrderConfirmation::new(OrderId::new(9), &sample_order());
        assert_eq!(confirmation.total, "5.00");
        assert_eq!(confirmation.lines.len(), 1);
        let line = confirmation.lines.first().expect("one line");
        assert_eq!(line.subtotal, "5.00");
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_templates_render_items_and_total() {
        let confirmation = OrderConfirmation::new(OrderId::new(9), &sample_order());

        let html = OrderConfirmationHtml {
            name: &confirmation.customer_name,
            order_id: confirmation.order_id,
            date: &confirmation.placed_on,
            address: &confirmation.address,
            lines: &confirmation.lines,
            total: &confirmation.total,
            year: 2026,
        }
        .render()
        .expect("html renders");
        assert!(html.contains("Order ID:</strong> #9"));
        assert!(html.contains("$5.00"));
        assert!(html.contains("1 St"));

        let text = OrderConfirmationText {
            name: &confirmation.customer_name,
            order_id: confirmation.order_id,
            date: &confirmation.placed_on,
            address: &confirmation.address,
            lines: &confirmation.lines,
            total: &confirmation.total,
        }
        .render()
        .expect("text renders");
        assert!(text.contains("Order ID: #9"));
        assert!(text.contains("X x2 - $5.00"));
        assert!(text.contains("TOTAL: $5.00"));
    }
}
