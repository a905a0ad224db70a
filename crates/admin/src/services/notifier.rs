//! New-order notification emails.
//!
//! Renders the order into Askama HTML and plain text templates and hands the
//! result to the Gmail client.

use askama::Template;
use thiserror::Error;

use qotore_core::Order;

use crate::config::GmailConfig;
use crate::gmail::{GmailClient, GmailError, OutgoingMessage};

/// Errors that can occur when sending an order notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Gmail API failure.
    #[error("Gmail error: {0}")]
    Gmail(#[from] GmailError),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// A rendered order line for the email templates.
struct OrderLine {
    name: String,
    label: String,
    quantity: u32,
    line_total: String,
}

/// HTML template for the new-order notification.
#[derive(Template)]
#[template(path = "email/order_notification.html")]
struct OrderNotificationHtml<'a> {
    order_number: &'a str,
    customer_name: &'a str,
    customer_phone: &'a str,
    customer_email: Option<&'a str>,
    delivery_address: &'a str,
    city: &'a str,
    wilayat: &'a str,
    lines: &'a [OrderLine],
    total: String,
}

/// Plain text template for the new-order notification.
#[derive(Template)]
#[template(path = "email/order_notification.txt")]
struct OrderNotificationText<'a> {
    order_number: &'a str,
    customer_name: &'a str,
    customer_phone: &'a str,
    customer_email: Option<&'a str>,
    delivery_address: &'a str,
    city: &'a str,
    wilayat: &'a str,
    lines: &'a [OrderLine],
    total: String,
}

/// Sends order notification emails to the shop operator.
#[derive(Clone)]
pub struct OrderNotifier {
    gmail: GmailClient,
    notify_from: String,
    notify_to: String,
}

impl OrderNotifier {
    /// Create a notifier from Gmail configuration.
    #[must_use]
    pub fn new(config: GmailConfig) -> Self {
        let notify_from = config.notify_from.clone();
        let notify_to = config.notify_to.clone();
        Self {
            gmail: GmailClient::new(config),
            notify_from,
            notify_to,
        }
    }

    /// Send a new-order notification for the given order.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails or the Gmail send fails after
    /// retries.
    pub async fn notify_new_order(&self, order: &Order) -> Result<(), NotifyError> {
        let lines: Vec<OrderLine> = order
            .items
            .iter()
            .map(|item| OrderLine {
                name: item.fragrance_name.clone(),
                label: item.variant_label.clone(),
                quantity: item.quantity,
                line_total: item.line_total().display(),
            })
            .collect();

        let html = OrderNotificationHtml {
            order_number: &order.order_number,
            customer_name: &order.customer_name,
            customer_phone: &order.customer_phone,
            customer_email: order.customer_email.as_deref(),
            delivery_address: &order.delivery_address,
            city: &order.city,
            wilayat: &order.wilayat,
            lines: &lines,
            total: order.total_amount.display(),
        }
        .render()?;

        let text = OrderNotificationText {
            order_number: &order.order_number,
            customer_name: &order.customer_name,
            customer_phone: &order.customer_phone,
            customer_email: order.customer_email.as_deref(),
            delivery_address: &order.delivery_address,
            city: &order.city,
            wilayat: &order.wilayat,
            lines: &lines,
            total: order.total_amount.display(),
        }
        .render()?;

        let message = OutgoingMessage {
            from: self.notify_from.clone(),
            to: self.notify_to.clone(),
            subject: format!("New Order {}", order.order_number),
            text_body: text,
            html_body: html,
        };

        self.gmail.send(&message).await?;
        Ok(())
    }
}
