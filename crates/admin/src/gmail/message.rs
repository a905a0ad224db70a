//! MIME message construction for the Gmail API.
//!
//! The Gmail send endpoint takes a complete RFC 2822 message, base64url
//! encoded in the `raw` field. Messages are built as `multipart/alternative`
//! with a plain text part and an HTML part.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// An outbound email with both plain text and HTML bodies.
#[derive(Debug, Clone)]
pub struct OutgoingMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

impl OutgoingMessage {
    /// Render the message as RFC 2822 text.
    #[must_use]
    pub fn to_mime(&self) -> String {
        // The boundary only needs to not occur in either body; bodies are
        // template output we control.
        let boundary = "qotore_mime_boundary";

        format!(
            "From: {from}\r\n\
             To: {to}\r\n\
             Subject: {subject}\r\n\
             MIME-Version: 1.0\r\n\
             Content-Type: multipart/alternative; boundary=\"{boundary}\"\r\n\
             \r\n\
             --{boundary}\r\n\
             Content-Type: text/plain; charset=\"UTF-8\"\r\n\
             \r\n\
             {text}\r\n\
             --{boundary}\r\n\
             Content-Type: text/html; charset=\"UTF-8\"\r\n\
             \r\n\
             {html}\r\n\
             --{boundary}--\r\n",
            from = self.from,
            to = self.to,
            subject = self.subject,
            text = self.text_body,
            html = self.html_body,
        )
    }

    /// Encode for the Gmail API `raw` field (base64url, no padding).
    #[must_use]
    pub fn encode(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.to_mime())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn message() -> OutgoingMessage {
        OutgoingMessage {
            from: "shop@qotore.com".to_string(),
            to: "orders@qotore.com".to_string(),
            subject: "New Order QT-8F2K1-042317".to_string(),
            text_body: "Order received.".to_string(),
            html_body: "<p>Order received.</p>".to_string(),
        }
    }

    #[test]
    fn test_mime_structure() {
        let mime = message().to_mime();
        assert!(mime.starts_with("From: shop@qotore.com\r\n"));
        assert!(mime.contains("Subject: New Order QT-8F2K1-042317\r\n"));
        assert!(mime.contains("Content-Type: multipart/alternative;"));
        assert!(mime.contains("Content-Type: text/plain; charset=\"UTF-8\""));
        assert!(mime.contains("Content-Type: text/html; charset=\"UTF-8\""));
        // Closing boundary marker
        assert!(mime.ends_with("--qotore_mime_boundary--\r\n"));
    }

    #[test]
    fn test_encode_is_url_safe_without_padding() {
        let raw = message().encode();
        assert!(!raw.contains('+'));
        assert!(!raw.contains('/'));
        assert!(!raw.contains('='));

        let decoded = URL_SAFE_NO_PAD.decode(&raw).unwrap();
        let text = String::from_utf8(decoded).unwrap();
        assert!(text.contains("New Order QT-8F2K1-042317"));
    }
}
