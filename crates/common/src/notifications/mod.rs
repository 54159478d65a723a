// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! The notification submission boundary.
//!
//! Validation and normalization happen at construction; delivery transports
//! are external. File content crosses the boundary Base64 encoded regardless
//! of the input encoding.

pub mod manager;

pub use manager::NotificationManager;

use std::collections::HashMap;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};

/// The default FTP control port.
pub const DEFAULT_FTP_PORT: u16 = 21;

/// Errors raised when a notification is rejected at submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotificationError {
    /// The email address failed syntactic validation.
    #[error("invalid email address: {0}")]
    InvalidEmailAddress(String),
    /// A required credential was not supplied.
    #[error("missing credentials: {0}")]
    MissingCredentials(String),
    /// A required field was empty.
    #[error("missing field: {0}")]
    MissingField(String),
}

/// An email notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailNotification {
    /// The recipient address.
    pub address: String,
    /// The subject line; empty when not supplied.
    pub subject: String,
    /// The message body; empty when not supplied.
    pub message: String,
    /// Attached machine readable data; empty when not supplied.
    pub data: String,
    /// Optional transport headers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
}

/// An SMS notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsNotification {
    /// The recipient phone number.
    pub phone_number: String,
    /// The message body.
    pub message: String,
}

/// A webhook notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebNotification {
    /// The target URL.
    pub address: String,
    /// The payload; empty when not supplied.
    pub data: String,
    /// Optional transport headers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
}

/// A Telegram notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelegramNotification {
    /// The chat the message posts to.
    pub chat_id: String,
    /// The message body.
    pub message: String,
    /// A bot token overriding the deployment default, when supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_token: Option<String>,
}

/// An FTP/SFTP file drop notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FtpNotification {
    /// The normalized hostname, schemes and trailing slashes stripped.
    pub hostname: String,
    /// The control port.
    pub port: u16,
    /// The login username.
    pub username: String,
    /// The login password, for password authentication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// The SSH private key, for key authentication over SFTP.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    /// The SSH public key, for key authentication over SFTP.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    /// The remote path the file writes to.
    pub file_path: String,
    /// The file content, Base64 encoded on the wire.
    pub file_content: String,
    /// Whether the drop uses SFTP.
    pub secure: bool,
}

/// A message emitted by a strategy toward the notification sink.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Notification {
    /// An email notification.
    Email(EmailNotification),
    /// An SMS notification.
    Sms(SmsNotification),
    /// A webhook notification.
    Web(WebNotification),
    /// A Telegram notification.
    Telegram(TelegramNotification),
    /// An FTP/SFTP file drop notification.
    Ftp(FtpNotification),
}

impl Notification {
    /// Creates an email notification, validating the address and normalizing
    /// missing subject/message/data to empty strings.
    ///
    /// # Errors
    ///
    /// Returns an error if `address` fails syntactic validation.
    pub fn email(
        address: &str,
        subject: Option<&str>,
        message: Option<&str>,
        data: Option<&str>,
        headers: Option<HashMap<String, String>>,
    ) -> Result<Self, NotificationError> {
        if !is_valid_email(address) {
            return Err(NotificationError::InvalidEmailAddress(address.to_string()));
        }
        Ok(Self::Email(EmailNotification {
            address: address.to_string(),
            subject: subject.unwrap_or_default().to_string(),
            message: message.unwrap_or_default().to_string(),
            data: data.unwrap_or_default().to_string(),
            headers,
        }))
    }

    /// Creates an SMS notification.
    ///
    /// # Errors
    ///
    /// Returns an error if `phone_number` is empty.
    pub fn sms(phone_number: &str, message: Option<&str>) -> Result<Self, NotificationError> {
        if phone_number.trim().is_empty() {
            return Err(NotificationError::MissingField("phone_number".to_string()));
        }
        Ok(Self::Sms(SmsNotification {
            phone_number: phone_number.to_string(),
            message: message.unwrap_or_default().to_string(),
        }))
    }

    /// Creates a webhook notification.
    ///
    /// # Errors
    ///
    /// Returns an error if `address` is empty.
    pub fn web(
        address: &str,
        data: Option<&str>,
        headers: Option<HashMap<String, String>>,
    ) -> Result<Self, NotificationError> {
        if address.trim().is_empty() {
            return Err(NotificationError::MissingField("address".to_string()));
        }
        Ok(Self::Web(WebNotification {
            address: address.to_string(),
            data: data.unwrap_or_default().to_string(),
            headers,
        }))
    }

    /// Creates a Telegram notification.
    ///
    /// # Errors
    ///
    /// Returns an error if `chat_id` is empty.
    pub fn telegram(
        chat_id: &str,
        message: Option<&str>,
        bot_token: Option<&str>,
    ) -> Result<Self, NotificationError> {
        if chat_id.trim().is_empty() {
            return Err(NotificationError::MissingField("chat_id".to_string()));
        }
        Ok(Self::Telegram(TelegramNotification {
            chat_id: chat_id.to_string(),
            message: message.unwrap_or_default().to_string(),
            bot_token: bot_token.map(ToString::to_string),
        }))
    }

    /// Creates an FTP file drop using password authentication.
    ///
    /// The hostname is normalized and the content Base64 encoded.
    ///
    /// # Errors
    ///
    /// Returns an error if the password is missing or empty.
    pub fn ftp(
        hostname: &str,
        username: &str,
        password: Option<&str>,
        file_path: &str,
        file_content: impl AsRef<[u8]>,
        port: Option<u16>,
    ) -> Result<Self, NotificationError> {
        let password = match password {
            Some(p) if !p.is_empty() => p.to_string(),
            _ => {
                return Err(NotificationError::MissingCredentials(
                    "password required for FTP authentication".to_string(),
                ));
            }
        };
        Ok(Self::Ftp(FtpNotification {
            hostname: normalize_ftp_hostname(hostname),
            port: port.unwrap_or(DEFAULT_FTP_PORT),
            username: username.to_string(),
            password: Some(password),
            private_key: None,
            public_key: None,
            file_path: file_path.to_string(),
            file_content: BASE64.encode(file_content),
            secure: false,
        }))
    }

    /// Creates an SFTP file drop using SSH key authentication.
    ///
    /// The hostname is normalized and the content Base64 encoded.
    ///
    /// # Errors
    ///
    /// Returns an error if either half of the keypair is missing or empty.
    pub fn sftp_with_key(
        hostname: &str,
        username: &str,
        private_key: Option<&str>,
        public_key: Option<&str>,
        file_path: &str,
        file_content: impl AsRef<[u8]>,
        port: Option<u16>,
    ) -> Result<Self, NotificationError> {
        let (private_key, public_key) = match (private_key, public_key) {
            (Some(private), Some(public)) if !private.is_empty() && !public.is_empty() => {
                (private.to_string(), public.to_string())
            }
            _ => {
                return Err(NotificationError::MissingCredentials(
                    "both halves of the SSH keypair are required".to_string(),
                ));
            }
        };
        Ok(Self::Ftp(FtpNotification {
            hostname: normalize_ftp_hostname(hostname),
            port: port.unwrap_or(DEFAULT_FTP_PORT),
            username: username.to_string(),
            password: None,
            private_key: Some(private_key),
            public_key: Some(public_key),
            file_path: file_path.to_string(),
            file_content: BASE64.encode(file_content),
            secure: true,
        }))
    }
}

/// Validates an email address syntactically (RFC-5321-lite).
///
/// Rejects missing or repeated `@`, empty parts, consecutive dots, a leading
/// or trailing dot in the local part, `*`, and malformed domain labels.
#[must_use]
pub fn is_valid_email(address: &str) -> bool {
    let mut parts = address.splitn(2, '@');
    let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }

    // Local part: printable ASCII atom text, dots neither leading, trailing,
    // nor consecutive
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    const LOCAL_SPECIALS: &str = "!#$%&'+-/=?^_`{|}~.";
    if !local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || LOCAL_SPECIALS.contains(c))
    {
        return false;
    }

    // Domain: dot separated alphanumeric/hyphen labels
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return false;
    }
    domain.split('.').all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

/// Normalizes an FTP hostname, stripping URL schemes and trailing slashes.
#[must_use]
pub fn normalize_ftp_hostname(hostname: &str) -> String {
    let mut host = hostname.trim();
    for scheme in ["ftp://", "sftp://", "https://", "http://"] {
        if let Some(stripped) = host.strip_prefix(scheme) {
            host = stripped;
            break;
        }
    }
    host.trim_end_matches('/').to_string()
}
