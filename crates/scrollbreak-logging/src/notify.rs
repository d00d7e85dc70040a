//! crates/scrollbreak-logging/src/notify.rs
//! Best-effort client for a growl-style desktop notification daemon.
//!
//! The daemon speaks XML-RPC: a single `notify` method taking the
//! notification kind, title, description, and a sticky flag. The call is
//! carried in one `HTTP/1.1` POST over a plain [`TcpStream`] with the
//! configured timeout applied to every socket operation, so a dead daemon
//! can never stall the caller for long.

use std::borrow::Cow;
use std::io::{self, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};

use thiserror::Error;

use super::config::GrowlConfig;

/// One desktop notification.
///
/// `kind` names the notification class the daemon groups by (for example
/// `"Archive Success"`); `sticky` asks the daemon to keep the bubble on
/// screen until dismissed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notification {
    kind: String,
    title: String,
    description: String,
    sticky: bool,
}

impl Notification {
    /// Creates a non-sticky notification.
    pub fn new(
        kind: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            title: title.into(),
            description: description.into(),
            sticky: false,
        }
    }

    /// Asks the daemon to keep the notification on screen until dismissed.
    #[must_use]
    pub const fn with_sticky(mut self, sticky: bool) -> Self {
        self.sticky = sticky;
        self
    }

    /// The notification class.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The notification title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The notification body text.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the notification is sticky.
    #[must_use]
    pub const fn sticky(&self) -> bool {
        self.sticky
    }
}

/// Why a notification could not be delivered.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The configured endpoint did not resolve to any socket address.
    #[error("notification endpoint {endpoint:?} did not resolve")]
    Resolve {
        /// The `host:port` pair that failed to resolve.
        endpoint: String,
    },
    /// Connecting to or talking to the daemon failed.
    #[error("notification transport failed: {0}")]
    Io(#[from] io::Error),
    /// The daemon's reply did not start with an HTTP status line.
    #[error("notification endpoint sent a malformed reply: {line:?}")]
    Protocol {
        /// The first line of the reply.
        line: String,
    },
    /// The daemon refused the request outright.
    #[error("notification endpoint answered HTTP status {status}")]
    Status {
        /// The HTTP status code of the reply.
        status: u16,
    },
    /// The daemon parsed the call but rejected it.
    #[error("notification call returned an XML-RPC fault")]
    Fault,
}

/// Client holding the daemon endpoint and timeout.
#[derive(Clone, Debug)]
pub struct Notifier {
    config: GrowlConfig,
}

impl Notifier {
    /// Creates a client for the daemon described by `config`.
    #[must_use]
    pub const fn new(config: GrowlConfig) -> Self {
        Self { config }
    }

    /// Delivers `notification`, blocking for at most a few multiples of the
    /// configured timeout.
    pub fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let endpoint = self.config.endpoint();
        let address = endpoint
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| NotifyError::Resolve {
                endpoint: endpoint.to_owned(),
            })?;
        let timeout = self.config.timeout();
        let mut stream = TcpStream::connect_timeout(&address, timeout)?;
        stream.set_read_timeout(Some(timeout))?;
        stream.set_write_timeout(Some(timeout))?;

        let body = render_method_call(notification);
        stream.write_all(render_request(endpoint, &body).as_bytes())?;
        stream.flush()?;

        let response = read_response(&mut stream)?;
        evaluate_response(&response)
    }
}

fn render_request(endpoint: &str, body: &str) -> String {
    format!(
        "POST / HTTP/1.1\r\n\
         Host: {endpoint}\r\n\
         Content-Type: text/xml\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\
         \r\n\
         {body}",
        body.len()
    )
}

fn render_method_call(notification: &Notification) -> String {
    let mut body = String::from(
        "<?xml version=\"1.0\"?>\n<methodCall>\n<methodName>notify</methodName>\n<params>\n",
    );
    for text in [
        notification.kind(),
        notification.title(),
        notification.description(),
    ] {
        body.push_str("<param><value><string>");
        body.push_str(&xml_escape(text));
        body.push_str("</string></value></param>\n");
    }
    body.push_str("<param><value><boolean>");
    body.push(if notification.sticky() { '1' } else { '0' });
    body.push_str("</boolean></value></param>\n</params>\n</methodCall>\n");
    body
}

fn xml_escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Reads until the daemon closes the connection. A read timeout after some
/// bytes arrived counts as end of response, covering daemons that honor the
/// call but ignore `Connection: close`.
fn read_response(stream: &mut TcpStream) -> io::Result<String> {
    let mut raw = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match stream.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => raw.extend_from_slice(&chunk[..n]),
            Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
            Err(error)
                if !raw.is_empty()
                    && matches!(
                        error.kind(),
                        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
                    ) =>
            {
                break;
            }
            Err(error) => return Err(error),
        }
    }
    Ok(String::from_utf8_lossy(&raw).into_owned())
}

fn evaluate_response(response: &str) -> Result<(), NotifyError> {
    let status_line = response.lines().next().unwrap_or_default();
    let status = parse_status(status_line).ok_or_else(|| NotifyError::Protocol {
        line: status_line.to_owned(),
    })?;
    if status != 200 {
        return Err(NotifyError::Status { status });
    }
    if response.contains("<fault") {
        return Err(NotifyError::Fault);
    }
    Ok(())
}

fn parse_status(line: &str) -> Option<u16> {
    let mut parts = line.split_whitespace();
    if !parts.next()?.starts_with("HTTP/") {
        return None;
    }
    parts.next()?.parse().ok()
}
