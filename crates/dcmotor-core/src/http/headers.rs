use core::fmt::Write;

type StatusCode = u16;

/// HTTP Content Type.
#[derive(Debug, Clone, Copy)]
pub enum ContentType {
    TextHtml,
}

impl ContentType {
    /// Convert the content type to a string.
    pub(super) fn as_str(self) -> &'static str {
        match self {
            ContentType::TextHtml => "text/html",
        }
    }
}

pub trait TargetWriter {
    fn write_to(&self, writer: &mut impl Write) -> Result<(), core::fmt::Error>;
}

/// Response Headers.
///
/// The status line is always `HTTP/1.0`: the connection is closed after
/// every response and the body length is never announced.
pub struct ResponseHeaders {
    status: StatusCode,
    reason: &'static str,
    content_type: Option<ContentType>,
}

impl ResponseHeaders {
    /// Create headers with the success status code.
    pub const fn success() -> Self {
        Self {
            status: 200,
            reason: "OK",
            content_type: None,
        }
    }

    /// Set the content type.
    #[must_use]
    pub const fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = Some(content_type);
        self
    }
}

impl TargetWriter for ResponseHeaders {
    /// Write the response headers to a writer.
    fn write_to(&self, writer: &mut impl Write) -> Result<(), core::fmt::Error> {
        write!(writer, "HTTP/1.0 {} {}\r\n", self.status, self.reason)?;
        if let Some(content_type) = self.content_type {
            write!(writer, "Content-type: {}\r\n", content_type.as_str())?;
        }
        write!(writer, "\r\n")?;
        Ok(())
    }
}
