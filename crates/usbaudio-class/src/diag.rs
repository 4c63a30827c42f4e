//! Non-fatal decode diagnostics.
//!
//! A malformed or partially understood descriptor never aborts the decode
//! session; it produces one or more [`Diagnostic`]s scoped to the current
//! entity and decoding of sibling descriptors continues. Byte ranges are
//! relative to the start of the buffer handed to the entry point.

use std::fmt;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Recognized but not interpreted (trailing bytes, unsupported subtype).
    Note,
    /// A field value violates a fixed constraint; decoding continued.
    Warn,
    /// Structural failure; decoding of this entity stopped.
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Bytes within the declared length that no decoder interpreted.
    UndecodedTrailingBytes,
    /// A whole payload this library does not interpret.
    UndecodedPayload,
    /// The buffer ends before the declared length.
    TruncatedBody { needed: usize, actual: usize },
    /// Feature unit length does not satisfy `7 + (channels + 1) * control_size`.
    InvalidFeatureUnitLength,
    /// Type III format type requires exactly 2 channels.
    InvalidTypeIiiChannels(u8),
    /// Type III format type requires a subframe size of 2.
    InvalidTypeIiiSubframeSize(u8),
    /// Type III format type requires a bit resolution of 16.
    InvalidTypeIiiBitResolution(u8),
}

impl DiagnosticKind {
    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::UndecodedTrailingBytes | DiagnosticKind::UndecodedPayload => {
                Severity::Note
            }
            DiagnosticKind::InvalidTypeIiiChannels(_)
            | DiagnosticKind::InvalidTypeIiiSubframeSize(_)
            | DiagnosticKind::InvalidTypeIiiBitResolution(_) => Severity::Warn,
            DiagnosticKind::TruncatedBody { .. } | DiagnosticKind::InvalidFeatureUnitLength => {
                Severity::Error
            }
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::UndecodedTrailingBytes => write!(f, "undecoded bytes"),
            DiagnosticKind::UndecodedPayload => write!(f, "undecoded payload"),
            DiagnosticKind::TruncatedBody { needed, actual } => {
                write!(f, "truncated body: needed {needed} bytes, have {actual}")
            }
            DiagnosticKind::InvalidFeatureUnitLength => {
                write!(f, "feature unit length inconsistent with control size")
            }
            DiagnosticKind::InvalidTypeIiiChannels(v) => {
                write!(f, "bNrChannels must be 2 for Type III (got {v})")
            }
            DiagnosticKind::InvalidTypeIiiSubframeSize(v) => {
                write!(f, "bSubframeSize must be 2 for Type III (got {v})")
            }
            DiagnosticKind::InvalidTypeIiiBitResolution(v) => {
                write!(f, "bBitResolution must be 16 for Type III (got {v})")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub range: Range<usize>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, range: Range<usize>) -> Self {
        Diagnostic { kind, range }
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}..{}] {}",
            self.range.start, self.range.end, self.kind
        )
    }
}
