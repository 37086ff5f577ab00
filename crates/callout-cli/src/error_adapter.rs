//! Error adapter for converting CalloutError to miette diagnostics.
//!
//! Scene parse errors carry the scene source and the TOML span of the
//! problem, so they render with a labeled snippet. Every other variant
//! renders as a plain message with an error code.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use callout::CalloutError;

/// Adapter that lets miette render a [`CalloutError`].
pub struct Reportable<'a>(&'a CalloutError);

impl<'a> Reportable<'a> {
    pub fn new(err: &'a CalloutError) -> Self {
        Self(err)
    }

    fn parse_span(&self) -> Option<SourceSpan> {
        match self.0 {
            CalloutError::Parse { err, .. } => err
                .span()
                .map(|span| SourceSpan::new(span.start.into(), span.len())),
            _ => None,
        }
    }
}

impl fmt::Debug for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            CalloutError::Parse { err, .. } => write!(f, "{}", err.message()),
            other => fmt::Display::fmt(other, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.0 {
            CalloutError::Parse { .. } => None,
            other => other.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            CalloutError::Io(_) => "callout::io",
            CalloutError::Parse { .. } => "callout::parse",
            CalloutError::Scene(_) => "callout::scene",
            CalloutError::Attr(_) => "callout::attr",
            CalloutError::Config(_) => "callout::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            CalloutError::Scene(_) => "node types are Group, Label, Circle, Tag and Text",
            CalloutError::Attr(_) => "check the attribute name and value against the node type",
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self.0 {
            CalloutError::Parse { src, .. } => Some(src as &dyn miette::SourceCode),
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.parse_span()?;
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(Some("here".to_string()), span),
        )))
    }
}

/// Convert a [`CalloutError`] into a reportable error.
pub fn to_reportable(err: &CalloutError) -> Reportable<'_> {
    Reportable::new(err)
}
