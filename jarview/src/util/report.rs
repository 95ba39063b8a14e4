//! Text error reports for the user-facing error path.
//!
//! A report carries a short message, the full error chain and, when
//! configured, where to file an issue. How it is shown is up to the
//! [`Notifier`](crate::Notifier).

use std::error::Error;
use std::fmt::{self, Display};

/// An error rendered for a person to read and copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    /// Headline; may span several lines.
    pub message: String,
    /// The error's own text followed by each underlying cause.
    pub details: Vec<String>,
    /// Issue tracker URL shown under the details.
    pub issue_tracker: Option<String>,
}

impl ErrorReport {
    pub fn new(message: impl Into<String>, error: &(dyn Error + 'static)) -> Self {
        let mut details = vec![error.to_string()];
        let mut source = error.source();
        while let Some(cause) = source {
            details.push(cause.to_string());
            source = cause.source();
        }

        Self {
            message: message.into(),
            details,
            issue_tracker: None,
        }
    }

    pub fn with_issue_tracker(mut self, url: Option<String>) -> Self {
        self.issue_tracker = url;
        self
    }
}

impl Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.message.lines() {
            writeln!(f, "{line}")?;
        }
        writeln!(f)?;
        writeln!(f, "Details:")?;
        for (i, detail) in self.details.iter().enumerate() {
            if i == 0 {
                writeln!(f, "  {detail}")?;
            } else {
                writeln!(f, "  caused by: {detail}")?;
            }
        }
        if let Some(url) = &self.issue_tracker {
            write!(f, "Submit to {url}")?;
        }
        Ok(())
    }
}
