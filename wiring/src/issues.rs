//! Advisories raised while wiring a diagram.
//!
//! Non-fatal conditions are collected into an [`IssueSet`] and returned
//! alongside the normal output of each stage. Fatal conditions use the
//! error types in [`crate::error`] instead.

use std::fmt::{Debug, Display};

use arcstr::ArcStr;
use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::catalog::PinRole;

/// A diagnostic issue that should be reported to users.
pub trait Diagnostic: Debug + Display {
    /// Returns an optional help message that should indicate
    /// what users need to do to resolve an issue.
    fn help(&self) -> Option<Box<dyn Display>> {
        None
    }

    /// Returns the severity of this issue.
    ///
    /// The default implementation returns [`Severity::default`].
    fn severity(&self) -> Severity {
        Default::default()
    }
}

/// An enumeration of possible severity levels.
#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Severity {
    /// An informational message.
    Info,
    /// A warning.
    #[default]
    Warning,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// An ordered collection of issues.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueSet<T> {
    issues: Vec<T>,
    num_warnings: usize,
}

impl<T> IssueSet<T> {
    /// Creates a new, empty issue set.
    #[inline]
    pub fn new() -> Self {
        Self {
            issues: Vec::new(),
            num_warnings: 0,
        }
    }

    /// Returns an iterator over all issues in the set, in the order they were raised.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.issues.iter()
    }

    /// The number of issues in this issue set.
    #[inline]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Returns `true` if this issue set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns `true` if this issue set contains a warning.
    pub fn has_warning(&self) -> bool {
        self.num_warnings > 0
    }

    /// The number of warnings in this issue set.
    #[inline]
    pub fn num_warnings(&self) -> usize {
        self.num_warnings
    }
}

impl<T: Diagnostic> IssueSet<T> {
    /// Adds the given issue to the issue set.
    #[inline]
    pub fn add(&mut self, issue: T) {
        match issue.severity() {
            Severity::Warning => self.num_warnings += 1,
            Severity::Info => (),
        };
        self.issues.push(issue);
    }

    /// Moves every issue of `other` to the end of this set.
    pub fn extend(&mut self, other: IssueSet<T>) {
        for issue in other {
            self.add(issue);
        }
    }

    /// Renders every issue as a message, in order.
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(|issue| issue.to_string()).collect()
    }
}

impl<T> IntoIterator for IssueSet<T> {
    type Item = T;
    type IntoIter = <std::vec::Vec<T> as IntoIterator>::IntoIter;
    fn into_iter(self) -> Self::IntoIter {
        self.issues.into_iter()
    }
}

impl<T> Default for IssueSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Display> Display for IssueSet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for issue in self.issues.iter() {
            writeln!(f, "{}", issue)?;
        }
        Ok(())
    }
}

/// An advisory raised while assigning pins, building connections, or laying out a diagram.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutIssue {
    cause: Cause,
    severity: Severity,
}

/// The condition behind a [`LayoutIssue`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Cause {
    /// A round-robin pool ran out, so a board pin was handed out again.
    PinReused {
        /// The requested role.
        role: PinRole,
        /// The board pin that was reused.
        board_pin: u32,
        /// The requesting device.
        device: ArcStr,
        /// The requesting device pin.
        device_pin: ArcStr,
    },
    /// The diagram has more connections than the soft threshold.
    ConnectionsAboveThreshold {
        /// The number of connections.
        count: usize,
        /// The configured threshold.
        threshold: usize,
    },
    /// The diagram has more devices than the soft threshold.
    DevicesAboveThreshold {
        /// The number of devices.
        count: usize,
        /// The configured threshold.
        threshold: usize,
    },
    /// An explicit connection replaced an automatically assigned one.
    ConnectionOverridden {
        /// The destination device.
        device: ArcStr,
        /// The destination pin.
        device_pin: ArcStr,
    },
}

impl Diagnostic for LayoutIssue {
    fn help(&self) -> Option<Box<dyn Display>> {
        match &self.cause {
            Cause::PinReused { role, .. } => Some(Box::new(format!(
                "the board has fewer {role} pins than requesters; several wires now share one pin"
            ))),
            Cause::ConnectionsAboveThreshold { .. } | Cause::DevicesAboveThreshold { .. } => {
                Some(Box::new("consider splitting the diagram into smaller ones"))
            }
            Cause::ConnectionOverridden { .. } => None,
        }
    }

    fn severity(&self) -> Severity {
        self.severity
    }
}

impl LayoutIssue {
    /// Creates a new issue from the given cause and severity.
    pub fn new(cause: Cause, severity: Severity) -> Self {
        Self { cause, severity }
    }

    /// Gets the underlying cause of this issue.
    #[inline]
    pub fn cause(&self) -> &Cause {
        &self.cause
    }

    /// Creates a new issue and logs it immediately.
    ///
    /// The log level will be selected according to the given severity.
    pub(crate) fn new_and_log(cause: Cause, severity: Severity) -> Self {
        let result = Self::new(cause, severity);
        match severity {
            Severity::Info => tracing::event!(Level::INFO, issue = ?result.cause, "{}", result),
            Severity::Warning => tracing::event!(Level::WARN, issue = ?result.cause, "{}", result),
        }
        result
    }
}

impl Display for LayoutIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.cause)
    }
}

impl Display for Cause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PinReused {
                role,
                board_pin,
                device,
                device_pin,
            } => write!(
                f,
                "pin reuse: all {} board pins are taken, so pin {} is reused for `{}.{}`",
                role, board_pin, device, device_pin
            ),
            Self::ConnectionsAboveThreshold { count, threshold } => write!(
                f,
                "diagram has {} connections, above the recommended maximum of {}",
                count, threshold
            ),
            Self::DevicesAboveThreshold { count, threshold } => write!(
                f,
                "diagram has {} devices, above the recommended maximum of {}",
                count, threshold
            ),
            Self::ConnectionOverridden { device, device_pin } => write!(
                f,
                "explicit connection to `{}.{}` replaces the automatically assigned one",
                device, device_pin
            ),
        }
    }
}
