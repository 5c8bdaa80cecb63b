//! Terminal request failures carrying their error map.
//!
//! A [`Failure`] pairs a coarse [`FailureKind`] (which adapters translate to
//! a transport status) with the [`ErrorMap`] gathered up to the point the
//! pipeline stopped. Failures are values, not panics: every stage returns
//! them through `Result` and the inbound adapter renders the envelope.

use std::fmt;

use super::error_map::{DTO_IN_KEY, ErrorEntry, ErrorMap};
use super::trace_id::TraceId;

/// Coarse category of a request failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Payload could not be parsed or failed validation.
    InvalidInput,
    /// No caller identity was supplied.
    Unauthenticated,
    /// The caller is known but lacks the required role.
    Forbidden,
    /// The list, item or member does not exist.
    NotFound,
    /// A business rule rejected the mutation.
    Conflict,
    /// Storage or another collaborator failed unexpectedly.
    Internal,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidInput => "invalid input",
            Self::Unauthenticated => "unauthenticated",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not found",
            Self::Conflict => "conflict",
            Self::Internal => "internal failure",
        };
        f.write_str(label)
    }
}

/// A failed request with the error map returned to the caller.
///
/// The trace identifier in scope at construction time is captured so the
/// adapter can echo it alongside the response.
///
/// # Examples
/// ```
/// use shopping_list::domain::{ErrorEntry, ErrorMap, Failure, FailureKind};
///
/// let failure = Failure::forbidden(ErrorMap::single("authorization", ErrorEntry::not_owner()));
/// assert_eq!(failure.kind(), FailureKind::Forbidden);
/// assert!(failure.errors().contains_key("authorization"));
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind} ({} error entries)", .errors.len())]
pub struct Failure {
    kind: FailureKind,
    errors: ErrorMap,
    trace_id: Option<TraceId>,
}

impl Failure {
    /// Build a failure, capturing the current trace identifier.
    #[must_use]
    pub fn new(kind: FailureKind, errors: ErrorMap) -> Self {
        Self {
            kind,
            errors,
            trace_id: TraceId::current(),
        }
    }

    /// Input rejected by parsing or validation.
    #[must_use]
    pub fn invalid_input(errors: ErrorMap) -> Self {
        Self::new(FailureKind::InvalidInput, errors)
    }

    /// Body or query could not be decoded at all.
    #[must_use]
    pub fn invalid_dto_in() -> Self {
        Self::invalid_input(ErrorMap::single(DTO_IN_KEY, ErrorEntry::invalid_dto_in()))
    }

    /// Missing identity.
    #[must_use]
    pub fn unauthenticated(errors: ErrorMap) -> Self {
        Self::new(FailureKind::Unauthenticated, errors)
    }

    /// Authorization refused.
    #[must_use]
    pub fn forbidden(errors: ErrorMap) -> Self {
        Self::new(FailureKind::Forbidden, errors)
    }

    /// Resource lookup failed.
    #[must_use]
    pub fn not_found(errors: ErrorMap) -> Self {
        Self::new(FailureKind::NotFound, errors)
    }

    /// Business-rule conflict such as a duplicate membership.
    #[must_use]
    pub fn conflict(errors: ErrorMap) -> Self {
        Self::new(FailureKind::Conflict, errors)
    }

    /// Unexpected collaborator failure.
    #[must_use]
    pub fn internal(errors: ErrorMap) -> Self {
        Self::new(FailureKind::Internal, errors)
    }

    /// Failure category.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        self.kind
    }

    /// Error map collected for this failure.
    #[must_use]
    pub const fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Trace identifier captured at construction.
    #[must_use]
    pub const fn trace_id(&self) -> Option<TraceId> {
        self.trace_id
    }

    /// Prepend earlier stage errors; entries already on `self` win.
    #[must_use]
    pub fn with_earlier_errors(mut self, earlier: ErrorMap) -> Self {
        self.errors = earlier.merged_with(self.errors);
        self
    }

    /// Consume the failure, returning its error map.
    #[must_use]
    pub fn into_errors(self) -> ErrorMap {
        self.errors
    }
}
