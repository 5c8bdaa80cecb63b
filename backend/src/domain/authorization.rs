//! Pure authorization predicates.
//!
//! Every predicate takes the (optional) caller identity plus the minimum
//! context it needs, already resolved from storage by the caller, and
//! returns an [`AuthorizationOutcome`]. Authentication is always checked
//! first, so a missing identity yields `unauthorized` under
//! `authentication` rather than a role failure.

use super::error_map::{AUTHENTICATION_KEY, AUTHORIZATION_KEY, ErrorEntry, ErrorMap};
use super::identity::{Identity, Profile};

/// Result of an authorization predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorizationOutcome {
    ok: bool,
    errors: ErrorMap,
}

impl AuthorizationOutcome {
    fn granted() -> Self {
        Self {
            ok: true,
            errors: ErrorMap::new(),
        }
    }

    fn denied(key: &str, entry: ErrorEntry) -> Self {
        Self {
            ok: false,
            errors: ErrorMap::single(key, entry),
        }
    }

    /// Whether access is granted.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.ok
    }

    /// Errors explaining a refusal; empty when granted.
    #[must_use]
    pub const fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Consume the outcome, returning its error map.
    #[must_use]
    pub fn into_errors(self) -> ErrorMap {
        self.errors
    }

    /// Whether the refusal was for a missing identity.
    #[must_use]
    pub fn is_unauthenticated(&self) -> bool {
        !self.ok && self.errors.contains_key(AUTHENTICATION_KEY)
    }
}

fn authenticated<F>(identity: Option<&Identity>, check: F) -> AuthorizationOutcome
where
    F: FnOnce(&Identity) -> AuthorizationOutcome,
{
    identity.map_or_else(
        || AuthorizationOutcome::denied(AUTHENTICATION_KEY, ErrorEntry::unauthorized()),
        check,
    )
}

fn is_listed(user_id: &str, member_ids: &[String]) -> bool {
    member_ids.iter().any(|member| member == user_id)
}

/// Grant iff an identity is present.
///
/// # Examples
/// ```
/// use shopping_list::domain::{require_authentication, Identity};
///
/// assert!(require_authentication(Some(&Identity::operative("u1"))).is_ok());
/// assert!(!require_authentication(None).is_ok());
/// ```
#[must_use]
pub fn require_authentication(identity: Option<&Identity>) -> AuthorizationOutcome {
    authenticated(identity, |_| AuthorizationOutcome::granted())
}

/// Grant iff the caller owns the list.
#[must_use]
pub fn require_owner(identity: Option<&Identity>, owner_id: &str) -> AuthorizationOutcome {
    authenticated(identity, |caller| {
        if caller.user_id() == owner_id {
            AuthorizationOutcome::granted()
        } else {
            AuthorizationOutcome::denied(AUTHORIZATION_KEY, ErrorEntry::not_owner())
        }
    })
}

/// Grant iff the caller owns the list or appears in `member_ids`.
///
/// # Examples
/// ```
/// use shopping_list::domain::{require_owner_or_member, Identity};
///
/// let caller = Identity::operative("u2");
/// let members = vec!["u2".to_owned()];
/// assert!(require_owner_or_member(Some(&caller), "u1", &members).is_ok());
/// assert!(!require_owner_or_member(Some(&caller), "u1", &[]).is_ok());
/// ```
#[must_use]
pub fn require_owner_or_member(
    identity: Option<&Identity>,
    owner_id: &str,
    member_ids: &[String],
) -> AuthorizationOutcome {
    authenticated(identity, |caller| {
        if caller.user_id() == owner_id || is_listed(caller.user_id(), member_ids) {
            AuthorizationOutcome::granted()
        } else {
            AuthorizationOutcome::denied(AUTHORIZATION_KEY, ErrorEntry::not_member())
        }
    })
}

/// Grant iff the caller appears in `member_ids`. Ownership alone is not enough.
#[must_use]
pub fn require_member(identity: Option<&Identity>, member_ids: &[String]) -> AuthorizationOutcome {
    authenticated(identity, |caller| {
        if is_listed(caller.user_id(), member_ids) {
            AuthorizationOutcome::granted()
        } else {
            AuthorizationOutcome::denied(AUTHORIZATION_KEY, ErrorEntry::not_member())
        }
    })
}

/// Grant iff the caller's profile is one of `allowed`.
#[must_use]
pub fn require_profile(identity: Option<&Identity>, allowed: &[Profile]) -> AuthorizationOutcome {
    authenticated(identity, |caller| {
        if allowed.contains(&caller.profile()) {
            AuthorizationOutcome::granted()
        } else {
            AuthorizationOutcome::denied(
                AUTHORIZATION_KEY,
                ErrorEntry::insufficient_permissions(),
            )
        }
    })
}
