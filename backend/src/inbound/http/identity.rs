//! Caller identity taken from request headers.
//!
//! The header scheme stands in for a real session mechanism: `x-uu-identity`
//! names the user, `x-uu-profile` the profile and `x-awid` the tenant. Only
//! the user header is mandatory.

use actix_web::http::header::HeaderMap;

use crate::domain::error_map::AUTHENTICATION_KEY;
use crate::domain::{ErrorEntry, ErrorMap, Identity, Profile};

/// Header naming the calling user.
pub const IDENTITY_HEADER: &str = "x-uu-identity";
/// Header naming the caller's profile.
pub const PROFILE_HEADER: &str = "x-uu-profile";
/// Header naming the tenant.
pub const AWID_HEADER: &str = "x-awid";

/// Derives an [`Identity`] from inbound request metadata.
#[cfg_attr(test, mockall::automock)]
pub trait IdentityExtractor: Send + Sync {
    /// The caller's identity, or an `authentication` error map when absent.
    fn extract(&self, headers: &HeaderMap) -> Result<Identity, ErrorMap>;
}

/// [`IdentityExtractor`] reading the `x-uu-*` headers.
#[derive(Debug, Clone)]
pub struct HeaderIdentityExtractor {
    default_awid: String,
}

impl HeaderIdentityExtractor {
    /// Extractor falling back to `default_awid` when `x-awid` is absent.
    pub fn new(default_awid: impl Into<String>) -> Self {
        Self {
            default_awid: default_awid.into(),
        }
    }
}

fn header_text<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

impl IdentityExtractor for HeaderIdentityExtractor {
    fn extract(&self, headers: &HeaderMap) -> Result<Identity, ErrorMap> {
        let Some(user_id) = header_text(headers, IDENTITY_HEADER) else {
            return Err(ErrorMap::single(
                AUTHENTICATION_KEY,
                ErrorEntry::unauthorized(),
            ));
        };
        let profile = header_text(headers, PROFILE_HEADER)
            .map(Profile::from_header_value)
            .unwrap_or_default();
        let awid = header_text(headers, AWID_HEADER).unwrap_or(self.default_awid.as_str());
        Ok(Identity::new(user_id, awid, profile))
    }
}
