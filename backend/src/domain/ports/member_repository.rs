//! Port abstraction for list memberships.
//!
//! Adapters must enforce `(shopping_list_id, user_id)` uniqueness themselves
//! and report a clash as `AlreadyExists`, even under concurrent inserts.
use async_trait::async_trait;

use crate::domain::{Member, MemberRole};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by member repository adapters.
    pub enum MemberRepositoryError {
        /// The user is already a member of the list.
        AlreadyExists { shopping_list_id: String, user_id: String } =>
            "user {user_id} is already a member of {shopping_list_id}",
        /// The user is not a member of the list.
        NotFound { shopping_list_id: String, user_id: String } =>
            "user {user_id} is not a member of {shopping_list_id}",
        /// Repository connection could not be established.
        Connection { message: String } => "member repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "member repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Memberships of a list ordered by join time.
    async fn list_members(&self, shopping_list_id: &str)
    -> Result<Vec<Member>, MemberRepositoryError>;

    /// User ids of every member of a list.
    async fn member_ids(&self, shopping_list_id: &str) -> Result<Vec<String>, MemberRepositoryError>;

    /// Whether `user_id` is a member of the list.
    async fn is_member(
        &self,
        shopping_list_id: &str,
        user_id: &str,
    ) -> Result<bool, MemberRepositoryError>;

    /// Record a membership.
    async fn add_member(
        &self,
        shopping_list_id: &str,
        user_id: &str,
        role: MemberRole,
    ) -> Result<Member, MemberRepositoryError>;

    /// End a membership.
    async fn remove_member(
        &self,
        shopping_list_id: &str,
        user_id: &str,
    ) -> Result<(), MemberRepositoryError>;
}
