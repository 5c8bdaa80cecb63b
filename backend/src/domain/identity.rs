//! Caller identity and application profiles.
//!
//! An [`Identity`] is derived once per request by the inbound adapter and
//! then threaded through authorization and data access. It is never looked
//! up from storage.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tenant used when the request does not name one.
pub const DEFAULT_AWID: &str = "default-awid";

/// Application profile controlling coarse permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Profile {
    /// Administrators with system-wide permissions.
    Authorities,
    /// Regular users.
    #[default]
    Operatives,
}

impl Profile {
    /// Parse a header value; unknown values fall back to [`Profile::Operatives`].
    ///
    /// # Examples
    /// ```
    /// use shopping_list::domain::Profile;
    ///
    /// assert_eq!(Profile::from_header_value("Authorities"), Profile::Authorities);
    /// assert_eq!(Profile::from_header_value("root"), Profile::Operatives);
    /// ```
    #[must_use]
    pub fn from_header_value(raw: &str) -> Self {
        match raw.trim() {
            "Authorities" => Self::Authorities,
            _ => Self::Operatives,
        }
    }

    /// Wire name of the profile.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Authorities => "Authorities",
            Self::Operatives => "Operatives",
        }
    }

    /// Permissions granted to the profile.
    #[must_use]
    pub const fn permissions(self) -> &'static [Permission] {
        match self {
            Self::Authorities => &[
                Permission::SystemManage,
                Permission::ShoppingListCreate,
                Permission::ShoppingListRead,
                Permission::ShoppingListUpdate,
                Permission::ShoppingListDelete,
                Permission::ShoppingListArchive,
                Permission::MemberManage,
                Permission::ItemManage,
            ],
            Self::Operatives => &[
                Permission::ShoppingListCreate,
                Permission::ShoppingListRead,
                Permission::ShoppingListUpdate,
                Permission::ShoppingListArchive,
                Permission::MemberManage,
                Permission::ItemManage,
            ],
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named capability a profile may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// `system.manage`
    SystemManage,
    /// `shoppingList.create`
    ShoppingListCreate,
    /// `shoppingList.read`
    ShoppingListRead,
    /// `shoppingList.update`
    ShoppingListUpdate,
    /// `shoppingList.delete`
    ShoppingListDelete,
    /// `shoppingList.archive`
    ShoppingListArchive,
    /// `member.manage`
    MemberManage,
    /// `item.manage`
    ItemManage,
}

impl Permission {
    /// Dotted permission name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SystemManage => "system.manage",
            Self::ShoppingListCreate => "shoppingList.create",
            Self::ShoppingListRead => "shoppingList.read",
            Self::ShoppingListUpdate => "shoppingList.update",
            Self::ShoppingListDelete => "shoppingList.delete",
            Self::ShoppingListArchive => "shoppingList.archive",
            Self::MemberManage => "member.manage",
            Self::ItemManage => "item.manage",
        }
    }
}

/// Whether `profile` grants `permission`.
#[must_use]
pub fn has_permission(profile: Profile, permission: Permission) -> bool {
    profile.permissions().contains(&permission)
}

/// Authenticated caller: user id, tenant and profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    user_id: String,
    awid: String,
    profile: Profile,
}

impl Identity {
    /// Build an identity from already-extracted parts.
    pub fn new(user_id: impl Into<String>, awid: impl Into<String>, profile: Profile) -> Self {
        Self {
            user_id: user_id.into(),
            awid: awid.into(),
            profile,
        }
    }

    /// Identity in the default tenant with the default profile.
    pub fn operative(user_id: impl Into<String>) -> Self {
        Self::new(user_id, DEFAULT_AWID, Profile::Operatives)
    }

    /// Caller's user id.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Caller's tenant id, echoed as `awid` in every response.
    #[must_use]
    pub fn awid(&self) -> &str {
        &self.awid
    }

    /// Caller's profile.
    #[must_use]
    pub const fn profile(&self) -> Profile {
        self.profile
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Profile::Authorities, Permission::SystemManage, true)]
    #[case(Profile::Operatives, Permission::SystemManage, false)]
    #[case(Profile::Authorities, Permission::ShoppingListDelete, true)]
    #[case(Profile::Operatives, Permission::ShoppingListDelete, false)]
    #[case(Profile::Operatives, Permission::ItemManage, true)]
    #[case(Profile::Operatives, Permission::ShoppingListArchive, true)]
    fn permission_table(
        #[case] profile: Profile,
        #[case] permission: Permission,
        #[case] expected: bool,
    ) {
        assert_eq!(has_permission(profile, permission), expected);
    }

    #[rstest]
    #[case("Authorities", Profile::Authorities)]
    #[case("Operatives", Profile::Operatives)]
    #[case(" Authorities ", Profile::Authorities)]
    #[case("authorities", Profile::Operatives)]
    #[case("", Profile::Operatives)]
    fn profile_header_parsing(#[case] raw: &str, #[case] expected: Profile) {
        assert_eq!(Profile::from_header_value(raw), expected);
    }

    #[rstest]
    fn operative_uses_default_tenant() {
        let identity = Identity::operative("u1");
        assert_eq!(identity.user_id(), "u1");
        assert_eq!(identity.awid(), DEFAULT_AWID);
        assert_eq!(identity.profile(), Profile::Operatives);
    }
}
