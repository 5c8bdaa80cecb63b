//! Domain core: error maps, identity, validation, authorization and services.
//!
//! Purpose: keep every rule that decides whether a shopping list operation
//! may run independent of HTTP and storage. Adapters depend on this module,
//! never the other way around.
//!
//! Public surface:
//! - [`ErrorMap`], [`ErrorEntry`], [`AppErrorCode`] and [`merge_error_maps`]
//!   describe every failure reported under `uuAppErrorMap`.
//! - [`Identity`] and [`Profile`] describe the caller.
//! - `require_*` predicates decide access from already-resolved context.
//! - [`ShoppingListService`] and [`PasswordAccountService`] implement the
//!   driving ports in [`ports`].

pub mod account_service;
pub mod auth;
pub mod authorization;
pub mod dto_out;
pub mod error;
pub mod error_map;
pub mod identity;
pub mod ports;
pub mod shopping_list;
pub mod shopping_list_service;
pub mod trace_id;
pub mod user;
pub mod validation;

pub use self::account_service::PasswordAccountService;
pub use self::auth::{CredentialsValidationError, LoginCredentials, PasswordDigest, Registration};
pub use self::authorization::{
    AuthorizationOutcome, require_authentication, require_member, require_owner,
    require_owner_or_member, require_profile,
};
pub use self::dto_out::{
    ItemAddDtoOut, ItemCompletionDtoOut, ItemDtoOut, ItemListDtoOut, ItemRemoveDtoOut,
    MemberAddDtoOut, MemberDtoOut, MemberRemoveDtoOut, ShoppingListDeleteDtoOut,
    ShoppingListDtoOut, ShoppingListGetDtoOut, ShoppingListListDtoOut, ShoppingListSummary,
};
pub use self::error::{Failure, FailureKind};
pub use self::error_map::{AppErrorCode, ErrorEntry, ErrorMap, merge_error_maps};
pub use self::identity::{DEFAULT_AWID, Identity, Permission, Profile, has_permission};
pub use self::shopping_list::{
    Item, ListState, Member, MemberRole, NewItem, Quantity, ShoppingList, UnknownRole,
};
pub use self::shopping_list_service::ShoppingListService;
pub use self::trace_id::TraceId;
pub use self::user::{DEMO_PASSWORD, DEMO_USERS, DemoUser, User, UserAccount};
