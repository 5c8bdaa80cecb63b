//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters; driving
//! ports ([`ShoppingListOperations`], [`AccountService`]) are consumed by the
//! inbound HTTP adapter.

mod macros;
pub(crate) use macros::define_port_error;

mod account_service;
mod item_repository;
mod member_repository;
mod shopping_list_operations;
mod shopping_list_repository;
mod user_repository;

#[cfg(test)]
pub use account_service::MockAccountService;
pub use account_service::{AccountError, AccountService};
#[cfg(test)]
pub use item_repository::MockItemRepository;
pub use item_repository::{ItemRepository, ItemRepositoryError};
#[cfg(test)]
pub use member_repository::MockMemberRepository;
pub use member_repository::{MemberRepository, MemberRepositoryError};
#[cfg(test)]
pub use shopping_list_operations::MockShoppingListOperations;
pub use shopping_list_operations::ShoppingListOperations;
#[cfg(test)]
pub use shopping_list_repository::MockShoppingListRepository;
pub use shopping_list_repository::{ShoppingListRepository, ShoppingListRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
