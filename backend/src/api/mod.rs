//! Operational endpoints outside the shopping list API.

pub mod health;
