//! HTTP inbound adapter exposing the shopping list and auth endpoints.

use actix_web::web;

pub mod auth;
pub mod envelope;
pub mod error;
pub mod identity;
pub mod items;
pub mod members;
pub mod pipeline;
pub mod schemas;
pub mod shopping_lists;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;

/// Register every API route plus the extractor configuration they rely on.
///
/// # Examples
/// ```no_run
/// use actix_web::App;
/// use shopping_list::inbound::http::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(pipeline::json_config())
        .app_data(pipeline::query_config())
        .service(
            web::scope("/api/shoppingList")
                .service(shopping_lists::list_shopping_lists)
                .service(shopping_lists::get_shopping_list)
                .service(shopping_lists::create_shopping_list)
                .service(shopping_lists::delete_shopping_list)
                .service(shopping_lists::rename_shopping_list)
                .service(shopping_lists::archive_shopping_list)
                .service(items::list_items)
                .service(items::add_item)
                .service(items::remove_item)
                .service(items::complete_item)
                .service(items::uncomplete_item)
                .service(members::add_member)
                .service(members::remove_member)
                .service(members::leave_shopping_list),
        )
        .service(
            web::scope("/api/auth")
                .service(auth::register)
                .service(auth::login),
        );
}
