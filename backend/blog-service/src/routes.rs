/// Route table for blog-service
use crate::config::CorsConfig;
use crate::error::AppError;
use crate::handlers;
use crate::middleware::SessionAuth;
use crate::AppState;
use actix_cors::Cors;
use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{web, HttpRequest};

/// Register every route on `cfg`.
///
/// Shared by the binary and the integration tests so both run the exact same
/// wiring, including the structured JSON/query error handlers.
pub fn configure(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.app_data(web::Data::new(state.clone()))
        .app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .route("/", web::get().to(handlers::index))
        .route("/health", web::get().to(handlers::health))
        .route("/health/ready", web::get().to(handlers::readiness))
        // Session
        .route("/jwt", web::post().to(handlers::issue_session))
        .route("/logout", web::post().to(handlers::clear_session))
        // Blogs
        .service(
            web::resource("/blogs")
                .route(web::get().to(handlers::list_blogs))
                .route(web::post().to(handlers::create_blog)),
        )
        .route("/blogs/search", web::get().to(handlers::search_blogs))
        .route("/words", web::get().to(handlers::list_blogs_by_words))
        .route("/featured", web::get().to(handlers::list_featured_blogs))
        .route("/latest", web::get().to(handlers::list_latest_blogs))
        .route("/blog/{id}", web::get().to(handlers::get_blog))
        .service(
            web::resource("/update/blog/{id}")
                .route(web::get().to(handlers::get_blog))
                .route(web::put().to(handlers::update_blog)),
        )
        .route("/delete/blog", web::delete().to(handlers::delete_blog))
        // Comments
        .route("/comments", web::post().to(handlers::create_comment))
        .route("/comments/{id}", web::get().to(handlers::list_blog_comments))
        // Wishlist (session required)
        .service(
            web::scope("/wishlist")
                .wrap(SessionAuth::new(state.sessions.clone()))
                .service(
                    web::resource("")
                        .route(web::get().to(handlers::list_wishlist))
                        .route(web::post().to(handlers::create_wishlist_entry)),
                )
                .route("/user", web::get().to(handlers::list_user_wishlist))
                .route("/blog", web::delete().to(handlers::delete_wishlist_entry)),
        );
}

/// Cross-origin policy: one browser origin, cookies allowed.
pub fn cors(cfg: &CorsConfig) -> Cors {
    Cors::default()
        .allowed_origin(&cfg.allowed_origin)
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
        .max_age(3600)
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::Validation(err.to_string()).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}
