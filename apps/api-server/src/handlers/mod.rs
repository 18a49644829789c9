//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::web;

use crate::middleware::auth::RequireAuth;

/// Mount point of the blog routes.
pub const BLOG_SCOPE: &str = "/api/v1/blog";

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/health", web::get().to(health::health_check))
        .service(
            web::scope(BLOG_SCOPE)
                // Protected routes
                .service(
                    web::resource(["", "/"])
                        .wrap(RequireAuth)
                        .route(web::post().to(posts::create_post))
                        .route(web::put().to(posts::update_post)),
                )
                // Public routes; `/bulk` must precede `/{id}`
                .route("/bulk", web::get().to(posts::list_posts))
                .route("/{id}", web::get().to(posts::get_post)),
        );
}
