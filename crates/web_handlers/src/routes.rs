use actix_web::{HttpResponse, error, guard, web};

use auth_services::middleware::AuthMiddleware;

use crate::*;

/// JSON extractor configuration: malformed bodies become 400 `validation_error`
/// responses in the same shape as handler errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(serde_json::json!({
                "error": "validation_error",
                "message": message
            })),
        )
        .into()
    })
}

/// Path extractor configuration: unparsable IDs are reported as not found.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        error::InternalError::from_response(
            err,
            HttpResponse::NotFound().json(serde_json::json!({
                "error": "not_found",
                "message": "Resource not found"
            })),
        )
        .into()
    })
}

/// Registers every route of the booking API.
///
/// Protected resources carry `gate` themselves, so the order in which they
/// are registered cannot expose a protected method. `GET /api/bookings` and
/// `POST /api/bookings` share a path and are split by method guard.
pub fn configure_routes(cfg: &mut web::ServiceConfig, gate: AuthMiddleware) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .route("/", web::get().to(root))
        .route("/health", web::get().to(health))
        .service(
            web::scope("/api")
                // Public routes
                .route("/register", web::post().to(register))
                .route("/login", web::post().to(login))
                .service(
                    web::resource("/destinations").route(web::get().to(list_destinations)),
                )
                .service(
                    web::resource("/bookings")
                        .guard(guard::Post())
                        .to(create_booking),
                )
                // Protected routes (require authentication)
                .service(
                    web::resource("/bookings")
                        .guard(guard::Get())
                        .wrap(gate.clone())
                        .to(list_bookings),
                )
                .service(
                    web::resource("/bookings/search")
                        .wrap(gate.clone())
                        .route(web::post().to(search_bookings)),
                )
                .service(
                    web::resource("/destinations/bulk")
                        .wrap(gate.clone())
                        .route(web::post().to(create_destinations)),
                )
                .service(
                    web::resource("/profile")
                        .wrap(gate.clone())
                        .route(web::get().to(get_profile)),
                )
                .service(
                    web::scope("/users")
                        .wrap(gate)
                        .route("", web::get().to(list_users))
                        .route("", web::put().to(update_user))
                        .route("", web::delete().to(delete_user))
                        .route("/{id}", web::get().to(get_user)),
                ),
        );
}
