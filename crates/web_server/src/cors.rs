use actix_cors::Cors;
use actix_web::http::{Method, header};

/// Builds the CORS policy: only `origins` may call the API, with credentials.
pub fn cors_policy(origins: &[String]) -> Cors {
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allowed_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .supports_credentials()
        .max_age(3600)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    #[actix_web::test]
    async fn test_allowed_origin_is_echoed() {
        let app = test::init_service(
            App::new()
                .wrap(cors_policy(&["https://happyevtaxi.com".to_string()]))
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "https://happyevtaxi.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://happyevtaxi.com"
        );
        assert_eq!(
            resp.headers()
                .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
                .unwrap(),
            "true"
        );
    }

    #[actix_web::test]
    async fn test_unknown_origin_is_refused() {
        let app = test::init_service(
            App::new()
                .wrap(cors_policy(&["https://happyevtaxi.com".to_string()]))
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "https://evil.example"))
            .to_request();
        match test::try_call_service(&app, req).await {
            Ok(resp) => {
                assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
                assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
            }
            Err(err) => assert_eq!(
                err.as_response_error().status_code(),
                StatusCode::BAD_REQUEST
            ),
        }
    }
}
