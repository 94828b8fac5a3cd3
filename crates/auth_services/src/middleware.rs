use actix_web::{
    Error, HttpMessage, ResponseError, Result,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{Ready, ready},
    rc::Rc,
};
use uuid::Uuid;

use crate::jwt::JwtService;
use crate::types::{AuthError, Claims};

/// Middleware for handling authentication by verifying JWT tokens
/// and attaching the decoded claims to the request.
#[derive(Clone)]
pub struct AuthMiddleware {
    jwt_service: JwtService,
}

impl AuthMiddleware {
    /// Creates the middleware around the process-wide token service.
    pub fn new(jwt_service: JwtService) -> Self {
        Self { jwt_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            jwt_service: self.jwt_service.clone(),
        }))
    }
}

/// Service that implements the authentication middleware logic
pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
    jwt_service: JwtService,
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    header_value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let jwt_service = self.jwt_service.clone();

        Box::pin(async move {
            let token = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .and_then(bearer_token)
                .map(str::to_owned);

            let token = match token {
                Some(token) => token,
                None => {
                    log::warn!("Rejected {} {}: missing bearer token", req.method(), req.path());
                    let response = AuthError::MissingToken.error_response();
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            let claims = match jwt_service.verify_token(&token) {
                Ok(claims) => claims,
                Err(e) => {
                    log::warn!("Rejected {} {}: {}", req.method(), req.path(), e);
                    let response = AuthError::InvalidToken(e).error_response();
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            req.extensions_mut().insert(claims);

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// Custom extractor for the authenticated caller
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// ID of the authenticated user
    pub id: Uuid,
    /// Username carried in the token
    pub username: String,
}

impl actix_web::FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &actix_web::HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let claims = req.extensions().get::<Claims>().cloned();

        ready(match claims {
            Some(claims) => Ok(AuthenticatedUser {
                id: claims.sub,
                username: claims.username,
            }),
            None => Err(AuthError::MissingToken.into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{User, UserStatus};
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use chrono::{Duration, Utc};

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().json(serde_json::json!({
            "id": user.id,
            "username": user.username,
        }))
    }

    fn jwt() -> JwtService {
        JwtService::new(b"middleware-secret", Duration::hours(1))
    }

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "gatekeeper".to_string(),
            password_hash: String::new(),
            status: UserStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("bearer abc"), None);
        assert_eq!(bearer_token("abc"), None);
    }

    #[actix_web::test]
    async fn test_gate_outcomes() {
        let jwt = jwt();
        let app = actix_test::init_service(
            App::new().service(
                web::scope("/private")
                    .wrap(AuthMiddleware::new(jwt.clone()))
                    .route("/me", web::get().to(whoami)),
            ),
        )
        .await;

        // no header
        let req = actix_test::TestRequest::get().uri("/private/me").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);

        // wrong scheme
        let req = actix_test::TestRequest::get()
            .uri("/private/me")
            .insert_header((header::AUTHORIZATION, "Basic dXNlcjpwYXNz"))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);

        // token signed with another secret
        let user = user();
        let token = jwt.generate_access_token(&user).unwrap();
        let tampered = JwtService::new(b"attacker-secret", Duration::hours(1))
            .generate_access_token(&user)
            .unwrap();
        let req = actix_test::TestRequest::get()
            .uri("/private/me")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", tampered)))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), 403);

        // expired token
        let stale = jwt
            .issue_at(&user, Utc::now() - Duration::hours(2))
            .unwrap();
        let req = actix_test::TestRequest::get()
            .uri("/private/me")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", stale)))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), 403);

        // valid token
        let req = actix_test::TestRequest::get()
            .uri("/private/me")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let body: serde_json::Value = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["id"], serde_json::json!(user.id));
        assert_eq!(body["username"], "gatekeeper");
    }

    #[actix_web::test]
    async fn test_extractor_without_gate_is_unauthenticated() {
        let app = actix_test::init_service(App::new().route("/me", web::get().to(whoami))).await;

        let req = actix_test::TestRequest::get().uri("/me").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
    }
}
