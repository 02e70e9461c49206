//! Integration tests for the bearer authentication middleware

use std::sync::Arc;

use actix_web::http::header;
use actix_web::{test, web, App, HttpResponse};

use signet_api::middleware::{AuthContext, BearerAuth, OptionalAuth};
use signet_core::domain::entities::token::Claim;
use signet_core::services::token::{TokenService, TokenServiceConfig};

fn test_service() -> Arc<TokenService> {
    let config = TokenServiceConfig {
        secret: "middleware-test-secret".to_string(),
        ..Default::default()
    };
    Arc::new(TokenService::new(config).expect("failed to create token service"))
}

async fn whoami(auth: AuthContext) -> HttpResponse {
    let sub = auth.principal.find("sub").unwrap_or("").to_string();
    HttpResponse::Ok().body(sub)
}

#[actix_web::test]
async fn test_middleware_accepts_valid_token() {
    let service = test_service();
    let app = test::init_service(
        App::new()
            .wrap(BearerAuth::new(Arc::clone(&service)))
            .route("/whoami", web::get().to(whoami)),
    )
    .await;

    let token = service
        .generate_access_token(&[Claim::new("sub", "user-42")])
        .unwrap();

    let req = test::TestRequest::get()
        .uri("/whoami")
        .insert_header((
            header::AUTHORIZATION,
            format!("Bearer {}", token.encoded()),
        ))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    assert_eq!(test::read_body(resp).await, "user-42");
}

#[actix_web::test]
async fn test_middleware_requires_auth_header() {
    let app = test::init_service(
        App::new()
            .wrap(BearerAuth::new(test_service()))
            .route("/whoami", web::get().to(whoami)),
    )
    .await;

    let req = test::TestRequest::get().uri("/whoami").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    assert_eq!(
        resp.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
}

#[actix_web::test]
async fn test_middleware_rejects_invalid_token() {
    let app = test::init_service(
        App::new()
            .wrap(BearerAuth::new(test_service()))
            .route("/whoami", web::get().to(whoami)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/whoami")
        .insert_header((header::AUTHORIZATION, "Bearer not-a-real-token"))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    assert_eq!(
        resp.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
}

#[actix_web::test]
async fn test_middleware_rejects_token_from_other_secret() {
    let service = test_service();
    let other = Arc::new(
        TokenService::new(TokenServiceConfig {
            secret: "some-other-secret".to_string(),
            ..Default::default()
        })
        .unwrap(),
    );

    let app = test::init_service(
        App::new()
            .wrap(BearerAuth::new(service))
            .route("/whoami", web::get().to(whoami)),
    )
    .await;

    let token = other
        .generate_access_token(&[Claim::new("sub", "user-42")])
        .unwrap();

    let req = test::TestRequest::get()
        .uri("/whoami")
        .insert_header((
            header::AUTHORIZATION,
            format!("Bearer {}", token.encoded()),
        ))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    assert_eq!(
        resp.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
}

#[actix_web::test]
async fn test_optional_auth_without_middleware() {
    async fn maybe(auth: OptionalAuth) -> HttpResponse {
        match auth.0 {
            Some(ctx) => HttpResponse::Ok().body(ctx.principal.find("sub").unwrap_or("").to_string()),
            None => HttpResponse::Ok().body("anonymous"),
        }
    }

    let app = test::init_service(App::new().route("/maybe", web::get().to(maybe))).await;

    let req = test::TestRequest::get().uri("/maybe").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(test::read_body(resp).await, "anonymous");
}
