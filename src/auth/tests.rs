use super::*;
use jsonwebtoken::{EncodingKey, Header, encode};

const SECRET: &str = "supersecretjwtsecretforunittesting123";

#[test]
fn test_user_token_round_trip() {
    let user_id = Uuid::new_v4();
    let token = issue_user_token(SECRET, user_id, "9876543210").unwrap();

    let claims = validate_token(SECRET, &token).expect("Valid token should pass");
    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.phone.as_deref(), Some("9876543210"));
    assert_eq!(claims.role, ROLE_USER);
}

#[test]
fn test_admin_token_round_trip() {
    let token = issue_admin_token(SECRET, "storeadmin").unwrap();

    let claims = validate_token(SECRET, &token).expect("Valid token should pass");
    assert_eq!(claims.sub, "storeadmin");
    assert_eq!(claims.role, ROLE_ADMIN);
    assert!(claims.phone.is_none());
}

#[test]
fn test_validate_token_expired() {
    let my_claims = Claims {
        sub: Uuid::new_v4().to_string(),
        phone: Some("9876543210".to_string()),
        role: ROLE_USER.to_string(),
        exp: 1, // past
    };

    let token = encode(
        &Header::default(),
        &my_claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    assert!(validate_token(SECRET, &token).is_err());
}

#[test]
fn test_validate_token_wrong_secret() {
    let token = issue_user_token("wrongsecret", Uuid::new_v4(), "9876543210").unwrap();

    assert!(validate_token(SECRET, &token).is_err());
}

#[tokio::test]
async fn test_extractors_enforce_roles() {
    unsafe { std::env::set_var("JWT_SECRET", SECRET) };

    let token = issue_user_token(SECRET, Uuid::new_v4(), "9876543210").unwrap();
    let request = axum::http::Request::builder()
        .header(axum::http::header::AUTHORIZATION, format!("Bearer {token}"))
        .body(())
        .unwrap();
    let (mut parts, _) = request.into_parts();

    assert!(AuthUser::from_request_parts(&mut parts, &()).await.is_ok());

    let rejection = AuthAdmin::from_request_parts(&mut parts, &())
        .await
        .expect_err("user token must not grant admin access");
    assert_eq!(rejection.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_extractor_rejects_missing_bearer() {
    let request = axum::http::Request::builder().body(()).unwrap();
    let (mut parts, _) = request.into_parts();

    let rejection = AuthUser::from_request_parts(&mut parts, &())
        .await
        .expect_err("missing header must be rejected");
    assert_eq!(rejection.status, StatusCode::UNAUTHORIZED);
}
