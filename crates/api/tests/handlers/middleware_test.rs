use argon2::PasswordVerifier;
use axum::response::IntoResponse;
use uuid::Uuid;

use medisync_api::middleware::{
    auth::{self, AuthUser},
    error_handling::AppError,
};
use medisync_core::{errors::ClinicError, models::user::Role};

use crate::test_utils::TEST_JWT_SECRET;

#[tokio::test]
async fn test_error_handling_not_found() {
    let error = ClinicError::NotFound("Resource not found".to_string());

    let response = AppError(error).into_response();

    assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_error_handling_validation() {
    let error = ClinicError::Validation("Invalid input".to_string());

    let response = AppError(error).into_response();

    assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_handling_authentication() {
    let error = ClinicError::Authentication("Invalid credentials".to_string());

    let response = AppError(error).into_response();

    assert_eq!(response.status(), axum::http::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_error_handling_authorization() {
    let error = ClinicError::Authorization("Not authorized".to_string());

    let response = AppError(error).into_response();

    assert_eq!(response.status(), axum::http::StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_error_handling_conflict() {
    // A lost booking race is a 409, never a generic server error
    let error = ClinicError::Conflict("Slot is no longer available".to_string());

    let response = AppError(error).into_response();

    assert_eq!(response.status(), axum::http::StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_error_handling_transient() {
    let error = ClinicError::Transient("pool timed out".to_string());

    let response = AppError(error).into_response();

    assert_eq!(response.status(), axum::http::StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_error_handling_database() {
    let error = ClinicError::Database(eyre::eyre!("Database error"));

    let response = AppError(error).into_response();

    assert_eq!(
        response.status(),
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_error_handling_internal() {
    let error = ClinicError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    )));

    let response = AppError(error).into_response();

    assert_eq!(
        response.status(),
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_hash_password() {
    let password = "test_password";
    let hashed = auth::hash_password(password).unwrap();

    // Verify the hash is different from the original password
    assert_ne!(hashed, password);

    // Verify the hash starts with the argon2 prefix
    assert!(hashed.starts_with("$argon2"));
}

#[tokio::test]
async fn test_verify_password_round_trip() {
    let password = "test_password";
    let hashed = auth::hash_password(password).unwrap();

    assert!(auth::verify_password(&hashed, password).unwrap());
    assert!(!auth::verify_password(&hashed, "wrong_password").unwrap());

    // The stored hash also verifies through argon2 directly
    let argon2 = argon2::Argon2::default();
    let parsed_hash = argon2::PasswordHash::new(&hashed).unwrap();
    assert!(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok());
}

#[tokio::test]
async fn test_token_round_trip() {
    let user_id = Uuid::new_v4();

    let token = auth::issue_token(TEST_JWT_SECRET, user_id, Role::Patient, 60).unwrap();
    let claims = auth::decode_token(TEST_JWT_SECRET, &token).unwrap();

    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.role, Role::Patient);
    assert!(claims.exp > claims.iat);
}

#[tokio::test]
async fn test_token_rejects_wrong_secret() {
    let user_id = Uuid::new_v4();

    let token = auth::issue_token(TEST_JWT_SECRET, user_id, Role::Doctor, 60).unwrap();
    let result = auth::decode_token("another-secret", &token);

    match result.unwrap_err() {
        ClinicError::Authentication(_) => {} // Expected
        e => panic!("Expected Authentication error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_token_rejects_tampering() {
    let user_id = Uuid::new_v4();

    let token = auth::issue_token(TEST_JWT_SECRET, user_id, Role::Patient, 60).unwrap();
    let mut tampered = token.clone();
    tampered.pop();

    let result = auth::decode_token(TEST_JWT_SECRET, &tampered);
    assert!(result.is_err());
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let user_id = Uuid::new_v4();

    // Issue a token that expired two hours ago
    let token = auth::issue_token(TEST_JWT_SECRET, user_id, Role::Patient, -120).unwrap();
    let result = auth::decode_token(TEST_JWT_SECRET, &token);

    match result.unwrap_err() {
        ClinicError::Authentication(_) => {} // Expected
        e => panic!("Expected Authentication error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_require_role_accepts_match() {
    let auth_user = AuthUser {
        user_id: Uuid::new_v4(),
        role: Role::Doctor,
    };

    assert!(auth_user.require(Role::Doctor).is_ok());
}

#[tokio::test]
async fn test_require_role_rejects_mismatch() {
    let auth_user = AuthUser {
        user_id: Uuid::new_v4(),
        role: Role::Patient,
    };

    match auth_user.require(Role::Doctor).unwrap_err() {
        ClinicError::Authorization(_) => {} // Expected
        e => panic!("Expected Authorization error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_require_any_covers_report_roles() {
    let admin = AuthUser {
        user_id: Uuid::new_v4(),
        role: Role::Admin,
    };
    let doctor = AuthUser {
        user_id: Uuid::new_v4(),
        role: Role::Doctor,
    };
    let patient = AuthUser {
        user_id: Uuid::new_v4(),
        role: Role::Patient,
    };

    assert!(admin.require_any(&[Role::Admin, Role::Doctor]).is_ok());
    assert!(doctor.require_any(&[Role::Admin, Role::Doctor]).is_ok());
    assert!(patient.require_any(&[Role::Admin, Role::Doctor]).is_err());
}
