use std::sync::Arc;

use anyhow::anyhow;
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::auth::{issue_admin_token, issue_user_token};
use crate::config::config_model::AdminCredentials;
use crate::config::stage::Stage;
use crate::domain::entities::users::InsertUserEntity;
use crate::domain::repositories::users::UserRepository;
use crate::domain::value_objects::iam::{AdminLoginModel, SendOtpModel, UserDto, VerifyOtpModel};
use crate::otp::{OtpCache, OtpStore};

#[derive(Debug, Error)]
pub enum LoginError {
    #[error("{0}")]
    Validation(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl LoginError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            LoginError::Validation(_) => StatusCode::BAD_REQUEST,
            LoginError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            LoginError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, LoginError>;

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OtpSentDto {
    pub message: String,
    /// Echoed only outside production; there is no SMS channel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum VerifyOtpOutcome {
    /// First-time phone; the client must resubmit with a name.
    RequiresName,
    LoggedIn { token: String, user: UserDto },
}

pub struct AuthUseCase<U, C>
where
    U: UserRepository + Send + Sync + 'static,
    C: OtpCache + 'static,
{
    user_repo: Arc<U>,
    otp_store: Arc<OtpStore<C>>,
    jwt_secret: String,
    admin: AdminCredentials,
    stage: Stage,
}

impl<U, C> AuthUseCase<U, C>
where
    U: UserRepository + Send + Sync + 'static,
    C: OtpCache + 'static,
{
    pub fn new(
        user_repo: Arc<U>,
        otp_store: Arc<OtpStore<C>>,
        jwt_secret: String,
        admin: AdminCredentials,
        stage: Stage,
    ) -> Self {
        Self {
            user_repo,
            otp_store,
            jwt_secret,
            admin,
            stage,
        }
    }

    pub async fn send_otp(&self, model: SendOtpModel) -> UseCaseResult<OtpSentDto> {
        let phone = normalize_phone(model.phone.as_deref()).ok_or_else(|| {
            LoginError::Validation("Valid 10-digit phone number is required".to_string())
        })?;

        let code = self.otp_store.generate();
        self.otp_store.store(&phone, &code);
        info!(phone, "auth: OTP generated");

        Ok(OtpSentDto {
            message: "OTP sent successfully".to_string(),
            otp: (!self.stage.is_production()).then_some(code),
        })
    }

    pub async fn verify_otp(&self, model: VerifyOtpModel) -> UseCaseResult<VerifyOtpOutcome> {
        let phone = normalize_phone(model.phone.as_deref()).ok_or_else(|| {
            LoginError::Validation("Valid 10-digit phone number is required".to_string())
        })?;
        let code = model
            .otp
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| LoginError::Validation("OTP is required".to_string()))?;

        let existing = self.user_repo.find_by_phone(&phone).await.map_err(|err| {
            error!(phone, db_error = ?err, "auth: failed to look up user by phone");
            LoginError::Internal(err)
        })?;

        let user = match existing {
            Some(user) => {
                self.otp_store
                    .verify(&phone, code, true)
                    .map_err(|err| LoginError::Validation(err.to_string()))?;
                user
            }
            None => {
                // Pre-check without consuming so a name-less first attempt
                // does not burn the code.
                self.otp_store
                    .verify(&phone, code, false)
                    .map_err(|err| LoginError::Validation(err.to_string()))?;

                let name = match model.name.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                    Some(name) => name.to_string(),
                    None => {
                        info!(phone, "auth: new phone, name required");
                        return Ok(VerifyOtpOutcome::RequiresName);
                    }
                };

                let user = self
                    .user_repo
                    .create(InsertUserEntity {
                        name,
                        phone: phone.clone(),
                    })
                    .await
                    .map_err(|err| {
                        error!(phone, db_error = ?err, "auth: failed to create user");
                        LoginError::Internal(err)
                    })?;

                self.otp_store
                    .verify(&phone, code, true)
                    .map_err(|err| LoginError::Validation(err.to_string()))?;
                user
            }
        };

        let token = issue_user_token(&self.jwt_secret, user.id, &user.phone)?;
        info!(user_id = %user.id, "auth: user logged in");

        Ok(VerifyOtpOutcome::LoggedIn {
            token,
            user: UserDto::from(user),
        })
    }

    pub async fn admin_login(&self, model: AdminLoginModel) -> UseCaseResult<String> {
        let (username, password) = match (
            model.username.as_deref().filter(|v| !v.is_empty()),
            model.password.as_deref().filter(|v| !v.is_empty()),
        ) {
            (Some(username), Some(password)) => (username, password),
            _ => {
                return Err(LoginError::Validation(
                    "Username and password are required".to_string(),
                ));
            }
        };

        if username != self.admin.username {
            warn!(username, "auth: admin login with unknown username");
            return Err(LoginError::InvalidCredentials);
        }

        let parsed = PasswordHash::new(&self.admin.password_hash)
            .map_err(|err| LoginError::Internal(anyhow!("bad admin password hash: {err}")))?;
        if Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_err()
        {
            warn!(username, "auth: admin login with wrong password");
            return Err(LoginError::InvalidCredentials);
        }

        let token = issue_admin_token(&self.jwt_secret, username)?;
        info!(username, "auth: admin logged in");
        Ok(token)
    }
}

/// Keeps only digits; accepts the number exactly 10 digits long.
fn normalize_phone(input: Option<&str>) -> Option<String> {
    let digits: String = input?
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    (digits.len() == 10).then_some(digits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{ROLE_ADMIN, ROLE_USER, validate_token};
    use crate::domain::entities::users::UserEntity;
    use crate::domain::repositories::users::MockUserRepository;
    use crate::otp::InMemoryOtpCache;
    use argon2::PasswordHasher;
    use argon2::password_hash::{SaltString, rand_core::OsRng};
    use chrono::Utc;
    use uuid::Uuid;

    const SECRET: &str = "test-secret";

    fn admin_credentials(password: &str) -> AdminCredentials {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .unwrap()
            .to_string();
        AdminCredentials {
            username: "admin".to_string(),
            password_hash: hash,
        }
    }

    fn usecase(
        user_repo: MockUserRepository,
        stage: Stage,
    ) -> (
        AuthUseCase<MockUserRepository, InMemoryOtpCache>,
        Arc<OtpStore<InMemoryOtpCache>>,
    ) {
        let store = Arc::new(OtpStore::new(InMemoryOtpCache::new()));
        let usecase = AuthUseCase::new(
            Arc::new(user_repo),
            Arc::clone(&store),
            SECRET.to_string(),
            admin_credentials("hunter2"),
            stage,
        );
        (usecase, store)
    }

    fn user(phone: &str) -> UserEntity {
        UserEntity {
            id: Uuid::new_v4(),
            name: "Asha".to_string(),
            phone: phone.to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_send_otp_rejects_short_phone() {
        let (usecase, _) = usecase(MockUserRepository::new(), Stage::Local);
        let err = usecase
            .send_otp(SendOtpModel {
                phone: Some("12345".to_string()),
            })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_send_otp_echoes_code_outside_production() {
        let (usecase, store) = usecase(MockUserRepository::new(), Stage::Local);
        let sent = usecase
            .send_otp(SendOtpModel {
                phone: Some("+91 98765-43210".to_string()),
            })
            .await
            .unwrap();

        let code = sent.otp.expect("code echoed in local stage");
        assert_eq!(code.len(), 6);
        assert!(store.verify("9876543210", &code, false).is_ok());
    }

    #[tokio::test]
    async fn test_send_otp_hides_code_in_production() {
        let (usecase, _) = usecase(MockUserRepository::new(), Stage::Production);
        let sent = usecase
            .send_otp(SendOtpModel {
                phone: Some("9876543210".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(sent.otp, None);
    }

    #[tokio::test]
    async fn test_verify_otp_existing_user_consumes_code() {
        let existing = user("9876543210");
        let mut user_repo = MockUserRepository::new();
        let found = existing.clone();
        user_repo
            .expect_find_by_phone()
            .returning(move |_| Ok(Some(found.clone())));

        let (usecase, store) = usecase(user_repo, Stage::Local);
        store.store("9876543210", "123456");

        let outcome = usecase
            .verify_otp(VerifyOtpModel {
                phone: Some("9876543210".to_string()),
                otp: Some("123456".to_string()),
                name: None,
            })
            .await
            .unwrap();

        match outcome {
            VerifyOtpOutcome::LoggedIn { token, user } => {
                assert_eq!(user.id, existing.id);
                let claims = validate_token(SECRET, &token).unwrap();
                assert_eq!(claims.role, ROLE_USER);
                assert_eq!(claims.sub, existing.id.to_string());
            }
            other => panic!("expected login, got {:?}", other),
        }
        // Consumed: replaying the same code fails.
        assert!(store.verify("9876543210", "123456", false).is_err());
    }

    #[tokio::test]
    async fn test_verify_otp_new_user_without_name_keeps_code() {
        let mut user_repo = MockUserRepository::new();
        user_repo.expect_find_by_phone().returning(|_| Ok(None));

        let (usecase, store) = usecase(user_repo, Stage::Local);
        store.store("9876543210", "123456");

        let outcome = usecase
            .verify_otp(VerifyOtpModel {
                phone: Some("9876543210".to_string()),
                otp: Some("123456".to_string()),
                name: None,
            })
            .await
            .unwrap();

        assert_eq!(outcome, VerifyOtpOutcome::RequiresName);
        assert!(store.verify("9876543210", "123456", false).is_ok());
    }

    #[tokio::test]
    async fn test_verify_otp_new_user_with_name_registers() {
        let mut user_repo = MockUserRepository::new();
        user_repo.expect_find_by_phone().returning(|_| Ok(None));
        user_repo.expect_create().returning(|insert| {
            Ok(UserEntity {
                id: Uuid::new_v4(),
                name: insert.name,
                phone: insert.phone,
                created_at: Utc::now(),
            })
        });

        let (usecase, store) = usecase(user_repo, Stage::Local);
        store.store("9876543210", "123456");

        let outcome = usecase
            .verify_otp(VerifyOtpModel {
                phone: Some("9876543210".to_string()),
                otp: Some("123456".to_string()),
                name: Some("  Ravi  ".to_string()),
            })
            .await
            .unwrap();

        match outcome {
            VerifyOtpOutcome::LoggedIn { user, .. } => assert_eq!(user.name, "Ravi"),
            other => panic!("expected login, got {:?}", other),
        }
        assert!(store.verify("9876543210", "123456", false).is_err());
    }

    #[tokio::test]
    async fn test_verify_otp_wrong_code() {
        let mut user_repo = MockUserRepository::new();
        user_repo.expect_find_by_phone().returning(|_| Ok(None));

        let (usecase, store) = usecase(user_repo, Stage::Local);
        store.store("9876543210", "123456");

        let err = usecase
            .verify_otp(VerifyOtpModel {
                phone: Some("9876543210".to_string()),
                otp: Some("000000".to_string()),
                name: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, LoginError::Validation(message) if message == "Invalid OTP"));
    }

    #[tokio::test]
    async fn test_admin_login_round_trip() {
        let (usecase, _) = usecase(MockUserRepository::new(), Stage::Local);
        let token = usecase
            .admin_login(AdminLoginModel {
                username: Some("admin".to_string()),
                password: Some("hunter2".to_string()),
            })
            .await
            .unwrap();

        let claims = validate_token(SECRET, &token).unwrap();
        assert_eq!(claims.role, ROLE_ADMIN);
        assert_eq!(claims.sub, "admin");
    }

    #[tokio::test]
    async fn test_admin_login_wrong_password() {
        let (usecase, _) = usecase(MockUserRepository::new(), Stage::Local);
        let err = usecase
            .admin_login(AdminLoginModel {
                username: Some("admin".to_string()),
                password: Some("wrong".to_string()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, LoginError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_admin_login_unknown_username() {
        let (usecase, _) = usecase(MockUserRepository::new(), Stage::Local);
        let err = usecase
            .admin_login(AdminLoginModel {
                username: Some("root".to_string()),
                password: Some("hunter2".to_string()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, LoginError::InvalidCredentials));
    }
}
