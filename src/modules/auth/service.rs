use anyhow::Context;
use tracing::{instrument, warn};
use usermanager_auth::create_access_token;
use usermanager_config::JwtConfig;
use usermanager_core::{AppError, FieldError, hash_password, verify_password};
use usermanager_db::is_unique_violation;

use crate::metrics::{track_user_login_failure, track_user_login_success, track_user_registered};
use crate::modules::roles::model::DEFAULT_ROLE;
use crate::modules::users::model::{NewUser, UserSummary};
use crate::repositories::Repositories;
use crate::utils::email::EmailService;

use super::model::{LoginDto, LoginResponse, RegisterUserDto};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Clone, Debug)]
pub struct AuthService {
    repos: Repositories,
    jwt_config: JwtConfig,
    email: EmailService,
}

impl AuthService {
    pub fn new(repos: Repositories, jwt_config: JwtConfig, email: EmailService) -> Self {
        Self {
            repos,
            jwt_config,
            email,
        }
    }

    /// Creates an account. Email and username clashes are reported as field
    /// errors, both at once when both clash.
    #[instrument(skip(self, dto), fields(email = %dto.email, username = %dto.username))]
    pub async fn register(&self, dto: RegisterUserDto) -> Result<UserSummary, AppError> {
        let mut clashes = Vec::new();

        let email_taken = self
            .repos
            .users
            .find_by_email(&dto.email)
            .await
            .context("Failed to check email")
            .map_err(AppError::database)?
            .is_some();
        if email_taken {
            clashes.push(FieldError::new("email", "Email is already registered"));
        }

        let username_taken = self
            .repos
            .users
            .find_by_username(&dto.username)
            .await
            .context("Failed to check username")
            .map_err(AppError::database)?
            .is_some();
        if username_taken {
            clashes.push(FieldError::new("username", "Username is already taken"));
        }

        if !clashes.is_empty() {
            return Err(AppError::validation(clashes));
        }

        let password_hash = hash_password(&dto.password)?;

        self.repos
            .roles
            .ensure(DEFAULT_ROLE)
            .await
            .context("Failed to ensure default role")
            .map_err(AppError::database)?;

        let new_user = NewUser {
            username: dto.username,
            email: dto.email,
            age: dto.age.unwrap_or_default(),
            password_hash,
        };

        let user = self.repos.users.insert(&new_user).await.map_err(|e| {
            if is_unique_violation(&e) {
                AppError::field("email", "Email or username is already registered")
            } else {
                AppError::database(anyhow::Error::new(e).context("Failed to insert user"))
            }
        })?;

        track_user_registered();

        if self.email.is_enabled() {
            let email = self.email.clone();
            let to = user.email.clone();
            let username = user.username.clone();
            tokio::spawn(async move {
                if let Err(e) = email.send_welcome_email(&to, &username).await {
                    warn!(error = %e.error, to = %to, "Failed to send welcome email");
                }
            });
        }

        Ok(UserSummary::from(&user))
    }

    /// Verifies credentials and issues an access token carrying the user's
    /// current role names.
    #[instrument(skip(self, dto), fields(email = %dto.email))]
    pub async fn login(&self, dto: LoginDto) -> Result<LoginResponse, AppError> {
        let user = self
            .repos
            .users
            .find_by_email(&dto.email)
            .await
            .context("Failed to fetch user")
            .map_err(AppError::database)?;

        let Some(user) = user else {
            track_user_login_failure("unknown_email");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        if !verify_password(&dto.password, &user.password_hash)? {
            track_user_login_failure("wrong_password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let roles = self
            .repos
            .roles
            .names_for_user(&user.id)
            .await
            .context("Failed to fetch user roles")
            .map_err(AppError::database)?;

        let access_token = create_access_token(
            &user.id,
            &user.email,
            &user.username,
            roles.clone(),
            &self.jwt_config,
        )?;

        track_user_login_success();

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt_config.access_token_expiry,
            user: UserSummary::from(&user),
            roles,
        })
    }
}
