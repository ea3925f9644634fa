use sqlx::SqlitePool;
use usermanager_config::{CorsConfig, DatabaseConfig, EmailConfig, JwtConfig};
use usermanager_db::init_db_pool;

use crate::modules::auth::service::AuthService;
use crate::modules::courses::service::CourseService;
use crate::modules::roles::service::RoleService;
use crate::modules::users::service::UserService;
use crate::repositories::Repositories;
use crate::utils::email::EmailService;

/// Everything a handler can reach. Built once at startup and cloned per
/// request; every field is either immutable config or a cheap pool handle.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: SqlitePool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub auth: AuthService,
    pub users: UserService,
    pub roles: RoleService,
    pub courses: CourseService,
}

impl AppState {
    pub fn new(
        db: SqlitePool,
        jwt_config: JwtConfig,
        email_config: EmailConfig,
        cors_config: CorsConfig,
    ) -> Self {
        let repos = Repositories::new(db.clone());

        Self {
            auth: AuthService::new(
                repos.clone(),
                jwt_config.clone(),
                EmailService::new(email_config),
            ),
            users: UserService::new(repos.clone()),
            roles: RoleService::new(repos.roles.clone()),
            courses: CourseService::new(repos.courses, repos.user_courses),
            db,
            jwt_config,
            cors_config,
        }
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let db = init_db_pool(&DatabaseConfig::from_env()).await?;

    Ok(AppState::new(
        db,
        JwtConfig::from_env(),
        EmailConfig::from_env(),
        CorsConfig::from_env(),
    ))
}
