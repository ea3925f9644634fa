//! Administrative operations behind the `usermanager-cli` binary.

use anyhow::{Context, bail};
use sqlx::SqlitePool;
use usermanager_core::hash_password;

use crate::modules::roles::model::{ADMIN_ROLE, DEFAULT_ROLE, Role};
use crate::modules::users::model::{NewUser, User};
use crate::repositories::Repositories;

/// Makes sure the built-in roles exist. Returns them in creation order.
pub async fn seed_roles(db: &SqlitePool) -> anyhow::Result<Vec<Role>> {
    let repos = Repositories::new(db.clone());
    let mut roles = Vec::new();
    for name in [ADMIN_ROLE, DEFAULT_ROLE] {
        let role = repos
            .roles
            .ensure(name)
            .await
            .with_context(|| format!("Failed to seed role {}", name))?;
        roles.push(role);
    }
    Ok(roles)
}

/// Creates a user holding the admin role.
///
/// Fails when the email or username is already registered.
pub async fn create_admin(
    db: &SqlitePool,
    username: &str,
    email: &str,
    password: &str,
    age: i64,
) -> anyhow::Result<User> {
    let repos = Repositories::new(db.clone());

    if repos.users.find_by_email(email).await?.is_some() {
        bail!("User with this email already exists");
    }
    if repos.users.find_by_username(username).await?.is_some() {
        bail!("User with this username already exists");
    }

    let password_hash =
        hash_password(password).map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e.error))?;

    let roles = seed_roles(db).await?;
    let admin_role = roles
        .iter()
        .find(|role| role.name.eq_ignore_ascii_case(ADMIN_ROLE))
        .context("Admin role missing after seeding")?;

    let user = repos
        .users
        .insert(&NewUser {
            username: username.to_string(),
            email: email.to_string(),
            age,
            password_hash,
        })
        .await
        .context("Failed to insert admin user")?;

    repos
        .roles
        .add_member(&user.id, &admin_role.id)
        .await
        .context("Failed to assign admin role")?;

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "./migrations")]
    async fn test_seed_roles_is_idempotent(pool: SqlitePool) {
        seed_roles(&pool).await.unwrap();
        let roles = seed_roles(&pool).await.unwrap();

        assert_eq!(roles.len(), 2);
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM roles")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 2);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_admin_holds_admin_role(pool: SqlitePool) {
        let user = create_admin(&pool, "root", "root@x.com", "secret", 40)
            .await
            .unwrap();

        let repos = Repositories::new(pool.clone());
        let roles = repos.roles.names_for_user(&user.id).await.unwrap();
        assert_eq!(roles, vec![ADMIN_ROLE.to_string()]);

        let again = create_admin(&pool, "root2", "root@x.com", "secret", 40).await;
        assert!(again.is_err());
    }
}
