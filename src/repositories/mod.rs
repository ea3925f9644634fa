//! Data access layer.
//!
//! Each repository owns a clone of the connection pool and exposes the
//! queries for one table (plus the join tables it is responsible for).
//! Repositories return raw [`sqlx::Error`]s; services decide how a failure
//! maps onto an HTTP status.
//!
//! - [`users::UserRepository`]: `users`, plus cascading deletes
//! - [`roles::RoleRepository`]: `roles` and `user_roles`
//! - [`courses::CourseRepository`]: `courses`
//! - [`user_courses::UserCourseRepository`]: `user_courses`

pub mod courses;
pub mod roles;
pub mod user_courses;
pub mod users;

use std::collections::HashMap;

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

pub use courses::CourseRepository;
pub use roles::RoleRepository;
pub use user_courses::UserCourseRepository;
pub use users::UserRepository;

/// All repositories, built once from a single pool.
#[derive(Clone, Debug)]
pub struct Repositories {
    pub users: UserRepository,
    pub roles: RoleRepository,
    pub courses: CourseRepository,
    pub user_courses: UserCourseRepository,
}

impl Repositories {
    pub fn new(db: SqlitePool) -> Self {
        Self {
            users: UserRepository::new(db.clone()),
            roles: RoleRepository::new(db.clone()),
            courses: CourseRepository::new(db.clone()),
            user_courses: UserCourseRepository::new(db),
        }
    }
}

/// Ids bound per `IN` list. Stays well under SQLite's bind-variable limit.
const IN_LIST_CHUNK: usize = 500;

/// Runs `sql ... IN (<ids>) <suffix>` and groups the `(key, value)` rows by key.
///
/// `sql` must select exactly two text columns and end right before the
/// opening parenthesis of the `IN` list. Ids are queried in chunks; every
/// row for a key comes from the same chunk, so `suffix` ordering holds per key.
pub(crate) async fn group_by_key(
    db: &SqlitePool,
    sql: &str,
    ids: &[String],
    suffix: &str,
) -> Result<HashMap<String, Vec<String>>, sqlx::Error> {
    let mut grouped: HashMap<String, Vec<String>> = HashMap::new();
    if ids.is_empty() {
        return Ok(grouped);
    }

    for chunk in ids.chunks(IN_LIST_CHUNK) {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(sql);
        builder.push(" (");
        let mut separated = builder.separated(", ");
        for id in chunk {
            separated.push_bind(id.clone());
        }
        separated.push_unseparated(") ");
        builder.push(suffix);

        let rows: Vec<(String, String)> = builder.build_query_as().fetch_all(db).await?;
        for (key, value) in rows {
            grouped.entry(key).or_default().push(value);
        }
    }

    Ok(grouped)
}
