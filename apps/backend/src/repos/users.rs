//! User directory: local user records keyed by email.

use sea_orm::ConnectionTrait;

use crate::adapters::users_sea as users_adapter;
use crate::errors::domain::DomainError;

/// User domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub name: String,
}

pub async fn find_user_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_by_email(conn, email).await?;
    Ok(user.map(User::from))
}

/// Insert a user. A duplicate email surfaces as
/// `DomainError::Conflict(ConflictKind::UniqueEmail, _)`.
pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
    name: &str,
) -> Result<User, DomainError> {
    let user = users_adapter::create_user(conn, users_adapter::UserCreate::new(email, name)).await?;
    Ok(User::from(user))
}

impl From<crate::entities::users::Model> for User {
    fn from(model: crate::entities::users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            name: model.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::db::DbKind;
    use crate::errors::domain::ConflictKind;
    use crate::infra::db::bootstrap_db;

    #[tokio::test]
    async fn create_then_find_by_email() {
        let conn = bootstrap_db(DbKind::SqliteMemory).await.unwrap();

        assert_eq!(find_user_by_email(&conn, "t@school.edu").await.unwrap(), None);

        let created = create_user(&conn, "t@school.edu", "Teacher T").await.unwrap();
        let found = find_user_by_email(&conn, "t@school.edu").await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn duplicate_email_is_unique_email_conflict() {
        let conn = bootstrap_db(DbKind::SqliteMemory).await.unwrap();
        create_user(&conn, "dup@school.edu", "").await.unwrap();

        let err = create_user(&conn, "dup@school.edu", "Other").await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Conflict(ConflictKind::UniqueEmail, _)
        ));
    }
}
