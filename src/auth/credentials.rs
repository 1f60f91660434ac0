use std::sync::OnceLock;

use sqlx::PgPool;

use crate::auth::password::{hash_password, verify_password};
use crate::db;
use crate::models::user::User;

/// Where the auth layer looks users up.
#[allow(async_fn_in_trait)]
pub trait UserDirectory {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error>;
}

impl UserDirectory for PgPool {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        db::users::find_by_username(self, username).await
    }
}

/// Hash checked against when the username is unknown, so both failure paths
/// pay for one bcrypt verification.
fn dummy_hash() -> &'static str {
    static DUMMY_HASH: OnceLock<String> = OnceLock::new();
    DUMMY_HASH.get_or_init(|| hash_password("footballiq-dummy-password").unwrap_or_default())
}

/// Returns the user only when the password matches. An unknown username and
/// a wrong password both yield `None`.
#[tracing::instrument(name = "Authenticate user", skip(directory, password))]
pub async fn authenticate_user<D: UserDirectory>(
    directory: &D,
    username: &str,
    password: &str,
) -> Result<Option<User>, sqlx::Error> {
    match directory.find_by_username(username).await? {
        Some(user) if verify_password(password, &user.hashed_password) => Ok(Some(user)),
        Some(_) => {
            tracing::info!("Invalid credentials");
            Ok(None)
        }
        None => {
            verify_password(password, dummy_hash());
            tracing::info!("Invalid credentials");
            Ok(None)
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;

    use chrono::Utc;

    /// In-memory directory for exercising the auth layer without Postgres.
    #[derive(Default)]
    pub(crate) struct MemoryDirectory {
        users: HashMap<String, User>,
    }

    impl MemoryDirectory {
        pub(crate) fn with_user(mut self, username: &str, password: &str, is_admin: bool) -> Self {
            let id = self.users.len() as i64 + 1;
            self.users.insert(
                username.to_string(),
                User {
                    id,
                    username: username.to_string(),
                    email: format!("{}@example.com", username),
                    hashed_password: hash_password(password).unwrap(),
                    is_admin,
                    created_at: Utc::now(),
                },
            );
            self
        }
    }

    impl UserDirectory for MemoryDirectory {
        async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
            Ok(self.users.get(username).cloned())
        }
    }

    #[tokio::test]
    async fn authenticates_with_correct_password() {
        let directory = MemoryDirectory::default().with_user("alice", "password123", false);
        let user = authenticate_user(&directory, "alice", "password123").await.unwrap();
        assert_eq!(user.map(|u| u.username), Some("alice".to_string()));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_look_the_same() {
        let directory = MemoryDirectory::default().with_user("alice", "password123", false);
        let wrong_password = authenticate_user(&directory, "alice", "nope").await.unwrap();
        let unknown_user = authenticate_user(&directory, "bob", "password123").await.unwrap();
        assert!(wrong_password.is_none());
        assert!(unknown_user.is_none());
    }
}
