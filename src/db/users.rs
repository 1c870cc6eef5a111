use super::DbClient;
use crate::db::models::User;
use crate::errors::ApiError;
use crate::Result;
use diesel::{
    expression_methods::{BoolExpressionMethods, ExpressionMethods},
    OptionalExtension, QueryDsl,
};
use diesel_async::RunQueryDsl;
use tracing::{error, info};

/// DbClient helper functions for the users table
impl DbClient {
    /// Insert a newly registered user
    pub async fn insert_user(&self, user: &User) -> Result<usize> {
        use crate::schema::users::dsl::*;

        let conn = &mut self.get_db_conn().await?;

        info!("Inserting user: {}", user.username);
        diesel::insert_into(users)
            .values(user)
            .execute(conn)
            .await
            .map_err(|e| {
                error!("Failed to insert user: {}", e);
                ApiError::Diesel(e)
            })
    }

    /// Fetch a user by username
    pub async fn get_user_by_username(&self, name: &str) -> Result<User> {
        use crate::schema::users::dsl::*;

        let conn = &mut self.get_db_conn().await?;
        users
            .filter(username.eq(name))
            .first::<User>(conn)
            .await
            .map_err(Into::into)
    }

    /// Returns the conflicting user, if any, for a username/email pair.
    /// Used to give registration a precise 400 instead of a constraint error.
    pub async fn find_registration_conflict(
        &self,
        name: &str,
        mail: &str,
    ) -> Result<Option<User>> {
        use crate::schema::users::dsl::*;

        let conn = &mut self.get_db_conn().await?;
        users
            .filter(username.eq(name).or(email.eq(mail)))
            .first::<User>(conn)
            .await
            .optional()
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::RegisterUserParams;

    #[tokio::test]
    async fn test_user_insert_and_lookup() {
        dotenv::dotenv().ok();
        let (Ok(db_url), Ok(redis_url)) = (
            std::env::var("TEST_DATABASE_URL"),
            std::env::var("TEST_REDIS_URL"),
        ) else {
            return;
        };
        let client = DbClient::new(&db_url, &redis_url);

        let params = RegisterUserParams {
            username: format!("test_user_{}", uuid::Uuid::new_v4().simple()),
            email: format!("{}@example.com", uuid::Uuid::new_v4().simple()),
            password: "password123".to_string(),
        };
        let user = User::new(&params, "hashed".to_string());

        assert!(client.insert_user(&user).await.is_ok());

        let fetched = client.get_user_by_username(&user.username).await.unwrap();
        assert_eq!(fetched.id, user.id);

        let conflict = client
            .find_registration_conflict(&user.username, "other@example.com")
            .await
            .unwrap();
        assert!(conflict.is_some());
    }
}
