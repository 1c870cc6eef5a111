use super::DbClient;
use crate::db::models::{Workout, WorkoutTypeSummary};
use crate::errors::ApiError;
use crate::Result;
use diesel::{expression_methods::ExpressionMethods, query_dsl::QueryDsl, sql_query};
use diesel_async::RunQueryDsl;
use tracing::{error, info};

pub const PER_PAGE: i64 = 20;

/// Converts a client-supplied 1-based page index into a row offset.
/// Clamps both ends so the multiplication cannot overflow on hostile input.
fn page_offset(page: i64) -> i64 {
    let page = page.clamp(1, i64::MAX / PER_PAGE);
    (page - 1) * PER_PAGE
}

/// DbClient helper functions for the workouts table
impl DbClient {
    /// Insert a logged workout
    pub async fn insert_workout(&self, payload: &Workout) -> Result<usize> {
        use crate::schema::workouts::dsl::*;

        let conn = &mut self.get_db_conn().await?;

        info!("Inserting workout for user: {}", payload.user_id);
        diesel::insert_into(workouts)
            .values(payload)
            .execute(conn)
            .await
            .map_err(|e| {
                error!("Failed to insert workout: {}", e);
                ApiError::Diesel(e)
            })
    }

    /// Retrieves a page of a user's workouts, newest first.
    ///
    /// Returns the page together with the user's total workout count.
    pub async fn get_workouts_page(&self, user: &str, page: i64) -> Result<(Vec<Workout>, i64)> {
        use crate::schema::workouts::dsl::*;

        let offset = page_offset(page);

        let conn = &mut self.get_db_conn().await?;

        let total = workouts
            .filter(user_id.eq(user))
            .count()
            .get_result::<i64>(conn)
            .await?;

        let page_rows = workouts
            .filter(user_id.eq(user))
            .order(performed_at.desc())
            .limit(PER_PAGE)
            .offset(offset)
            .load::<Workout>(conn)
            .await
            .map_err(|e| {
                error!("Failed to fetch workouts page: {}", e);
                ApiError::Diesel(e)
            })?;

        Ok((page_rows, total))
    }

    /// Aggregates a user's workouts per type with a single GROUP BY query
    pub async fn get_workout_type_summaries(&self, user: &str) -> Result<Vec<WorkoutTypeSummary>> {
        let conn = &mut self.get_db_conn().await?;

        let query = r#"
            SELECT workout_type,
                   COUNT(*) AS workout_count,
                   SUM(duration_minutes) AS duration_minutes,
                   SUM(calories_burned) AS calories_burned
            FROM workouts
            WHERE user_id = $1
            GROUP BY workout_type
            ORDER BY workout_type
        "#;

        use diesel::sql_types::{BigInt, Double, Nullable, Text};
        use diesel::QueryableByName;

        #[derive(QueryableByName)]
        struct TypeSummaryRow {
            #[diesel(sql_type = Text)]
            workout_type: String,
            #[diesel(sql_type = BigInt)]
            workout_count: i64,
            #[diesel(sql_type = Nullable<Double>)]
            duration_minutes: Option<f64>,
            #[diesel(sql_type = Nullable<Double>)]
            calories_burned: Option<f64>,
        }

        let rows = sql_query(query)
            .bind::<Text, _>(user)
            .get_results::<TypeSummaryRow>(conn)
            .await
            .map_err(|e| {
                error!("Failed to aggregate workouts: {}", e);
                ApiError::Diesel(e)
            })?;

        Ok(rows
            .into_iter()
            .map(|row| WorkoutTypeSummary {
                workout_type: row.workout_type,
                workouts: row.workout_count,
                duration_minutes: row.duration_minutes.unwrap_or_default(),
                calories_burned: row.calories_burned.unwrap_or_default(),
            })
            .collect())
    }

    /// Returns ids of users who logged a workout within the last 24 hours.
    /// The summary refresh job re-warms the cache for exactly these users.
    pub async fn get_recently_active_user_ids(&self) -> Result<Vec<String>> {
        let conn = &mut self.get_db_conn().await?;

        let query = r#"
            SELECT DISTINCT user_id
            FROM workouts
            WHERE created_at > NOW() - INTERVAL '24 hours'
            ORDER BY user_id
        "#;

        use diesel::sql_types::Text;
        use diesel::QueryableByName;

        #[derive(QueryableByName)]
        struct UserIdRow {
            #[diesel(sql_type = Text)]
            user_id: String,
        }

        let user_ids: Vec<String> = sql_query(query)
            .get_results::<UserIdRow>(conn)
            .await
            .map_err(|e| {
                error!("Failed to fetch recently active users: {}", e);
                e
            })?
            .into_iter()
            .map(|row| row.user_id)
            .collect();

        info!(
            "Retrieved {} recently active users for cache refresh",
            user_ids.len()
        );
        Ok(user_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::WorkoutParams;

    #[test]
    fn test_page_offset_bounds() {
        assert_eq!(page_offset(1), 0);
        assert_eq!(page_offset(3), 2 * PER_PAGE);
        // Below-range pages clamp to the first page
        assert_eq!(page_offset(0), 0);
        assert_eq!(page_offset(-5), 0);
        // Hostile page numbers must not overflow the offset math
        let offset = page_offset(i64::MAX);
        assert!(offset >= 0);
    }

    #[tokio::test]
    async fn test_workout_insert_and_page() {
        dotenv::dotenv().ok();
        let (Ok(db_url), Ok(redis_url)) = (
            std::env::var("TEST_DATABASE_URL"),
            std::env::var("TEST_REDIS_URL"),
        ) else {
            return;
        };
        let client = DbClient::new(&db_url, &redis_url);

        let user = format!("test-user-{}", uuid::Uuid::new_v4());
        let params = WorkoutParams {
            workout_type: "running".to_string(),
            duration_minutes: 30.0,
            calories_burned: 250.0,
            performed_at: None,
        };

        let workout = Workout::new(&user, &params);
        assert!(client.insert_workout(&workout).await.is_ok());

        let (page, total) = client.get_workouts_page(&user, 1).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id, workout.id);

        let summaries = client.get_workout_type_summaries(&user).await.unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].workout_type, "running");
        assert_eq!(summaries[0].workouts, 1);
    }
}
