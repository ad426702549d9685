//! User Repository

use sqlx::SqliteExecutor;

use shared::models::{Department, User, UserCreate, UserStatus};
use shared::util::{now_millis, snowflake_id};

use super::{RepoError, RepoResult};

const COLUMNS: &str =
    "id, full_name, email, role, department, job_title, status, work_schedule, created_at";

pub async fn find_by_id(
    executor: impl SqliteExecutor<'_>,
    id: i64,
) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM user WHERE id = ?"))
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(user)
}

pub async fn find_all(executor: impl SqliteExecutor<'_>) -> RepoResult<Vec<User>> {
    let users =
        sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM user ORDER BY full_name"))
            .fetch_all(executor)
            .await?;
    Ok(users)
}

/// Head count of a department (contingency-cap denominator).
pub async fn count_in_department(
    executor: impl SqliteExecutor<'_>,
    department: Department,
) -> RepoResult<i64> {
    let count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM user WHERE department = ?")
            .bind(department)
            .fetch_one(executor)
            .await?;
    Ok(count)
}

pub async fn create(executor: impl SqliteExecutor<'_>, data: UserCreate) -> RepoResult<User> {
    let user = User {
        id: snowflake_id(),
        full_name: data.full_name,
        email: data.email,
        role: data.role,
        department: data.department,
        job_title: data.job_title,
        status: UserStatus::Active,
        work_schedule: data.work_schedule,
        created_at: now_millis(),
    };

    sqlx::query(
        "INSERT INTO user (id, full_name, email, role, department, job_title, status, work_schedule, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(user.id)
    .bind(&user.full_name)
    .bind(&user.email)
    .bind(user.role)
    .bind(user.department)
    .bind(user.job_title)
    .bind(user.status)
    .bind(user.work_schedule)
    .bind(user.created_at)
    .execute(executor)
    .await?;

    Ok(user)
}

/// Soft status mutation - users are never physically deleted.
pub async fn set_status(
    executor: impl SqliteExecutor<'_>,
    id: i64,
    status: UserStatus,
) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE user SET status = ? WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(executor)
        .await?
        .rows_affected();
    if rows == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::models::{JobTitle, UserRole, WorkScheduleType};

    fn sample(email: &str, department: Department) -> UserCreate {
        UserCreate {
            full_name: "Test User".into(),
            email: email.into(),
            role: UserRole::Employee,
            department,
            job_title: JobTitle::Developer,
            work_schedule: WorkScheduleType::Comercial,
        }
    }

    #[tokio::test]
    async fn create_and_fetch_round_trip() {
        let db = DbService::in_memory().await.unwrap();
        let created = create(&db.pool, sample("a@geo.com", Department::It))
            .await
            .unwrap();

        let fetched = find_by_id(&db.pool, created.id).await.unwrap().unwrap();
        assert_eq!(fetched.email, "a@geo.com");
        assert_eq!(fetched.status, UserStatus::Active);
        assert_eq!(fetched.department, Department::It);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let db = DbService::in_memory().await.unwrap();
        create(&db.pool, sample("dup@geo.com", Department::It))
            .await
            .unwrap();
        let err = create(&db.pool, sample("dup@geo.com", Department::Hr))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn department_head_count() {
        let db = DbService::in_memory().await.unwrap();
        for i in 0..3 {
            create(&db.pool, sample(&format!("it{i}@geo.com"), Department::It))
                .await
                .unwrap();
        }
        create(&db.pool, sample("hr0@geo.com", Department::Hr))
            .await
            .unwrap();

        assert_eq!(
            count_in_department(&db.pool, Department::It).await.unwrap(),
            3
        );
        assert_eq!(
            count_in_department(&db.pool, Department::Hr).await.unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn status_change_is_a_soft_mutation() {
        let db = DbService::in_memory().await.unwrap();
        let user = create(&db.pool, sample("v@geo.com", Department::Sales))
            .await
            .unwrap();

        set_status(&db.pool, user.id, UserStatus::OnVacation)
            .await
            .unwrap();
        let fetched = find_by_id(&db.pool, user.id).await.unwrap().unwrap();
        assert_eq!(fetched.status, UserStatus::OnVacation);

        let err = set_status(&db.pool, 404, UserStatus::Inactive)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
