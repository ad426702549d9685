//! Location Repository (geofence zones)

use sqlx::SqliteExecutor;

use shared::models::{Location, LocationCreate};
use shared::util::{now_millis, snowflake_id};

use super::{RepoError, RepoResult};

const COLUMNS: &str =
    "id, user_id, name, location_type, latitude, longitude, radius_meters, created_at";

pub async fn find_all(executor: impl SqliteExecutor<'_>) -> RepoResult<Vec<Location>> {
    let zones =
        sqlx::query_as::<_, Location>(&format!("SELECT {COLUMNS} FROM location ORDER BY name"))
            .fetch_all(executor)
            .await?;
    Ok(zones)
}

/// Zones a user may punch from: company-wide plus their own.
pub async fn find_zones_for_user(
    executor: impl SqliteExecutor<'_>,
    user_id: i64,
) -> RepoResult<Vec<Location>> {
    let zones = sqlx::query_as::<_, Location>(&format!(
        "SELECT {COLUMNS} FROM location WHERE user_id IS NULL OR user_id = ?"
    ))
    .bind(user_id)
    .fetch_all(executor)
    .await?;
    Ok(zones)
}

/// Zones are immutable once created - no update or delete path.
pub async fn create(
    executor: impl SqliteExecutor<'_>,
    data: LocationCreate,
) -> RepoResult<Location> {
    if data.radius_meters <= 0 {
        return Err(RepoError::Validation(format!(
            "radius_meters must be positive, got {}",
            data.radius_meters
        )));
    }

    let zone = Location {
        id: snowflake_id(),
        user_id: data.user_id,
        name: data.name,
        location_type: data.location_type,
        latitude: data.latitude,
        longitude: data.longitude,
        radius_meters: data.radius_meters,
        created_at: now_millis(),
    };

    sqlx::query(
        "INSERT INTO location (id, user_id, name, location_type, latitude, longitude, radius_meters, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(zone.id)
    .bind(zone.user_id)
    .bind(&zone.name)
    .bind(zone.location_type)
    .bind(zone.latitude)
    .bind(zone.longitude)
    .bind(zone.radius_meters)
    .bind(zone.created_at)
    .execute(executor)
    .await?;

    Ok(zone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::models::LocationType;

    fn office(name: &str, user_id: Option<i64>) -> LocationCreate {
        LocationCreate {
            user_id,
            name: name.into(),
            location_type: LocationType::Office,
            latitude: -23.561_684,
            longitude: -46.655_981,
            radius_meters: 100,
        }
    }

    #[tokio::test]
    async fn company_wide_zones_are_visible_to_everyone() {
        let db = DbService::in_memory().await.unwrap();
        create(&db.pool, office("HQ", None)).await.unwrap();

        let zones = find_zones_for_user(&db.pool, 42).await.unwrap();
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].name, "HQ");
    }

    #[tokio::test]
    async fn user_zones_are_private_to_their_owner() {
        let db = DbService::in_memory().await.unwrap();

        sqlx::query(
            "INSERT INTO user (id, full_name, email, role, department, job_title, status, work_schedule, created_at)
             VALUES (1, 'A', 'a@geo.com', 'EMPLOYEE', 'IT', 'DEVELOPER', 'ACTIVE', 'COMERCIAL', 0),
                    (2, 'B', 'b@geo.com', 'EMPLOYEE', 'IT', 'DEVELOPER', 'ACTIVE', 'COMERCIAL', 0)",
        )
        .execute(&db.pool)
        .await
        .unwrap();

        create(&db.pool, office("Home A", Some(1))).await.unwrap();

        assert_eq!(find_zones_for_user(&db.pool, 1).await.unwrap().len(), 1);
        assert!(find_zones_for_user(&db.pool, 2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn zero_radius_is_rejected() {
        let db = DbService::in_memory().await.unwrap();
        let mut data = office("HQ", None);
        data.radius_meters = 0;
        let err = create(&db.pool, data).await.unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }
}
