use shared_types::{AppError, ImpactStats};
use sqlx::{Pool, Postgres};

use crate::error_convert::SqlxErrorExt;

/// Live counts for the home page tiles, read in one round trip.
pub async fn impact(pool: &Pool<Postgres>) -> Result<ImpactStats, AppError> {
    sqlx::query_as::<_, ImpactStats>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM issues WHERE status = 'resolved') AS issues_resolved,
            (SELECT COALESCE(SUM(quantity), 0)::BIGINT FROM donations WHERE direction = 'give')
                AS servings_donated,
            (SELECT COUNT(*) FROM volunteers) AS volunteers,
            (SELECT COUNT(*) FROM ngos) AS ngo_partners
        "#,
    )
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}
