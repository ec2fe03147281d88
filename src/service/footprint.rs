//! Footprint Service
//!
//! Repository over the product footprint aggregate. Creation writes the
//! parent row and its owned carbon footprint document in one transaction;
//! deletion relies on the cascade so the child can never outlive the parent.

use sqlx::types::Json;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::models::footprint::{ProductFootprint, ProductFootprintRow};
use crate::utils::error::AppError;

/// Errors of the footprint service
#[derive(Error, Debug)]
pub enum FootprintServiceError {
    /// A footprint with the same id already exists
    #[error("A product footprint with this id already exists")]
    IdAlreadyExists,

    /// A stored record failed to map back into the wire model
    #[error("Corrupt footprint record: {0}")]
    Corrupt(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<FootprintServiceError> for AppError {
    fn from(err: FootprintServiceError) -> Self {
        match err {
            FootprintServiceError::IdAlreadyExists => AppError::DuplicateEntry(
                "A product footprint with this id already exists".to_string(),
            ),
            FootprintServiceError::Corrupt(detail) => AppError::Internal(detail),
            FootprintServiceError::Database(e) => AppError::Database(e),
        }
    }
}

/// Result type for footprint service operations
pub type FootprintServiceResult<T> = Result<T, FootprintServiceError>;

const SELECT_FOOTPRINT: &str = r#"
SELECT pf.id, pf.spec_version, pf.preceding_pf_ids, pf.version, pf.created,
       pf.updated, pf.status, pf.status_comment, pf.validity_period_start,
       pf.validity_period_end, pf.company_name, pf.company_ids,
       pf.product_description, pf.product_ids, pf.product_category_cpc,
       pf.product_name_company, pf.comment, pf.extensions, cf.data AS pcf
FROM product_footprints pf
JOIN carbon_footprints cf ON cf.product_footprint_id = pf.id
"#;

/// Repository for the product footprint aggregate.
#[derive(Clone)]
pub struct FootprintService {
    pool: PgPool,
}

impl FootprintService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist the aggregate as a single logical unit.
    pub async fn create(&self, footprint: &ProductFootprint) -> FootprintServiceResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO product_footprints
                (id, spec_version, preceding_pf_ids, version, created, updated,
                 status, status_comment, validity_period_start, validity_period_end,
                 company_name, company_ids, product_description, product_ids,
                 product_category_cpc, product_name_company, comment, extensions)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                    $15, $16, $17, $18)
            "#,
        )
        .bind(footprint.id)
        .bind(&footprint.spec_version)
        .bind(&footprint.preceding_pf_ids)
        .bind(footprint.version)
        .bind(footprint.created)
        .bind(footprint.updated)
        .bind(footprint.status.as_str())
        .bind(&footprint.status_comment)
        .bind(footprint.validity_period_start)
        .bind(footprint.validity_period_end)
        .bind(&footprint.company_name)
        .bind(&footprint.company_ids)
        .bind(&footprint.product_description)
        .bind(&footprint.product_ids)
        .bind(&footprint.product_category_cpc)
        .bind(&footprint.product_name_company)
        .bind(&footprint.comment)
        .bind(footprint.extensions.as_ref().map(Json))
        .execute(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                FootprintServiceError::IdAlreadyExists
            }
            _ => FootprintServiceError::Database(e),
        })?;

        sqlx::query(
            "INSERT INTO carbon_footprints (product_footprint_id, data) VALUES ($1, $2)",
        )
        .bind(footprint.id)
        .bind(Json(&footprint.pcf))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        log::info!("stored product footprint {}", footprint.id);
        Ok(())
    }

    /// Fetch one aggregate by id.
    pub async fn get_by_id(&self, id: Uuid) -> FootprintServiceResult<Option<ProductFootprint>> {
        let row = sqlx::query_as::<_, ProductFootprintRow>(
            &format!("{} WHERE pf.id = $1", SELECT_FOOTPRINT),
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| ProductFootprint::try_from(r).map_err(FootprintServiceError::Corrupt))
            .transpose()
    }

    /// Fetch every aggregate. Order is not part of the contract.
    pub async fn list(&self) -> FootprintServiceResult<Vec<ProductFootprint>> {
        let rows = sqlx::query_as::<_, ProductFootprintRow>(SELECT_FOOTPRINT)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|r| ProductFootprint::try_from(r).map_err(FootprintServiceError::Corrupt))
            .collect()
    }

    /// Total row count irrespective of any pagination window.
    pub async fn count(&self) -> FootprintServiceResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM product_footprints")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Delete an aggregate; the owned carbon footprint row goes with it.
    pub async fn delete(&self, id: Uuid) -> FootprintServiceResult<bool> {
        let result = sqlx::query("DELETE FROM product_footprints WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::footprint::sample_footprint;
    use sqlx::PgPool;

    #[sqlx::test]
    async fn test_create_and_get_round_trip(pool: PgPool) {
        let service = FootprintService::new(pool);
        let footprint = sample_footprint(Uuid::new_v4());

        service.create(&footprint).await.unwrap();

        let stored = service.get_by_id(footprint.id).await.unwrap().unwrap();
        assert_eq!(stored, footprint);
    }

    #[sqlx::test]
    async fn test_get_unknown_id_is_none(pool: PgPool) {
        let service = FootprintService::new(pool);
        let missing = service.get_by_id(Uuid::new_v4()).await.unwrap();
        assert!(missing.is_none());
    }

    #[sqlx::test]
    async fn test_duplicate_id_rejected(pool: PgPool) {
        let service = FootprintService::new(pool);
        let footprint = sample_footprint(Uuid::new_v4());

        service.create(&footprint).await.unwrap();

        let err = service.create(&footprint).await.unwrap_err();
        assert!(matches!(err, FootprintServiceError::IdAlreadyExists));
    }

    #[sqlx::test]
    async fn test_list_and_count(pool: PgPool) {
        let service = FootprintService::new(pool);
        assert_eq!(service.count().await.unwrap(), 0);
        assert!(service.list().await.unwrap().is_empty());

        for _ in 0..3 {
            service
                .create(&sample_footprint(Uuid::new_v4()))
                .await
                .unwrap();
        }

        assert_eq!(service.count().await.unwrap(), 3);
        assert_eq!(service.list().await.unwrap().len(), 3);
    }

    #[sqlx::test]
    async fn test_delete_cascades_to_carbon_footprint(pool: PgPool) {
        let service = FootprintService::new(pool.clone());
        let footprint = sample_footprint(Uuid::new_v4());
        service.create(&footprint).await.unwrap();

        let children =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM carbon_footprints")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(children, 1);

        assert!(service.delete(footprint.id).await.unwrap());

        let children =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM carbon_footprints")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(children, 0);

        // Deleting again reports nothing removed.
        assert!(!service.delete(footprint.id).await.unwrap());
    }
}
