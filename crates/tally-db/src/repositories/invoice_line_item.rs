//! PostgreSQL implementation of InvoiceLineItemRepository

use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};
use tracing::{info, instrument};

use tally_core::entities::{InvoiceLineItem, NewInvoiceLineItem};
use tally_core::error::DomainError;
use tally_core::traits::{InvoiceLineItemRepository, RepoResult};
use tally_core::value_objects::{BillStatus, ClientId};

use crate::models::InvoiceLineItemModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of InvoiceLineItemRepository
#[derive(Clone)]
pub struct PgInvoiceLineItemRepository {
    pool: PgPool,
}

impl PgInvoiceLineItemRepository {
    /// Create a new PgInvoiceLineItemRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvoiceLineItemRepository for PgInvoiceLineItemRepository {
    #[instrument(skip(self, items), fields(count = items.len()))]
    async fn bill_entries(
        &self,
        items: &[NewInvoiceLineItem],
    ) -> RepoResult<Vec<InvoiceLineItem>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let entry_ids: Vec<i64> = items
            .iter()
            .map(|item| item.timesheet_entry_id.into_inner())
            .collect();

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Only unbilled rows flip; anything else rolls the whole batch back
        let billed = sqlx::query(
            r"
            UPDATE timesheet_entries
            SET bill_status = $2, updated_at = NOW()
            WHERE id = ANY($1) AND bill_status = $3
            ",
        )
        .bind(&entry_ids)
        .bind(BillStatus::Billed.as_i16())
        .bind(BillStatus::Unbilled.as_i16())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if billed.rows_affected() != entry_ids.len() as u64 {
            return Err(DomainError::AlreadyBilled);
        }

        let mut qb = QueryBuilder::new(
            "INSERT INTO invoice_line_items \
             (timesheet_entry_id, client_id, name, description, date, rate, quantity) ",
        );
        qb.push_values(items, |mut row, item| {
            row.push_bind(item.timesheet_entry_id.into_inner())
                .push_bind(item.client_id.into_inner())
                .push_bind(item.name.clone())
                .push_bind(item.description.clone())
                .push_bind(item.date)
                .push_bind(item.rate)
                .push_bind(item.quantity);
        });
        qb.push(
            " RETURNING id, timesheet_entry_id, client_id, name, description, date, rate, \
             quantity, created_at",
        );

        let models = qb
            .build_query_as::<InvoiceLineItemModel>()
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| map_unique_violation(e, |_| DomainError::AlreadyBilled))?;

        tx.commit().await.map_err(map_db_error)?;

        info!(count = models.len(), "Timesheet entries billed");
        Ok(models.into_iter().map(InvoiceLineItem::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_client(&self, client_id: ClientId) -> RepoResult<Vec<InvoiceLineItem>> {
        let results = sqlx::query_as::<_, InvoiceLineItemModel>(
            r"
            SELECT id, timesheet_entry_id, client_id, name, description, date, rate, quantity,
                   created_at
            FROM invoice_line_items
            WHERE client_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(client_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(InvoiceLineItem::from).collect())
    }
}
