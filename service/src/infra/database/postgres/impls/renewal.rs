//! [`renewal::Record`]-related [`Database`] implementations.

use common::operations::{By, Select};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{contract, renewal},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Restores a [`renewal::Record`] from the provided [`Row`].
fn record_from_row(row: &Row) -> renewal::Record {
    renewal::Record {
        id: row.get("id"),
        contract_id: row.get("contract_id"),
        old_end_date: row.get("old_end_date"),
        new_end_date: row.get("new_end_date"),
        old_rent: row.get("old_rent"),
        new_rent: row.get("new_rent"),
        renewed_at: row.get("renewed_at"),
        notes: row.get("notes"),
        created_by: row.get("created_by"),
    }
}

impl<C> Database<Select<By<Vec<renewal::Record>, contract::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<renewal::Record>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<renewal::Record>, contract::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let contract_id: contract::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, contract_id, \
                   old_end_date, new_end_date, \
                   old_rent, new_rent, \
                   renewed_at, notes, created_by \
            FROM contract_renewals \
            WHERE contract_id = $1::INT4 \
            ORDER BY renewed_at DESC, id DESC";
        self.query(SQL, &[&contract_id])
            .await
            .map_err(tracerr::wrap!())
            .map(|rows| rows.iter().map(record_from_row).collect())
    }
}
