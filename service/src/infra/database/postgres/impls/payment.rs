//! [`payment::Entry`]-related [`Database`] implementations.

use common::operations::{By, Insert, Perform, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{contract, payment},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Columns of the `contract_payments` table, in the [`entry_from_row()`]
/// order.
const COLUMNS: &str = "\
    id, contract_id, \
    amount, due_date, payment_date, \
    kind, status, \
    method, reference, notes, \
    created_at";

/// Restores a [`payment::Entry`] from the provided [`Row`].
fn entry_from_row(row: &Row) -> payment::Entry {
    payment::Entry {
        id: row.get("id"),
        contract_id: row.get("contract_id"),
        amount: row.get("amount"),
        due_date: row.get("due_date"),
        payment_date: row.get("payment_date"),
        kind: row.get("kind"),
        status: row.get("status"),
        method: row.get("method"),
        reference: row.get("reference"),
        notes: row.get("notes"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Insert<payment::New>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(new): Insert<payment::New>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            INSERT INTO contract_payments (\
                contract_id, amount, due_date, kind, status, \
                notes, created_at\
            ) VALUES (\
                $1::INT4, $2::NUMERIC, $3::DATE, $4::INT2, $5::INT2, \
                '', NOW()\
            )";
        self.exec(
            SQL,
            &[
                &new.contract_id,
                &new.amount,
                &new.due_date,
                &new.kind,
                &new.status,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Update<payment::Entry>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(entry): Update<payment::Entry>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            UPDATE contract_payments \
            SET amount = $2::NUMERIC, \
                due_date = $3::DATE, \
                payment_date = $4::DATE, \
                kind = $5::INT2, \
                status = $6::INT2, \
                method = $7::VARCHAR, \
                reference = $8::VARCHAR, \
                notes = $9::VARCHAR \
            WHERE id = $1::INT4";
        self.exec(
            SQL,
            &[
                &entry.id,
                &entry.amount,
                &entry.due_date,
                &entry.payment_date,
                &entry.kind,
                &entry.status,
                &entry.method,
                &entry.reference,
                &entry.notes,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Select<By<Option<payment::Entry>, payment::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<payment::Entry>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<payment::Entry>, payment::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: payment::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM contract_payments \
             WHERE id = $1::INT4",
        );
        self.query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(entry_from_row))
    }
}

impl<C> Database<Select<By<Vec<payment::Entry>, contract::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<payment::Entry>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<payment::Entry>, contract::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let contract_id: contract::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM contract_payments \
             WHERE contract_id = $1::INT4 \
             ORDER BY due_date ASC, id ASC",
        );
        self.query(&sql, &[&contract_id])
            .await
            .map_err(tracerr::wrap!())
            .map(|rows| rows.iter().map(entry_from_row).collect())
    }
}

impl<C> Database<Select<By<Vec<payment::Entry>, payment::Overdue>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<payment::Entry>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<payment::Entry>, payment::Overdue>>,
    ) -> Result<Self::Ok, Self::Err> {
        let payment::Overdue(today) = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM contract_payments \
             WHERE status = $1::INT2 \
               AND due_date < $2::DATE \
             ORDER BY due_date ASC, id ASC",
        );
        self.query(&sql, &[&payment::Status::Pending, &today])
            .await
            .map_err(tracerr::wrap!())
            .map(|rows| rows.iter().map(entry_from_row).collect())
    }
}

impl<C> Database<Perform<payment::MarkOverdue>> for Postgres<C>
where
    C: Connection,
{
    type Ok = u64;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Perform(op): Perform<payment::MarkOverdue>,
    ) -> Result<Self::Ok, Self::Err> {
        let payment::MarkOverdue(today) = op;

        const SQL: &str = "\
            UPDATE contract_payments \
            SET status = $1::INT2 \
            WHERE status = $2::INT2 \
              AND due_date < $3::DATE";
        self.exec(
            SQL,
            &[
                &payment::Status::Overdue,
                &payment::Status::Pending,
                &today,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
    }
}
