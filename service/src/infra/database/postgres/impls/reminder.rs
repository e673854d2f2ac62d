//! [`reminder::Event`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{contract, reminder},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Columns of the `contract_reminders` table, in the [`event_from_row()`]
/// order.
const COLUMNS: &str = "\
    id, contract_id, \
    tier, reminder_date, message, phone, \
    sent, sent_at, \
    created_at";

/// Restores a [`reminder::Event`] from the provided [`Row`].
fn event_from_row(row: &Row) -> reminder::Event {
    reminder::Event {
        id: row.get("id"),
        contract_id: row.get("contract_id"),
        tier: row.get("tier"),
        reminder_date: row.get("reminder_date"),
        message: row.get("message"),
        phone: row.get("phone"),
        sent: row.get("sent"),
        sent_at: row.get("sent_at"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Insert<reminder::New>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(new): Insert<reminder::New>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            INSERT INTO contract_reminders (\
                contract_id, tier, reminder_date, message, phone, \
                sent, created_at\
            ) VALUES (\
                $1::INT4, $2::INT2, $3::DATE, $4::VARCHAR, $5::VARCHAR, \
                FALSE, NOW()\
            )";
        self.exec(
            SQL,
            &[
                &new.contract_id,
                &new.tier,
                &new.reminder_date,
                &new.message,
                &new.phone,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Update<reminder::Event>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(event): Update<reminder::Event>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            UPDATE contract_reminders \
            SET tier = $2::INT2, \
                reminder_date = $3::DATE, \
                message = $4::VARCHAR, \
                phone = $5::VARCHAR, \
                sent = $6::BOOLEAN, \
                sent_at = $7::TIMESTAMPTZ \
            WHERE id = $1::INT4";
        self.exec(
            SQL,
            &[
                &event.id,
                &event.tier,
                &event.reminder_date,
                &event.message,
                &event.phone,
                &event.sent,
                &event.sent_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Select<By<Option<reminder::Event>, reminder::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<reminder::Event>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<reminder::Event>, reminder::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: reminder::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM contract_reminders \
             WHERE id = $1::INT4",
        );
        self.query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(event_from_row))
    }
}

impl<C> Database<Select<By<Vec<reminder::Event>, contract::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<reminder::Event>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<reminder::Event>, contract::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let contract_id: contract::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM contract_reminders \
             WHERE contract_id = $1::INT4 \
             ORDER BY reminder_date ASC, id ASC",
        );
        self.query(&sql, &[&contract_id])
            .await
            .map_err(tracerr::wrap!())
            .map(|rows| rows.iter().map(event_from_row).collect())
    }
}

impl<C> Database<Select<By<Vec<reminder::Event>, reminder::Due>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<reminder::Event>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<reminder::Event>, reminder::Due>>,
    ) -> Result<Self::Ok, Self::Err> {
        let reminder::Due(today) = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM contract_reminders \
             WHERE sent = FALSE \
               AND reminder_date <= $1::DATE \
             ORDER BY reminder_date ASC, id ASC",
        );
        self.query(&sql, &[&today])
            .await
            .map_err(tracerr::wrap!())
            .map(|rows| rows.iter().map(event_from_row).collect())
    }
}
