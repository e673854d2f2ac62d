//! [`Contract`]-related [`Database`] implementations.

use common::operations::{By, Insert, Lock, Select, Update};
use postgres_types::ToSql;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{contract, payment, reminder, renewal, Contract},
    infra::{
        database::{
            self,
            postgres::{Connection, LikePattern},
            Postgres,
        },
        Database,
    },
    read,
};

/// Columns of the `contracts` table, in the [`contract_from_row()`] order.
const COLUMNS: &str = "\
    id, number, \
    property_id, tenant_id, owner_id, \
    tenant_name, tenant_phone, property_address, \
    kind, status, \
    start_date, end_date, \
    monthly_rent, total_amount, deposit_amount, \
    commission_rate, currency, \
    notes, created_by, \
    created_at, updated_at";

/// Restores a [`Contract`] from the provided [`Row`].
fn contract_from_row(row: &Row) -> Contract {
    Contract {
        id: row.get("id"),
        number: row.get("number"),
        property_id: row.get("property_id"),
        tenant_id: row.get("tenant_id"),
        owner_id: row.get("owner_id"),
        tenant_name: row.get("tenant_name"),
        tenant_phone: row.get("tenant_phone"),
        property_address: row.get("property_address"),
        kind: row.get("kind"),
        status: row.get("status"),
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
        monthly_rent: row.get("monthly_rent"),
        total_amount: row.get("total_amount"),
        deposit_amount: row.get("deposit_amount"),
        commission_rate: row.get("commission_rate"),
        currency: row.get("currency"),
        notes: row.get("notes"),
        created_by: row.get("created_by"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl<C> Database<Insert<contract::New>> for Postgres<C>
where
    C: Connection,
{
    type Ok = contract::Id;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(new): Insert<contract::New>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            INSERT INTO contracts (\
                number, \
                property_id, tenant_id, owner_id, \
                tenant_name, tenant_phone, property_address, \
                kind, status, \
                start_date, end_date, \
                monthly_rent, total_amount, deposit_amount, \
                commission_rate, currency, \
                notes, created_by, \
                days_remaining, is_expiring, \
                created_at, updated_at\
            ) VALUES (\
                $1::VARCHAR, \
                $2::INT4, $3::INT4, $4::INT4, \
                $5::VARCHAR, $6::VARCHAR, $7::VARCHAR, \
                $8::INT2, $9::INT2, \
                $10::DATE, $11::DATE, \
                $12::NUMERIC, $13::NUMERIC, $14::NUMERIC, \
                $15::NUMERIC, $16::INT2, \
                $17::VARCHAR, $18::VARCHAR, \
                $19::INT4, $20::BOOLEAN, \
                $21::TIMESTAMPTZ, $21::TIMESTAMPTZ\
            ) \
            RETURNING id";
        self.query_opt(
            SQL,
            &[
                &new.number,
                &new.property_id,
                &new.tenant_id,
                &new.owner_id,
                &new.tenant_name,
                &new.tenant_phone,
                &new.property_address,
                &new.kind,
                &new.status,
                &new.start_date,
                &new.end_date,
                &new.monthly_rent,
                &new.total_amount,
                &new.deposit_amount,
                &new.commission_rate,
                &new.currency,
                &new.notes,
                &new.created_by,
                &new.days_remaining,
                &new.is_expiring,
                &new.created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(|row| row.expect("`RETURNING` always yields a row").get("id"))
    }
}

impl<C> Database<Update<Contract>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(contract): Update<Contract>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            UPDATE contracts \
            SET number = $2::VARCHAR, \
                property_id = $3::INT4, \
                tenant_id = $4::INT4, \
                owner_id = $5::INT4, \
                tenant_name = $6::VARCHAR, \
                tenant_phone = $7::VARCHAR, \
                property_address = $8::VARCHAR, \
                kind = $9::INT2, \
                status = $10::INT2, \
                start_date = $11::DATE, \
                end_date = $12::DATE, \
                monthly_rent = $13::NUMERIC, \
                total_amount = $14::NUMERIC, \
                deposit_amount = $15::NUMERIC, \
                commission_rate = $16::NUMERIC, \
                currency = $17::INT2, \
                notes = $18::VARCHAR, \
                updated_at = $19::TIMESTAMPTZ \
            WHERE id = $1::INT4";
        self.exec(
            SQL,
            &[
                &contract.id,
                &contract.number,
                &contract.property_id,
                &contract.tenant_id,
                &contract.owner_id,
                &contract.tenant_name,
                &contract.tenant_phone,
                &contract.property_address,
                &contract.kind,
                &contract.status,
                &contract.start_date,
                &contract.end_date,
                &contract.monthly_rent,
                &contract.total_amount,
                &contract.deposit_amount,
                &contract.commission_rate,
                &contract.currency,
                &contract.notes,
                &contract.updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Select<By<Option<Contract>, contract::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Contract>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Contract>, contract::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: contract::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM contracts \
             WHERE id = $1::INT4",
        );
        self.query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(contract_from_row))
    }
}

impl<'n, C> Database<Select<By<Option<Contract>, &'n contract::Number>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Contract>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Contract>, &'n contract::Number>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let number: &contract::Number = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM contracts \
             WHERE number = $1::VARCHAR",
        );
        self.query_opt(&sql, &[number])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(contract_from_row))
    }
}

impl<C> Database<Lock<By<Contract, contract::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Contract, contract::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: contract::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM contracts \
            WHERE id = $1::INT4 \
            FOR UPDATE";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<Vec<Contract>, read::contract::list::Selector>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Contract>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Contract>, read::contract::list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::contract::list::Selector { status, search } = by.into_inner();

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![];

        let status_clause = status.as_ref().map_or_else(String::new, |s| {
            ps.push(s);
            format!("AND status = ${}::INT2", ps.len())
        });
        let pattern = search.as_deref().map(LikePattern::new);
        let search_clause = pattern.as_ref().map_or_else(String::new, |p| {
            ps.push(p);
            let idx = ps.len();
            format!(
                "AND (LOWER(number) LIKE LOWER(${idx}::VARCHAR) \
                  OR LOWER(tenant_name) LIKE LOWER(${idx}::VARCHAR) \
                  OR LOWER(tenant_phone) LIKE LOWER(${idx}::VARCHAR) \
                  OR LOWER(property_address) LIKE LOWER(${idx}::VARCHAR))",
            )
        });

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM contracts \
             WHERE true \
                   {status_clause} \
                   {search_clause} \
             ORDER BY created_at DESC, id DESC",
        );
        self.query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())
            .map(|rows| rows.iter().map(contract_from_row).collect())
    }
}

impl<C> Database<Select<By<Vec<Contract>, contract::Phone>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Contract>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Contract>, contract::Phone>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let phone: contract::Phone = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM contracts \
             WHERE tenant_phone = $1::VARCHAR \
             ORDER BY created_at DESC, id DESC",
        );
        self.query(&sql, &[&phone])
            .await
            .map_err(tracerr::wrap!())
            .map(|rows| rows.iter().map(contract_from_row).collect())
    }
}

impl<C> Database<Select<By<read::contract::list::TotalCount, ()>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::contract::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<read::contract::list::TotalCount, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT COUNT(*)::INT4 \
            FROM contracts";
        self.query_opt(SQL, &[])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.expect("always exists").get::<_, i32>(0).into())
    }
}

impl<C> Database<Select<By<Option<read::contract::Tenant>, contract::Phone>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<read::contract::Tenant>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Option<read::contract::Tenant>, contract::Phone>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let phone: contract::Phone = by.into_inner();

        const SQL: &str = "\
            SELECT id, number, tenant_name, tenant_phone \
            FROM contracts \
            WHERE tenant_phone = $1::VARCHAR \
            ORDER BY created_at DESC, id DESC \
            LIMIT 1";
        self.query_opt(SQL, &[&phone])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| {
                row.map(|row| read::contract::Tenant {
                    contract_id: row.get("id"),
                    contract_number: row.get("number"),
                    name: row.get("tenant_name"),
                    phone: row.get("tenant_phone"),
                })
            })
    }
}

impl<C> Database<Select<By<Option<read::contract::Details>, contract::Id>>>
    for Postgres<C>
where
    C: Connection,
    Self: Database<
            Select<By<Option<Contract>, contract::Id>>,
            Ok = Option<Contract>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<payment::Entry>, contract::Id>>,
            Ok = Vec<payment::Entry>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<reminder::Event>, contract::Id>>,
            Ok = Vec<reminder::Event>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<renewal::Record>, contract::Id>>,
            Ok = Vec<renewal::Record>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Option<read::contract::Details>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<read::contract::Details>, contract::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let Some(contract) = self
            .execute(Select(By::<Option<Contract>, _>::new(id)))
            .await
            .map_err(tracerr::wrap!())?
        else {
            return Ok(None);
        };

        let payments = self
            .execute(Select(By::<Vec<payment::Entry>, _>::new(id)))
            .await
            .map_err(tracerr::wrap!())?;
        let reminders = self
            .execute(Select(By::<Vec<reminder::Event>, _>::new(id)))
            .await
            .map_err(tracerr::wrap!())?;
        let renewals = self
            .execute(Select(By::<Vec<renewal::Record>, _>::new(id)))
            .await
            .map_err(tracerr::wrap!())?;

        Ok(Some(read::contract::Details {
            contract,
            payments,
            reminders,
            renewals,
        }))
    }
}
