//! [`Command`] for recording a [`payment::Entry`] as paid.

use common::{
    operations::{By, Select, Update},
    Date,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::payment,
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for recording a [`payment::Entry`] as paid.
#[derive(Clone, Debug)]
pub struct RecordPayment {
    /// ID of the [`payment::Entry`] to record.
    pub id: payment::Id,

    /// [`Date`] the payment was made on. Defaults to today.
    pub paid_on: Option<Date>,

    /// Method the payment was made with.
    pub method: Option<String>,

    /// External reference of the payment.
    pub reference: Option<String>,
}

impl<Db> Command<RecordPayment> for Service<Db>
where
    Db: Database<
            Select<By<Option<payment::Entry>, payment::Id>>,
            Ok = Option<payment::Entry>,
            Err = Traced<database::Error>,
        > + Database<Update<payment::Entry>, Err = Traced<database::Error>>,
{
    type Ok = payment::Entry;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: RecordPayment,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RecordPayment {
            id,
            paid_on,
            method,
            reference,
        } = cmd;

        let mut entry = self
            .database()
            .execute(Select(By::<Option<payment::Entry>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PaymentNotExists(id))
            .map_err(tracerr::wrap!())?;

        entry.record(paid_on.unwrap_or_else(Date::today), method, reference);

        self.database()
            .execute(Update(entry.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(entry)
    }
}

/// Error of [`RecordPayment`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`payment::Entry`] with the provided ID does not exist.
    #[display("`payment::Entry(id: {_0})` does not exist")]
    PaymentNotExists(#[error(not(source))] payment::Id),
}
