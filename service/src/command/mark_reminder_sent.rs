//! [`Command`] for marking a [`reminder::Event`] as delivered.

use common::{
    operations::{By, Select, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::reminder,
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for marking a [`reminder::Event`] as delivered.
///
/// Idempotent: an already delivered [`reminder::Event`] keeps its original
/// delivery time.
#[derive(Clone, Copy, Debug)]
pub struct MarkReminderSent {
    /// ID of the [`reminder::Event`] to mark.
    pub id: reminder::Id,
}

impl<Db> Command<MarkReminderSent> for Service<Db>
where
    Db: Database<
            Select<By<Option<reminder::Event>, reminder::Id>>,
            Ok = Option<reminder::Event>,
            Err = Traced<database::Error>,
        > + Database<Update<reminder::Event>, Err = Traced<database::Error>>,
{
    type Ok = reminder::Event;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: MarkReminderSent,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let MarkReminderSent { id } = cmd;

        let mut event = self
            .database()
            .execute(Select(By::<Option<reminder::Event>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ReminderNotExists(id))
            .map_err(tracerr::wrap!())?;

        event.mark_sent(DateTime::now().coerce());

        self.database()
            .execute(Update(event.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(event)
    }
}

/// Error of [`MarkReminderSent`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`reminder::Event`] with the provided ID does not exist.
    #[display("`reminder::Event(id: {_0})` does not exist")]
    ReminderNotExists(#[error(not(source))] reminder::Id),
}
