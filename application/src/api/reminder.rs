//! HTTP API of [`reminder::Event`]s.

use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use common::Date;
use serde::Deserialize;
use service::{
    command, domain::reminder, query, Command as _,
};

use crate::{define_error, error::AsError, Error};

/// Parameters of the due [`reminder::Event`]s listing.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DueParams {
    /// [`Date`] to check the firing dates against. Today, if omitted.
    pub as_of: Option<Date>,
}

/// Lists undelivered [`reminder::Event`]s due to fire.
///
/// # Errors
///
/// If the [`Service`] fails to execute the query.
///
/// [`Service`]: crate::Service
pub async fn due(
    Extension(service): Extension<crate::Service>,
    Query(params): Query<DueParams>,
) -> Result<Json<Vec<reminder::Event>>, Error> {
    let as_of = params.as_of.unwrap_or_else(Date::today);

    service
        .execute(query::reminders::Due::by(reminder::Due(as_of)))
        .await
        .map_err(AsError::into_error)
        .map(Json)
}

/// Marks a [`reminder::Event`] as delivered.
///
/// # Errors
///
/// Possible error codes:
/// - `REMINDER_NOT_EXISTS` - no `reminder::Event` with the provided ID
///                           exists.
pub async fn mark_sent(
    Extension(service): Extension<crate::Service>,
    Path(id): Path<reminder::Id>,
) -> Result<Json<reminder::Event>, Error> {
    service
        .execute(command::MarkReminderSent { id })
        .await
        .map_err(AsError::into_error)
        .map(Json)
}

impl AsError for command::mark_reminder_sent::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "REMINDER_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`reminder::Event` with the provided ID does not \
                             exist"]
                ReminderNotExists,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ReminderNotExists(_) => {
                Some(Error::ReminderNotExists.into())
            }
        }
    }
}
