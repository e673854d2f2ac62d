//! HTTP API of [`payment::Entry`]s.

use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use common::Date;
use serde::Deserialize;
use service::{
    command,
    domain::{contract, payment},
    query, Command as _,
};

use crate::{define_error, error::AsError, Error};

/// Returns the payment schedule of a [`Contract`], by due [`Date`]
/// ascending.
///
/// # Errors
///
/// If the [`Service`] fails to execute the query.
///
/// [`Contract`]: service::domain::Contract
/// [`Service`]: crate::Service
pub async fn of_contract(
    Extension(service): Extension<crate::Service>,
    Path(id): Path<contract::Id>,
) -> Result<Json<Vec<payment::Entry>>, Error> {
    service
        .execute(query::payments::ForContract::by(id))
        .await
        .map_err(AsError::into_error)
        .map(Json)
}

/// Parameters of the overdue [`payment::Entry`]s listing.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OverdueParams {
    /// [`Date`] to check the due dates against. Today, if omitted.
    pub as_of: Option<Date>,
}

/// Lists [`payment::Entry`]s with a due [`Date`] already passed and no
/// payment recorded.
///
/// # Errors
///
/// If the [`Service`] fails to execute the query.
///
/// [`Service`]: crate::Service
pub async fn overdue(
    Extension(service): Extension<crate::Service>,
    Query(params): Query<OverdueParams>,
) -> Result<Json<Vec<payment::Entry>>, Error> {
    let as_of = params.as_of.unwrap_or_else(Date::today);

    service
        .execute(query::payments::Overdue::by(payment::Overdue(as_of)))
        .await
        .map_err(AsError::into_error)
        .map(Json)
}

/// [`payment::Entry`] recording request.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RecordRequest {
    /// [`Date`] the payment was made on. Today, if omitted.
    pub paid_on: Option<Date>,

    /// Method the payment was made with.
    pub method: Option<String>,

    /// External reference of the payment.
    pub reference: Option<String>,
}

/// Records a [`payment::Entry`] as paid.
///
/// # Errors
///
/// Possible error codes:
/// - `PAYMENT_NOT_EXISTS` - no `payment::Entry` with the provided ID exists.
pub async fn record(
    Extension(service): Extension<crate::Service>,
    Path(id): Path<payment::Id>,
    Json(req): Json<RecordRequest>,
) -> Result<Json<payment::Entry>, Error> {
    let RecordRequest {
        paid_on,
        method,
        reference,
    } = req;

    service
        .execute(command::RecordPayment {
            id,
            paid_on,
            method,
            reference,
        })
        .await
        .map_err(AsError::into_error)
        .map(Json)
}

impl AsError for command::record_payment::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "PAYMENT_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`payment::Entry` with the provided ID does not \
                             exist"]
                PaymentNotExists,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PaymentNotExists(_) => Some(Error::PaymentNotExists.into()),
        }
    }
}
