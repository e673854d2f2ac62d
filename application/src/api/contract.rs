//! HTTP API of [`Contract`]s.

use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use common::Date;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use service::{
    command,
    domain::{contract, payment, reminder, renewal, Contract},
    query, read, Command as _,
};

use crate::{define_error, error::AsError, Error};

/// [`Contract`] with its term-derived fields recomputed against today.
#[derive(Debug, Serialize)]
pub struct View {
    /// The [`Contract`] itself.
    #[serde(flatten)]
    pub contract: Contract,

    /// Days until the term end. Negative once expired.
    pub days_remaining: i64,

    /// Whether the term ends within 30 days.
    pub is_expiring: bool,
}

impl From<Contract> for View {
    fn from(contract: Contract) -> Self {
        let today = Date::today();
        Self {
            days_remaining: contract.days_remaining(today),
            is_expiring: contract.is_expiring(today),
            contract,
        }
    }
}

/// Successful [`Contract`] creation response.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct CreateResponse {
    /// ID of the created [`Contract`].
    pub id: contract::Id,
}

/// Creates a new [`Contract`] along with its payment schedule and expiry
/// reminders.
///
/// # Errors
///
/// Possible error codes:
/// - `INVALID_CONTRACT` - provided input is incomplete or malformed;
/// - `DUPLICATE_CONTRACT_NUMBER` - provided number is occupied by another
///                                 `Contract`.
pub async fn create(
    Extension(service): Extension<crate::Service>,
    Json(candidate): Json<contract::Candidate>,
) -> Result<(StatusCode, Json<CreateResponse>), Error> {
    service
        .execute(command::CreateContract { candidate })
        .await
        .map_err(AsError::into_error)
        .map(|id| (StatusCode::CREATED, Json(CreateResponse { id })))
}

/// Filtering parameters of the [`Contract`]s listing.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListParams {
    /// Keep only [`Contract`]s with this [`contract::Status`].
    pub status: Option<contract::Status>,

    /// Case-insensitive substring over numbers, tenant names, tenant phones
    /// and property addresses.
    pub search: Option<String>,
}

/// [`Contract`]s listing response.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    /// Matched [`Contract`]s, latest first.
    pub contracts: Vec<View>,

    /// Total count of [`Contract`]s, ignoring the filters.
    pub total: read::contract::list::TotalCount,
}

/// Lists [`Contract`]s, optionally filtered by status and a search
/// substring.
///
/// # Errors
///
/// If the [`Service`] fails to execute the query.
///
/// [`Service`]: crate::Service
pub async fn list(
    Extension(service): Extension<crate::Service>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>, Error> {
    let ListParams { status, search } = params;

    let contracts = service
        .execute(query::contracts::List::by(
            read::contract::list::Selector { status, search },
        ))
        .await
        .map_err(AsError::into_error)?;
    let total = service
        .execute(query::contracts::TotalCount::by(()))
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(ListResponse {
        contracts: contracts.into_iter().map(Into::into).collect(),
        total,
    }))
}

/// [`Contract`] details response.
#[derive(Debug, Serialize)]
pub struct DetailsResponse {
    /// The [`Contract`] itself.
    #[serde(flatten)]
    pub contract: View,

    /// Payment schedule of the [`Contract`], by due date ascending.
    pub payments: Vec<payment::Entry>,

    /// Expiry reminders of the [`Contract`].
    pub reminders: Vec<reminder::Event>,

    /// Renewal history of the [`Contract`], latest first.
    pub renewals: Vec<renewal::Record>,
}

/// Returns a single [`Contract`] along with its payment, reminder and
/// renewal history.
///
/// # Errors
///
/// Possible error codes:
/// - `CONTRACT_NOT_EXISTS` - no `Contract` with the provided ID exists.
pub async fn details(
    Extension(service): Extension<crate::Service>,
    Path(id): Path<contract::Id>,
) -> Result<Json<DetailsResponse>, Error> {
    define_error! {
        enum NotFound {
            #[code = "CONTRACT_NOT_EXISTS"]
            #[status = NOT_FOUND]
            #[message = "`Contract` with the provided ID does not exist"]
            ContractNotExists,
        }
    }

    let read::contract::Details {
        contract,
        payments,
        reminders,
        renewals,
    } = service
        .execute(query::contract::Details::by(id))
        .await
        .map_err(AsError::into_error)?
        .ok_or(NotFound::ContractNotExists)?;

    Ok(Json(DetailsResponse {
        contract: contract.into(),
        payments,
        reminders,
        renewals,
    }))
}

/// [`Contract`] status update request.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// [`contract::Status`] to switch the [`Contract`] to.
    pub status: contract::Status,

    /// Note to append to the [`Contract`]'s notes along with the switch.
    #[serde(default)]
    pub note: String,
}

/// Switches the [`Contract`]'s status, appending a timestamped line to its
/// notes.
///
/// # Errors
///
/// Possible error codes:
/// - `CONTRACT_NOT_EXISTS` - no `Contract` with the provided ID exists.
pub async fn update_status(
    Extension(service): Extension<crate::Service>,
    Path(id): Path<contract::Id>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<View>, Error> {
    let UpdateStatusRequest { status, note } = req;

    service
        .execute(command::UpdateContractStatus { id, status, note })
        .await
        .map_err(AsError::into_error)
        .map(|contract| Json(contract.into()))
}

/// Lists [`Contract`]s mentioning the provided tenant phone, latest first.
///
/// # Errors
///
/// If the [`Service`] fails to execute the query.
///
/// [`Service`]: crate::Service
pub async fn list_by_phone(
    Extension(service): Extension<crate::Service>,
    Path(phone): Path<contract::Phone>,
) -> Result<Json<Vec<View>>, Error> {
    service
        .execute(query::contracts::ByPhone::by(phone))
        .await
        .map_err(AsError::into_error)
        .map(|contracts| {
            Json(contracts.into_iter().map(Into::into).collect())
        })
}

/// Returns tenant information resolved from the latest [`Contract`]
/// mentioning the provided phone.
///
/// # Errors
///
/// Possible error codes:
/// - `TENANT_NOT_EXISTS` - no `Contract` mentions the provided phone.
pub async fn tenant_by_phone(
    Extension(service): Extension<crate::Service>,
    Path(phone): Path<contract::Phone>,
) -> Result<Json<read::contract::Tenant>, Error> {
    define_error! {
        enum NotFound {
            #[code = "TENANT_NOT_EXISTS"]
            #[status = NOT_FOUND]
            #[message = "No `Contract` mentions the provided phone"]
            TenantNotExists,
        }
    }

    service
        .execute(query::contract::TenantByPhone::by(phone))
        .await
        .map_err(AsError::into_error)?
        .ok_or(NotFound::TenantNotExists)
        .map(Json)
        .map_err(Into::into)
}

impl AsError for command::create_contract::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "DUPLICATE_CONTRACT_NUMBER"]
                #[status = CONFLICT]
                #[message = "`Contract` with the provided number already \
                             exists"]
                DuplicateNumber,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::InvalidCandidate(e) => Some(crate::Error {
                code: "INVALID_CONTRACT",
                status_code: StatusCode::BAD_REQUEST,
                message: e.to_string(),
                backtrace: None,
            }),
            Self::DuplicateNumber(_) => Some(Error::DuplicateNumber.into()),
        }
    }
}

impl AsError for command::update_contract_status::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "CONTRACT_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Contract` with the provided ID does not exist"]
                ContractNotExists,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ContractNotExists(_) => {
                Some(Error::ContractNotExists.into())
            }
        }
    }
}
