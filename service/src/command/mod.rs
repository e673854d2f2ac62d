//! [`Command`] definition.

pub mod create_contract;
pub mod mark_reminder_sent;
pub mod record_payment;
pub mod update_contract_status;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_contract::CreateContract, mark_reminder_sent::MarkReminderSent,
    record_payment::RecordPayment,
    update_contract_status::UpdateContractStatus,
};
