//! Background [`Task`]s definitions.

mod background;
pub mod mark_overdue_payments;

pub use common::Handler as Task;

pub use self::{
    background::Background, mark_overdue_payments::MarkOverduePayments,
};
