//! [`MarkOverduePayments`] [`Task`].

use std::{convert::Infallible, error::Error, time};

use common::{
    operations::{By, Perform, Start},
    Date,
};
use tokio::time::interval;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::payment,
    infra::{database, Database},
    Service,
};

use super::Task;

/// Configuration for [`MarkOverduePayments`] [`Task`].
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Interval between overdue sweeps.
    pub interval: time::Duration,
}

/// [`Task`] switching [`payment::Entry`]s past their due [`Date`] to
/// [`payment::Status::Overdue`].
#[derive(Clone, Copy, Debug)]
pub struct MarkOverduePayments<S> {
    /// [`Config`] of this [`Task`].
    config: Config,

    /// [`Service`] instance.
    service: S,
}

impl<Db> Task<Start<By<MarkOverduePayments<Self>, Config>>> for Service<Db>
where
    MarkOverduePayments<Service<Db>>:
        Task<Perform<()>, Ok = u64, Err: Error> + Send + Sync + 'static,
    Self: Clone,
{
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        Start(by): Start<By<MarkOverduePayments<Self>, Config>>,
    ) -> Result<Self::Ok, Self::Err> {
        let config = by.into_inner();
        let task = MarkOverduePayments {
            config,
            service: self.clone(),
        };

        let mut interval = interval(task.config.interval);
        loop {
            let _ = interval.tick().await;
            _ = task
                .execute(Perform(()))
                .await
                .map(|count| {
                    if count > 0 {
                        log::info!("marked {count} payments as overdue");
                    }
                })
                .map_err(|e| {
                    log::error!("`task::MarkOverduePayments` failed: {e}");
                });
        }
    }
}

impl<Db> Task<Perform<()>> for MarkOverduePayments<Service<Db>>
where
    Db: Database<
        Perform<payment::MarkOverdue>,
        Ok = u64,
        Err = Traced<database::Error>,
    >,
{
    type Ok = u64;
    type Err = ExecutionError;

    async fn execute(&self, _: Perform<()>) -> Result<Self::Ok, Self::Err> {
        self.service
            .database()
            .execute(Perform(payment::MarkOverdue(Date::today())))
            .await
            .map_err(tracerr::map_from_and_wrap!())
    }
}

/// Error of [`MarkOverduePayments`] execution.
pub type ExecutionError = Traced<database::Error>;
