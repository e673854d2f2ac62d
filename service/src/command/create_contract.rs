//! [`Command`] for creating a new [`Contract`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use rust_decimal::Decimal;
use tracerr::Traced;

use crate::{
    domain::{
        contract::{self, candidate, Candidate},
        payment, reminder, Contract,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Contract`] along with its payment
/// schedule and expiry reminders.
#[derive(Clone, Debug)]
pub struct CreateContract {
    /// Raw input of the [`Contract`] to create.
    pub candidate: Candidate,
}

impl<Db> Command<CreateContract> for Service<Db>
where
    Db: for<'n> Database<
            Select<By<Option<Contract>, &'n contract::Number>>,
            Ok = Option<Contract>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Insert<contract::New>,
            Ok = contract::Id,
            Err = Traced<database::Error>,
        > + Database<Insert<payment::New>, Err = Traced<database::Error>>
        + Database<Insert<reminder::New>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = contract::Id;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateContract,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateContract { candidate } = cmd;

        let number = candidate
            .required()
            .map_err(tracerr::from_and_wrap!(=> E))?;

        let existing = self
            .database()
            .execute(Select(By::<Option<Contract>, _>::new(&number)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if existing.is_some() {
            return Err(tracerr::new!(E::DuplicateNumber(number)));
        }

        let valid = candidate
            .validate()
            .map_err(tracerr::from_and_wrap!(=> E))?;

        let at: contract::CreationDateTime = DateTime::now().coerce();
        let today = at.date();
        let schedule = (valid.kind == contract::Kind::Rental)
            .then_some(valid.monthly_rent)
            .flatten()
            .filter(|rent| *rent > Decimal::ZERO)
            .map(|rent| {
                payment::generate_schedule(
                    valid.start_date,
                    valid.end_date,
                    rent,
                )
            })
            .unwrap_or_default();
        let reminders = reminder::plan(valid.end_date, today);
        let phone = valid.tenant_phone.clone();

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let id = match tx
            .execute(Insert(contract::New::from_candidate(valid, at)))
            .await
        {
            Ok(id) => id,
            // The pre-check above races with concurrent creations, so the
            // store constraint stays authoritative.
            Err(e)
                if e.as_ref().is_unique_violation(Some(
                    database::CONTRACT_NUMBER_CONSTRAINT,
                )) =>
            {
                return Err(tracerr::new!(E::DuplicateNumber(number)));
            }
            Err(e) => {
                return Err(e).map_err(tracerr::map_from_and_wrap!(=> E));
            }
        };

        for draft in schedule {
            tx.execute(Insert(payment::New::rent(id, draft)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
        }
        for draft in reminders {
            tx.execute(Insert(reminder::New::from_draft(
                id,
                phone.clone(),
                draft,
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        }

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(id)
    }
}

/// Error of [`CreateContract`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Provided [`Candidate`] is invalid.
    #[display("Invalid `Contract` input: {_0}")]
    #[from]
    InvalidCandidate(candidate::Error),

    /// [`contract::Number`] is already occupied.
    #[display("`Contract` with `{_0}` number already exists")]
    DuplicateNumber(#[error(not(source))] contract::Number),
}

#[cfg(test)]
mod spec {
    use std::{
        sync::{Arc, Mutex},
        time::Duration,
    };

    use common::{
        operations::{By, Commit, Insert, Select, Transact},
        DateTime,
    };
    use tracerr::Traced;

    use crate::{
        domain::{
            contract::{self, Candidate},
            payment, reminder, Contract,
        },
        infra::{database, Database},
        task, Config, Service,
    };

    use super::{CreateContract, ExecutionError};

    /// In-memory store recording every operation issued against it.
    #[derive(Clone, Debug, Default)]
    struct Store {
        /// [`Contract`] returned by the uniqueness pre-check.
        existing: Option<Contract>,

        /// Makes [`contract::New`] insertion fail with a unique violation of
        /// [`database::CONTRACT_NUMBER_CONSTRAINT`], as if a concurrent
        /// creation won the race after the pre-check passed.
        conflict_on_contract_insert: bool,

        /// Makes [`payment::New`] insertion fail.
        fail_payment_inserts: bool,

        issued: Arc<Mutex<Issued>>,
    }

    #[derive(Debug, Default)]
    struct Issued {
        contracts: Vec<contract::New>,
        payments: Vec<payment::New>,
        reminders: Vec<reminder::New>,
        committed: bool,
    }

    impl<'n> Database<Select<By<Option<Contract>, &'n contract::Number>>>
        for Store
    {
        type Ok = Option<Contract>;
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            op: Select<By<Option<Contract>, &'n contract::Number>>,
        ) -> Result<Self::Ok, Self::Err> {
            let number = op.0.into_inner();
            Ok(self.existing.clone().filter(|c| c.number == *number))
        }
    }

    impl Database<Transact> for Store {
        type Ok = Self;
        type Err = Traced<database::Error>;

        async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
            Ok(self.clone())
        }
    }

    impl Database<Insert<contract::New>> for Store {
        type Ok = contract::Id;
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            op: Insert<contract::New>,
        ) -> Result<Self::Ok, Self::Err> {
            if self.conflict_on_contract_insert {
                return Err(tracerr::new!(database::Error::UniqueViolation(
                    database::CONTRACT_NUMBER_CONSTRAINT,
                )));
            }
            self.issued.lock().unwrap().contracts.push(op.0);
            Ok(1.into())
        }
    }

    impl Database<Insert<payment::New>> for Store {
        type Ok = ();
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            op: Insert<payment::New>,
        ) -> Result<Self::Ok, Self::Err> {
            if self.fail_payment_inserts {
                return Err(tracerr::new!(database::Error::UniqueViolation(
                    "contract_payments_pkey",
                )));
            }
            self.issued.lock().unwrap().payments.push(op.0);
            Ok(())
        }
    }

    impl Database<Insert<reminder::New>> for Store {
        type Ok = ();
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            op: Insert<reminder::New>,
        ) -> Result<Self::Ok, Self::Err> {
            self.issued.lock().unwrap().reminders.push(op.0);
            Ok(())
        }
    }

    impl Database<Commit> for Store {
        type Ok = ();
        type Err = Traced<database::Error>;

        async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
            self.issued.lock().unwrap().committed = true;
            Ok(())
        }
    }

    fn service(store: Store) -> Service<Store> {
        Service {
            config: Config {
                mark_overdue_payments: task::mark_overdue_payments::Config {
                    interval: Duration::from_secs(3600),
                },
            },
            database: store,
        }
    }

    fn candidate() -> Candidate {
        Candidate {
            number: Some("C-100".to_owned()),
            tenant_name: Some("Ahmed".to_owned()),
            tenant_phone: Some("+96890000000".to_owned()),
            start_date: Some("2099-01-01".to_owned()),
            end_date: Some("2099-12-31".to_owned()),
            monthly_rent: Some(500.into()),
            ..Candidate::default()
        }
    }

    fn occupied(number: &str) -> Contract {
        Contract {
            id: 7.into(),
            number: number.parse().unwrap(),
            property_id: None,
            tenant_id: None,
            owner_id: None,
            tenant_name: "Fatma".into(),
            tenant_phone: None,
            property_address: "Muscat".into(),
            kind: contract::Kind::Rental,
            status: contract::Status::Active,
            start_date: "2025-01-01".parse().unwrap(),
            end_date: "2025-12-31".parse().unwrap(),
            monthly_rent: 400.into(),
            total_amount: 4800.into(),
            deposit_amount: 400.into(),
            commission_rate: "5".parse().unwrap(),
            currency: common::money::Currency::Omr,
            notes: String::new(),
            created_by: "system".into(),
            created_at: DateTime::now().coerce(),
            updated_at: DateTime::now().coerce(),
        }
    }

    #[tokio::test]
    async fn creates_contract_with_schedule_and_reminders() {
        let store = Store::default();
        let issued = Arc::clone(&store.issued);

        let id = service(store)
            .execute(CreateContract {
                candidate: candidate(),
            })
            .await
            .unwrap();

        assert_eq!(id, 1.into());
        let issued = issued.lock().unwrap();
        assert_eq!(issued.contracts.len(), 1);
        assert_eq!(issued.payments.len(), 12);
        assert!(issued.payments.iter().all(|p| p.amount == 500.into()));
        assert_eq!(issued.reminders.len(), 3);
        assert!(issued.committed);
    }

    #[tokio::test]
    async fn rejects_occupied_number_before_inserting() {
        let store = Store {
            existing: Some(occupied("C-100")),
            ..Store::default()
        };
        let issued = Arc::clone(&store.issued);

        let err = service(store)
            .execute(CreateContract {
                candidate: candidate(),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::DuplicateNumber(..),
        ));
        let issued = issued.lock().unwrap();
        assert!(issued.contracts.is_empty());
        assert!(issued.payments.is_empty());
        assert!(!issued.committed);
    }

    #[tokio::test]
    async fn maps_store_conflict_to_occupied_number() {
        let store = Store {
            conflict_on_contract_insert: true,
            ..Store::default()
        };
        let issued = Arc::clone(&store.issued);

        let err = service(store)
            .execute(CreateContract {
                candidate: candidate(),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::DuplicateNumber(..),
        ));
        let issued = issued.lock().unwrap();
        assert!(issued.payments.is_empty());
        assert!(issued.reminders.is_empty());
        assert!(!issued.committed);
    }

    #[tokio::test]
    async fn aborts_without_commit_on_failed_schedule_insert() {
        let store = Store {
            fail_payment_inserts: true,
            ..Store::default()
        };
        let issued = Arc::clone(&store.issued);

        let err = service(store)
            .execute(CreateContract {
                candidate: candidate(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::Db(..)));
        let issued = issued.lock().unwrap();
        assert!(issued.reminders.is_empty());
        assert!(!issued.committed);
    }

    #[tokio::test]
    async fn sale_contracts_get_no_schedule() {
        let store = Store::default();
        let issued = Arc::clone(&store.issued);

        let id = service(store)
            .execute(CreateContract {
                candidate: Candidate {
                    kind: Some(contract::Kind::Sale),
                    ..candidate()
                },
            })
            .await
            .unwrap();

        assert_eq!(id, 1.into());
        let issued = issued.lock().unwrap();
        assert!(issued.payments.is_empty());
        assert!(issued.committed);
    }
}
