/*
 * Copyright 2019 Bitwise IO, Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 * -----------------------------------------------------------------------------
 */

//! The static executor provides a way to execute transaction handlers directly against a
//! database.
//!
//! Each transaction is routed to the registered `TransactionHandler` whose family name and
//! versions match it, and applied in a `DatabaseTransactionContext` of its own. The database
//! writer is held for the whole execution, so transactions are applied serially and the writes
//! of one transaction are committed all together or not at all.

mod error;

pub use crate::execution::error::ExecutionError;

use crate::context::DatabaseTransactionContext;
use crate::database::Database;
use crate::handler::{ApplyError, TransactionHandler};
use crate::protocol::receipt::{TransactionReceipt, TransactionReceiptBuilder};
use crate::protocol::transaction::Transaction;

pub struct StaticExecutor {
    handlers: Vec<Box<dyn TransactionHandler>>,
    database: Box<dyn Database>,
}

impl StaticExecutor {
    /// Creates an executor dispatching to the given handlers and applying their writes to the
    /// given database.
    pub fn new(handlers: Vec<Box<dyn TransactionHandler>>, database: Box<dyn Database>) -> Self {
        StaticExecutor { handlers, database }
    }

    /// Executes a single transaction.
    ///
    /// A valid transaction has its writes committed and its state changes and receipt data
    /// returned in a valid receipt. An invalid transaction has its writes discarded and is
    /// returned as an invalid receipt carrying the handler's message.
    ///
    /// # Errors
    ///
    /// Returns an `ExecutionError` if no handler accepts the transaction, if the handler fails
    /// with an internal error or leaves state iterators open, or if the database fails. Nothing
    /// is committed in these cases.
    pub fn execute(&self, transaction: &Transaction) -> Result<TransactionReceipt, ExecutionError> {
        let handler = self
            .handlers
            .iter()
            .find(|handler| {
                handler.family_name() == transaction.family_name()
                    && handler
                        .family_versions()
                        .iter()
                        .any(|v| v == transaction.family_version())
            })
            .ok_or_else(|| ExecutionError::RoutingError {
                family_name: transaction.family_name().to_string(),
                family_version: transaction.family_version().to_string(),
            })?;

        debug!(
            "Executing {}/{} transaction",
            transaction.family_name(),
            transaction.family_version()
        );

        let mut context = DatabaseTransactionContext::new(self.database.get_writer()?);
        let result = handler.apply(transaction, &mut context);

        let open_iterators = context.open_iterators();
        if open_iterators > 0 {
            error!(
                "Handler for {} left {} state iterator(s) open",
                transaction.family_name(),
                open_iterators
            );
            return Err(ExecutionError::IteratorLeak(open_iterators));
        }

        let receipt = match result {
            Ok(()) => {
                let (writer, state_changes, data) = context.into_parts();
                writer.commit()?;
                info!(
                    "Committed {}/{} transaction with {} state change(s)",
                    transaction.family_name(),
                    transaction.family_version(),
                    state_changes.len()
                );
                TransactionReceiptBuilder::new()
                    .valid()
                    .with_state_changes(state_changes)
                    .with_data(data)
            }
            Err(ApplyError::InvalidTransaction(error_message)) => {
                info!(
                    "Rejected {}/{} transaction: {}",
                    transaction.family_name(),
                    transaction.family_version(),
                    error_message
                );
                TransactionReceiptBuilder::new()
                    .invalid()
                    .with_error_message(error_message)
            }
            Err(ApplyError::InternalError(msg)) => {
                return Err(ExecutionError::InternalError(msg));
            }
        };

        receipt
            .with_family_name(transaction.family_name().to_string())
            .build()
            .map_err(|err| ExecutionError::InternalError(err.to_string()))
    }
}
