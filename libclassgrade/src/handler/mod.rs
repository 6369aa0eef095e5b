/*
 * Copyright 2017 Bitwise IO, Inc.
 * Copyright 2019 Cargill Incorporated
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

//! Traits for handling the execution of a transaction.
//!
//! The TransactionHandler trait provides the interface for implementing transaction families.
//! These handlers must be stateless and deterministic.  They are provided, along with the
//! transaction itself, a TransactionContext implementation which provides access to reading and
//! writing from state, as well as appending opaque data to the receipt.
//!
//! The host running a handler is responsible for making all of the writes of a single `apply`
//! call atomic, and for serializing invocations which touch the same keys.

mod error;

pub use crate::handler::error::{ApplyError, ContextError};
use crate::contract::address::{create_composite_key, partial_composite_key_range};
use crate::protocol::transaction::Transaction;

/// A lazy, non-restartable sequence of `(key, value)` state entries.
///
/// The iterator owns whatever resources the host holds for the scan; dropping it releases them.
pub type StateIterator<'a> = Box<dyn Iterator<Item = Result<(String, Vec<u8>), ContextError>> + 'a>;

pub trait TransactionContext {
    /// get_state_entry queries the state for data at the address given. If the address is set,
    /// the data is returned.
    ///
    /// # Arguments
    ///
    /// * `address` - the address to fetch
    fn get_state_entry(&self, address: &str) -> Result<Option<Vec<u8>>, ContextError> {
        Ok(self
            .get_state_entries(&[address.to_string()])?
            .into_iter()
            .map(|(_, val)| val)
            .next())
    }

    /// get_state_entries queries the state for data at each of the addresses in the given list.
    /// The addresses that have been set are returned.
    ///
    /// # Arguments
    ///
    /// * `addresses` - the addresses to fetch
    fn get_state_entries(
        &self,
        addresses: &[String],
    ) -> Result<Vec<(String, Vec<u8>)>, ContextError>;

    /// set_state_entry requests that the provided address is set in state to its corresponding
    /// value.
    ///
    /// # Arguments
    ///
    /// * `address` - address of where to store the data
    /// * `data` - payload is the data to store at the address
    fn set_state_entry(&self, address: String, data: Vec<u8>) -> Result<(), ContextError> {
        self.set_state_entries(vec![(address, data)])
    }

    /// set_state_entries requests that each address in the provided list be set in state to its
    /// corresponding value.
    ///
    /// # Arguments
    ///
    /// * `entries` - address and data pairs to store
    fn set_state_entries(&self, entries: Vec<(String, Vec<u8>)>) -> Result<(), ContextError>;

    /// get_state_by_range returns an iterator over the entries whose addresses fall in
    /// `[start, end)`, in address order. An empty `start` or `end` leaves that side of the range
    /// unbounded.
    ///
    /// # Arguments
    ///
    /// * `start` - the inclusive lower bound
    /// * `end` - the exclusive upper bound
    fn get_state_by_range(
        &self,
        start: &str,
        end: &str,
    ) -> Result<StateIterator<'_>, ContextError>;

    /// get_state_by_partial_composite_key returns an iterator over every entry whose composite
    /// key starts with the given object type and leading attributes.
    ///
    /// # Arguments
    ///
    /// * `object_type` - the namespace of the composite keys to scan
    /// * `attributes` - the leading attributes shared by the keys to scan; may be empty
    fn get_state_by_partial_composite_key(
        &self,
        object_type: &str,
        attributes: &[&str],
    ) -> Result<StateIterator<'_>, ContextError> {
        let (start, end) = partial_composite_key_range(object_type, attributes)
            .map_err(|err| ContextError::InvalidKeyError(err.to_string()))?;
        self.get_state_by_range(&start, &end)
    }

    /// create_composite_key combines an object type and a list of attributes into a single
    /// address. See [`create_composite_key`](../contract/address/fn.create_composite_key.html)
    /// for the encoding.
    ///
    /// # Arguments
    ///
    /// * `object_type` - the namespace of the key
    /// * `attributes` - the ordered components of the key
    fn create_composite_key(
        &self,
        object_type: &str,
        attributes: &[&str],
    ) -> Result<String, ContextError> {
        create_composite_key(object_type, attributes)
            .map_err(|err| ContextError::InvalidKeyError(err.to_string()))
    }

    /// add_receipt_data adds a blob to the execution result for this transaction
    ///
    /// # Arguments
    ///
    /// * `data` - the data to add
    fn add_receipt_data(&self, data: Vec<u8>) -> Result<(), ContextError>;
}

pub trait TransactionHandler: Send {
    /// TransactionHandler that defines the business logic for a new transaction family.
    /// The family_name and family_versions functions are used by the executor to route
    /// transactions to the handler.

    /// family_name should return the name of the transaction family that this
    /// handler can process, e.g. "classgrade"
    fn family_name(&self) -> &str;

    /// family_versions should return a list of versions this transaction
    /// family handler can process, e.g. ["1.0"]
    fn family_versions(&self) -> &[String];

    /// Apply is the single method where all the business logic for a
    /// transaction family is defined. The method will be called by the
    /// executor with the transaction and a context scoped to that transaction.
    fn apply(
        &self,
        transaction: &Transaction,
        context: &mut dyn TransactionContext,
    ) -> Result<(), ApplyError>;
}
