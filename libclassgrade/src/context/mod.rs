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

//! A `TransactionContext` scoped to a single transaction, backed by a database writer.
//!
//! Writes go to the writer's pending operations and become durable only when the caller commits
//! the writer returned by `into_parts`. The context also records the state changes and receipt
//! data produced by the transaction, and counts the range iterators that have not been dropped
//! yet.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::database::{DatabaseCursor, DatabaseWriter};
use crate::handler::{ContextError, StateIterator, TransactionContext};
use crate::protocol::receipt::StateChange;

pub struct DatabaseTransactionContext<'a> {
    writer: RefCell<Box<dyn DatabaseWriter + 'a>>,
    state_changes: RefCell<Vec<StateChange>>,
    data: RefCell<Vec<Vec<u8>>>,
    open_iterators: Rc<Cell<usize>>,
}

impl<'a> DatabaseTransactionContext<'a> {
    pub fn new(writer: Box<dyn DatabaseWriter + 'a>) -> Self {
        DatabaseTransactionContext {
            writer: RefCell::new(writer),
            state_changes: RefCell::new(Vec::new()),
            data: RefCell::new(Vec::new()),
            open_iterators: Rc::new(Cell::new(0)),
        }
    }

    /// Returns the number of iterators returned by `get_state_by_range` that are still alive.
    pub fn open_iterators(&self) -> usize {
        self.open_iterators.get()
    }

    pub fn state_changes(&self) -> Vec<StateChange> {
        self.state_changes.borrow().clone()
    }

    pub fn data(&self) -> Vec<Vec<u8>> {
        self.data.borrow().clone()
    }

    /// Consumes the context, returning the writer holding the pending writes along with the
    /// recorded state changes and receipt data.
    pub fn into_parts(
        self,
    ) -> (
        Box<dyn DatabaseWriter + 'a>,
        Vec<StateChange>,
        Vec<Vec<u8>>,
    ) {
        (
            self.writer.into_inner(),
            self.state_changes.into_inner(),
            self.data.into_inner(),
        )
    }
}

impl<'a> TransactionContext for DatabaseTransactionContext<'a> {
    fn get_state_entries(
        &self,
        addresses: &[String],
    ) -> Result<Vec<(String, Vec<u8>)>, ContextError> {
        let writer = self.writer.borrow();
        let mut entries = Vec::with_capacity(addresses.len());
        for address in addresses {
            if let Some(value) = writer
                .get(address.as_bytes())
                .map_err(|err| ContextError::StateReadError(Box::new(err)))?
            {
                entries.push((address.clone(), value));
            }
        }
        Ok(entries)
    }

    fn set_state_entries(&self, entries: Vec<(String, Vec<u8>)>) -> Result<(), ContextError> {
        let mut writer = self.writer.borrow_mut();
        let mut state_changes = self.state_changes.borrow_mut();
        for (key, value) in entries {
            writer
                .overwrite(key.as_bytes(), &value)
                .map_err(|err| ContextError::StateWriteError(Box::new(err)))?;
            state_changes.push(StateChange::Set { key, value });
        }
        Ok(())
    }

    fn get_state_by_range(
        &self,
        start: &str,
        end: &str,
    ) -> Result<StateIterator<'_>, ContextError> {
        let cursor = self
            .writer
            .borrow()
            .range_cursor(start.as_bytes(), end.as_bytes())
            .map_err(|err| ContextError::StateReadError(Box::new(err)))?;

        Ok(Box::new(TrackedStateIterator::new(
            cursor,
            self.open_iterators.clone(),
        )))
    }

    fn add_receipt_data(&self, data: Vec<u8>) -> Result<(), ContextError> {
        self.data.borrow_mut().push(data);
        Ok(())
    }
}

/// A state iterator that is counted as open from creation until drop.
struct TrackedStateIterator {
    cursor: DatabaseCursor,
    open_iterators: Rc<Cell<usize>>,
}

impl TrackedStateIterator {
    fn new(cursor: DatabaseCursor, open_iterators: Rc<Cell<usize>>) -> Self {
        open_iterators.set(open_iterators.get() + 1);
        TrackedStateIterator {
            cursor,
            open_iterators,
        }
    }
}

impl Iterator for TrackedStateIterator {
    type Item = Result<(String, Vec<u8>), ContextError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.next().map(|(key, value)| {
            String::from_utf8(key)
                .map(|key| (key, value))
                .map_err(|err| ContextError::StateReadError(Box::new(err)))
        })
    }
}

impl Drop for TrackedStateIterator {
    fn drop(&mut self) {
        self.open_iterators
            .set(self.open_iterators.get().saturating_sub(1));
    }
}
