/*
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

//! An in-memory `TransactionContext` for unit tests, with injectable store failures.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::rc::Rc;

use crate::handler::{ContextError, StateIterator, TransactionContext};

#[derive(Debug)]
pub struct MockStoreError(pub &'static str);

impl Error for MockStoreError {}

impl fmt::Display for MockStoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Default)]
pub struct MockTransactionContext {
    state: RefCell<BTreeMap<String, Vec<u8>>>,
    data: RefCell<Vec<Vec<u8>>>,
    open_iterators: Rc<Cell<usize>>,
    fail_reads: bool,
    fail_writes: bool,
    fail_scan_at: Option<usize>,
}

impl MockTransactionContext {
    pub fn new() -> Self {
        MockTransactionContext::default()
    }

    /// Every point read and range scan fails.
    pub fn failing_reads(self) -> Self {
        MockTransactionContext {
            fail_reads: true,
            ..self
        }
    }

    /// Every write fails.
    pub fn failing_writes(self) -> Self {
        MockTransactionContext {
            fail_writes: true,
            ..self
        }
    }

    /// Range scans yield an error in place of the entry at `index`.
    pub fn failing_scan_at(self, index: usize) -> Self {
        MockTransactionContext {
            fail_scan_at: Some(index),
            ..self
        }
    }

    pub fn insert(&self, key: &str, value: &[u8]) {
        self.state
            .borrow_mut()
            .insert(key.to_string(), value.to_vec());
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.state.borrow().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.state.borrow().len()
    }

    pub fn data(&self) -> Vec<Vec<u8>> {
        self.data.borrow().clone()
    }

    pub fn open_iterators(&self) -> usize {
        self.open_iterators.get()
    }
}

impl TransactionContext for MockTransactionContext {
    fn get_state_entries(
        &self,
        addresses: &[String],
    ) -> Result<Vec<(String, Vec<u8>)>, ContextError> {
        if self.fail_reads {
            return Err(ContextError::StateReadError(Box::new(MockStoreError(
                "read failed",
            ))));
        }
        let state = self.state.borrow();
        Ok(addresses
            .iter()
            .filter_map(|address| {
                state
                    .get(address)
                    .map(|value| (address.clone(), value.clone()))
            })
            .collect())
    }

    fn set_state_entries(&self, entries: Vec<(String, Vec<u8>)>) -> Result<(), ContextError> {
        if self.fail_writes {
            return Err(ContextError::StateWriteError(Box::new(MockStoreError(
                "write failed",
            ))));
        }
        self.state.borrow_mut().extend(entries);
        Ok(())
    }

    fn get_state_by_range(
        &self,
        start: &str,
        end: &str,
    ) -> Result<StateIterator<'_>, ContextError> {
        if self.fail_reads {
            return Err(ContextError::StateReadError(Box::new(MockStoreError(
                "scan failed",
            ))));
        }
        let entries = self
            .state
            .borrow()
            .iter()
            .filter(|(key, _)| {
                (start.is_empty() || key.as_str() >= start) && (end.is_empty() || key.as_str() < end)
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect::<Vec<_>>();

        self.open_iterators.set(self.open_iterators.get() + 1);
        Ok(Box::new(MockStateIterator {
            entries: entries.into_iter().enumerate(),
            fail_at: self.fail_scan_at,
            open_iterators: self.open_iterators.clone(),
        }))
    }

    fn add_receipt_data(&self, data: Vec<u8>) -> Result<(), ContextError> {
        self.data.borrow_mut().push(data);
        Ok(())
    }
}

struct MockStateIterator {
    entries: std::iter::Enumerate<std::vec::IntoIter<(String, Vec<u8>)>>,
    fail_at: Option<usize>,
    open_iterators: Rc<Cell<usize>>,
}

impl Iterator for MockStateIterator {
    type Item = Result<(String, Vec<u8>), ContextError>;

    fn next(&mut self) -> Option<Self::Item> {
        let fail_at = self.fail_at;
        self.entries.next().map(|(index, entry)| {
            if Some(index) == fail_at {
                Err(ContextError::StateReadError(Box::new(MockStoreError(
                    "scan interrupted",
                ))))
            } else {
                Ok(entry)
            }
        })
    }
}

impl Drop for MockStateIterator {
    fn drop(&mut self) {
        self.open_iterators.set(self.open_iterators.get() - 1);
    }
}
