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

//! The `receipt` module contains structs that supply information on the processing
//! of `Transaction`s

use std::error::Error as StdError;

/// A change applied to state by a valid transaction.
///
/// State entries of this family are never deleted, so the only change is the setting of a
/// key/value pair.
#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub enum StateChange {
    Set { key: String, value: Vec<u8> },
}

impl StateChange {
    pub fn key(&self) -> &str {
        match self {
            StateChange::Set { key, .. } => key,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransactionResult {
    Valid {
        state_changes: Vec<StateChange>,
        data: Vec<Vec<u8>>,
    },
    Invalid {
        error_message: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionReceipt {
    pub family_name: String,
    pub transaction_result: TransactionResult,
}

impl TransactionReceipt {
    pub fn is_valid(&self) -> bool {
        matches!(self.transaction_result, TransactionResult::Valid { .. })
    }

    /// Returns the state changes of a valid transaction, or an empty slice.
    pub fn state_changes(&self) -> &[StateChange] {
        match &self.transaction_result {
            TransactionResult::Valid { state_changes, .. } => state_changes,
            TransactionResult::Invalid { .. } => &[],
        }
    }

    /// Returns the receipt data of a valid transaction, or an empty slice.
    pub fn data(&self) -> &[Vec<u8>] {
        match &self.transaction_result {
            TransactionResult::Valid { data, .. } => data,
            TransactionResult::Invalid { .. } => &[],
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.transaction_result {
            TransactionResult::Valid { .. } => None,
            TransactionResult::Invalid { error_message } => Some(error_message),
        }
    }
}

#[derive(Debug)]
pub enum TransactionReceiptBuilderError {
    MissingField(String),
}

impl StdError for TransactionReceiptBuilderError {}

impl std::fmt::Display for TransactionReceiptBuilderError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            TransactionReceiptBuilderError::MissingField(ref s) => write!(f, "MissingField: {}", s),
        }
    }
}

#[derive(Default, Clone)]
pub struct TransactionReceiptBuilder {
    is_valid: bool,
    state_changes: Vec<StateChange>,
    data: Vec<Vec<u8>>,
    error_message: String,
    family_name: Option<String>,
}

impl TransactionReceiptBuilder {
    pub fn new() -> Self {
        TransactionReceiptBuilder::default()
    }

    pub fn valid(mut self) -> Self {
        self.is_valid = true;
        self
    }

    pub fn invalid(mut self) -> Self {
        self.is_valid = false;
        self
    }

    pub fn with_state_changes(
        mut self,
        state_changes: Vec<StateChange>,
    ) -> TransactionReceiptBuilder {
        self.state_changes = state_changes;
        self
    }

    pub fn with_data(mut self, data: Vec<Vec<u8>>) -> TransactionReceiptBuilder {
        self.data = data;
        self
    }

    pub fn with_error_message(mut self, error_message: String) -> TransactionReceiptBuilder {
        self.error_message = error_message;
        self
    }

    pub fn with_family_name(mut self, family_name: String) -> TransactionReceiptBuilder {
        self.family_name = Some(family_name);
        self
    }

    pub fn build(self) -> Result<TransactionReceipt, TransactionReceiptBuilderError> {
        let family_name = self.family_name.ok_or_else(|| {
            TransactionReceiptBuilderError::MissingField(
                "'family_name' field is required".to_string(),
            )
        })?;

        let transaction_result = if self.is_valid {
            TransactionResult::Valid {
                state_changes: self.state_changes,
                data: self.data,
            }
        } else {
            TransactionResult::Invalid {
                error_message: self.error_message,
            }
        };

        Ok(TransactionReceipt {
            family_name,
            transaction_result,
        })
    }
}
