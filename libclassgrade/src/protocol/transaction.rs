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

//! The fundamental transaction.
//!
//! A transaction is an opaque payload addressed to a transaction family, which induces a state
//! change when applied by that family's handler. Signing and transport are left to the host.

use std::error::Error as StdError;
use std::fmt;

#[derive(Debug, PartialEq, Clone)]
pub struct Transaction {
    family_name: String,
    family_version: String,
    payload: Vec<u8>,
}

impl Transaction {
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub fn family_version(&self) -> &str {
        &self.family_version
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

#[derive(Debug)]
pub enum TransactionBuildError {
    MissingField(String),
}

impl StdError for TransactionBuildError {}

impl fmt::Display for TransactionBuildError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            TransactionBuildError::MissingField(ref s) => write!(f, "missing field: {}", s),
        }
    }
}

#[derive(Default, Clone)]
pub struct TransactionBuilder {
    family_name: Option<String>,
    family_version: Option<String>,
    payload: Option<Vec<u8>>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        TransactionBuilder::default()
    }

    pub fn with_family_name(mut self, family_name: String) -> TransactionBuilder {
        self.family_name = Some(family_name);
        self
    }

    pub fn with_family_version(mut self, family_version: String) -> TransactionBuilder {
        self.family_version = Some(family_version);
        self
    }

    pub fn with_payload(mut self, payload: Vec<u8>) -> TransactionBuilder {
        self.payload = Some(payload);
        self
    }

    pub fn build(self) -> Result<Transaction, TransactionBuildError> {
        let family_name = self
            .family_name
            .ok_or_else(|| TransactionBuildError::MissingField("family_name".to_string()))?;
        let family_version = self
            .family_version
            .ok_or_else(|| TransactionBuildError::MissingField("family_version".to_string()))?;
        let payload = self
            .payload
            .ok_or_else(|| TransactionBuildError::MissingField("payload".to_string()))?;

        Ok(Transaction {
            family_name,
            family_version,
            payload,
        })
    }
}
