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

//! Structs for class grade records, transactions and receipts.
//!
//! Class grade records and payloads are exchanged as JSON. Transactions are routed to a
//! transaction family and the results of their execution are stored in transaction receipts.

pub mod classgrade;
pub mod receipt;
pub mod transaction;

use std::error::Error as StdError;

/// Decodes a native type from its byte representation.
pub trait FromBytes<T> {
    fn from_bytes(bytes: &[u8]) -> Result<T, ProtocolConversionError>;
}

/// Encodes a native type into its byte representation.
pub trait IntoBytes: Sized {
    fn into_bytes(self) -> Result<Vec<u8>, ProtocolConversionError>;
}

#[derive(Debug)]
pub enum ProtocolConversionError {
    SerializationError(String),
    DeserializationError(String),
}

impl StdError for ProtocolConversionError {}

impl std::fmt::Display for ProtocolConversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            ProtocolConversionError::SerializationError(ref s) => {
                write!(f, "SerializationError: {}", s)
            }
            ProtocolConversionError::DeserializationError(ref s) => {
                write!(f, "DeserializationError: {}", s)
            }
        }
    }
}
