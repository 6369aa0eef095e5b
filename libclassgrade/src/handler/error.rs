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
use std::error::Error;

#[derive(Debug)]
pub enum ApplyError {
    /// Returned for an Invalid Transaction.
    InvalidTransaction(String),
    /// Returned when an internal error occurs during transaction processing.
    InternalError(String),
}

impl Error for ApplyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}

impl std::fmt::Display for ApplyError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            ApplyError::InvalidTransaction(ref s) => write!(f, "InvalidTransaction: {}", s),
            ApplyError::InternalError(ref s) => write!(f, "InternalError: {}", s),
        }
    }
}

#[derive(Debug)]
pub enum ContextError {
    /// Returned when a key cannot be constructed from the given components
    InvalidKeyError(String),
    /// Returned when the underlying state cannot be read
    StateReadError(Box<dyn Error>),
    /// Returned when the underlying state cannot be written
    StateWriteError(Box<dyn Error>),
    /// Returned when there is an issue setting receipt data.
    TransactionReceiptError(String),
}

impl Error for ContextError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ContextError::InvalidKeyError(_) => None,
            ContextError::StateReadError(err) => Some(&**err),
            ContextError::StateWriteError(err) => Some(&**err),
            ContextError::TransactionReceiptError(_) => None,
        }
    }
}

impl std::fmt::Display for ContextError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            ContextError::InvalidKeyError(ref s) => write!(f, "InvalidKeyError: {}", s),
            ContextError::StateReadError(ref err) => write!(f, "StateReadError: {}", err),
            ContextError::StateWriteError(ref err) => write!(f, "StateWriteError: {}", err),
            ContextError::TransactionReceiptError(ref s) => {
                write!(f, "TransactionReceiptError: {}", s)
            }
        }
    }
}

impl From<ContextError> for ApplyError {
    fn from(context_error: ContextError) -> Self {
        match context_error {
            ContextError::InvalidKeyError(..) => {
                ApplyError::InvalidTransaction(format!("{}", context_error))
            }
            _ => ApplyError::InternalError(format!("{}", context_error)),
        }
    }
}
