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

use std::{error::Error, fmt};

use crate::database::DatabaseError;

/// During processing of the Transaction, something unexpected happened. Nothing the transaction
/// wrote has been committed.
#[derive(Debug)]
pub enum ExecutionError {
    /// No registered handler accepts the transaction's family name and version
    RoutingError { family_name: String, family_version: String },
    /// The database could not be read, written or committed
    DatabaseError(DatabaseError),
    /// The handler failed for a reason unrelated to the validity of the transaction
    InternalError(String),
    /// The handler returned while some of its state iterators were still alive
    IteratorLeak(usize),
}

impl Error for ExecutionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            ExecutionError::DatabaseError(ref err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExecutionError::RoutingError {
                family_name,
                family_version,
            } => write!(f, "Unable to route {}/{}", family_name, family_version),
            ExecutionError::DatabaseError(err) => write!(f, "Database Error: {}", err),
            ExecutionError::InternalError(msg) => write!(f, "Internal Error: {}", msg),
            ExecutionError::IteratorLeak(count) => {
                write!(f, "{} state iterator(s) left open by handler", count)
            }
        }
    }
}

impl From<DatabaseError> for ExecutionError {
    fn from(err: DatabaseError) -> Self {
        ExecutionError::DatabaseError(err)
    }
}
