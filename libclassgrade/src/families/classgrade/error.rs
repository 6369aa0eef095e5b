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

use std::error::Error;
use std::fmt;

use crate::handler::ContextError;
use crate::protocol::classgrade::ClassGradeBuildError;
use crate::protocol::ProtocolConversionError;

/// Errors of the class grade store operations.
///
/// `key` fields hold the human readable form of the key involved, e.g. `Math_7`.
#[derive(Debug)]
pub enum ClassGradeError {
    /// The key of a record could not be derived from its class name and student id
    KeyDerivationError { key: String, message: String },
    /// The state could not be read
    StoreReadError { key: String, source: ContextError },
    /// The state could not be written
    StoreWriteError { key: String, source: ContextError },
    /// No record exists for the class name and student id
    NotFoundError { class_name: String, sid: u64 },
    /// The bytes stored at a key are not a valid record
    DecodeError {
        key: String,
        source: ProtocolConversionError,
    },
    /// A record could not be built or encoded from the given values
    InvalidRecordError(String),
}

impl ClassGradeError {
    /// Returns true if the error was caused by the state store rather than by the request.
    pub fn is_store_failure(&self) -> bool {
        match self {
            ClassGradeError::StoreReadError { .. } | ClassGradeError::StoreWriteError { .. } => {
                true
            }
            _ => false,
        }
    }
}

impl Error for ClassGradeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ClassGradeError::StoreReadError { source, .. } => Some(source),
            ClassGradeError::StoreWriteError { source, .. } => Some(source),
            ClassGradeError::DecodeError { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl fmt::Display for ClassGradeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClassGradeError::KeyDerivationError { key, message } => {
                write!(f, "unable to derive key for {}: {}", key, message)
            }
            ClassGradeError::StoreReadError { key, source } => {
                write!(f, "unable to read {} from state: {}", key, source)
            }
            ClassGradeError::StoreWriteError { key, source } => {
                write!(f, "unable to write {} to state: {}", key, source)
            }
            ClassGradeError::NotFoundError { class_name, sid } => write!(
                f,
                "no grade recorded for student {} in class {}",
                sid, class_name
            ),
            ClassGradeError::DecodeError { key, source } => {
                write!(f, "invalid record stored at {}: {}", key, source)
            }
            ClassGradeError::InvalidRecordError(msg) => write!(f, "invalid record: {}", msg),
        }
    }
}

impl From<ClassGradeBuildError> for ClassGradeError {
    fn from(err: ClassGradeBuildError) -> Self {
        ClassGradeError::InvalidRecordError(err.to_string())
    }
}
