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

//! Operations on class grade records.
//!
//! Every operation takes the `TransactionContext` of the current invocation explicitly. Writes
//! are made through the context; the host makes them atomic together with the rest of the
//! invocation.

use crate::handler::{ContextError, StateIterator, TransactionContext};
use crate::protocol::classgrade::{ClassGrade, ClassGradeBuilder};
use crate::protocol::{FromBytes, IntoBytes};

use super::addressing::{display_key, normalize_key};
use super::error::ClassGradeError;
use super::CLASSGRADE_NAMESPACE;

/// Returns the state key of the record of student `sid` in class `class_name`.
///
/// # Errors
///
/// Returns `ClassGradeError::KeyDerivationError` if the class name is empty or contains a
/// character reserved by the composite key encoding.
pub fn compute_class_grade_key(
    context: &dyn TransactionContext,
    class_name: &str,
    sid: u64,
) -> Result<String, ClassGradeError> {
    if class_name.is_empty() {
        return Err(ClassGradeError::KeyDerivationError {
            key: normalize_key(class_name, sid),
            message: "class name must not be empty".into(),
        });
    }

    let sid_attribute = sid.to_string();
    context
        .create_composite_key(CLASSGRADE_NAMESPACE, &[class_name, sid_attribute.as_str()])
        .map_err(|err| ClassGradeError::KeyDerivationError {
            key: normalize_key(class_name, sid),
            message: err.to_string(),
        })
}

/// Stores a new record, overwriting any record of the same student and class.
pub fn create_class_grade(
    context: &dyn TransactionContext,
    sid: u64,
    grade: f64,
    makeup_grade: f64,
    class_name: &str,
) -> Result<(), ClassGradeError> {
    let key = compute_class_grade_key(context, class_name, sid)?;
    let class_grade = ClassGradeBuilder::new()
        .with_sid(sid)
        .with_grade(grade)
        .with_makeup_grade(makeup_grade)
        .with_class_name(class_name.to_string())
        .build()?;

    debug!("Creating class grade {}", normalize_key(class_name, sid));
    save_class_grade(context, key, class_grade)
}

/// Returns the record of student `sid` in class `class_name`.
///
/// # Errors
///
/// Returns `ClassGradeError::NotFoundError` if no such record exists.
pub fn query_class_grade(
    context: &dyn TransactionContext,
    class_name: &str,
    sid: u64,
) -> Result<ClassGrade, ClassGradeError> {
    let key = compute_class_grade_key(context, class_name, sid)?;
    debug!("Querying class grade {}", normalize_key(class_name, sid));

    load_class_grade(context, &key, class_name, sid)?.ok_or_else(|| {
        ClassGradeError::NotFoundError {
            class_name: class_name.to_string(),
            sid,
        }
    })
}

/// Returns every class grade record, in key order.
///
/// Only keys of the class grade namespace are scanned. The scan stops at the first entry that
/// cannot be read or decoded, and that error is returned.
pub fn query_all_class_grades(
    context: &dyn TransactionContext,
) -> Result<Vec<ClassGrade>, ClassGradeError> {
    debug!("Querying all class grades");
    let entries = context
        .get_state_by_partial_composite_key(CLASSGRADE_NAMESPACE, &[])
        .map_err(|err| scan_error(CLASSGRADE_NAMESPACE, err))?;

    collect_class_grades(entries)
}

/// Returns every record of class `class_name`, ordered by the decimal form of the student id.
pub fn query_class_grades(
    context: &dyn TransactionContext,
    class_name: &str,
) -> Result<Vec<ClassGrade>, ClassGradeError> {
    if class_name.is_empty() {
        return Err(ClassGradeError::KeyDerivationError {
            key: class_name.to_string(),
            message: "class name must not be empty".into(),
        });
    }

    debug!("Querying class grades of {}", class_name);
    let entries = context
        .get_state_by_partial_composite_key(CLASSGRADE_NAMESPACE, &[class_name])
        .map_err(|err| scan_error(class_name, err))?;

    collect_class_grades(entries)
}

/// Sets the grade of student `sid` in class `class_name`, leaving the makeup grade unchanged.
///
/// If no record exists yet, one is created with an unset makeup grade.
pub fn change_grade(
    context: &dyn TransactionContext,
    class_name: &str,
    sid: u64,
    new_grade: f64,
) -> Result<(), ClassGradeError> {
    let key = compute_class_grade_key(context, class_name, sid)?;
    let builder = match load_class_grade(context, &key, class_name, sid)? {
        Some(class_grade) => class_grade.into_builder(),
        None => {
            debug!(
                "No class grade {}, creating it",
                normalize_key(class_name, sid)
            );
            new_record(class_name, sid)
        }
    };

    debug!("Changing grade of {}", normalize_key(class_name, sid));
    save_class_grade(context, key, builder.with_grade(new_grade).build()?)
}

/// Sets the makeup grade of student `sid` in class `class_name`, leaving the grade unchanged.
///
/// If no record exists yet, one is created with an unset grade.
pub fn change_makeup_grade(
    context: &dyn TransactionContext,
    class_name: &str,
    sid: u64,
    new_makeup_grade: f64,
) -> Result<(), ClassGradeError> {
    let key = compute_class_grade_key(context, class_name, sid)?;
    let builder = match load_class_grade(context, &key, class_name, sid)? {
        Some(class_grade) => class_grade.into_builder(),
        None => {
            debug!(
                "No class grade {}, creating it",
                normalize_key(class_name, sid)
            );
            new_record(class_name, sid)
        }
    };

    debug!("Changing makeup grade of {}", normalize_key(class_name, sid));
    save_class_grade(
        context,
        key,
        builder.with_makeup_grade(new_makeup_grade).build()?,
    )
}

fn new_record(class_name: &str, sid: u64) -> ClassGradeBuilder {
    ClassGradeBuilder::new()
        .with_sid(sid)
        .with_class_name(class_name.to_string())
}

/// Reads the record stored at `key`. An absent key or an empty value means no record.
fn load_class_grade(
    context: &dyn TransactionContext,
    key: &str,
    class_name: &str,
    sid: u64,
) -> Result<Option<ClassGrade>, ClassGradeError> {
    let bytes = context
        .get_state_entry(key)
        .map_err(|err| ClassGradeError::StoreReadError {
            key: normalize_key(class_name, sid),
            source: err,
        })?;

    match bytes {
        Some(ref bytes) if !bytes.is_empty() => ClassGrade::from_bytes(bytes)
            .map(Some)
            .map_err(|err| ClassGradeError::DecodeError {
                key: normalize_key(class_name, sid),
                source: err,
            }),
        _ => Ok(None),
    }
}

fn save_class_grade(
    context: &dyn TransactionContext,
    key: String,
    class_grade: ClassGrade,
) -> Result<(), ClassGradeError> {
    let normalized = normalize_key(class_grade.class_name(), class_grade.sid());
    let bytes = class_grade
        .into_bytes()
        .map_err(|err| ClassGradeError::InvalidRecordError(err.to_string()))?;

    context
        .set_state_entry(key, bytes)
        .map_err(|err| ClassGradeError::StoreWriteError {
            key: normalized,
            source: err,
        })
}

fn scan_error(scope: &str, err: ContextError) -> ClassGradeError {
    match err {
        ContextError::InvalidKeyError(message) => ClassGradeError::KeyDerivationError {
            key: scope.to_string(),
            message,
        },
        err => ClassGradeError::StoreReadError {
            key: scope.to_string(),
            source: err,
        },
    }
}

/// Decodes every entry of a scan, skipping empty values as a point read does. Returning early
/// drops the iterator, which releases the scan.
fn collect_class_grades(
    entries: StateIterator<'_>,
) -> Result<Vec<ClassGrade>, ClassGradeError> {
    let mut class_grades = Vec::new();
    for entry in entries {
        let (key, value) = entry.map_err(|err| ClassGradeError::StoreReadError {
            key: CLASSGRADE_NAMESPACE.to_string(),
            source: err,
        })?;
        trace!("Scanned {}", display_key(&key));

        if value.is_empty() {
            continue;
        }

        class_grades.push(ClassGrade::from_bytes(&value).map_err(|err| {
            ClassGradeError::DecodeError {
                key: display_key(&key),
                source: err,
            }
        })?);
    }
    Ok(class_grades)
}
