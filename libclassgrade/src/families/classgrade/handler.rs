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

use crate::handler::{ApplyError, TransactionContext, TransactionHandler};
use crate::protocol::classgrade::ClassGradePayload;
use crate::protocol::transaction::Transaction;
use crate::protocol::{FromBytes, IntoBytes};

use super::error::ClassGradeError;
use super::store;
use super::{FAMILY_NAME, FAMILY_VERSION};

/// Applies `ClassGradePayload`s to state.
///
/// Queries add their result to the receipt data as JSON: a single record for
/// `queryClassGrade`, a list of records for `queryAllClassGrades` and `queryClassGrades`.
#[derive(Clone)]
pub struct ClassGradeTransactionHandler {
    family_name: String,
    family_versions: Vec<String>,
}

impl ClassGradeTransactionHandler {
    pub fn new() -> Self {
        ClassGradeTransactionHandler {
            family_name: FAMILY_NAME.to_string(),
            family_versions: vec![FAMILY_VERSION.to_string()],
        }
    }
}

impl Default for ClassGradeTransactionHandler {
    fn default() -> Self {
        ClassGradeTransactionHandler::new()
    }
}

impl TransactionHandler for ClassGradeTransactionHandler {
    fn family_name(&self) -> &str {
        &self.family_name
    }

    fn family_versions(&self) -> &[String] {
        &self.family_versions
    }

    fn apply(
        &self,
        transaction: &Transaction,
        context: &mut dyn TransactionContext,
    ) -> Result<(), ApplyError> {
        let payload = unpack_payload(transaction.payload())?;
        let function = payload.function_name();
        debug!("Classgrade txn: function {}", function);

        let context: &dyn TransactionContext = context;
        match payload {
            ClassGradePayload::InitLedger => Ok(()),
            ClassGradePayload::CreateClassGrade {
                sid,
                grade,
                makeup_grade,
                class_name,
            } => store::create_class_grade(context, sid, grade, makeup_grade, &class_name)
                .map_err(|err| to_apply_error(function, err)),
            ClassGradePayload::QueryClassGrade { class_name, sid } => {
                let class_grade = store::query_class_grade(context, &class_name, sid)
                    .map_err(|err| to_apply_error(function, err))?;
                add_query_result(context, class_grade.into_bytes())
            }
            ClassGradePayload::QueryAllClassGrades => {
                let class_grades = store::query_all_class_grades(context)
                    .map_err(|err| to_apply_error(function, err))?;
                add_query_result(context, class_grades.into_bytes())
            }
            ClassGradePayload::QueryClassGrades { class_name } => {
                let class_grades = store::query_class_grades(context, &class_name)
                    .map_err(|err| to_apply_error(function, err))?;
                add_query_result(context, class_grades.into_bytes())
            }
            ClassGradePayload::ChangeGrade {
                class_name,
                sid,
                grade,
            } => store::change_grade(context, &class_name, sid, grade)
                .map_err(|err| to_apply_error(function, err)),
            ClassGradePayload::ChangeMakeupGrade {
                class_name,
                sid,
                makeup_grade,
            } => store::change_makeup_grade(context, &class_name, sid, makeup_grade)
                .map_err(|err| to_apply_error(function, err)),
        }
    }
}

fn unpack_payload(payload: &[u8]) -> Result<ClassGradePayload, ApplyError> {
    ClassGradePayload::from_bytes(payload).map_err(|err| {
        warn!(
            "Invalid transaction: Failed to unmarshal ClassGradePayload: {}",
            err
        );
        ApplyError::InvalidTransaction(format!("Failed to unmarshal ClassGradePayload: {}", err))
    })
}

fn add_query_result(
    context: &dyn TransactionContext,
    result: Result<Vec<u8>, crate::protocol::ProtocolConversionError>,
) -> Result<(), ApplyError> {
    let bytes = result.map_err(|err| ApplyError::InternalError(err.to_string()))?;
    context.add_receipt_data(bytes)?;
    Ok(())
}

fn to_apply_error(function: &str, err: ClassGradeError) -> ApplyError {
    if err.is_store_failure() {
        error!("{} failed: {}", function, err);
        ApplyError::InternalError(format!("{} failed: {}", function, err))
    } else {
        warn!("Invalid transaction: during {}, {}", function, err);
        ApplyError::InvalidTransaction(format!("{} failed: {}", function, err))
    }
}
