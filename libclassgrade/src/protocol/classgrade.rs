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

//! Native types for the class grade family: the stored `ClassGrade` record and the
//! `ClassGradePayload` submitted in transactions.
//!
//! Both are encoded as JSON. A stored record always carries all four fields:
//!
//! ```text
//! { "sid": 7, "grade": 9.5, "makeupgrade": -1.0, "classname": "Math" }
//! ```

use std::error::Error as StdError;

use serde::{Deserialize, Serialize};

use super::{FromBytes, IntoBytes, ProtocolConversionError};

/// Value of a grade which has not been assigned yet.
pub const UNSET_GRADE: f64 = -1.0;

/// The grade of one student in one class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassGrade {
    sid: u64,
    grade: f64,
    #[serde(rename = "makeupgrade")]
    makeup_grade: f64,
    #[serde(rename = "classname")]
    class_name: String,
}

impl ClassGrade {
    pub fn sid(&self) -> u64 {
        self.sid
    }

    pub fn grade(&self) -> f64 {
        self.grade
    }

    pub fn makeup_grade(&self) -> f64 {
        self.makeup_grade
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Returns a builder initialized with every field of this record.
    pub fn into_builder(self) -> ClassGradeBuilder {
        ClassGradeBuilder::new()
            .with_sid(self.sid)
            .with_grade(self.grade)
            .with_makeup_grade(self.makeup_grade)
            .with_class_name(self.class_name)
    }
}

impl FromBytes<ClassGrade> for ClassGrade {
    fn from_bytes(bytes: &[u8]) -> Result<ClassGrade, ProtocolConversionError> {
        serde_json::from_slice(bytes).map_err(|err| {
            ProtocolConversionError::DeserializationError(format!(
                "Unable to get ClassGrade from bytes: {}",
                err
            ))
        })
    }
}

impl IntoBytes for ClassGrade {
    fn into_bytes(self) -> Result<Vec<u8>, ProtocolConversionError> {
        serde_json::to_vec(&self).map_err(|err| {
            ProtocolConversionError::SerializationError(format!(
                "Unable to get bytes from ClassGrade: {}",
                err
            ))
        })
    }
}

impl FromBytes<Vec<ClassGrade>> for Vec<ClassGrade> {
    fn from_bytes(bytes: &[u8]) -> Result<Vec<ClassGrade>, ProtocolConversionError> {
        serde_json::from_slice(bytes).map_err(|err| {
            ProtocolConversionError::DeserializationError(format!(
                "Unable to get ClassGrade list from bytes: {}",
                err
            ))
        })
    }
}

impl IntoBytes for Vec<ClassGrade> {
    fn into_bytes(self) -> Result<Vec<u8>, ProtocolConversionError> {
        serde_json::to_vec(&self).map_err(|err| {
            ProtocolConversionError::SerializationError(format!(
                "Unable to get bytes from ClassGrade list: {}",
                err
            ))
        })
    }
}

#[derive(Debug, PartialEq)]
pub enum ClassGradeBuildError {
    MissingField(String),
    InvalidField(String),
}

impl StdError for ClassGradeBuildError {}

impl std::fmt::Display for ClassGradeBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            ClassGradeBuildError::MissingField(ref s) => write!(f, "'{}' field is required", s),
            ClassGradeBuildError::InvalidField(ref s) => write!(f, "InvalidField: {}", s),
        }
    }
}

/// Builder used to create a ClassGrade
///
/// `grade` and `makeup_grade` default to `UNSET_GRADE`.
#[derive(Default, Clone, Debug)]
pub struct ClassGradeBuilder {
    sid: Option<u64>,
    grade: Option<f64>,
    makeup_grade: Option<f64>,
    class_name: Option<String>,
}

impl ClassGradeBuilder {
    pub fn new() -> Self {
        ClassGradeBuilder::default()
    }

    pub fn with_sid(mut self, sid: u64) -> ClassGradeBuilder {
        self.sid = Some(sid);
        self
    }

    pub fn with_grade(mut self, grade: f64) -> ClassGradeBuilder {
        self.grade = Some(grade);
        self
    }

    pub fn with_makeup_grade(mut self, makeup_grade: f64) -> ClassGradeBuilder {
        self.makeup_grade = Some(makeup_grade);
        self
    }

    pub fn with_class_name(mut self, class_name: String) -> ClassGradeBuilder {
        self.class_name = Some(class_name);
        self
    }

    pub fn build(self) -> Result<ClassGrade, ClassGradeBuildError> {
        let sid = self
            .sid
            .ok_or_else(|| ClassGradeBuildError::MissingField("sid".to_string()))?;

        let class_name = self
            .class_name
            .ok_or_else(|| ClassGradeBuildError::MissingField("class_name".to_string()))?;

        if class_name.is_empty() {
            return Err(ClassGradeBuildError::InvalidField(
                "class_name must not be empty".to_string(),
            ));
        }

        let grade = self.grade.unwrap_or(UNSET_GRADE);
        let makeup_grade = self.makeup_grade.unwrap_or(UNSET_GRADE);

        // JSON has no representation for NaN or infinity
        if !grade.is_finite() {
            return Err(ClassGradeBuildError::InvalidField(format!(
                "grade must be a finite number, got {}",
                grade
            )));
        }
        if !makeup_grade.is_finite() {
            return Err(ClassGradeBuildError::InvalidField(format!(
                "makeup_grade must be a finite number, got {}",
                makeup_grade
            )));
        }

        Ok(ClassGrade {
            sid,
            grade,
            makeup_grade,
            class_name,
        })
    }
}

/// The operations of the class grade family, tagged by the name of the contract function.
///
/// ```text
/// { "function": "changeGrade", "classname": "Math", "sid": 7, "grade": 9.5 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "function", rename_all = "camelCase")]
pub enum ClassGradePayload {
    InitLedger,
    CreateClassGrade {
        sid: u64,
        grade: f64,
        #[serde(rename = "makeupgrade")]
        makeup_grade: f64,
        #[serde(rename = "classname")]
        class_name: String,
    },
    QueryClassGrade {
        #[serde(rename = "classname")]
        class_name: String,
        sid: u64,
    },
    QueryAllClassGrades,
    QueryClassGrades {
        #[serde(rename = "classname")]
        class_name: String,
    },
    ChangeGrade {
        #[serde(rename = "classname")]
        class_name: String,
        sid: u64,
        grade: f64,
    },
    ChangeMakeupGrade {
        #[serde(rename = "classname")]
        class_name: String,
        sid: u64,
        #[serde(rename = "makeupgrade")]
        makeup_grade: f64,
    },
}

impl ClassGradePayload {
    /// Returns the contract function name of this payload.
    pub fn function_name(&self) -> &'static str {
        match self {
            ClassGradePayload::InitLedger => "initLedger",
            ClassGradePayload::CreateClassGrade { .. } => "createClassGrade",
            ClassGradePayload::QueryClassGrade { .. } => "queryClassGrade",
            ClassGradePayload::QueryAllClassGrades => "queryAllClassGrades",
            ClassGradePayload::QueryClassGrades { .. } => "queryClassGrades",
            ClassGradePayload::ChangeGrade { .. } => "changeGrade",
            ClassGradePayload::ChangeMakeupGrade { .. } => "changeMakeupGrade",
        }
    }
}

impl FromBytes<ClassGradePayload> for ClassGradePayload {
    fn from_bytes(bytes: &[u8]) -> Result<ClassGradePayload, ProtocolConversionError> {
        serde_json::from_slice(bytes).map_err(|err| {
            ProtocolConversionError::DeserializationError(format!(
                "Unable to get ClassGradePayload from bytes: {}",
                err
            ))
        })
    }
}

impl IntoBytes for ClassGradePayload {
    fn into_bytes(self) -> Result<Vec<u8>, ProtocolConversionError> {
        serde_json::to_vec(&self).map_err(|err| {
            ProtocolConversionError::SerializationError(format!(
                "Unable to get bytes from ClassGradePayload: {}",
                err
            ))
        })
    }
}
