// Copyright 2019 Cargill Incorporated
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! End to end tests of the class grade family, run by the static executor over a database.

use serde_json::{json, Value};

use classgrade::{
    database::Database,
    execution::{ExecutionError, StaticExecutor},
    families::classgrade::{ClassGradeTransactionHandler, FAMILY_NAME, FAMILY_VERSION},
    protocol::{
        classgrade::{ClassGrade, ClassGradeBuilder, ClassGradePayload, UNSET_GRADE},
        receipt::TransactionReceipt,
        transaction::TransactionBuilder,
        FromBytes, IntoBytes,
    },
};

fn new_executor(db: Box<dyn Database>) -> StaticExecutor {
    StaticExecutor::new(vec![Box::new(ClassGradeTransactionHandler::new())], db)
}

fn execute(executor: &StaticExecutor, payload: ClassGradePayload) -> TransactionReceipt {
    let transaction = TransactionBuilder::new()
        .with_family_name(FAMILY_NAME.into())
        .with_family_version(FAMILY_VERSION.into())
        .with_payload(payload.into_bytes().expect("Unable to serialize payload"))
        .build()
        .expect("Unable to build transaction");

    executor
        .execute(&transaction)
        .expect("Transaction execution failed")
}

fn create(executor: &StaticExecutor, class_name: &str, sid: u64, grade: f64, makeup_grade: f64) {
    let receipt = execute(
        executor,
        ClassGradePayload::CreateClassGrade {
            sid,
            grade,
            makeup_grade,
            class_name: class_name.into(),
        },
    );
    assert!(receipt.is_valid(), "{:?}", receipt.error_message());
}

fn query(executor: &StaticExecutor, class_name: &str, sid: u64) -> Result<ClassGrade, String> {
    let receipt = execute(
        executor,
        ClassGradePayload::QueryClassGrade {
            class_name: class_name.into(),
            sid,
        },
    );
    if receipt.is_valid() {
        Ok(ClassGrade::from_bytes(&receipt.data()[0]).expect("Unable to decode query result"))
    } else {
        Err(receipt.error_message().unwrap_or_default().to_string())
    }
}

fn query_all(executor: &StaticExecutor) -> Vec<ClassGrade> {
    let receipt = execute(executor, ClassGradePayload::QueryAllClassGrades);
    assert!(receipt.is_valid(), "{:?}", receipt.error_message());
    Vec::<ClassGrade>::from_bytes(&receipt.data()[0]).expect("Unable to decode query result")
}

fn class_grade(class_name: &str, sid: u64, grade: f64, makeup_grade: f64) -> ClassGrade {
    ClassGradeBuilder::new()
        .with_sid(sid)
        .with_grade(grade)
        .with_makeup_grade(makeup_grade)
        .with_class_name(class_name.into())
        .build()
        .expect("Unable to build class grade")
}

/// 1. Create a record
/// 2. Validate that the receipt lists exactly one state change
/// 3. Validate that querying the record returns the created values
fn test_create_and_query(db: Box<dyn Database>) {
    let executor = new_executor(db);

    let receipt = execute(
        &executor,
        ClassGradePayload::CreateClassGrade {
            sid: 7,
            grade: 9.5,
            makeup_grade: UNSET_GRADE,
            class_name: "Math".into(),
        },
    );
    assert!(receipt.is_valid());
    assert_eq!(receipt.state_changes().len(), 1);
    assert_eq!(
        receipt.state_changes()[0].key(),
        "\u{0}CLASSGRADE\u{0}Math\u{0}7\u{0}"
    );

    assert_eq!(
        query(&executor, "Math", 7),
        Ok(class_grade("Math", 7, 9.5, UNSET_GRADE))
    );
}

/// 1. Create records for every combination of two classes and two students
/// 2. Validate that each is returned with its own values
/// 3. Create one of them again with new values
/// 4. Validate that it is overwritten and the total number of records is unchanged
fn test_key_uniqueness_and_overwrite(db: Box<dyn Database>) {
    let executor = new_executor(db);

    let mut grade = 0.0;
    for class_name in &["Math", "Math1"] {
        for sid in &[1, 11] {
            grade += 1.0;
            create(&executor, class_name, *sid, grade, UNSET_GRADE);
        }
    }

    assert_eq!(query(&executor, "Math", 1).unwrap().grade(), 1.0);
    assert_eq!(query(&executor, "Math", 11).unwrap().grade(), 2.0);
    assert_eq!(query(&executor, "Math1", 1).unwrap().grade(), 3.0);
    assert_eq!(query(&executor, "Math1", 11).unwrap().grade(), 4.0);

    create(&executor, "Math", 11, 5.0, 6.0);
    assert_eq!(
        query(&executor, "Math", 11),
        Ok(class_grade("Math", 11, 5.0, 6.0))
    );
    assert_eq!(query_all(&executor).len(), 4);
}

/// 1. Create a record
/// 2. Create it again with the same values
/// 3. Validate that the stored bytes and the number of entries are unchanged
fn test_create_idempotent(db: Box<dyn Database>) {
    let executor = new_executor(db.clone());
    let key = "\u{0}CLASSGRADE\u{0}Math\u{0}7\u{0}".as_bytes();

    create(&executor, "Math", 7, 9.5, 6.0);
    let first = db.get_reader().unwrap().get(key).unwrap();
    assert!(first.is_some());

    create(&executor, "Math", 7, 9.5, 6.0);
    let reader = db.get_reader().unwrap();
    assert_eq!(reader.get(key).unwrap(), first);
    assert_eq!(reader.count().unwrap(), 1);
}

/// 1. Change the grade and the makeup grade of an existing record
/// 2. Validate that each change leaves the other field untouched
/// 3. Change the grade of an absent record and the makeup grade of another absent record
/// 4. Validate that both are created with the other field unset
fn test_updates(db: Box<dyn Database>) {
    let executor = new_executor(db);
    create(&executor, "Math", 7, 5.0, 6.0);

    let receipt = execute(
        &executor,
        ClassGradePayload::ChangeGrade {
            class_name: "Math".into(),
            sid: 7,
            grade: 7.0,
        },
    );
    assert!(receipt.is_valid());
    assert_eq!(
        query(&executor, "Math", 7),
        Ok(class_grade("Math", 7, 7.0, 6.0))
    );

    execute(
        &executor,
        ClassGradePayload::ChangeMakeupGrade {
            class_name: "Math".into(),
            sid: 7,
            makeup_grade: 8.0,
        },
    );
    assert_eq!(
        query(&executor, "Math", 7),
        Ok(class_grade("Math", 7, 7.0, 8.0))
    );

    execute(
        &executor,
        ClassGradePayload::ChangeGrade {
            class_name: "Art".into(),
            sid: 1,
            grade: 3.0,
        },
    );
    execute(
        &executor,
        ClassGradePayload::ChangeMakeupGrade {
            class_name: "Art".into(),
            sid: 2,
            makeup_grade: 4.0,
        },
    );
    assert_eq!(
        query(&executor, "Art", 1),
        Ok(class_grade("Art", 1, 3.0, UNSET_GRADE))
    );
    assert_eq!(
        query(&executor, "Art", 2),
        Ok(class_grade("Art", 2, UNSET_GRADE, 4.0))
    );
}

/// 1. Query a record that was never created
/// 2. Validate that the transaction is invalid and names the class and student
/// 3. Validate that a failed query writes nothing
fn test_not_found(db: Box<dyn Database>) {
    let executor = new_executor(db.clone());

    let error = query(&executor, "Math", 7).expect_err("Query of absent record succeeded");
    assert!(error.contains("Math"), "{}", error);
    assert!(error.contains('7'), "{}", error);

    assert_eq!(db.get_reader().unwrap().count().unwrap(), 0);
}

/// 1. Create records in several classes
/// 2. Write unrelated entries directly to the database
/// 3. Validate that querying all records returns exactly the created records, in key order
/// 4. Validate that querying one class returns only that class
fn test_scans(db: Box<dyn Database>) {
    let executor = new_executor(db.clone());
    assert!(query_all(&executor).is_empty());

    create(&executor, "Math", 2, 1.0, UNSET_GRADE);
    create(&executor, "Math", 1, 2.0, UNSET_GRADE);
    create(&executor, "Mathematics", 1, 3.0, UNSET_GRADE);
    create(&executor, "Art", 5, 4.0, 5.0);

    {
        let mut writer = db.get_writer().unwrap();
        writer.overwrite(b"unrelated", b"not a record").unwrap();
        writer
            .overwrite(b"\x00OTHER\x00Math\x001\x00", b"not a record")
            .unwrap();
        writer.commit().unwrap();
    }

    assert_eq!(
        query_all(&executor),
        vec![
            class_grade("Art", 5, 4.0, 5.0),
            class_grade("Math", 1, 2.0, UNSET_GRADE),
            class_grade("Math", 2, 1.0, UNSET_GRADE),
            class_grade("Mathematics", 1, 3.0, UNSET_GRADE),
        ]
    );

    let receipt = execute(
        &executor,
        ClassGradePayload::QueryClassGrades {
            class_name: "Math".into(),
        },
    );
    assert!(receipt.is_valid());
    let math = Vec::<ClassGrade>::from_bytes(&receipt.data()[0]).unwrap();
    assert_eq!(
        math,
        vec![
            class_grade("Math", 1, 2.0, UNSET_GRADE),
            class_grade("Math", 2, 1.0, UNSET_GRADE),
        ]
    );
}

/// 1. Store an undecodable value at a record's key
/// 2. Validate that querying all records is invalid rather than returning a partial list
/// 3. Validate that changing that record is invalid and leaves the stored value untouched
fn test_corrupt_record(db: Box<dyn Database>) {
    let executor = new_executor(db.clone());
    create(&executor, "Math", 1, 1.0, UNSET_GRADE);

    let key = "\u{0}CLASSGRADE\u{0}Math\u{0}2\u{0}";
    {
        let mut writer = db.get_writer().unwrap();
        writer.overwrite(key.as_bytes(), b"{\"sid\": 2}").unwrap();
        writer.commit().unwrap();
    }

    let receipt = execute(&executor, ClassGradePayload::QueryAllClassGrades);
    assert!(!receipt.is_valid());
    assert!(receipt.data().is_empty());

    let receipt = execute(
        &executor,
        ClassGradePayload::ChangeGrade {
            class_name: "Math".into(),
            sid: 2,
            grade: 9.0,
        },
    );
    assert!(!receipt.is_valid());
    assert_eq!(
        db.get_reader().unwrap().get(key.as_bytes()).unwrap(),
        Some(b"{\"sid\": 2}".to_vec())
    );
}

/// 1. Submit payloads which are malformed or name an unknown function
/// 2. Validate that each produces an invalid receipt
/// 3. Submit a transaction of an unknown version
/// 4. Validate that it cannot be routed
/// 5. Validate that nothing was written
fn test_rejected_transactions(db: Box<dyn Database>) {
    let executor = new_executor(db.clone());

    for payload in vec![
        b"not json".to_vec(),
        serde_json::to_vec(&json!({"function": "deleteClassGrade", "classname": "Math", "sid": 1}))
            .unwrap(),
        serde_json::to_vec(&json!({"function": "createClassGrade", "classname": "", "sid": 1,
            "grade": 1, "makeupgrade": 1}))
        .unwrap(),
    ] {
        let transaction = TransactionBuilder::new()
            .with_family_name(FAMILY_NAME.into())
            .with_family_version(FAMILY_VERSION.into())
            .with_payload(payload)
            .build()
            .unwrap();
        let receipt = executor.execute(&transaction).unwrap();
        assert!(!receipt.is_valid());
    }

    let transaction = TransactionBuilder::new()
        .with_family_name(FAMILY_NAME.into())
        .with_family_version("2.0".into())
        .with_payload(
            ClassGradePayload::InitLedger
                .into_bytes()
                .expect("Unable to serialize payload"),
        )
        .build()
        .unwrap();
    assert!(matches!(
        executor.execute(&transaction),
        Err(ExecutionError::RoutingError { .. })
    ));

    assert_eq!(db.get_reader().unwrap().count().unwrap(), 0);
}

/// 1. Execute initLedger
/// 2. Validate that it succeeds without writing anything
/// 3. Validate that stored records are JSON objects with all four fields
fn test_init_ledger_and_encoding(db: Box<dyn Database>) {
    let executor = new_executor(db.clone());

    let receipt = execute(&executor, ClassGradePayload::InitLedger);
    assert!(receipt.is_valid());
    assert!(receipt.state_changes().is_empty());

    create(&executor, "Math", 7, 9.5, UNSET_GRADE);
    let stored = db
        .get_reader()
        .unwrap()
        .get("\u{0}CLASSGRADE\u{0}Math\u{0}7\u{0}".as_bytes())
        .unwrap()
        .expect("Record not stored");
    assert_eq!(
        serde_json::from_slice::<Value>(&stored).unwrap(),
        json!({"sid": 7, "grade": 9.5, "makeupgrade": -1.0, "classname": "Math"})
    );
}

mod btree {
    use classgrade::database::btree::BTreeDatabase;

    use super::*;

    #[test]
    fn create_and_query() {
        test_create_and_query(Box::new(BTreeDatabase::new()));
    }

    #[test]
    fn key_uniqueness_and_overwrite() {
        test_key_uniqueness_and_overwrite(Box::new(BTreeDatabase::new()));
    }

    #[test]
    fn create_idempotent() {
        test_create_idempotent(Box::new(BTreeDatabase::new()));
    }

    #[test]
    fn updates() {
        test_updates(Box::new(BTreeDatabase::new()));
    }

    #[test]
    fn not_found() {
        test_not_found(Box::new(BTreeDatabase::new()));
    }

    #[test]
    fn scans() {
        test_scans(Box::new(BTreeDatabase::new()));
    }

    #[test]
    fn corrupt_record() {
        test_corrupt_record(Box::new(BTreeDatabase::new()));
    }

    #[test]
    fn rejected_transactions() {
        test_rejected_transactions(Box::new(BTreeDatabase::new()));
    }

    #[test]
    fn init_ledger_and_encoding() {
        test_init_ledger_and_encoding(Box::new(BTreeDatabase::new()));
    }
}
