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

//! The class grade transaction family.
//!
//! Stores one `ClassGrade` record per student and class under the composite key
//! `("CLASSGRADE", [class_name, sid])`. The store operations in [`store`](store/index.html) run
//! against any `TransactionContext`; `ClassGradeTransactionHandler` exposes them as the contract
//! functions of the `classgrade` family.

mod addressing;
mod error;
mod handler;
#[cfg(test)]
mod mock;
pub mod store;

pub use self::addressing::{display_key, normalize_key};
pub use self::error::ClassGradeError;
pub use self::handler::ClassGradeTransactionHandler;

pub const FAMILY_NAME: &str = "classgrade";
pub const FAMILY_VERSION: &str = "1.0";

/// Object type of every class grade composite key.
pub const CLASSGRADE_NAMESPACE: &str = "CLASSGRADE";
