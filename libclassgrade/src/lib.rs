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

//! A transaction family for recording per-student, per-class grade records.
//!
//! Grade records live in key-value state under composite keys built from the `CLASSGRADE`
//! namespace, the class name and the student id. The family only depends on the
//! [`TransactionContext`](handler/trait.TransactionContext.html) capability for reading and
//! writing state; the in-memory database, context and executor modules provide a host for
//! running the family without an external ledger.

#[cfg(feature = "context-database")]
pub mod context;
pub mod contract;
pub mod database;
#[cfg(feature = "execution")]
pub mod execution;
pub mod families;
pub mod handler;
pub mod protocol;

#[macro_use]
extern crate log;
