/*
 * Copyright 2018 Intel Corporation
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
 * ------------------------------------------------------------------------------
 */

//! Traits for reading and writing from databases.
//!
//! The database operates on key-value entries where both keys and values are opaque bytes.
//!
//! # Readers and Writers
//!
//! Both the DatabaseReader and DatabaseWriter traits imply that the underlying database
//! implementation maintains transactional consistency throughout their lifetimes.  A cursor
//! iterates over the entries as they were when it was created; later changes to the underlying
//! data do not alter its iteration.
//!
//! Changes made through a DatabaseWriter are only visible to other readers once the writer's
//! commit method is called. Dropping a writer without committing discards its changes.

#[cfg(feature = "database-btree")]
pub mod btree;
mod error;

pub use crate::database::error::DatabaseError;

pub type DatabaseCursor = Box<dyn Iterator<Item = (Vec<u8>, Vec<u8>)>>;

pub trait Database: Sync + Send {
    fn get_reader<'a>(&'a self) -> Result<Box<dyn DatabaseReader + 'a>, DatabaseError>;
    fn get_writer<'a>(&'a self) -> Result<Box<dyn DatabaseWriter + 'a>, DatabaseError>;
    fn clone_box(&self) -> Box<dyn Database>;
}

impl Clone for Box<dyn Database> {
    fn clone(&self) -> Box<dyn Database> {
        self.clone_box()
    }
}

/// A DatabaseReader provides read access to a database instance.
pub trait DatabaseReader {
    /// Returns the bytes stored at the given key, if found.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, DatabaseError>;

    /// Returns a cursor over the entries with keys in `[start, end)`, in the natural key order.
    /// An empty `start` or `end` leaves that side of the range unbounded.
    fn range_cursor(&self, start: &[u8], end: &[u8]) -> Result<DatabaseCursor, DatabaseError>;

    /// Returns the number of entries in the main database.
    fn count(&self) -> Result<usize, DatabaseError>;
}

/// A DatabaseWriter provides write access to a database instance, on top of read access which
/// reflects its own uncommitted changes.
pub trait DatabaseWriter: DatabaseReader {
    /// Writes the given key/value pair. If the key/value pair already exists,
    /// it overwrites the old value
    fn overwrite(&mut self, key: &[u8], value: &[u8]) -> Result<(), DatabaseError>;

    // Commit changes to database
    fn commit(self: Box<Self>) -> Result<(), DatabaseError>;
}
