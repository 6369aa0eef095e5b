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

use crate::contract::address::split_composite_key;

/// Returns the human readable form of the natural key of a record, `<class_name>_<sid>`.
pub fn normalize_key(class_name: &str, sid: u64) -> String {
    format!("{}_{}", class_name, sid)
}

/// Returns a printable form of a state key: the components of a composite key joined by `/`, or
/// the escaped key itself if it is not a composite key.
pub fn display_key(key: &str) -> String {
    match split_composite_key(key) {
        Ok((object_type, attributes)) => {
            let mut components = vec![object_type];
            components.extend(attributes);
            components.join("/")
        }
        Err(_) => key.escape_debug().to_string(),
    }
}
