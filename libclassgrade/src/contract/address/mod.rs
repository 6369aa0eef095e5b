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

//! Composite keys: a single state address built from an object type and an ordered list of
//! attributes.
//!
//! A composite key is encoded as
//!
//! ```text
//! U+0000 object_type U+0000 (attribute U+0000)*
//! ```
//!
//! Neither the object type nor any attribute may contain `U+0000` or `U+10FFFF`. Every component
//! is terminated by `U+0000`, so the encoding is injective and a key built from a prefix of the
//! attributes is a prefix of every key that extends it, which makes partial keys usable as range
//! scan bounds.

mod error;

pub use crate::contract::address::error::AddresserError;

/// Separator (and leading marker) of composite key components.
pub const COMPOSITE_KEY_NAMESPACE: char = '\u{0}';

/// The largest unicode scalar value; appended to a partial key to form an exclusive range end.
pub const MAX_UNICODE_RUNE: char = '\u{10FFFF}';

/// Returns the composite key for the given object type and attributes.
///
/// # Arguments
///
/// * `object_type` - The namespace of the key
/// * `attributes` - The ordered components of the key
///
/// # Errors
///
/// Returns `AddresserError::InvalidCharacter` if any component contains `U+0000` or `U+10FFFF`.
pub fn create_composite_key(
    object_type: &str,
    attributes: &[&str],
) -> Result<String, AddresserError> {
    validate_component(object_type)?;

    let mut key = String::with_capacity(
        object_type.len() + attributes.iter().map(|attr| attr.len() + 1).sum::<usize>() + 2,
    );
    key.push(COMPOSITE_KEY_NAMESPACE);
    key.push_str(object_type);
    key.push(COMPOSITE_KEY_NAMESPACE);

    for attribute in attributes {
        validate_component(attribute)?;
        key.push_str(attribute);
        key.push(COMPOSITE_KEY_NAMESPACE);
    }

    Ok(key)
}

/// Splits a composite key into its object type and attributes.
///
/// # Errors
///
/// Returns `AddresserError::MalformedKey` if the key does not start and end with the component
/// separator.
pub fn split_composite_key(key: &str) -> Result<(String, Vec<String>), AddresserError> {
    let inner = key
        .strip_prefix(COMPOSITE_KEY_NAMESPACE)
        .and_then(|rest| rest.strip_suffix(COMPOSITE_KEY_NAMESPACE))
        .ok_or_else(|| {
            AddresserError::MalformedKey(format!("{:?} is not a composite key", key))
        })?;

    let mut components = inner.split(COMPOSITE_KEY_NAMESPACE).map(String::from);
    // split always yields at least one item, even for an empty string
    let object_type = components.next().unwrap_or_default();

    Ok((object_type, components.collect()))
}

/// Returns the `[start, end)` range covering every composite key that begins with the given
/// object type and leading attributes.
pub fn partial_composite_key_range(
    object_type: &str,
    attributes: &[&str],
) -> Result<(String, String), AddresserError> {
    let start = create_composite_key(object_type, attributes)?;
    let mut end = start.clone();
    end.push(MAX_UNICODE_RUNE);

    Ok((start, end))
}

fn validate_component(component: &str) -> Result<(), AddresserError> {
    if let Some(c) = component
        .chars()
        .find(|c| *c == COMPOSITE_KEY_NAMESPACE || *c == MAX_UNICODE_RUNE)
    {
        return Err(AddresserError::InvalidCharacter(format!(
            "{:?} contains reserved character {:?}",
            component, c
        )));
    }

    Ok(())
}
