//! Parameter sets and their canonical string form.
//!
//! The canonical form joins the values of a parameter set, ordered by key, with
//! `|`. Values are not escaped, so a value containing `|` can make two
//! different sets canonicalize to the same string. Counterparties rely on this
//! exact encoding, so it is kept as is.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ChecksumError, Result};

/// Reserved field carrying the checksum token inside a parameter set.
pub const CHECKSUM_FIELD: &str = "CHECKSUMHASH";

/// Delimiter between canonicalized values and before the salt.
pub const DELIMITER: char = '|';

/// Request or response parameters keyed by field name.
///
/// A value of `None` is an absent parameter and canonicalizes like an empty
/// string. Keys are kept in byte-wise ascending order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet(BTreeMap<String, Option<String>>);

impl ParameterSet {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, returning the previous value if any.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<Option<String>> {
        self.0.insert(key.into(), Some(value.into()))
    }

    /// Record a parameter that is present but has no value.
    pub fn insert_absent(&mut self, key: impl Into<String>) -> Option<Option<String>> {
        self.0.insert(key.into(), None)
    }

    /// Builder-style [`ParameterSet::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Value of a parameter; absent values read as `None`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.as_deref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Remove a parameter, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Option<String>> {
        self.0.remove(key)
    }

    /// A copy of this set without `field`. The original is left untouched.
    pub fn without(&self, field: &str) -> Self {
        let mut copy = self.clone();
        copy.0.remove(field);
        copy
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate parameters in canonical (byte-wise key) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Build a parameter set from a JSON object.
    ///
    /// String values are kept verbatim and `null` becomes an absent value. Any
    /// other value type, or a non-object, is rejected.
    pub fn from_json(value: Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(ChecksumError::invalid_input(format!(
                "expected string or object, but received {}",
                json_type_name(&value)
            )));
        };

        let mut params = Self::new();
        for (key, value) in map {
            match value {
                Value::String(s) => {
                    params.insert(key, s);
                }
                Value::Null => {
                    params.insert_absent(key);
                }
                other => {
                    return Err(ChecksumError::invalid_input(format!(
                        "parameter '{key}' must be a string, but received {}",
                        json_type_name(&other)
                    )))
                }
            }
        }
        Ok(params)
    }

    /// JSON object form of this set, absent values as `null`.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(k, v)| {
                    let value = v.clone().map(Value::String).unwrap_or(Value::Null);
                    (k.clone(), value)
                })
                .collect(),
        )
    }
}

impl<K, V> FromIterator<(K, V)> for ParameterSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), Some(v.into())))
                .collect(),
        )
    }
}

impl From<HashMap<String, String>> for ParameterSet {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<BTreeMap<String, String>> for ParameterSet {
    fn from(map: BTreeMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Normalize one value: absent, empty and any-case `"null"` become empty.
fn normalize(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.eq_ignore_ascii_case("null") => v,
        _ => "",
    }
}

/// Canonical string of a parameter set.
///
/// Values are ordered by key and joined with `|`. The function is pure and
/// total; it does not remove the checksum field, callers strip it first.
pub fn canonicalize(params: &ParameterSet) -> String {
    let mut out = String::new();
    for (i, (_, value)) in params.iter().enumerate() {
        if i > 0 {
            out.push(DELIMITER);
        }
        out.push_str(normalize(value));
    }
    out
}

/// The two input shapes accepted for signing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignaturePayload {
    /// A parameter mapping, canonicalized before hashing.
    Params(ParameterSet),
    /// An already canonical string, hashed as is.
    Raw(String),
}

impl SignaturePayload {
    /// Map a JSON value onto a payload: a string or an object of strings.
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(Self::Raw(s)),
            other => ParameterSet::from_json(other).map(Self::Params),
        }
    }

    /// Canonical string to hash, with the checksum field excluded.
    pub fn canonical(&self) -> Cow<'_, str> {
        match self {
            Self::Params(params) if params.contains_key(CHECKSUM_FIELD) => {
                Cow::Owned(canonicalize(&params.without(CHECKSUM_FIELD)))
            }
            Self::Params(params) => Cow::Owned(canonicalize(params)),
            Self::Raw(s) => Cow::Borrowed(s.as_str()),
        }
    }
}

impl From<ParameterSet> for SignaturePayload {
    fn from(params: ParameterSet) -> Self {
        Self::Params(params)
    }
}

impl From<&ParameterSet> for SignaturePayload {
    fn from(params: &ParameterSet) -> Self {
        Self::Params(params.clone())
    }
}

impl From<String> for SignaturePayload {
    fn from(s: String) -> Self {
        Self::Raw(s)
    }
}

impl From<&str> for SignaturePayload {
    fn from(s: &str) -> Self {
        Self::Raw(s.to_string())
    }
}
