//! The structured input accepted by every serializer.

use std::collections::{BTreeMap, btree_map};

use serde::{Serialize, Serializer};

/// The semantic kind of a [`Column`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// Free-form text.
    String,
    /// A point-in-time measurement.
    Gauge,
    /// A timer-like metric.
    Metric,
    /// A monotonically increasing count.
    Counter,
}

/// A typed field value.
///
/// The payload shape is fixed by the variant, so a numeric kind can never carry text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Column {
    /// Free-form text.
    String(String),
    /// A point-in-time measurement.
    Gauge(i64),
    /// A timer-like metric.
    Metric(i64),
    /// A monotonically increasing count.
    Counter(i64),
}

impl Column {
    /// Returns the kind of this column.
    pub const fn column_type(&self) -> ColumnType {
        match self {
            Self::String(_) => ColumnType::String,
            Self::Gauge(_) => ColumnType::Gauge,
            Self::Metric(_) => ColumnType::Metric,
            Self::Counter(_) => ColumnType::Counter,
        }
    }

    /// Returns the text payload, if this is a `String` column.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the numeric payload, if this is a `Gauge`, `Metric` or `Counter` column.
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::String(_) => None,
            Self::Gauge(value) | Self::Metric(value) | Self::Counter(value) => Some(*value),
        }
    }
}

impl From<&str> for Column {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Column {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

// The kind tag is never part of the serialized form.
impl Serialize for Column {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::String(value) => serializer.serialize_str(value),
            Self::Gauge(value) | Self::Metric(value) | Self::Counter(value) => {
                serializer.serialize_i64(*value)
            }
        }
    }
}

/// A mapping of field name to [`Column`].
///
/// Field order carries no meaning. Iteration is sorted by name so that encoding the same record
/// twice yields identical bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, Column>);

impl Record {
    /// Creates an empty `Record`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a field, returning the previous column stored under that name.
    pub fn insert(&mut self, key: impl Into<String>, column: impl Into<Column>) -> Option<Column> {
        self.0.insert(key.into(), column.into())
    }

    /// Gets the column stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Column> {
        self.0.get(key)
    }

    /// Removes the field stored under `key`.
    pub fn remove(&mut self, key: &str) -> Option<Column> {
        self.0.remove(key)
    }

    /// Returns `true` if the record holds a field named `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over all fields.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Column> {
        self.0.iter()
    }

    /// Iterates over the field names.
    pub fn keys(&self) -> btree_map::Keys<'_, String, Column> {
        self.0.keys()
    }
}

impl From<BTreeMap<String, Column>> for Record {
    fn from(fields: BTreeMap<String, Column>) -> Self {
        Self(fields)
    }
}

impl<K: Into<String>> FromIterator<(K, Column)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, Column)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a Column);
    type IntoIter = btree_map::Iter<'a, String, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Record {
    type Item = (String, Column);
    type IntoIter = btree_map::IntoIter<String, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Builds a [`Record`] from `key => column` pairs.
///
/// ```
/// use codecs::{record, Column};
///
/// let record = record! {
///     "message" => "hello",
///     "requests" => Column::Counter(3),
/// };
/// assert_eq!(record.len(), 2);
/// ```
#[macro_export]
macro_rules! record {
    () => { $crate::Record::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut record = $crate::Record::new();
        $(
            record.insert($key, $value);
        )+
        record
    }};
}
