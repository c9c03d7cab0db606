//! message/fields.rs
//! Ordered field storage shared by draft and final messages.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::schema::{FieldDef, LayoutField, MessageType};
use crate::message::types::{MessageError, MetaHeader, WfObject};

/// One field of a message layout with its current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageField {
    pub name: String,
    pub def: &'static FieldDef,
    pub value: String,
}

/// Fields in layout order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    fields: Vec<MessageField>,
}

impl FieldSet {
    /// Empty values for every field of `layout`.
    pub(crate) fn from_layout(layout: Vec<LayoutField>) -> Self {
        let fields = layout
            .into_iter()
            .map(|lf| MessageField { name: lf.name, def: lf.def, value: String::new() })
            .collect();
        Self { fields }
    }

    /// New layout carrying over values of fields that keep their name.
    pub(crate) fn relayout(&self, layout: Vec<LayoutField>) -> Self {
        let mut next = Self::from_layout(layout);
        for field in &mut next.fields {
            if let Some(value) = self.get(&field.name) {
                field.value = value.to_string();
            }
        }
        next
    }

    pub(crate) fn push(&mut self, field: &LayoutField, value: String) {
        self.fields.push(MessageField { name: field.name.clone(), def: field.def, value });
    }

    /// Set an existing field; false when the name is not in the layout.
    pub(crate) fn set(&mut self, name: &str, value: &str) -> bool {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => {
                field.value = value.to_string();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.iter().find(|f| f.name == name).map(|f| f.value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &MessageField> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn to_map(&self) -> FieldMap {
        FieldMap(self.fields.iter().map(|f| (f.name.clone(), f.value.clone())).collect())
    }
}

/// Ordered name → value mapping of the human format.
///
/// Serialises as a JSON object keeping insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap(pub Vec<(String, String)>);

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    /// Insert or replace, keeping the position of an existing key.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let (name, value) = (name.into(), value.into());
        match self.0.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = FieldMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FieldMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldMapVisitor;

        impl<'de> Visitor<'de> for FieldMapVisitor {
            type Value = FieldMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<FieldMap, A::Error> {
                let mut map = FieldMap::new();
                while let Some((k, v)) = access.next_entry::<String, String>()? {
                    map.insert(k, v);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(FieldMapVisitor)
    }
}

/// Read-only access shared by draft and final messages.
pub trait MessageFields {
    fn message_type(&self) -> MessageType;

    fn header(&self) -> &FieldSet;

    fn body(&self) -> &FieldSet;

    /// Current value of a header or body field.
    fn get(&self, name: &str) -> Option<&str> {
        self.header().get(name).or_else(|| self.body().get(name))
    }

    /// All fields, header first.
    fn fields(&self) -> Box<dyn Iterator<Item = &MessageField> + '_> {
        Box::new(self.header().iter().chain(self.body().iter()))
    }

    /// Metadata for `to_object`; none by default.
    fn meta_header(&self) -> Option<MetaHeader> {
        None
    }

    /// Snapshot in the human format.
    fn to_object(&self) -> WfObject {
        WfObject {
            meta_header: self.meta_header(),
            message_header: self.header().to_map(),
            message_body: self.body().to_map(),
        }
    }

    fn to_json(&self) -> Result<String, MessageError> {
        self.to_object().to_json()
    }

    /// Every raw value in layout order without delimiters.
    fn concat_values(&self) -> String {
        self.fields().map(|f| f.value.as_str()).collect()
    }
}
