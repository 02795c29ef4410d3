//! Low-level PDF objects used by the writer.

use std::collections::BTreeMap;
use std::fmt;

/// Identifies an indirect PDF object (`number generation R`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId {
    number: u32,
    generation: u16,
}

impl ObjectId {
    pub fn new(number: u32, generation: u16) -> Self {
        Self { number, generation }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn generation(&self) -> u16 {
        self.generation
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} R", self.number, self.generation)
    }
}

#[derive(Debug, Clone)]
pub enum Object {
    Integer(i64),
    Real(f64),
    String(String),
    Name(String),
    Array(Vec<Object>),
    Dictionary(Dictionary),
    Stream(Dictionary, Vec<u8>),
    Reference(ObjectId),
}

/// A PDF dictionary. Keys are kept sorted so the emitted bytes are
/// deterministic for a given document.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: BTreeMap<String, Object>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Object>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Object> {
        self.entries.get(key)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &Object)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<i64> for Object {
    fn from(i: i64) -> Self {
        Object::Integer(i)
    }
}

impl From<f64> for Object {
    fn from(f: f64) -> Self {
        Object::Real(f)
    }
}

impl From<String> for Object {
    fn from(s: String) -> Self {
        Object::String(s)
    }
}

impl From<&str> for Object {
    fn from(s: &str) -> Self {
        Object::String(s.to_string())
    }
}

impl From<Vec<Object>> for Object {
    fn from(v: Vec<Object>) -> Self {
        Object::Array(v)
    }
}

impl From<Dictionary> for Object {
    fn from(d: Dictionary) -> Self {
        Object::Dictionary(d)
    }
}

impl From<ObjectId> for Object {
    fn from(id: ObjectId) -> Self {
        Object::Reference(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id_display() {
        let id = ObjectId::new(7, 0);
        assert_eq!(id.to_string(), "7 0 R");
        assert_eq!(id.number(), 7);
        assert_eq!(id.generation(), 0);
    }

    #[test]
    fn test_dictionary_set_get() {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name("Page".to_string()));
        dict.set("Count", 3i64);

        assert_eq!(dict.len(), 2);
        assert!(matches!(dict.get("Count"), Some(Object::Integer(3))));
        assert!(dict.get("Missing").is_none());
    }

    #[test]
    fn test_dictionary_entries_sorted() {
        let mut dict = Dictionary::new();
        dict.set("Zeta", 1i64);
        dict.set("Alpha", 2i64);

        let keys: Vec<&String> = dict.entries().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Alpha", "Zeta"]);
    }

    #[test]
    fn test_object_from_conversions() {
        assert!(matches!(Object::from(1i64), Object::Integer(1)));
        assert!(matches!(Object::from(2.5f64), Object::Real(_)));
        assert!(matches!(Object::from("text"), Object::String(_)));
        assert!(matches!(
            Object::from(ObjectId::new(1, 0)),
            Object::Reference(_)
        ));
    }
}
