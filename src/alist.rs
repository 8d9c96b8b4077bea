//! Association lists: a `Vec` of key/value pairs keeping insertion
//! order, with map-like replacing inserts. Lookups are linear, which
//! is fine for the handful of entries path maps and alias tables
//! have. Serializes as a map, and deserializes from one keeping the
//! document order (serde_json's `Map` would sort the keys).

use std::{borrow::Borrow, fmt, marker::PhantomData};

use serde::{Serialize, Serializer, Deserialize, Deserializer,
            ser::SerializeMap, de::{Visitor, MapAccess}};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AList<K, V>(pub Vec<(K, V)>);

impl<K, V> Default for AList<K, V> {
    fn default() -> Self {
        AList(Vec::new())
    }
}

impl<K, V> AList<K, V> {
    pub fn new() -> Self {
        AList(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.0.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.0.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.0.iter().map(|(_, v)| v)
    }

    pub fn retain(&mut self, mut f: impl FnMut(&K, &V) -> bool) {
        self.0.retain(|(k, v)| f(k, v))
    }
}

impl<K: PartialEq, V> AList<K, V> {
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where K: Borrow<Q>, Q: PartialEq + ?Sized
    {
        self.0.iter().find(|(k, _)| k.borrow() == key).map(|(_, v)| v)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where K: Borrow<Q>, Q: PartialEq + ?Sized
    {
        self.0.iter_mut().find(|(k, _)| k.borrow() == key).map(|(_, v)| v)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where K: Borrow<Q>, Q: PartialEq + ?Sized
    {
        self.get(key).is_some()
    }

    /// Replaces the value of an existing key in place (the entry
    /// keeps its position), otherwise appends. Returns the old value.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some((_, v)) = self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(std::mem::replace(v, value))
        } else {
            self.0.push((key, value));
            None
        }
    }
}

impl<K: PartialEq, V> FromIterator<(K, V)> for AList<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut res = AList::new();
        for (k, v) in iter {
            res.insert(k, v);
        }
        res
    }
}

impl<K, V> IntoIterator for AList<K, V> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a AList<K, V> {
    type Item = &'a (K, V);
    type IntoIter = std::slice::Iter<'a, (K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Borrow<str>, V: Serialize> Serialize for AList<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry::<str, V>(k.borrow(), v)?;
        }
        map.end()
    }
}

struct AListVisitor<K, V>(PhantomData<(K, V)>);

impl<'de, K, V> Visitor<'de> for AListVisitor<K, V>
where K: From<String> + PartialEq,
      V: Deserialize<'de>
{
    type Value = AList<K, V>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map with string keys")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut res = AList::new();
        while let Some((k, v)) = access.next_entry::<String, V>()? {
            res.insert(K::from(k), v);
        }
        Ok(res)
    }
}

impl<'de, K, V> Deserialize<'de> for AList<K, V>
where K: From<String> + PartialEq,
      V: Deserialize<'de>
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(AListVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_insert_keeps_position() {
        let mut l: AList<&str, i32> = AList::new();
        assert_eq!(l.insert("a", 1), None);
        assert_eq!(l.insert("b", 2), None);
        assert_eq!(l.insert("a", 3), Some(1));
        assert_eq!(l.0, vec![("a", 3), ("b", 2)]);
        assert_eq!(l.get("b"), Some(&2));
        assert_eq!(l.get("c"), None);
    }

    #[test]
    fn t_json_order() {
        let l: AList<String, i32> = serde_json::from_str(
            r#"{"z": 1, "a": 2, "m": 3, "a": 4}"#).unwrap();
        assert_eq!(l.keys().map(|k| k.as_str()).collect::<Vec<_>>(),
                   vec!["z", "a", "m"]);
        assert_eq!(l.get("a"), Some(&4));
        assert_eq!(serde_json::to_string(&l).unwrap(),
                   r#"{"z":1,"a":4,"m":3}"#);
    }
}
