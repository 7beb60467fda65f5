//! Ordered named measures.

use std::fmt;

use crate::greeks::Greeks;

/// Round half away from zero to `decimals` places.
#[inline]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Named measures in insertion order (`price`, `proba`, `delta`, ...).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultSet {
    entries: Vec<(String, f64)>,
}

impl ResultSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a measure, replacing it in place if already present.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Adds the five Greeks.
    pub fn insert_greeks(&mut self, greeks: &Greeks) {
        for (name, value) in greeks.measures() {
            self.insert(name, value);
        }
    }

    /// Value of a measure.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, v)| v)
    }

    /// `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    /// Number of measures.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy with every value rounded to `decimals` places.
    pub fn rounded(&self, decimals: u32) -> Self {
        self.iter()
            .map(|(n, v)| (n.to_string(), round_to(v, decimals)))
            .collect()
    }

    /// `self − baseline` for every measure present in both, in `self` order.
    pub fn difference(&self, baseline: &ResultSet) -> Self {
        self.iter()
            .filter_map(|(n, v)| baseline.get(n).map(|old| (n.to_string(), v - old)))
            .collect()
    }
}

impl FromIterator<(String, f64)> for ResultSet {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}

impl fmt::Display for ResultSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.entries.iter().map(|(n, _)| n.len()).max().unwrap_or(0);
        for (name, value) in &self.entries {
            writeln!(f, "{name:<width$}  {value}")?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ResultSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
