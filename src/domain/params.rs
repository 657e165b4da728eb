use std::collections::BTreeMap;

use crate::domain::value::{Emptiness, Value};

#[derive(Debug, Clone, Default, PartialEq)]
/// Caller inputs for one endpoint call.
///
/// A property may be present but explicitly undefined (see [`Params::unset`]);
/// this matters for [`Emptiness::Defined`] and when merging over defaults.
pub struct Params(BTreeMap<String, Option<Value>>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Params::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), Some(value.into()));
    }

    /// Declare the property without giving it a value.
    pub fn unset(&mut self, name: impl Into<String>) {
        self.0.insert(name.into(), None);
    }

    /// Value of a defined property.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when no property is declared at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// [`Emptiness::Default`]: no properties. [`Emptiness::Defined`]: every property
    /// is undefined (a `null` value still counts as provided).
    pub fn is_empty_by(&self, mode: Emptiness) -> bool {
        match mode {
            Emptiness::Default => self.0.is_empty(),
            Emptiness::Defined => self.0.values().all(Option::is_none),
        }
    }

    /// Lay `self` over `defaults`. Every property declared by `self` wins, including
    /// explicitly undefined ones.
    pub fn merged_over(&self, defaults: &Params) -> Params {
        let mut merged = defaults.0.clone();
        merged.extend(self.0.iter().map(|(k, v)| (k.clone(), v.clone())));
        Params(merged)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), Some(value.into())))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defined_emptiness_ignores_undefined_properties_only() {
        let mut params = Params::new();
        assert!(params.is_empty_by(Emptiness::Defined));
        assert!(params.is_empty_by(Emptiness::Default));

        params.unset("to");
        assert!(params.is_empty_by(Emptiness::Defined));
        assert!(!params.is_empty_by(Emptiness::Default));

        params.set("text", Value::Null);
        assert!(!params.is_empty_by(Emptiness::Defined));
    }

    #[test]
    fn merge_prefers_caller_values_and_undefined_overrides() {
        let defaults = Params::new().with("country", "NG").with("page", 0);
        let mut caller = Params::new().with("country", "GB");
        caller.unset("page");

        let merged = caller.merged_over(&defaults);
        assert_eq!(merged.get("country"), Some(&Value::from("GB")));
        assert_eq!(merged.get("page"), None);
        assert_eq!(merged.len(), 2);
        assert!(!merged.is_empty_by(Emptiness::Default));
        assert!(!merged.is_empty_by(Emptiness::Defined));
    }

    #[test]
    fn collects_from_pairs() {
        let params: Params = [("limit", 10), ("page", 2)].into_iter().collect();
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("limit"), Some(&Value::from(10)));
    }
}
