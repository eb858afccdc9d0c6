use std::collections::BTreeMap;

use serde_json::Value;

/// Claims of a token before it is issued. Immutable: `with` returns a modified copy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes(BTreeMap<String, Value>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn with(&self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut claims = self.0.clone();
        claims.insert(name.into(), value.into());
        Self(claims)
    }

    /// The `exp` claim, in epoch seconds. Only JSON integers that fit an `i64` count;
    /// a float or out-of-range `exp` yields `None`.
    pub fn expires(&self) -> Option<i64> {
        self.get("exp").and_then(Value::as_i64)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_leaves_original_untouched() {
        let base: Attributes = [("sub", Value::from("alice")), ("exp", Value::from(1_000))]
            .into_iter()
            .collect();
        let extended = base.with("exp", 15_400);
        assert_eq!(base.expires(), Some(1_000));
        assert_eq!(extended.expires(), Some(15_400));
        assert_eq!(extended.get("sub"), Some(&Value::from("alice")));
    }

    #[test]
    fn test_expires_requires_integer() {
        let attrs = Attributes::new().with("exp", "soon");
        assert_eq!(attrs.expires(), None);
        assert_eq!(Attributes::new().expires(), None);
        assert_eq!(Attributes::new().with("exp", 1.7e9).expires(), None);
        assert_eq!(Attributes::new().with("exp", u64::MAX).expires(), None);
    }
}
