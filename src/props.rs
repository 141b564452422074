//! Prop system for VNodes
//!
//! [`Props`] is an ordered set of `(name, value)` pairs with typed values.
//! What a prop *means* (attribute, DOM property, event binding) is the host
//! adapter's business; the engine only computes deltas with [`Props::diff`]
//! and forwards them through
//! [`HostOps::patch_prop`](crate::HostOps::patch_prop).

use std::fmt;

use compact_str::CompactString;
use smallvec::SmallVec;

/// Prop name.
pub type PropKey = CompactString;

/// Opaque handle to an event listener registered with the host adapter.
///
/// Two listener props are equal iff they carry the same handle, so a
/// re-render that keeps the handle produces no delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Typed prop value.
///
/// Floats compare by bit pattern, so `NaN` equals itself and an unchanged
/// tree never re-patches it.
#[derive(Debug, Clone)]
pub enum PropValue {
    /// String value
    Str(CompactString),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value (e.g. `disabled`, `checked`)
    Bool(bool),
    /// Event listener handle
    Listener(ListenerId),
}

impl PropValue {
    /// Get the string payload, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for PropValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Listener(a), Self::Listener(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for PropValue {}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Listener(id) => write!(f, "listener#{}", id.0),
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        Self::Str(value.into())
    }
}

impl From<CompactString> for PropValue {
    fn from(value: CompactString) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<ListenerId> for PropValue {
    fn from(value: ListenerId) -> Self {
        Self::Listener(value)
    }
}

// =============================================================================
// Props
// =============================================================================

/// Props of one VNode: unique names in insertion order.
///
/// Most nodes carry a handful of props, so they are stored inline and
/// looked up by a linear scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Props(SmallVec<[(PropKey, PropValue); 4]>);

impl Props {
    /// Create an empty prop set.
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|(k, _)| k == name)
    }

    /// Value of `name`, if set.
    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.position(name).map(|i| &self.0[i].1)
    }

    /// Whether `name` is set.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Set `name`, replacing its value in place if it is already present.
    pub fn set(&mut self, name: impl Into<PropKey>, value: impl Into<PropValue>) {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(i) => self.0[i].1 = value,
            None => self.0.push((name, value)),
        }
    }

    /// Unset `name`, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<PropValue> {
        self.position(name).map(|i| self.0.remove(i).1)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Changes needed to go from `self` to `next`.
    ///
    /// Sets come first in `next` order, then removals in `self` order.
    ///
    /// ```
    /// use tola_reconcile::Props;
    ///
    /// let old: Props = [("class", "row"), ("title", "a")].into_iter().collect();
    /// let new: Props = [("class", "row")].into_iter().collect();
    ///
    /// let deltas = old.diff(&new);
    /// assert_eq!(deltas.len(), 1);
    /// assert_eq!((deltas[0].key, deltas[0].new), ("title", None));
    /// ```
    pub fn diff<'a>(&'a self, next: &'a Props) -> SmallVec<[PropDelta<'a>; 4]> {
        let sets = next.iter().filter_map(|(key, value)| {
            let old = self.get(key);
            (old != Some(value)).then_some(PropDelta {
                key,
                old,
                new: Some(value),
            })
        });
        let removals = self
            .iter()
            .filter(|(key, _)| !next.contains(key))
            .map(|(key, value)| PropDelta {
                key,
                old: Some(value),
                new: None,
            });
        sets.chain(removals).collect()
    }
}

impl<K: Into<PropKey>, V: Into<PropValue>> FromIterator<(K, V)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Self::new();
        for (name, value) in iter {
            props.set(name, value);
        }
        props
    }
}

/// One prop change between two renders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropDelta<'a> {
    /// Prop name
    pub key: &'a str,
    /// Previous value (`None` when the prop is new)
    pub old: Option<&'a PropValue>,
    /// Next value (`None` means remove)
    pub new: Option<&'a PropValue>,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_keeps_names_unique_and_ordered() {
        let mut props = Props::new();
        props.set("id", "main");
        props.set("tabindex", 2);
        props.set("id", "wrapper");

        let names: Vec<_> = props.iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["id", "tabindex"]);
        assert_eq!(props.get("id").and_then(PropValue::as_str), Some("wrapper"));
        assert_eq!(props.get("tabindex"), Some(&PropValue::Int(2)));
        assert!(!props.contains("href"));

        assert_eq!(props.remove("id"), Some(PropValue::from("wrapper")));
        assert_eq!(props.remove("id"), None);
        assert_eq!(props.len(), 1);
    }

    #[test]
    fn test_collect_last_duplicate_wins() {
        let props: Props = [("a", 1), ("b", 2), ("a", 3)].into_iter().collect();
        assert_eq!(props.len(), 2);
        assert_eq!(props.get("a"), Some(&PropValue::Int(3)));
    }

    #[test]
    fn test_diff_identical_is_empty() {
        let mut a = Props::new();
        a.set("class", "row");
        a.set("checked", true);
        let b = a.clone();
        assert!(a.diff(&b).is_empty());
    }

    #[test]
    fn test_diff_nan_is_stable() {
        let a: Props = [("opacity", f64::NAN)].into_iter().collect();
        let b: Props = [("opacity", f64::NAN)].into_iter().collect();
        assert!(a.diff(&b).is_empty());
        assert_eq!(a, b);

        let zero: Props = [("opacity", 0.0)].into_iter().collect();
        let neg_zero: Props = [("opacity", -0.0)].into_iter().collect();
        assert_eq!(zero.diff(&neg_zero).len(), 1);
    }

    #[test]
    fn test_diff_set_and_remove() {
        let old: Props = [
            ("class", PropValue::from("row")),
            ("title", PropValue::from("old")),
            ("hidden", PropValue::Bool(true)),
        ]
        .into_iter()
        .collect();
        let new: Props = [
            ("title", PropValue::from("new")),
            ("class", PropValue::from("row")),
            ("onclick", PropValue::from(ListenerId(9))),
        ]
        .into_iter()
        .collect();

        let deltas = old.diff(&new);
        let keys: Vec<_> = deltas.iter().map(|d| (d.key, d.new.is_some())).collect();
        assert_eq!(keys, vec![("title", true), ("onclick", true), ("hidden", false)]);

        assert_eq!(deltas[0].old, Some(&PropValue::from("old")));
        assert_eq!(deltas[1].old, None);
        assert_eq!(deltas[2].old, Some(&PropValue::Bool(true)));
    }

    #[test]
    fn test_listener_identity() {
        let a: Props = [("onclick", ListenerId(1))].into_iter().collect();
        let b: Props = [("onclick", ListenerId(2))].into_iter().collect();
        assert_eq!(a.diff(&b).len(), 1);
    }
}
