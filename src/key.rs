//! Sibling identity keys.
//!
//! A [`Key`] is the declared identity of a child among its siblings. When
//! present, the children diff matches old and new nodes by key instead of
//! by position, which is what lets a reordered list keep its host nodes
//! (and their focus, scroll, or animation state) instead of rewriting them.
//!
//! Keys must be unique among siblings. When new siblings share a key, the
//! last one owns it for matching and the earlier ones mount fresh; a warning
//! is logged when duplicate checks are enabled.

use std::fmt;

use compact_str::CompactString;

/// Stable identity token for a VNode among its siblings.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Integer key (row ids, indices from a backing store)
    Int(i64),
    /// String key (slugs, uuids)
    Str(CompactString),
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "Key({n})"),
            Self::Str(s) => write!(f, "Key({s:?})"),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

macro_rules! impl_int_key {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Key {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_int_key!(i8, i16, i32, i64, u8, u16, u32);

impl From<usize> for Key {
    fn from(value: usize) -> Self {
        // Keys beyond i64::MAX fall back to their decimal string.
        i64::try_from(value).map_or_else(|_| Self::Str(value.to_string().into()), Self::Int)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Self::Str(value.into())
    }
}

impl From<CompactString> for Key {
    fn from(value: CompactString) -> Self {
        Self::Str(value)
    }
}
