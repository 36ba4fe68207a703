//! Single-or-many reader results

use serde::Serialize;

/// A reader result: the bare value for a one-target collection, an
/// index-aligned sequence otherwise (including empty collections)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Normalized<T> {
    Single(T),
    Many(Vec<T>),
}

impl<T> Normalized<T> {
    /// Apply the single-or-many rule to per-target values
    pub fn from_vec(mut values: Vec<T>) -> Self {
        if values.len() == 1 {
            if let Some(value) = values.pop() {
                return Self::Single(value);
            }
        }
        Self::Many(values)
    }

    pub fn is_single(&self) -> bool {
        matches!(self, Self::Single(_))
    }

    pub fn single(&self) -> Option<&T> {
        match self {
            Self::Single(value) => Some(value),
            Self::Many(_) => None,
        }
    }

    pub fn into_single(self) -> Option<T> {
        match self {
            Self::Single(value) => Some(value),
            Self::Many(_) => None,
        }
    }

    pub fn many(&self) -> Option<&[T]> {
        match self {
            Self::Single(_) => None,
            Self::Many(values) => Some(values),
        }
    }

    /// Per-target values regardless of shape
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Single(value) => vec![value],
            Self::Many(values) => values,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Many(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Normalized<U> {
        match self {
            Self::Single(value) => Normalized::Single(f(value)),
            Self::Many(values) => Normalized::Many(values.into_iter().map(f).collect()),
        }
    }
}

impl<T> From<Vec<T>> for Normalized<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_vec(values)
    }
}

impl<T> IntoIterator for Normalized<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_and_many() {
        assert_eq!(Normalized::from_vec(vec![1]), Normalized::Single(1));
        assert_eq!(Normalized::from_vec(vec![1, 2]), Normalized::Many(vec![1, 2]));
        assert_eq!(Normalized::<u8>::from_vec(vec![]), Normalized::Many(vec![]));
    }

    #[test]
    fn test_accessors() {
        let one = Normalized::from_vec(vec!["a"]);
        assert!(one.is_single());
        assert_eq!(one.single(), Some(&"a"));
        assert_eq!(one.len(), 1);

        let many = Normalized::from_vec(vec!["a", "b"]);
        assert_eq!(many.many(), Some(&["a", "b"][..]));
        assert_eq!(many.clone().into_vec(), vec!["a", "b"]);
        assert_eq!(many.map(str::len), Normalized::Many(vec![1, 1]));
    }

    #[test]
    fn test_serializes_untagged() {
        let one = serde_json::to_string(&Normalized::from_vec(vec!["x"])).unwrap();
        let many = serde_json::to_string(&Normalized::from_vec(vec!["x", "y"])).unwrap();
        assert_eq!(one, "\"x\"");
        assert_eq!(many, "[\"x\",\"y\"]");
    }
}
