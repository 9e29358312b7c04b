use std::fmt::{Display, Formatter};

use unordered_pair::UnorderedPair;

/// An undirected link between two tiles, identified by name.
///
/// The endpoints are stored in lexicographic order, so `Link::new("a", "b") == Link::new("b", "a")`
/// and ordering links sorts them by their (smaller, larger) name pair.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Link {
    first: String,
    second: String,
}

impl Link {
    /// A link between `a` and `b`, in either order.
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    /// The lexicographically smaller endpoint.
    pub fn first(&self) -> &str {
        &self.first
    }

    /// The lexicographically larger endpoint.
    pub fn second(&self) -> &str {
        &self.second
    }

    /// The endpoints as an [`UnorderedPair`], the form builders take.
    pub fn as_pair(&self) -> UnorderedPair<&str> {
        UnorderedPair(self.first.as_str(), self.second.as_str())
    }
}

impl<T: Into<String>> From<UnorderedPair<T>> for Link {
    fn from(value: UnorderedPair<T>) -> Self {
        let UnorderedPair(a, b) = value;
        Self::new(a, b)
    }
}

impl<T: Into<String>> From<(T, T)> for Link {
    fn from(value: (T, T)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl Display for Link {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ↔ {}", self.first, self.second)
    }
}
