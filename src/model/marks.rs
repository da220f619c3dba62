use super::Schema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

/// A set of marks
#[allow(type_alias_bounds)]
pub type MarkSet<S: Schema> = HashSet<S::Mark>;

/// Attributes for a mark, as a JSON object.
pub type Attrs = serde_json::Map<String, Value>;

/// A mark is a piece of information that can be attached to a node, such as it being
/// emphasized, in code font, or a link. It has a type and optionally a set of attributes
/// that provide further information (such as the target of the link).
pub trait Mark<S: Schema<Mark = Self>>:
    Serialize + for<'de> Deserialize<'de> + Debug + Clone + PartialEq + Eq + Hash
{
    /// The type of this mark.
    fn r#type(&self) -> S::MarkType;

    /// Given a set of marks, create a new set which contains this one as
    /// well, in the right position. If this mark is already in the set,
    /// the set itself is returned. If any marks that are set to be
    /// exclusive with this mark are present, those are replaced by this
    /// one.
    fn add_to_set<'a>(&self, set: Cow<'a, MarkSet<S>>) -> Cow<'a, MarkSet<S>> {
        if set.contains(self) {
            return set;
        }
        let mark_type = self.r#type();
        if set
            .iter()
            .any(|other| other.r#type() != mark_type && other.r#type().excludes(mark_type))
        {
            return set;
        }
        let mut copy = set.into_owned();
        copy.retain(|other| !mark_type.excludes(other.r#type()));
        copy.insert(self.clone());
        Cow::Owned(copy)
    }

    /// Remove this mark from the given set, returning a new set. If this
    /// mark is not in the set, the set itself is returned.
    fn remove_from_set<'a>(&self, set: Cow<'a, MarkSet<S>>) -> Cow<'a, MarkSet<S>> {
        if set.contains(self) {
            let mut copy = set.into_owned();
            copy.remove(self);
            Cow::Owned(copy)
        } else {
            set
        }
    }

    /// Test whether this mark is in the given set of marks.
    fn is_in_set(&self, set: &MarkSet<S>) -> bool {
        set.contains(self)
    }

    /// Create a set with just this mark
    fn into_set(self) -> MarkSet<S> {
        let mut set = MarkSet::<S>::new();
        set.insert(self);
        set
    }
}

/// Like nodes, marks (which are associated with nodes to signify
/// things like emphasis or being part of a link) are
/// tagged with type objects, which are instantiated once per `Schema`.
///
/// The serialized form of a mark is expected to be an object tagged with
/// `"type": <name>` and an optional `"attrs"` object, which is what
/// [`MarkType::create`] relies on.
pub trait MarkType<S: Schema<MarkType = Self>>:
    Copy
    + Clone
    + Debug
    + PartialEq
    + Eq
    + PartialOrd
    + Ord
    + Hash
    + Serialize
    + for<'de> Deserialize<'de>
    + 'static
{
    /// The name of the mark type in the schema
    fn name(self) -> &'static str;

    /// All mark types of the schema
    fn all() -> &'static [Self];

    /// Find the mark type with the given name.
    fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|t| t.name() == name)
    }

    /// Whether marks of this type can not coexist with marks of `other`.
    fn excludes(self, other: Self) -> bool {
        self == other
    }

    /// Whether this mark should be active when the cursor is positioned at its end.
    fn inclusive(self) -> bool {
        true
    }

    /// Tests whether there is a mark of this type in the given set.
    fn is_in_set(self, set: &MarkSet<S>) -> Option<&S::Mark> {
        set.iter().find(|mark| mark.r#type() == self)
    }

    /// Remove all marks of this type from the given set.
    fn remove_from_set<'a>(self, set: Cow<'a, MarkSet<S>>) -> Cow<'a, MarkSet<S>> {
        if self.is_in_set(&set).is_some() {
            let mut copy = set.into_owned();
            copy.retain(|mark| mark.r#type() != self);
            Cow::Owned(copy)
        } else {
            set
        }
    }

    /// Create a mark of this type. `attrs` must match the attribute type
    /// of the mark, missing attributes use their defaults.
    fn create(self, attrs: Option<&Attrs>) -> Result<S::Mark, serde_json::Error> {
        let mut repr = Attrs::new();
        repr.insert("type".to_owned(), Value::from(self.name()));
        if let Some(attrs) = attrs {
            repr.insert("attrs".to_owned(), Value::Object(attrs.clone()));
        }
        serde_json::from_value(Value::Object(repr))
    }
}
