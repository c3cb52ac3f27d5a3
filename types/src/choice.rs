//! The two choices of a ballot and the tags that identify them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::TypesError;

/// Which of the two ballot choices a vote is for.
///
/// The numeric value is what gets hashed into a commitment, so it is fixed:
/// `1` for the first choice, `2` for the second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChoiceTag {
    First = 1,
    Second = 2,
}

impl ChoiceTag {
    pub const ALL: [ChoiceTag; 2] = [ChoiceTag::First, ChoiceTag::Second];

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// The other choice of the pair.
    pub fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

impl TryFrom<u8> for ChoiceTag {
    type Error = TypesError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            other => Err(TypesError::InvalidChoiceTag(other)),
        }
    }
}

impl fmt::Display for ChoiceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// The immutable pair of labels a ballot is decided between.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawChoices")]
pub struct Choices {
    first: String,
    second: String,
}

/// Unchecked wire form; deserialization goes through [`Choices::new`].
#[derive(Deserialize)]
struct RawChoices {
    first: String,
    second: String,
}

impl TryFrom<RawChoices> for Choices {
    type Error = TypesError;

    fn try_from(raw: RawChoices) -> Result<Self, Self::Error> {
        Choices::new(raw.first, raw.second)
    }
}

impl Choices {
    /// Both labels must be non-empty and distinct, otherwise a label could not
    /// be mapped back to a single tag.
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Result<Self, TypesError> {
        let first = first.into();
        let second = second.into();
        if first.is_empty() || second.is_empty() {
            return Err(TypesError::EmptyChoiceLabel);
        }
        if first == second {
            return Err(TypesError::DuplicateChoiceLabel(first));
        }
        Ok(Self { first, second })
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }

    pub fn label(&self, tag: ChoiceTag) -> &str {
        match tag {
            ChoiceTag::First => &self.first,
            ChoiceTag::Second => &self.second,
        }
    }

    /// Resolve a caller-facing label to its tag (exact match).
    pub fn tag_for(&self, label: &str) -> Option<ChoiceTag> {
        if label == self.first {
            Some(ChoiceTag::First)
        } else if label == self.second {
            Some(ChoiceTag::Second)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_values_are_one_and_two() {
        assert_eq!(ChoiceTag::First.as_u8(), 1);
        assert_eq!(ChoiceTag::Second.as_u8(), 2);
        assert_eq!(ChoiceTag::First.other(), ChoiceTag::Second);
    }

    #[test]
    fn tag_rejects_out_of_range() {
        assert_eq!(ChoiceTag::try_from(0), Err(TypesError::InvalidChoiceTag(0)));
        assert_eq!(ChoiceTag::try_from(3), Err(TypesError::InvalidChoiceTag(3)));
    }

    #[test]
    fn choices_map_labels_both_ways() {
        let choices = Choices::new("cats", "dogs").unwrap();
        assert_eq!(choices.tag_for("cats"), Some(ChoiceTag::First));
        assert_eq!(choices.tag_for("dogs"), Some(ChoiceTag::Second));
        assert_eq!(choices.tag_for("Cats"), None);
        assert_eq!(choices.label(ChoiceTag::Second), "dogs");
    }

    #[test]
    fn choices_reject_empty_and_equal_labels() {
        assert_eq!(Choices::new("", "b"), Err(TypesError::EmptyChoiceLabel));
        assert_eq!(
            Choices::new("same", "same"),
            Err(TypesError::DuplicateChoiceLabel("same".into()))
        );
    }
}
