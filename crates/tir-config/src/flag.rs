//! Compiler flag entity and the ordered, identifier-unique flag set.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Scalar payload carried by a flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl FlagValue {
    fn from_toml(value: &toml::Value) -> Result<Self, ConfigError> {
        match value {
            toml::Value::String(s) => Ok(FlagValue::Str(s.clone())),
            toml::Value::Integer(i) => Ok(FlagValue::Int(*i)),
            toml::Value::Boolean(b) => Ok(FlagValue::Bool(*b)),
            other => Err(ConfigError::InvalidFlag(format!(
                "unsupported flag value: {other}"
            ))),
        }
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagValue::Str(s) => write!(f, "{s}"),
            FlagValue::Int(i) => write!(f, "{i}"),
            FlagValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for FlagValue {
    fn from(s: &str) -> Self {
        FlagValue::Str(s.to_string())
    }
}

impl From<String> for FlagValue {
    fn from(s: String) -> Self {
        FlagValue::Str(s)
    }
}

impl From<i64> for FlagValue {
    fn from(i: i64) -> Self {
        FlagValue::Int(i)
    }
}

impl From<bool> for FlagValue {
    fn from(b: bool) -> Self {
        FlagValue::Bool(b)
    }
}

/// One compiler flag: an ordering position, an identifier (including its
/// leading dashes), and an optional value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flag {
    position: i64,
    id: String,
    value: Option<FlagValue>,
}

impl Flag {
    pub fn new(position: i64, id: impl Into<String>, value: Option<FlagValue>) -> Self {
        Self {
            position,
            id: id.into(),
            value,
        }
    }

    /// Build a flag from a TOML sequence.
    ///
    /// A pair is `(position, id)`, a triplet `(position, id, value)`; any
    /// other arity is rejected with [`ConfigError::UnsupportedArity`].
    pub fn from_sequence(parts: &[toml::Value]) -> Result<Self, ConfigError> {
        match parts {
            [position, id] => Ok(Flag::new(position_of(position)?, id_of(id)?, None)),
            [position, id, value] => Ok(Flag::new(
                position_of(position)?,
                id_of(id)?,
                Some(FlagValue::from_toml(value)?),
            )),
            _ => Err(ConfigError::UnsupportedArity(parts.len())),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn position(&self) -> i64 {
        self.position
    }

    pub fn value(&self) -> Option<&FlagValue> {
        self.value.as_ref()
    }
}

/// Renders `id` alone for value-less flags, `id=value` otherwise.
impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={}", self.id, value),
            None => write!(f, "{}", self.id),
        }
    }
}

fn position_of(value: &toml::Value) -> Result<i64, ConfigError> {
    value
        .as_integer()
        .ok_or_else(|| ConfigError::InvalidFlag(format!("position must be an integer, got {value}")))
}

fn id_of(value: &toml::Value) -> Result<String, ConfigError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ConfigError::InvalidFlag(format!("id must be a string, got {value}")))
}

/// A set of flags where the identifier is the sole deduplication key.
///
/// Position and value never participate in identity: inserting a flag whose
/// identifier is already present overwrites the stored flag entirely.
/// Rendering orders ascending by position; ties keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlagSet {
    flags: Vec<Flag>,
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a flag, overwriting any flag with the same identifier.
    pub fn insert(&mut self, flag: Flag) {
        match self.flags.iter_mut().find(|f| f.id == flag.id) {
            Some(existing) => *existing = flag,
            None => self.flags.push(flag),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Flag> {
        self.flags.iter().find(|f| f.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Flag> {
        self.flags.iter()
    }

    /// One past the highest stored position, never below zero. Used to
    /// append flags after everything already registered.
    pub fn next_position(&self) -> i64 {
        self.flags
            .iter()
            .map(Flag::position)
            .max()
            .map_or(0, |max| (max + 1).max(0))
    }

    /// Render the flags ascending by position.
    pub fn render(&self) -> Vec<String> {
        let mut ordered: Vec<&Flag> = self.flags.iter().collect();
        ordered.sort_by_key(|f| f.position);
        ordered.iter().map(|f| f.to_string()).collect()
    }
}

impl FromIterator<Flag> for FlagSet {
    fn from_iter<I: IntoIterator<Item = Flag>>(iter: I) -> Self {
        let mut set = FlagSet::new();
        for flag in iter {
            set.insert(flag);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(parts: &[toml::Value]) -> Vec<toml::Value> {
        parts.to_vec()
    }

    #[test]
    fn from_sequence_pair() {
        let parts = seq(&[toml::Value::Integer(3), toml::Value::String("--foo".into())]);
        let flag = Flag::from_sequence(&parts).unwrap();
        assert_eq!(flag.position(), 3);
        assert_eq!(flag.id(), "--foo");
        assert!(flag.value().is_none());
    }

    #[test]
    fn from_sequence_triplet() {
        let parts = seq(&[
            toml::Value::Integer(-1),
            toml::Value::String("--bar".into()),
            toml::Value::String("baz".into()),
        ]);
        let flag = Flag::from_sequence(&parts).unwrap();
        assert_eq!(flag.position(), -1);
        assert_eq!(flag.value(), Some(&FlagValue::Str("baz".into())));
    }

    #[test]
    fn from_sequence_rejects_other_arities() {
        let one = seq(&[toml::Value::Integer(0)]);
        assert!(matches!(
            Flag::from_sequence(&one),
            Err(ConfigError::UnsupportedArity(1))
        ));

        let four = seq(&[
            toml::Value::Integer(0),
            toml::Value::String("--a".into()),
            toml::Value::Integer(1),
            toml::Value::Integer(2),
        ]);
        assert!(matches!(
            Flag::from_sequence(&four),
            Err(ConfigError::UnsupportedArity(4))
        ));
    }

    #[test]
    fn from_sequence_rejects_bad_types() {
        let parts = seq(&[
            toml::Value::String("first".into()),
            toml::Value::String("--a".into()),
        ]);
        assert!(matches!(
            Flag::from_sequence(&parts),
            Err(ConfigError::InvalidFlag(_))
        ));
    }

    #[test]
    fn display_with_and_without_value() {
        assert_eq!(Flag::new(0, "--verbose", None).to_string(), "--verbose");
        assert_eq!(
            Flag::new(0, "--level", Some(FlagValue::Int(2))).to_string(),
            "--level=2"
        );
    }

    #[test]
    fn zero_value_still_renders() {
        // Absence decides the bare form, not falsiness.
        let flag = Flag::new(0, "--count", Some(FlagValue::Int(0)));
        assert_eq!(flag.to_string(), "--count=0");
    }

    #[test]
    fn insert_dedupes_by_identifier_only() {
        let mut set = FlagSet::new();
        set.insert(Flag::new(0, "--opt", Some(FlagValue::Int(1))));
        set.insert(Flag::new(9, "--opt", Some(FlagValue::Int(2))));

        assert_eq!(set.len(), 1);
        let flag = set.get("--opt").unwrap();
        assert_eq!(flag.position(), 9);
        assert_eq!(flag.value(), Some(&FlagValue::Int(2)));
    }

    #[test]
    fn render_orders_by_position() {
        let mut set = FlagSet::new();
        set.insert(Flag::new(5, "--later", None));
        set.insert(Flag::new(-1000, "--first", None));
        set.insert(Flag::new(0, "--middle", None));

        assert_eq!(set.render(), vec!["--first", "--middle", "--later"]);
    }

    #[test]
    fn render_empty_set() {
        assert!(FlagSet::new().render().is_empty());
    }

    #[test]
    fn next_position_appends_after_max() {
        let mut set = FlagSet::new();
        assert_eq!(set.next_position(), 0);

        set.insert(Flag::new(-1000, "--debug", None));
        assert_eq!(set.next_position(), 0);

        set.insert(Flag::new(4, "--x", None));
        assert_eq!(set.next_position(), 5);
    }
}
