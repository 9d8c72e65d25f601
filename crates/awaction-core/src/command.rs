//! Command records produced by the action string parser.
//!
//! A [`Command`] is a [`CommandKind`] plus an ordered bag of named fields.
//! Field names follow the record shape consumed by object behavior engines
//! (`texture`, `tag`, `targetName`, `coordinates`, ...), and every field may be
//! assigned only once.

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::{
    color::Rgb,
    error::CoreError,
    geometry::{Altitude, Vector3, WorldCoordinates},
};

/// Field holding the lowercased object name a command applies to.
pub const TARGET_NAME: &str = "targetName";

/// Field holding the texture or surface tag a command applies to.
pub const TAG: &str = "tag";

/// Field holding the raw text of an unrecognized command.
pub const COMMAND_TEXT: &str = "commandText";

/// The type of a command, named by its leading keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CommandKind {
    Texture,
    Animate,
    Sound,
    Corona,
    Color,
    Examine,
    Solid,
    Name,
    Visible,
    Move,
    Rotate,
    Scale,
    Light,
    Noise,
    Opacity,
    Ambient,
    Diffuse,
    Specular,
    Picture,
    Media,
    Say,
    Seq,
    Sign,
    Teleport,
    Warp,
    Url,
    /// Text that matched no command keyword.
    Invalid,
}

impl CommandKind {
    /// Every recognized command, in grammar precedence order.
    pub const RECOGNIZED: [CommandKind; 26] = [
        CommandKind::Texture,
        CommandKind::Animate,
        CommandKind::Sound,
        CommandKind::Corona,
        CommandKind::Color,
        CommandKind::Examine,
        CommandKind::Solid,
        CommandKind::Name,
        CommandKind::Visible,
        CommandKind::Move,
        CommandKind::Rotate,
        CommandKind::Scale,
        CommandKind::Light,
        CommandKind::Noise,
        CommandKind::Opacity,
        CommandKind::Ambient,
        CommandKind::Diffuse,
        CommandKind::Specular,
        CommandKind::Picture,
        CommandKind::Media,
        CommandKind::Say,
        CommandKind::Seq,
        CommandKind::Sign,
        CommandKind::Teleport,
        CommandKind::Warp,
        CommandKind::Url,
    ];

    /// Returns the lowercase keyword, which is also the `commandType` value.
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::Texture => "texture",
            CommandKind::Animate => "animate",
            CommandKind::Sound => "sound",
            CommandKind::Corona => "corona",
            CommandKind::Color => "color",
            CommandKind::Examine => "examine",
            CommandKind::Solid => "solid",
            CommandKind::Name => "name",
            CommandKind::Visible => "visible",
            CommandKind::Move => "move",
            CommandKind::Rotate => "rotate",
            CommandKind::Scale => "scale",
            CommandKind::Light => "light",
            CommandKind::Noise => "noise",
            CommandKind::Opacity => "opacity",
            CommandKind::Ambient => "ambient",
            CommandKind::Diffuse => "diffuse",
            CommandKind::Specular => "specular",
            CommandKind::Picture => "picture",
            CommandKind::Media => "media",
            CommandKind::Say => "say",
            CommandKind::Seq => "seq",
            CommandKind::Sign => "sign",
            CommandKind::Teleport => "teleport",
            CommandKind::Warp => "warp",
            CommandKind::Url => "url",
            CommandKind::Invalid => "invalid",
        }
    }

    /// Whether a command of this kind is kept even when it has no fields.
    pub fn allows_empty(&self) -> bool {
        matches!(self, CommandKind::Examine | CommandKind::Sign)
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CommandKind::RECOGNIZED
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::UnknownCommand(s.to_string()))
    }
}

impl Serialize for CommandKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A typed command field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Integer(u64),
    Float(f64),
    Text(String),
    Color(Rgb),
    Vector(Vector3),
    Coordinates(WorldCoordinates),
    Altitude(Altitude),
    Integers(Vec<u64>),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<u64> {
        match self {
            Value::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Rgb> {
        match self {
            Value::Color(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<Vector3> {
        match self {
            Value::Vector(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_coordinates(&self) -> Option<WorldCoordinates> {
        match self {
            Value::Coordinates(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_altitude(&self) -> Option<Altitude> {
        match self {
            Value::Altitude(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_integers(&self) -> Option<&[u64]> {
        match self {
            Value::Integers(values) => Some(values),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<Rgb> for Value {
    fn from(value: Rgb) -> Self {
        Value::Color(value)
    }
}

impl From<Vector3> for Value {
    fn from(value: Vector3) -> Self {
        Value::Vector(value)
    }
}

impl From<WorldCoordinates> for Value {
    fn from(value: WorldCoordinates) -> Self {
        Value::Coordinates(value)
    }
}

impl From<Altitude> for Value {
    fn from(value: Altitude) -> Self {
        Value::Altitude(value)
    }
}

impl From<Vec<u64>> for Value {
    fn from(values: Vec<u64>) -> Self {
        Value::Integers(values)
    }
}

/// A single command: its kind and the fields set by its arguments.
///
/// Serializes as a flat map with `commandType` first, followed by the
/// fields in the order they were set.
///
/// # Examples
///
/// ```
/// use awaction_core::command::{Command, CommandKind};
///
/// let mut command = Command::new(CommandKind::Texture);
/// command.set("texture", "stone.jpg").unwrap();
/// assert!(command.set("texture", "wood.jpg").is_err());
/// assert_eq!(command.get("texture").and_then(|v| v.as_text()), Some("stone.jpg"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    kind: CommandKind,
    fields: IndexMap<String, Value>,
}

impl Command {
    /// Create a command with no fields.
    pub fn new(kind: CommandKind) -> Self {
        Self {
            kind,
            fields: IndexMap::new(),
        }
    }

    /// Create an [`CommandKind::Invalid`] command preserving the raw text.
    pub fn invalid(text: impl Into<String>) -> Self {
        let mut command = Self::new(CommandKind::Invalid);
        command
            .fields
            .insert(COMMAND_TEXT.to_string(), Value::Text(text.into()));
        command
    }

    /// Builder-style field assignment, replacing any previous value.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    /// Returns the `commandType` string.
    pub fn command_type(&self) -> &'static str {
        self.kind.as_str()
    }

    /// Assign a field that has not been set yet.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DuplicateField`] when `field` already has a value;
    /// the existing value is left untouched.
    pub fn set(
        &mut self,
        field: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<(), CoreError> {
        let field = field.into();
        if self.fields.contains_key(&field) {
            return Err(CoreError::DuplicateField(field));
        }
        self.fields.insert(field, value.into());
        Ok(())
    }

    /// Rename a field in place, keeping its position.
    ///
    /// Does nothing when `from` is absent or `to` is already set.
    pub fn rename(&mut self, from: &str, to: &str) {
        if from == to || !self.fields.contains_key(from) || self.fields.contains_key(to) {
            return;
        }
        self.fields = std::mem::take(&mut self.fields)
            .into_iter()
            .map(|(name, value)| {
                if name == from {
                    (to.to_string(), value)
                } else {
                    (name, value)
                }
            })
            .collect();
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Iterate over the fields in assignment order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of fields besides `commandType`.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the command carries nothing besides its `commandType`.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The lowercased object name this command targets, if any.
    pub fn target_name(&self) -> Option<&str> {
        self.get(TARGET_NAME).and_then(Value::as_text)
    }

    /// The tag this command targets, if any.
    pub fn tag(&self) -> Option<u64> {
        self.get(TAG).and_then(Value::as_integer)
    }
}

impl Serialize for Command {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry("commandType", &self.kind)?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_kind_from_str() {
        assert_eq!("TEXTURE".parse::<CommandKind>(), Ok(CommandKind::Texture));
        assert_eq!("url".parse::<CommandKind>(), Ok(CommandKind::Url));
        assert!("invalid".parse::<CommandKind>().is_err());
    }

    #[test]
    fn test_allows_empty() {
        assert!(CommandKind::Examine.allows_empty());
        assert!(CommandKind::Sign.allows_empty());
        assert!(!CommandKind::Solid.allows_empty());
        assert!(!CommandKind::Invalid.allows_empty());
    }

    #[test]
    fn test_set_rejects_duplicates() {
        let mut command = Command::new(CommandKind::Move);
        command.set("time", 1.0).unwrap();

        assert_eq!(
            command.set("time", 2.0),
            Err(CoreError::DuplicateField("time".to_string()))
        );
        assert_eq!(command.get("time"), Some(&Value::Float(1.0)));
    }

    #[test]
    fn test_rename_keeps_position() {
        let mut command = Command::new(CommandKind::Texture)
            .with("resource", "a.jpg")
            .with("tag", 3u64);
        command.rename("resource", "texture");

        let names: Vec<_> = command.fields().map(|(name, _)| name).collect();
        assert_eq!(names, ["texture", "tag"]);
        assert_eq!(command.tag(), Some(3));
    }

    #[test]
    fn test_invalid_keeps_text() {
        let command = Command::invalid("jump high");
        assert_eq!(command.kind(), CommandKind::Invalid);
        assert_eq!(
            command.get(COMMAND_TEXT).and_then(Value::as_text),
            Some("jump high")
        );
    }

    #[test]
    fn test_serialize_flat_record() {
        let command = Command::new(CommandKind::Texture)
            .with("texture", "derp.jpg")
            .with("tag", 0u64);
        assert_eq!(
            serde_json::to_string(&command).unwrap(),
            r#"{"commandType":"texture","texture":"derp.jpg","tag":0}"#
        );
    }

    #[test]
    fn test_serialize_nested_values() {
        let command = Command::new(CommandKind::Color).with("color", Rgb::new(255, 0, 0));
        assert_eq!(
            serde_json::to_string(&command).unwrap(),
            r#"{"commandType":"color","color":{"r":255,"g":0,"b":0}}"#
        );
    }
}
