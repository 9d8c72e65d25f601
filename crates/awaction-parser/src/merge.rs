//! Merging of resolved actions into an [`ActionMap`].
//!
//! Per trigger, later commands replace earlier ones that target the same
//! thing, keeping the position of the first. Across triggers, the first
//! action for a trigger wins.

use indexmap::IndexMap;
use log::debug;

use awaction_core::{
    action::ActionMap,
    command::{Command, CommandKind},
    trigger::Trigger,
};

/// A trigger with its resolved commands, before merging.
///
/// A `None` command is one the resolver discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct RawAction {
    pub trigger: Trigger,
    pub commands: Vec<Option<Command>>,
}

impl RawAction {
    pub fn new(trigger: Trigger, commands: Vec<Option<Command>>) -> Self {
        Self { trigger, commands }
    }
}

/// Identity of a command within one trigger's list.
#[derive(Debug, PartialEq, Eq, Hash)]
struct MergeKey {
    kind: CommandKind,
    target: String,
    tag: Option<u64>,
}

impl MergeKey {
    fn of(command: &Command) -> Self {
        // Every `name` command renames the same object, so only the last counts.
        if command.kind() == CommandKind::Name {
            return Self {
                kind: CommandKind::Name,
                target: String::new(),
                tag: None,
            };
        }
        Self {
            kind: command.kind(),
            target: command.target_name().unwrap_or_default().to_string(),
            tag: command.tag(),
        }
    }
}

/// Merge one trigger's commands.
///
/// Discarded, invalid and empty commands are dropped (`examine` and `sign`
/// are meaningful without arguments). A command replaces an earlier one with
/// the same type, target name and tag in place.
pub fn merge_commands(commands: impl IntoIterator<Item = Option<Command>>) -> Vec<Command> {
    let mut merged: IndexMap<MergeKey, Command> = IndexMap::new();
    for command in commands.into_iter().flatten() {
        if command.kind() == CommandKind::Invalid {
            debug!(command:?; "Dropping unrecognized command");
            continue;
        }
        if command.is_empty() && !command.kind().allows_empty() {
            debug!(command_type = command.command_type(); "Dropping command without arguments");
            continue;
        }
        merged.insert(MergeKey::of(&command), command);
    }
    merged.into_values().collect()
}

/// Merge resolved actions into the final map.
///
/// Only the first action for a trigger that yields any commands is kept.
///
/// # Example
///
/// ```
/// # use awaction_core::command::{Command, CommandKind};
/// # use awaction_core::trigger::Trigger;
/// # use awaction_parser::{RawAction, merge_actions};
/// let texture = |name: &str| Some(Command::new(CommandKind::Texture).with("texture", name));
///
/// let merged = merge_actions([
///     RawAction::new(Trigger::Create, vec![texture("a.jpg"), texture("b.jpg")]),
///     RawAction::new(Trigger::Create, vec![texture("c.jpg")]),
/// ]);
///
/// let create = merged.get(Trigger::Create).unwrap();
/// assert_eq!(create.len(), 1);
/// assert_eq!(create[0].get("texture").and_then(|v| v.as_text()), Some("b.jpg"));
/// ```
pub fn merge_actions(actions: impl IntoIterator<Item = RawAction>) -> ActionMap {
    let mut merged = ActionMap::new();
    for action in actions {
        if merged.contains(action.trigger) {
            debug!(trigger = action.trigger.as_str(); "Ignoring repeated trigger");
            continue;
        }
        let commands = merge_commands(action.commands);
        if commands.is_empty() {
            debug!(trigger = action.trigger.as_str(); "Trigger has no commands");
            continue;
        }
        merged.insert(action.trigger, commands);
    }
    merged
}
