//! Command resolution: folding interpreted arguments into a [`Command`].

use log::debug;

use awaction_core::command::{Command, CommandKind};

use crate::{
    interpret::{self, RESOURCE},
    syntax::{Argument, CommandNode},
};

/// Resolve a syntax node to a command.
///
/// Returns `None` when an argument sets a field that an earlier argument
/// already set; such a command is discarded as a whole.
pub(crate) fn resolve(node: CommandNode<'_>) -> Option<Command> {
    match node {
        CommandNode::Arguments { kind, arguments } => resolve_arguments(kind, arguments),
        CommandNode::Examine => Some(Command::new(CommandKind::Examine)),
        CommandNode::Animate(animate) => interpret::animate(animate)
            .inspect_err(|err| debug!(command_type = "animate", err:%; "Discarding command"))
            .ok(),
        CommandNode::Teleport { world, location } => Some(interpret::teleport(world, location)),
        CommandNode::Warp(location) => Some(interpret::warp(location)),
        CommandNode::Invalid(text) => Some(Command::invalid(text)),
    }
}

fn resolve_arguments(kind: CommandKind, arguments: Vec<Argument<'_>>) -> Option<Command> {
    let mut command = Command::new(kind);
    for (field, value) in arguments.into_iter().filter_map(interpret::argument) {
        if let Err(err) = command.set(field, value) {
            debug!(command_type = kind.as_str(), err:%; "Discarding command");
            return None;
        }
    }
    command.rename(RESOURCE, kind.as_str());
    Some(command)
}

#[cfg(test)]
mod tests {
    use awaction_core::command::{COMMAND_TEXT, Value};

    use super::*;
    use crate::syntax::ParameterValue;

    fn arguments(kind: CommandKind, arguments: Vec<Argument<'static>>) -> CommandNode<'static> {
        CommandNode::Arguments { kind, arguments }
    }

    #[test]
    fn test_resource_renamed_after_command() {
        let command = resolve(arguments(
            CommandKind::Texture,
            vec![
                Argument::Resource("stone.jpg"),
                Argument::Parameter {
                    key: "tag",
                    value: ParameterValue::Integer("3"),
                },
            ],
        ))
        .unwrap();

        let fields: Vec<_> = command.fields().map(|(name, _)| name).collect();
        assert_eq!(fields, ["texture", "tag"]);
        assert_eq!(command.tag(), Some(3));
    }

    #[test]
    fn test_duplicate_field_discards_command() {
        let command = resolve(arguments(
            CommandKind::Texture,
            vec![Argument::Resource("a.jpg"), Argument::Resource("b.jpg")],
        ));
        assert_eq!(command, None);
    }

    #[test]
    fn test_target_name_twice_discards_command() {
        let command = resolve(arguments(
            CommandKind::Name,
            vec![Argument::TargetName("a"), Argument::TargetName("b")],
        ));
        assert_eq!(command, None);
    }

    #[test]
    fn test_skipped_argument_does_not_count() {
        let command = resolve(arguments(
            CommandKind::Solid,
            vec![Argument::Boolean("maybe"), Argument::Boolean("off")],
        ))
        .unwrap();
        assert_eq!(command.get("value"), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_invalid_keeps_text() {
        let command = resolve(CommandNode::Invalid("frobnicate now")).unwrap();
        assert_eq!(command.kind(), CommandKind::Invalid);
        assert_eq!(command.get(COMMAND_TEXT), Some(&Value::from("frobnicate now")));
    }
}
