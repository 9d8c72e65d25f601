//! The merged trigger to commands mapping.

use indexmap::IndexMap;
use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::{command::Command, trigger::Trigger};

/// Final output of a parse: every trigger mapped to its commands.
///
/// Triggers keep the order in which they first appeared in the source. An
/// `ActionMap` built by the parser never maps a trigger to an empty list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionMap {
    actions: IndexMap<Trigger, Vec<Command>>,
}

impl ActionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `commands` to `trigger`, replacing any previous binding.
    pub fn insert(&mut self, trigger: Trigger, commands: Vec<Command>) {
        self.actions.insert(trigger, commands);
    }

    pub fn get(&self, trigger: Trigger) -> Option<&[Command]> {
        self.actions.get(&trigger).map(Vec::as_slice)
    }

    pub fn contains(&self, trigger: Trigger) -> bool {
        self.actions.contains_key(&trigger)
    }

    /// Iterate over the triggers in source order.
    pub fn triggers(&self) -> impl Iterator<Item = Trigger> + '_ {
        self.actions.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Trigger, &[Command])> {
        self.actions
            .iter()
            .map(|(trigger, commands)| (*trigger, commands.as_slice()))
    }

    /// Number of bound triggers.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl IntoIterator for ActionMap {
    type Item = (Trigger, Vec<Command>);
    type IntoIter = indexmap::map::IntoIter<Trigger, Vec<Command>>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.into_iter()
    }
}

impl Serialize for ActionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.actions.len()))?;
        for (trigger, commands) in &self.actions {
            map.serialize_entry(trigger.as_str(), commands)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandKind;

    #[test]
    fn test_triggers_keep_insertion_order() {
        let mut map = ActionMap::new();
        map.insert(Trigger::Bump, vec![Command::new(CommandKind::Examine)]);
        map.insert(Trigger::Create, vec![Command::new(CommandKind::Examine)]);

        let triggers: Vec<_> = map.triggers().collect();
        assert_eq!(triggers, [Trigger::Bump, Trigger::Create]);
        assert!(map.contains(Trigger::Bump));
        assert!(map.get(Trigger::Activate).is_none());
    }

    #[test]
    fn test_serialize_uses_lowercase_trigger_keys() {
        let mut map = ActionMap::new();
        map.insert(
            Trigger::Create,
            vec![Command::new(CommandKind::Texture).with("texture", "derp.jpg")],
        );
        assert_eq!(
            serde_json::to_string(&map).unwrap(),
            r#"{"create":[{"commandType":"texture","texture":"derp.jpg"}]}"#
        );
    }
}
