//! Trigger events an action list can be bound to.

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::error::CoreError;

/// A named event that fires the commands bound to it.
///
/// Triggers are case-insensitive in source text; the lowercase spelling is
/// the canonical key used in an [`ActionMap`](crate::action::ActionMap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    /// Fires when the object is loaded into the scene.
    Create,
    /// Fires when a user clicks the object.
    Activate,
    /// Fires when an avatar collides with the object.
    Bump,
    /// Fires when an `animate` command finishes.
    Adone,
    End,
}

impl Trigger {
    /// All triggers, in grammar order.
    pub const ALL: [Trigger; 5] = [
        Trigger::Create,
        Trigger::Activate,
        Trigger::Bump,
        Trigger::Adone,
        Trigger::End,
    ];

    /// Returns the canonical lowercase keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            Trigger::Create => "create",
            Trigger::Activate => "activate",
            Trigger::Bump => "bump",
            Trigger::Adone => "adone",
            Trigger::End => "end",
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Trigger {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Trigger::ALL
            .into_iter()
            .find(|trigger| trigger.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::UnknownTrigger(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_from_str_is_case_insensitive() {
        assert_eq!("create".parse::<Trigger>(), Ok(Trigger::Create));
        assert_eq!("CREATE".parse::<Trigger>(), Ok(Trigger::Create));
        assert_eq!("AdOnE".parse::<Trigger>(), Ok(Trigger::Adone));
        assert_eq!("end".parse::<Trigger>(), Ok(Trigger::End));
    }

    #[test]
    fn test_trigger_from_str_unknown() {
        assert_eq!(
            "destroy".parse::<Trigger>(),
            Err(CoreError::UnknownTrigger("destroy".to_string()))
        );
    }

    #[test]
    fn test_trigger_display_round_trips() {
        for trigger in Trigger::ALL {
            assert_eq!(trigger.to_string().parse::<Trigger>(), Ok(trigger));
        }
    }
}
