//! Requested actions and their translation onto properties

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::property::Attribute;

/// Action requested by the voice layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    On,
    Off,
    Toggle,
    Adjust,
    Raise,
    Lower,
    Increase,
    Decrease,
    Trigger,
    BinaryQuery,
    InformationQuery,
    Locate,
    Set,
}

impl Action {
    /// Every action, in declaration order
    pub const ALL: [Self; 13] = [
        Self::On,
        Self::Off,
        Self::Toggle,
        Self::Adjust,
        Self::Raise,
        Self::Lower,
        Self::Increase,
        Self::Decrease,
        Self::Trigger,
        Self::BinaryQuery,
        Self::InformationQuery,
        Self::Locate,
        Self::Set,
    ];

    /// Whether the resolver turns this action into a property mutation
    #[must_use]
    pub const fn is_device_action(self) -> bool {
        matches!(self, Self::Set | Self::On | Self::Off)
    }

    /// Wire name (e.g. `BINARY_QUERY`)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
            Self::Toggle => "TOGGLE",
            Self::Adjust => "ADJUST",
            Self::Raise => "RAISE",
            Self::Lower => "LOWER",
            Self::Increase => "INCREASE",
            Self::Decrease => "DECREASE",
            Self::Trigger => "TRIGGER",
            Self::BinaryQuery => "BINARY_QUERY",
            Self::InformationQuery => "INFORMATION_QUERY",
            Self::Locate => "LOCATE",
            Self::Set => "SET",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|action| action.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| format!("unknown action: {s}"))
    }
}

/// Actions that imply a fixed property and value
///
/// Actions not listed here pass the caller's attribute and value through
const IMPLICIT_ACTIONS: &[(Action, &str, bool)] = &[
    (Action::On, "on", true),
    (Action::Off, "on", false),
];

/// Map an action onto the attribute and value to write
#[must_use]
pub fn translate(
    action: Action,
    attribute: Option<Attribute>,
    value: Option<Value>,
) -> (Option<Attribute>, Option<Value>) {
    IMPLICIT_ACTIONS
        .iter()
        .find(|(implicit, _, _)| *implicit == action)
        .map_or((attribute, value), |&(_, property, state)| {
            (
                Some(Attribute::Named(property.to_string())),
                Some(Value::Bool(state)),
            )
        })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::resolve::SymbolicAttribute;

    #[test]
    fn on_and_off_target_on_property() {
        let brightness = Some(Attribute::Symbolic(SymbolicAttribute::Brightness));

        assert_eq!(
            translate(Action::On, brightness, Some(json!(10))),
            (Some(Attribute::from("on")), Some(json!(true)))
        );
        assert_eq!(
            translate(Action::Off, None, None),
            (Some(Attribute::from("on")), Some(json!(false)))
        );
    }

    #[test]
    fn set_passes_through() {
        assert_eq!(
            translate(Action::Set, Some(Attribute::from("brightness")), Some(json!(50))),
            (Some(Attribute::from("brightness")), Some(json!(50)))
        );
        assert_eq!(translate(Action::Set, None, None), (None, None));
    }

    #[test]
    fn other_actions_pass_through() {
        assert_eq!(
            translate(Action::Toggle, Some(Attribute::from("on")), None),
            (Some(Attribute::from("on")), None)
        );
    }

    #[test]
    fn parse_action_names() {
        assert_eq!("on".parse::<Action>(), Ok(Action::On));
        assert_eq!("SET".parse::<Action>(), Ok(Action::Set));
        assert_eq!("binary-query".parse::<Action>(), Ok(Action::BinaryQuery));
        assert!("dim".parse::<Action>().is_err());
    }

    #[test]
    fn wire_names_round_trip_through_serde() {
        assert_eq!(
            serde_json::to_string(&Action::InformationQuery).unwrap(),
            r#""INFORMATION_QUERY""#
        );
        for action in Action::ALL {
            assert_eq!(action.as_str().parse::<Action>(), Ok(action));
        }
    }

    #[test]
    fn device_actions() {
        let handled: Vec<_> = Action::ALL.into_iter().filter(|a| a.is_device_action()).collect();
        assert_eq!(handled, [Action::On, Action::Off, Action::Set]);
    }
}
