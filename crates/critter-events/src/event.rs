//! Behavior Event Types
//!
//! Plain data handed from the behavior scheduler to the presentation layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::creature::UnknownName;

/// Icon shown for action ids that have no entry of their own.
pub const DEFAULT_ACTION_ICON: &str = "✨";

/// Idle actions a creature can perform on its own.
///
/// The declaration order is the fixed scan order used by weighted selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdleAction {
    Sleep,
    Eat,
    Move,
    Dance,
    Jump,
    Chase,
    Acrobatics,
    Explore,
    Socialize,
}

impl IdleAction {
    pub const COUNT: usize = 9;

    /// All actions in scan order.
    pub const ALL: [IdleAction; IdleAction::COUNT] = [
        IdleAction::Sleep,
        IdleAction::Eat,
        IdleAction::Move,
        IdleAction::Dance,
        IdleAction::Jump,
        IdleAction::Chase,
        IdleAction::Acrobatics,
        IdleAction::Explore,
        IdleAction::Socialize,
    ];

    /// Position of this action in [`IdleAction::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn id(self) -> &'static str {
        match self {
            IdleAction::Sleep => "sleep",
            IdleAction::Eat => "eat",
            IdleAction::Move => "move",
            IdleAction::Dance => "dance",
            IdleAction::Jump => "jump",
            IdleAction::Chase => "chase",
            IdleAction::Acrobatics => "acrobatics",
            IdleAction::Explore => "explore",
            IdleAction::Socialize => "socialize",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            IdleAction::Sleep => "💤",
            IdleAction::Eat => "🍖",
            IdleAction::Move => "👣",
            IdleAction::Dance => "💃",
            IdleAction::Jump => "⬆️",
            IdleAction::Chase => "💨",
            IdleAction::Acrobatics => "🤸",
            IdleAction::Explore => "🔍",
            IdleAction::Socialize => "💬",
        }
    }

    /// Dance, jump, chase and acrobatics.
    pub fn is_high_energy(self) -> bool {
        matches!(
            self,
            IdleAction::Dance | IdleAction::Jump | IdleAction::Chase | IdleAction::Acrobatics
        )
    }
}

impl fmt::Display for IdleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for IdleAction {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IdleAction::ALL
            .into_iter()
            .find(|action| action.id() == s)
            .ok_or_else(|| UnknownName(s.to_string()))
    }
}

/// Looks up the icon for an action id, falling back to [`DEFAULT_ACTION_ICON`].
pub fn action_icon(action_id: &str) -> &'static str {
    action_id
        .parse::<IdleAction>()
        .map(IdleAction::icon)
        .unwrap_or(DEFAULT_ACTION_ICON)
}

/// Something a creature "did" on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BehaviorEvent {
    /// A speech-bubble thought.
    Thought { entity_id: String, text: String },
    /// An idle animation to play.
    IdleAction {
        entity_id: String,
        action_id: String,
        icon: String,
    },
}

impl BehaviorEvent {
    pub fn thought(entity_id: impl Into<String>, text: impl Into<String>) -> Self {
        BehaviorEvent::Thought {
            entity_id: entity_id.into(),
            text: text.into(),
        }
    }

    pub fn idle_action(entity_id: impl Into<String>, action: IdleAction) -> Self {
        BehaviorEvent::IdleAction {
            entity_id: entity_id.into(),
            action_id: action.id().to_string(),
            icon: action.icon().to_string(),
        }
    }

    /// Id of the creature this event belongs to.
    pub fn entity_id(&self) -> &str {
        match self {
            BehaviorEvent::Thought { entity_id, .. } => entity_id,
            BehaviorEvent::IdleAction { entity_id, .. } => entity_id,
        }
    }

    pub fn is_thought(&self) -> bool {
        matches!(self, BehaviorEvent::Thought { .. })
    }
}
