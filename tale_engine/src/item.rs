//! Item definitions and their use-effect tables.

use std::collections::HashMap;

use tale_data::Id;

use crate::world::FlagPair;

/// What an item can be aimed at with the `use` verb.
///
/// Authored as `"self:<id>"`, `"item:<id>"`, `"npc:<id>"`, or
/// `"puzzle:<id>"` in the document; the loader converts the tags.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UseTarget {
    SelfUse,
    Item(Id),
    Npc(Id),
    Puzzle(Id),
}

/// The outcome of using an item on one specific target.
#[derive(Debug, Clone, Default)]
pub struct UseEffect {
    pub triggers_puzzle: Option<Id>,
    pub success_message: Option<String>,
    pub failure_message: Option<String>,
    pub consumes_item: bool,
    pub sets_flag: Option<FlagPair>,
}

/// Immutable item definition. Which room (or inventory) currently holds an
/// item lives in the world-state overlay, not here.
#[derive(Debug, Clone, Default)]
pub struct Item {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub takeable: bool,
    pub combines_with: Vec<Id>,
    pub combination_result: Option<Id>,
    pub use_effects: HashMap<UseTarget, UseEffect>,
}

impl Item {
    pub fn use_effect_for(&self, target: &UseTarget) -> Option<&UseEffect> {
        self.use_effects.get(target)
    }

    pub fn can_combine_with(&self, other_id: &str) -> bool {
        self.combines_with.iter().any(|id| id == other_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn use_effect_lookup_distinguishes_target_kinds() {
        let mut item = Item {
            id: "key".into(),
            name: "rusty key".into(),
            ..Item::default()
        };
        item.use_effects.insert(
            UseTarget::Item("lock".into()),
            UseEffect {
                triggers_puzzle: Some("open_lock".into()),
                ..UseEffect::default()
            },
        );

        assert!(item.use_effect_for(&UseTarget::Item("lock".into())).is_some());
        assert!(item.use_effect_for(&UseTarget::Npc("lock".into())).is_none());
        assert!(item.use_effect_for(&UseTarget::SelfUse).is_none());
    }

    #[test]
    fn combination_check_is_id_based() {
        let item = Item {
            combines_with: vec!["battery".into()],
            ..Item::default()
        };
        assert!(item.can_combine_with("battery"));
        assert!(!item.can_combine_with("wire"));
    }
}
