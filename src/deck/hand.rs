//! Hand snapshot.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{AssetCard, SkillCard};
use crate::core::CardId;

/// The cards currently in hand, split by kind.
///
/// A plain value: mutating it does not affect the deck manager.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Hand {
    pub assets: SmallVec<[AssetCard; 3]>,
    pub skills: SmallVec<[SkillCard; 2]>,
}

impl Hand {
    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len() + self.skills.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty() && self.skills.is_empty()
    }

    /// True when the hand holds cards of exactly one kind.
    #[must_use]
    pub fn is_one_kind(&self) -> bool {
        !self.is_empty() && (self.assets.is_empty() || self.skills.is_empty())
    }

    /// Ids of every card in hand, assets first.
    pub fn ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.assets
            .iter()
            .map(|c| c.id)
            .chain(self.skills.iter().map(|c| c.id))
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.ids().any(|c| c == id)
    }
}
