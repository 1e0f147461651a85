//! Characters - role identities, the character tree, and capability dispatch
//!
//! A [`Character`] is the live instance of a role owned by exactly one
//! player. Composite roles (ability copiers like the Philosopher or the
//! Cannibal) own an ordered list of nested characters; rule-phase dispatch
//! walks that tree generically rather than forwarding through the nodes
//! themselves. A poisoned node silences every hook in its entire subtree.

mod capabilities;
pub mod hooks;
mod roles;

pub use capabilities::{
    DayEndCapability, DayStartCapability, DeathCapability, DeathPriority, NoHooks,
    NominationCapability, NomsCalledCapability, PhaseCx, RoleHookSet, SeatingOrderCapability,
    VoteBeginningCapability, VoteCapability,
};
pub use roles::Role;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::PlayerId;

/// Errors raised by character tree manipulation.
#[derive(Debug, thiserror::Error)]
pub enum CharacterError {
    #[error("{0} does not copy other abilities")]
    NotComposite(&'static str),
}

/// Mutable rule state a character carries between phases.
///
/// This is deliberately small and shared across roles: a chosen target
/// (Butler's master, the Witch's curse, the Assassin's victim, ...), a
/// once-per-game latch, and a "my ability has fired" trigger. Role hooks
/// decide what each field means for their role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AbilityState {
    /// The player this character's ability currently points at, if any.
    pub chosen: Option<PlayerId>,
    /// Set once a once-per-game ability has been spent.
    pub used: bool,
    /// Set once a passive ability has activated (e.g. the Banshee's scream).
    pub triggered: bool,
}

/// The live instance of a role, owned by exactly one player at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub role: Role,
    /// While set, every hook on this node and its subtree is a no-op.
    pub is_poisoned: bool,
    pub state: AbilityState,
    abilities: Vec<Character>,
}

impl Character {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            is_poisoned: false,
            state: AbilityState::default(),
            abilities: Vec::new(),
        }
    }

    /// The copied abilities nested under this character, outermost first.
    pub fn abilities(&self) -> &[Character] {
        &self.abilities
    }

    pub fn abilities_mut(&mut self) -> &mut [Character] {
        &mut self.abilities
    }

    /// Append a copied ability. Only composite roles accept one.
    pub fn grant_ability(&mut self, ability: Character) -> Result<(), CharacterError> {
        if !self.role.is_composite() {
            return Err(CharacterError::NotComposite(self.role.display_name()));
        }
        self.abilities.push(ability);
        Ok(())
    }

    /// Remove the most recently granted ability, recursing into nested
    /// composites first so the innermost copy is cleared before its host.
    pub fn revoke_last_ability(&mut self) -> Option<Character> {
        if let Some(last) = self.abilities.last_mut() {
            if !last.abilities.is_empty() {
                return last.revoke_last_ability();
            }
        }
        self.abilities.pop()
    }

    /// Whether this character currently grants an extra ballot per
    /// nomination. Poison silences the grant like any other hook.
    pub fn votes_twice(&self) -> bool {
        if self.is_poisoned {
            return false;
        }
        (self.role.has_double_vote() && hooks::for_role(self.role).double_vote_active(self))
            || self.abilities.iter().any(Character::votes_twice)
    }

    /// Visit every node of this tree that is allowed to act, skipping
    /// poisoned subtrees wholesale. `trail` collects the nesting indices.
    pub(crate) fn visit_active(&self, trail: &mut Vec<usize>, visit: &mut impl FnMut(&[usize], &Character)) {
        if self.is_poisoned {
            return;
        }
        visit(trail, self);
        for (index, ability) in self.abilities.iter().enumerate() {
            trail.push(index);
            ability.visit_active(trail, visit);
            trail.pop();
        }
    }

    /// Descend along a nesting trail.
    pub fn descend(&self, trail: &[usize]) -> Option<&Character> {
        match trail.split_first() {
            None => Some(self),
            Some((head, rest)) => self.abilities.get(*head)?.descend(rest),
        }
    }

    pub fn descend_mut(&mut self, trail: &[usize]) -> Option<&mut Character> {
        match trail.split_first() {
            None => Some(self),
            Some((head, rest)) => self.abilities.get_mut(*head)?.descend_mut(rest),
        }
    }
}

/// Address of one character node: a seat in the seating order plus the
/// nesting trail into copied abilities (empty for the player's own role).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharPath {
    pub seat: usize,
    pub trail: Vec<usize>,
}

impl CharPath {
    pub fn top(seat: usize) -> Self {
        Self {
            seat,
            trail: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_composite_roles_copy_abilities() {
        let mut imp = Character::new(Role::Imp);
        assert!(imp.grant_ability(Character::new(Role::Monk)).is_err());

        let mut philosopher = Character::new(Role::Philosopher);
        assert!(philosopher.grant_ability(Character::new(Role::Monk)).is_ok());
        assert_eq!(philosopher.abilities().len(), 1);
    }

    #[test]
    fn test_revoke_clears_innermost_ability_first() {
        let mut cannibal = Character::new(Role::Cannibal);
        let mut philosopher = Character::new(Role::Philosopher);
        philosopher
            .grant_ability(Character::new(Role::Soldier))
            .unwrap();
        cannibal.grant_ability(philosopher).unwrap();

        // Innermost (Soldier) goes before its host (Philosopher).
        assert_eq!(cannibal.revoke_last_ability().unwrap().role, Role::Soldier);
        assert_eq!(
            cannibal.revoke_last_ability().unwrap().role,
            Role::Philosopher
        );
        assert!(cannibal.revoke_last_ability().is_none());
    }

    #[test]
    fn test_poison_silences_whole_subtree() {
        let mut philosopher = Character::new(Role::Philosopher);
        let mut banshee = Character::new(Role::Banshee);
        banshee.state.triggered = true;
        philosopher.grant_ability(banshee).unwrap();
        assert!(philosopher.votes_twice());

        philosopher.is_poisoned = true;
        assert!(!philosopher.votes_twice());

        let mut visited = Vec::new();
        philosopher.visit_active(&mut Vec::new(), &mut |_, ch| visited.push(ch.role));
        assert!(visited.is_empty());
    }

    #[test]
    fn test_visit_active_skips_poisoned_child_only() {
        let mut philosopher = Character::new(Role::Philosopher);
        philosopher
            .grant_ability(Character::new(Role::Soldier))
            .unwrap();
        let mut poisoned_monk = Character::new(Role::Monk);
        poisoned_monk.is_poisoned = true;
        philosopher.grant_ability(poisoned_monk).unwrap();

        let mut visited = Vec::new();
        philosopher.visit_active(&mut Vec::new(), &mut |trail, ch| {
            visited.push((trail.to_vec(), ch.role));
        });
        assert_eq!(
            visited,
            vec![
                (vec![], Role::Philosopher),
                (vec![0], Role::Soldier),
            ]
        );
    }
}
