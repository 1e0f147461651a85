//! Role registry
//!
//! Resolves a typed role name against the full roster with forgiving
//! matching: case, spaces and punctuation are ignored, so "fortuneteller",
//! "Fortune Teller" and "fortune-teller" all land on the same role.

use crate::application::ports::outbound::RoleLookupPort;
use crate::domain::characters::Role;

pub struct RoleRegistry;

impl RoleRegistry {
    pub fn new() -> Self {
        Self
    }

    fn normalize(name: &str) -> String {
        name.chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect()
    }
}

impl Default for RoleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RoleLookupPort for RoleRegistry {
    fn resolve(&self, name: &str) -> Option<Role> {
        let wanted = Self::normalize(name);
        if wanted.is_empty() {
            return None;
        }
        Role::all()
            .iter()
            .copied()
            .filter(|role| *role != Role::Storyteller)
            .find(|role| Self::normalize(role.display_name()) == wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_case_and_punctuation() {
        let registry = RoleRegistry::new();
        assert_eq!(registry.resolve("Imp"), Some(Role::Imp));
        assert_eq!(registry.resolve("fortune teller"), Some(Role::FortuneTeller));
        assert_eq!(registry.resolve("Fortune-Teller"), Some(Role::FortuneTeller));
        assert_eq!(registry.resolve("devil's advocate"), Some(Role::DevilsAdvocate));
        assert_eq!(registry.resolve("ORGAN GRINDER"), Some(Role::OrganGrinder));
    }

    #[test]
    fn test_unknown_and_reserved_names_do_not_resolve() {
        let registry = RoleRegistry::new();
        assert_eq!(registry.resolve("wizzard"), None);
        assert_eq!(registry.resolve(""), None);
        // The storyteller is a participant, not a dealable role.
        assert_eq!(registry.resolve("storyteller"), None);
    }
}
