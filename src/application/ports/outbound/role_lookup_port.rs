//! Role lookup port - resolving a role name to its identity

use crate::domain::characters::Role;

/// Port for resolving a role name string to the role to instantiate.
///
/// Implementations must be pure in the name: the same input always
/// resolves to the same role.
pub trait RoleLookupPort: Send + Sync {
    fn resolve(&self, name: &str) -> Option<Role>;
}
