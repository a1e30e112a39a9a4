//! Nullable access control: explicit role grants for testing.

use accrue_store::{AccessControl, Role};
use accrue_types::HolderAddress;
use std::collections::HashSet;

/// Grants roles from an in-memory table, or to everyone.
pub struct NullAccessControl {
    allow_all: bool,
    grants: HashSet<(HolderAddress, Role)>,
}

impl NullAccessControl {
    /// Every caller holds every role.
    pub fn allow_all() -> Self {
        Self {
            allow_all: true,
            grants: HashSet::new(),
        }
    }

    /// No caller holds any role until granted.
    pub fn deny_all() -> Self {
        Self {
            allow_all: false,
            grants: HashSet::new(),
        }
    }

    pub fn with_grant(mut self, holder: HolderAddress, role: Role) -> Self {
        self.grant(holder, role);
        self
    }

    pub fn grant(&mut self, holder: HolderAddress, role: Role) {
        self.grants.insert((holder, role));
    }

    pub fn revoke(&mut self, holder: &HolderAddress, role: Role) {
        self.grants.remove(&(holder.clone(), role));
    }
}

impl AccessControl for NullAccessControl {
    fn is_authorized(&self, caller: &HolderAddress, role: Role) -> bool {
        self.allow_all || self.grants.contains(&(caller.clone(), role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grants_are_per_role() {
        let admin = HolderAddress::new("acr_admin");
        let mut access = NullAccessControl::deny_all().with_grant(admin.clone(), Role::RateSetter);
        assert!(access.is_authorized(&admin, Role::RateSetter));
        assert!(!access.is_authorized(&admin, Role::MintAndBurn));

        access.revoke(&admin, Role::RateSetter);
        assert!(!access.is_authorized(&admin, Role::RateSetter));
    }

    #[test]
    fn allow_all_authorizes_anyone() {
        let access = NullAccessControl::allow_all();
        assert!(access.is_authorized(&HolderAddress::new("acr_x"), Role::MintAndBurn));
    }
}
