use serein_core::Role;

use crate::error::AuthError;

/// The capabilities a caller holds, decoded from their token.
///
/// Every protected operation names the single role it demands; the gate
/// answers whether the caller holds it.
#[derive(Debug, Clone)]
pub struct CapabilitySet {
    roles: Vec<Role>,
}

impl CapabilitySet {
    pub fn new(roles: Vec<Role>) -> Self {
        Self { roles }
    }

    pub fn holds(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.holds(Role::Admin)
    }

    /// Err with the missing role when the caller does not hold it.
    pub fn require(&self, role: Role) -> Result<(), AuthError> {
        if self.holds(role) {
            Ok(())
        } else {
            Err(AuthError::MissingCapability(role))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_passes_the_admin_gate() {
        let caps = CapabilitySet::new(vec![Role::Admin, Role::User]);
        assert!(caps.is_admin());
        assert!(caps.require(Role::Admin).is_ok());
    }

    #[test]
    fn plain_user_is_stopped_at_the_admin_gate() {
        let caps = CapabilitySet::new(vec![Role::User]);
        assert!(!caps.is_admin());
        let err = caps.require(Role::Admin).unwrap_err();
        assert!(matches!(err, AuthError::MissingCapability(Role::Admin)));
    }

    #[test]
    fn empty_set_holds_nothing() {
        let caps = CapabilitySet::new(Vec::new());
        assert!(!caps.holds(Role::User));
        assert!(caps.require(Role::User).is_err());
    }
}
