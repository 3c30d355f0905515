//! Role-based authorization collaborator.
//!
//! Capabilities are an enumerated set, checked explicitly at the top of
//! each privileged operation. Ownership is a single address fixed at
//! construction.

use rebase_types::Address;
use std::collections::HashSet;

/// Capabilities a caller may hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// May mint fresh units and burn existing ones.
    MintAndBurn,
}

/// Authorization queries the protocol needs.
pub trait AccessControl {
    fn is_owner(&self, caller: &Address) -> bool;
    fn has_role(&self, caller: &Address, role: Role) -> bool;
    fn grant_role(&mut self, role: Role, account: &Address);
    fn revoke_role(&mut self, role: Role, account: &Address);
}

/// In-memory [`AccessControl`] with a fixed owner.
///
/// The owner does not implicitly hold every role; capabilities must be
/// granted explicitly, including to the owner.
#[derive(Clone, Debug)]
pub struct RoleRegistry {
    owner: Address,
    grants: HashSet<(Address, Role)>,
}

impl RoleRegistry {
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            grants: HashSet::new(),
        }
    }

    pub fn owner(&self) -> &Address {
        &self.owner
    }
}

impl AccessControl for RoleRegistry {
    fn is_owner(&self, caller: &Address) -> bool {
        caller == &self.owner
    }

    fn has_role(&self, caller: &Address, role: Role) -> bool {
        self.grants.contains(&(caller.clone(), role))
    }

    fn grant_role(&mut self, role: Role, account: &Address) {
        self.grants.insert((account.clone(), role));
    }

    fn revoke_role(&mut self, role: Role, account: &Address) {
        self.grants.remove(&(account.clone(), role));
    }
}
