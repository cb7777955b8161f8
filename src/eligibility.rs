use crate::Identity;
use std::collections::HashSet;
use std::iter::FromIterator;

/// Externally supplied policy deciding whether an identity may register
///
/// The orchestrator queries this at most once per `register` call, inside a
/// still-open state transition. Implementations must be side-effect-free
/// queries: they see only the identity, never the ledger, so a gatekeeper
/// cannot re-enter the state machine it is gating.
pub trait EligibilityGatekeeper {
    fn is_authorised(&self, identity: &Identity) -> bool;
}

/// A gatekeeper that admits every identity
#[derive(Default, Clone, Debug)]
pub struct AllowAll;

impl EligibilityGatekeeper for AllowAll {
    fn is_authorised(&self, _identity: &Identity) -> bool {
        true
    }
}

/// A gatekeeper that denies every identity
#[derive(Default, Clone, Debug)]
pub struct DenyAll;

impl EligibilityGatekeeper for DenyAll {
    fn is_authorised(&self, _identity: &Identity) -> bool {
        false
    }
}

/// A gatekeeper backed by an explicit allow-list of identities
#[derive(Default, Clone, Debug)]
pub struct AllowList {
    allowed: HashSet<Identity>,
}

impl AllowList {
    pub fn insert(&mut self, identity: Identity) {
        self.allowed.insert(identity);
    }

    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }
}

impl FromIterator<Identity> for AllowList {
    fn from_iter<I: IntoIterator<Item = Identity>>(iter: I) -> Self {
        AllowList {
            allowed: iter.into_iter().collect(),
        }
    }
}

impl EligibilityGatekeeper for AllowList {
    fn is_authorised(&self, identity: &Identity) -> bool {
        self.allowed.contains(identity)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn reference_gatekeepers() {
        let identity = Identity::random();

        assert!(AllowAll.is_authorised(&identity));
        assert!(!DenyAll.is_authorised(&identity));
    }

    #[test]
    fn allow_list_gatekeeper() {
        let on_list = Identity::random();
        let off_list = Identity::random();

        let list: AllowList = vec![on_list].into_iter().collect();
        assert_eq!(list.len(), 1);
        assert!(list.is_authorised(&on_list));
        assert!(!list.is_authorised(&off_list));
    }
}
