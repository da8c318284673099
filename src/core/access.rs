//! Ownership and role capability checks.
//!
//! Every ownership decision in the backend goes through `can_access` so the
//! owner-or-admin rule lives in exactly one place.

use serde::{Deserialize, Serialize};

/// Role attached to an identity record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    /// Parses the stored role string. Unknown strings resolve to the
    /// non-privileged role rather than failing.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("admin") {
            Self::Admin
        } else {
            Self::User
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

/// The resolved caller of a request: user id plus role, supplied by the
/// external identity collaborator.
#[derive(Clone, Debug)]
pub struct Identity {
    /// Id of the user record the credential resolved to
    pub user_id: i64,
    /// Parsed role
    pub role: Role,
}

/// Returns whether `actor` may read or mutate a resource owned by
/// `owner_id`: the owner always can, an admin always can, nobody else can.
#[must_use]
pub fn can_access(actor: &Identity, owner_id: i64) -> bool {
    actor.role == Role::Admin || actor.user_id == owner_id
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(user_id: i64, role: Role) -> Identity {
        Identity { user_id, role }
    }

    #[test]
    fn test_owner_can_access() {
        assert!(can_access(&identity(7, Role::User), 7));
    }

    #[test]
    fn test_non_owner_cannot_access() {
        assert!(!can_access(&identity(7, Role::User), 8));
    }

    #[test]
    fn test_admin_can_access_any() {
        assert!(can_access(&identity(1, Role::Admin), 999));
    }

    #[test]
    fn test_role_parse_is_case_insensitive() {
        assert_eq!(Role::parse("ADMIN"), Role::Admin);
        assert_eq!(Role::parse("admin"), Role::Admin);
        assert_eq!(Role::parse("user"), Role::User);
    }

    #[test]
    fn test_unknown_role_is_not_privileged() {
        assert_eq!(Role::parse("superuser"), Role::User);
        assert_eq!(Role::parse(""), Role::User);
    }
}
