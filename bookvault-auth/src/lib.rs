//! Explicit role-based authorization for the boundary layer.
//!
//! Authorization is a pure decision over data: the boundary hands in the
//! caller's roles (from the external identity provider) and the roles a
//! page requires, and gets back an [`AccessDecision`] to act on. No
//! sessions, cookies, or HTTP types appear here, and the core store/crypto
//! crates never reference roles at all.

use serde::{Deserialize, Serialize};

/// Roles granted by the external identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    SuperAdmin,
    Admin,
    Librarian,
    Member,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::SuperAdmin => "SuperAdmin",
            Self::Admin => "Admin",
            Self::Librarian => "Librarian",
            Self::Member => "Member",
        };
        f.write_str(s)
    }
}

/// Outcome of an authorization check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    /// Caller is anonymous; the boundary should send them to login and
    /// bring them back afterwards.
    RequireLogin,
    /// Caller is authenticated but holds none of the required roles. The
    /// carried list lets the boundary say which roles would have sufficed.
    Deny { required: Vec<Role> },
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Checks whether a caller may reach a surface requiring any of `required`.
///
/// `roles` is `None` for an anonymous caller. A caller passes by holding at
/// least one required role; a surface requiring no roles at all admits
/// nobody by role (the boundary should not gate such a surface).
pub fn authorize(roles: Option<&[Role]>, required: &[Role]) -> AccessDecision {
    let Some(roles) = roles else {
        return AccessDecision::RequireLogin;
    };

    if required.iter().any(|role| roles.contains(role)) {
        AccessDecision::Allow
    } else {
        AccessDecision::Deny {
            required: required.to_vec(),
        }
    }
}

/// The dashboard a caller lands on after login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dashboard {
    Admin,
    Books,
    Home,
}

/// Picks the landing dashboard for a set of roles. Administrative roles win
/// over librarian duties; everyone else goes home.
pub fn dashboard_for(roles: &[Role]) -> Dashboard {
    if roles.contains(&Role::SuperAdmin) || roles.contains(&Role::Admin) {
        Dashboard::Admin
    } else if roles.contains(&Role::Librarian) {
        Dashboard::Books
    } else {
        Dashboard::Home
    }
}
