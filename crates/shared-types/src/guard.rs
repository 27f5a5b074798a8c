//! Decision logic behind the route access guard.
//!
//! The component in the web client feeds the current identity state and the
//! membership lookup result through [`decide`]; keeping it pure lets the
//! redirect rules be tested without a renderer.

use crate::auth::Role;

/// What a guarded route demands of the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleRequirement {
    /// Any signed-in identity.
    Authenticated,
    /// A signed-in identity whose email is in the role's collection.
    Member(Role),
}

impl RoleRequirement {
    /// Where a denied visitor is sent.
    pub fn login_path(&self) -> &'static str {
        match self {
            RoleRequirement::Authenticated => Role::User.login_path(),
            RoleRequirement::Member(role) => role.login_path(),
        }
    }
}

/// Identity as observed by the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityState<'a> {
    Pending,
    SignedOut,
    SignedIn { email: &'a str },
}

/// Result of a membership lookup for the current identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Membership {
    Pending,
    Found,
    Missing,
    /// The lookup itself failed; treated as a denial.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Loading,
    Granted,
    Redirect(&'static str),
    /// A signed-in identity failed a membership requirement: end its
    /// session before leaving.
    SignOutAndRedirect(&'static str),
}

pub fn decide(
    requirement: RoleRequirement,
    identity: IdentityState<'_>,
    membership: &Membership,
) -> GuardOutcome {
    match identity {
        IdentityState::Pending => GuardOutcome::Loading,
        IdentityState::SignedOut => GuardOutcome::Redirect(requirement.login_path()),
        IdentityState::SignedIn { .. } => match requirement {
            RoleRequirement::Authenticated => GuardOutcome::Granted,
            RoleRequirement::Member(_) => match membership {
                Membership::Pending => GuardOutcome::Loading,
                Membership::Found => GuardOutcome::Granted,
                Membership::Missing | Membership::Failed(_) => {
                    GuardOutcome::SignOutAndRedirect(requirement.login_path())
                }
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NGO: RoleRequirement = RoleRequirement::Member(Role::Ngo);

    #[test]
    fn signed_out_visitor_to_ngo_route_goes_to_ngo_login() {
        let outcome = decide(NGO, IdentityState::SignedOut, &Membership::Pending);
        assert_eq!(outcome, GuardOutcome::Redirect("/login/ngo"));
    }

    #[test]
    fn signed_out_visitor_to_plain_route_goes_to_user_login() {
        let outcome = decide(
            RoleRequirement::Authenticated,
            IdentityState::SignedOut,
            &Membership::Pending,
        );
        assert_eq!(outcome, GuardOutcome::Redirect("/login/user"));
    }

    #[test]
    fn pending_identity_shows_loading() {
        let outcome = decide(NGO, IdentityState::Pending, &Membership::Found);
        assert_eq!(outcome, GuardOutcome::Loading);
    }

    #[test]
    fn pending_membership_shows_loading() {
        let me = IdentityState::SignedIn { email: "ngo@example.org" };
        assert_eq!(decide(NGO, me, &Membership::Pending), GuardOutcome::Loading);
    }

    #[test]
    fn member_is_granted() {
        let me = IdentityState::SignedIn { email: "ngo@example.org" };
        assert_eq!(decide(NGO, me, &Membership::Found), GuardOutcome::Granted);
    }

    #[test]
    fn signed_in_non_member_is_signed_out_then_sent_to_ngo_login() {
        let me = IdentityState::SignedIn { email: "citizen@example.org" };
        assert_eq!(
            decide(NGO, me, &Membership::Missing),
            GuardOutcome::SignOutAndRedirect("/login/ngo")
        );
    }

    #[test]
    fn failed_lookup_also_ends_the_session() {
        let me = IdentityState::SignedIn { email: "someone@example.org" };
        assert_eq!(
            decide(NGO, me, &Membership::Failed("timeout".into())),
            GuardOutcome::SignOutAndRedirect("/login/ngo")
        );
    }

    #[test]
    fn signed_out_visitor_is_never_asked_to_sign_out() {
        for membership in [Membership::Missing, Membership::Failed("x".into())] {
            assert_eq!(
                decide(NGO, IdentityState::SignedOut, &membership),
                GuardOutcome::Redirect("/login/ngo")
            );
        }
    }

    #[test]
    fn authenticated_requirement_ignores_membership() {
        let me = IdentityState::SignedIn { email: "someone@example.org" };
        assert_eq!(
            decide(RoleRequirement::Authenticated, me, &Membership::Missing),
            GuardOutcome::Granted
        );
    }
}
