use dioxus::prelude::*;
use std::cell::Cell;
use std::rc::Rc;
use shared_types::guard::{decide, GuardOutcome, IdentityState, Membership, RoleRequirement};

use crate::auth::{use_auth, use_identity, Identity, Observed};
use crate::routes::Route;

/// Renders `children` only once the visitor satisfies `requirement`.
///
/// The membership lookup is re-issued on every mount and whenever the
/// identity changes; nothing is cached between visits. A failed lookup is
/// logged and treated as a denial. A signed-in visitor who is denied is
/// signed out before being sent to the login page.
#[component]
pub fn AccessGuard(requirement: RoleRequirement, children: Element) -> Element {
    let observed = use_identity();
    let mut auth = use_auth();
    let hub = use_context::<Identity>();
    let signing_out = use_hook(|| Rc::new(Cell::new(false)));

    let membership = use_resource(move || async move {
        let email = match &*observed.read() {
            Observed::Known(Some(user)) => user.email.clone(),
            _ => return (None, Membership::Pending),
        };
        let RoleRequirement::Member(role) = requirement else {
            return (Some(email), Membership::Found);
        };
        let found = match server::api::check_role_membership(role).await {
            Ok(true) => Membership::Found,
            Ok(false) => Membership::Missing,
            Err(e) => {
                tracing::warn!(error = %e, role = role.as_str(), "Membership lookup failed");
                Membership::Failed(e.to_string())
            }
        };
        (Some(email), found)
    });

    let current = observed.read().clone();
    let identity = match &current {
        Observed::Unknown => IdentityState::Pending,
        Observed::Known(None) => IdentityState::SignedOut,
        Observed::Known(Some(user)) => IdentityState::SignedIn { email: &user.email },
    };

    // A lookup answered for a previous identity says nothing about this one.
    let lookup = match (&*membership.read(), identity) {
        (Some((Some(checked), result)), IdentityState::SignedIn { email }) if checked == email => {
            result.clone()
        }
        _ => Membership::Pending,
    };

    match decide(requirement, identity, &lookup) {
        GuardOutcome::Granted => rsx! { {children} },
        GuardOutcome::Loading => rsx! {
            div { class: "page-loading",
                p { "Checking access..." }
            }
        },
        GuardOutcome::Redirect(path) => {
            let target = path.parse::<Route>().unwrap_or(Route::Home {});
            navigator().replace(target);
            rsx! {
                div { class: "page-loading",
                    p { "Redirecting to login..." }
                }
            }
        }
        GuardOutcome::SignOutAndRedirect(path) => {
            if !signing_out.replace(true) {
                let target = path.parse::<Route>().unwrap_or(Route::Home {});
                let hub = hub.clone();
                let signing_out = signing_out.clone();
                spawn(async move {
                    tracing::info!(path, "Signing out visitor denied by access guard");
                    if let Err(e) = server::api::logout().await {
                        tracing::warn!(error = %e, "Forced logout failed");
                    }
                    auth.clear_auth();
                    hub.publish(None);
                    signing_out.set(false);
                    navigator().replace(target);
                });
            }
            rsx! {
                div { class: "page-loading",
                    p { "Signing out..." }
                }
            }
        }
    }
}
