use dioxus::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use shared_types::identity::IdentityHub;
use shared_types::AuthUser;

/// Global authentication state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AuthState {
    pub current_user: Signal<Option<AuthUser>>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            current_user: Signal::new(None),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.read().is_some()
    }

    pub fn set_user(&mut self, user: AuthUser) {
        self.current_user.set(Some(user));
    }

    pub fn clear_auth(&mut self) {
        self.current_user.set(None);
    }
}

/// Hook to access auth state.
pub fn use_auth() -> AuthState {
    use_context::<AuthState>()
}

/// App-wide identity hub. Sign-in, sign-out and the startup session probe
/// all publish here.
pub type Identity = IdentityHub<AuthUser>;

/// What a subscribed view currently knows about the visitor.
#[derive(Debug, Clone, PartialEq)]
pub enum Observed {
    Unknown,
    Known(Option<AuthUser>),
}

/// Subscribe the calling component to the identity hub for as long as it is
/// mounted. The subscription is released when the component unmounts.
pub fn use_identity() -> SyncSignal<Observed> {
    let hub = use_context::<Identity>();
    let observed = use_signal_sync(|| match hub.current() {
        Some(user) => Observed::Known(user),
        None => Observed::Unknown,
    });

    let subscription = use_hook(|| {
        let listener = move |user: Option<&AuthUser>| {
            let next = Observed::Known(user.cloned());
            // Subscribing replays the current identity; skip the no-op write.
            if *observed.peek() != next {
                let mut observed = observed;
                observed.set(next);
            }
        };
        Rc::new(RefCell::new(Some(hub.subscribe(listener))))
    });

    use_drop(move || {
        if let Some(sub) = subscription.borrow_mut().take() {
            sub.cancel();
        }
    });

    observed
}
