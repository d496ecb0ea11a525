//! Request-scoped session context.
//!
//! # Invariants
//! - Session state is passed explicitly into the dispatcher; handlers
//!   never consult ambient global auth state.
//! - Anonymous requests to private routes redirect to the login page
//!   with the original target preserved in `next`.

use crate::model::user::UserId;
use crate::web::router::LOGIN_PATH;

/// Two-state per-request auth context: anonymous or authenticated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<UserId>,
}

impl Session {
    /// A fresh anonymous session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A session already bound to `user` (test and host-framework use).
    pub fn authenticated(user: UserId) -> Self {
        Self { user: Some(user) }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn current_user(&self) -> Option<UserId> {
        self.user
    }

    pub fn log_in(&mut self, user: UserId) {
        self.user = Some(user);
    }

    pub fn log_out(&mut self) {
        self.user = None;
    }
}

/// Builds the login redirect target for an anonymous request to `next`.
pub fn login_redirect_target(next: &str) -> String {
    format!("{LOGIN_PATH}?next={next}")
}

#[cfg(test)]
mod tests {
    use super::{login_redirect_target, Session};
    use uuid::Uuid;

    #[test]
    fn session_transitions_between_states() {
        let mut session = Session::anonymous();
        assert!(!session.is_authenticated());

        let user = Uuid::new_v4();
        session.log_in(user);
        assert_eq!(session.current_user(), Some(user));

        session.log_out();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn redirect_target_preserves_requested_url() {
        assert_eq!(
            login_redirect_target("/notes/slug/edit/"),
            "/auth/login/?next=/notes/slug/edit/"
        );
    }
}
