// Current user and the simulated sign-in flow.

use std::time::Duration;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::scheduler::{Scheduler, TimerId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub university: Option<String>,
    pub course: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: String,
}

impl User {
    /// The canned account every simulated sign-in resolves to.
    pub fn demo() -> Self {
        Self {
            id: "1".to_string(),
            name: "Alex Johnson".to_string(),
            email: "alex.johnson@university.edu".to_string(),
            university: Some("Stanford University".to_string()),
            course: Some("Computer Science".to_string()),
            avatar_url: None,
            created_at: "2024-01-01".to_string(),
        }
    }

    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub university: String,
    pub course: String,
    pub password: String,
}

/// Seam for a real identity provider. Nothing in the panels depends on how
/// users are resolved.
pub trait IdentityProvider {
    fn login(&mut self, email: &str, password: &str) -> User;
    fn signup(&mut self, request: &SignUpRequest) -> User;
}

/// Resolves every login to [`User::demo`] and every sign-up to the demo user
/// overridden with the submitted details. There is no failure path.
#[derive(Debug, Default)]
pub struct SimulatedIdentityProvider;

impl IdentityProvider for SimulatedIdentityProvider {
    fn login(&mut self, email: &str, _password: &str) -> User {
        debug!("Simulated login for {email}");
        User::demo()
    }

    fn signup(&mut self, request: &SignUpRequest) -> User {
        debug!("Simulated sign-up for {}", request.email);
        let non_empty = |value: &str| (!value.trim().is_empty()).then(|| value.trim().to_string());
        User {
            name: request.name.clone(),
            email: request.email.clone(),
            university: non_empty(&request.university),
            course: non_empty(&request.course),
            ..User::demo()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    SignUp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AuthRequest {
    Login { email: String, password: String },
    SignUp(SignUpRequest),
}

/// Gates the workspace behind the login or sign-up form.
pub struct AuthGate {
    mode: AuthMode,
    delay: Duration,
    provider: Box<dyn IdentityProvider>,
    scheduler: Scheduler<AuthRequest>,
    pending: Option<TimerId>,
}

impl AuthGate {
    pub fn new(provider: Box<dyn IdentityProvider>, delay: Duration) -> Self {
        Self {
            mode: AuthMode::Login,
            delay,
            provider,
            scheduler: Scheduler::new(),
            pending: None,
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn switch_mode(&mut self, mode: AuthMode) {
        self.mode = mode;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns false if a request is already in flight.
    pub fn submit_login(&mut self, email: &str, password: &str) -> bool {
        self.submit(AuthRequest::Login {
            email: email.to_string(),
            password: password.to_string(),
        })
    }

    /// Submitting requires the terms to be accepted. Returns false when the
    /// request was not queued.
    pub fn submit_signup(&mut self, request: SignUpRequest, accept_terms: bool) -> bool {
        if !accept_terms {
            debug!("Sign-up ignored, terms not accepted");
            return false;
        }
        self.submit(AuthRequest::SignUp(request))
    }

    fn submit(&mut self, request: AuthRequest) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(self.scheduler.schedule_once(self.delay, request));
        true
    }

    /// Advances the simulated delay. Yields the signed-in user once it resolves.
    pub fn advance(&mut self, elapsed: Duration) -> Option<User> {
        let until = self.scheduler.horizon(elapsed);
        let mut user = None;
        while let Some(request) = self.scheduler.poll(until) {
            self.pending = None;
            let resolved = match request {
                AuthRequest::Login { email, password } => self.provider.login(&email, &password),
                AuthRequest::SignUp(request) => self.provider.signup(&request),
            };
            info!("Signed in as {}", resolved.name);
            user = Some(resolved);
        }
        user
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> AuthGate {
        AuthGate::new(Box::new(SimulatedIdentityProvider), Duration::from_secs(1))
    }

    #[test]
    fn test_login_resolves_after_delay() {
        let mut gate = gate();
        assert!(gate.submit_login("a@b.c", "secret"));
        assert!(gate.is_pending());

        assert_eq!(gate.advance(Duration::from_millis(999)), None);
        let user = gate.advance(Duration::from_millis(1)).unwrap();
        assert_eq!(user, User::demo());
        assert!(!gate.is_pending());
    }

    #[test]
    fn test_second_submit_ignored_while_pending() {
        let mut gate = gate();
        assert!(gate.submit_login("a@b.c", "secret"));
        assert!(!gate.submit_login("x@y.z", "other"));
    }

    #[test]
    fn test_signup_requires_terms() {
        let mut gate = gate();
        gate.switch_mode(AuthMode::SignUp);
        let request = SignUpRequest {
            name: "Sam Lee".to_string(),
            email: "sam@lee.dev".to_string(),
            university: "MIT".to_string(),
            course: String::new(),
            password: "pw".to_string(),
        };
        assert!(!gate.submit_signup(request.clone(), false));
        assert!(gate.submit_signup(request, true));

        let user = gate.advance(Duration::from_secs(1)).unwrap();
        assert_eq!(user.name, "Sam Lee");
        assert_eq!(user.email, "sam@lee.dev");
        assert_eq!(user.university.as_deref(), Some("MIT"));
        assert_eq!(user.course, None);
        assert_eq!(user.id, User::demo().id);
    }

    #[test]
    fn test_first_name() {
        assert_eq!(User::demo().first_name(), "Alex");
    }
}
