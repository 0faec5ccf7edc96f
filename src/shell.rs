use std::time::Duration;

use log::{info, warn};

use crate::PrepVistaError;
use crate::navigation::{SectionId, SectionRouter};
use crate::panels::{AppContext, Panel};
use crate::session::{AuthGate, IdentityProvider, User};

/// The signed-in part of the application: who is signed in, which section is
/// active, and the one live panel for it.
pub struct Workspace {
    user: User,
    router: SectionRouter,
    panel: Panel,
}

impl Workspace {
    pub fn new(user: User, ctx: &AppContext) -> Self {
        let router = SectionRouter::default();
        let panel = Panel::enter(router.active_section(), &user, &ctx.timings);
        Self {
            user,
            router,
            panel,
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn active_section(&self) -> SectionId {
        self.router.active_section()
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut Panel {
        &mut self.panel
    }

    /// Tears the current panel down and builds the one for `section`.
    /// Returns false when `section` is already active.
    pub fn navigate(&mut self, section: SectionId, ctx: &mut AppContext) -> bool {
        if self.router.is_active(section) {
            return false;
        }
        self.panel.exit(ctx);
        self.router.set_active_section(section);
        self.panel = Panel::enter(section, &self.user, &ctx.timings);
        true
    }

    /// Like [`Workspace::navigate`] for a string id. An unknown id leaves the
    /// current section in place.
    pub fn navigate_to_id(&mut self, id: &str, ctx: &mut AppContext) -> Result<bool, PrepVistaError> {
        let section = id.parse::<SectionId>().map_err(|e| {
            warn!("{e}");
            e
        })?;
        Ok(self.navigate(section, ctx))
    }

    pub fn advance(&mut self, elapsed: Duration, ctx: &mut AppContext) {
        self.panel.advance(elapsed, ctx);
    }

    fn close(&mut self, ctx: &mut AppContext) {
        self.panel.exit(ctx);
    }
}

/// Root controller: the auth gate until someone signs in, the workspace
/// after.
pub struct Shell {
    pub auth: AuthGate,
    pub ctx: AppContext,
    workspace: Option<Workspace>,
}

impl Shell {
    pub fn new(provider: Box<dyn IdentityProvider>, ctx: AppContext) -> Self {
        let auth = AuthGate::new(provider, ctx.timings.auth_delay());
        Self {
            auth,
            ctx,
            workspace: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.workspace.is_some()
    }

    pub fn workspace(&self) -> Option<&Workspace> {
        self.workspace.as_ref()
    }

    /// The workspace together with the context its panels need.
    pub fn workspace_mut(&mut self) -> Option<(&mut Workspace, &mut AppContext)> {
        self.workspace.as_mut().map(|ws| (ws, &mut self.ctx))
    }

    pub fn advance(&mut self, elapsed: Duration) {
        match self.workspace.as_mut() {
            Some(workspace) => workspace.advance(elapsed, &mut self.ctx),
            None => {
                if let Some(user) = self.auth.advance(elapsed) {
                    self.workspace = Some(Workspace::new(user, &self.ctx));
                }
            }
        }
    }

    pub fn sign_out(&mut self) {
        if let Some(mut workspace) = self.workspace.take() {
            workspace.close(&mut self.ctx);
            info!("{} signed out", workspace.user().name);
        }
    }

    /// Releases whatever the active panel holds. Called when the window
    /// closes.
    pub fn shutdown(&mut self) {
        if let Some(workspace) = self.workspace.as_mut() {
            workspace.close(&mut self.ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Timings;
    use crate::devices::{DevicePermissions, SimulatedDevices};
    use crate::session::SimulatedIdentityProvider;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn ctx() -> AppContext {
        AppContext::new(
            Box::new(SimulatedDevices::new(DevicePermissions::default())),
            StdRng::seed_from_u64(7),
            Timings::default(),
        )
    }

    #[test]
    fn test_workspace_appears_after_login() {
        let mut shell = Shell::new(Box::new(SimulatedIdentityProvider), ctx());
        assert!(!shell.is_authenticated());
        assert!(shell.auth.submit_login("alex@example.com", "pw"));
        shell.advance(Duration::from_millis(500));
        assert!(!shell.is_authenticated());
        shell.advance(Duration::from_millis(500));

        let workspace = shell.workspace().unwrap();
        assert_eq!(workspace.active_section(), SectionId::Dashboard);
        assert_eq!(workspace.panel().section(), SectionId::Dashboard);
    }

    #[test]
    fn test_unknown_id_keeps_section() {
        let mut ctx = ctx();
        let mut workspace = Workspace::new(User::demo(), &ctx);
        workspace.navigate(SectionId::Reports, &mut ctx);
        let result = workspace.navigate_to_id("roadmap", &mut ctx);
        assert!(matches!(result, Err(PrepVistaError::UnknownSection { .. })));
        assert_eq!(workspace.active_section(), SectionId::Reports);
    }

    #[test]
    fn test_same_section_keeps_panel_state() {
        let mut ctx = ctx();
        let mut workspace = Workspace::new(User::demo(), &ctx);
        workspace.navigate(SectionId::Library, &mut ctx);
        if let Panel::Library(library) = workspace.panel_mut() {
            library.filter.query = "api".to_string();
        }
        assert!(!workspace.navigate(SectionId::Library, &mut ctx));
        let Panel::Library(library) = workspace.panel() else {
            panic!("library panel expected");
        };
        assert_eq!(library.filter.query, "api");
    }

    #[test]
    fn test_sign_out_returns_to_auth() {
        let mut shell = Shell::new(Box::new(SimulatedIdentityProvider), ctx());
        shell.auth.submit_login("a@b.c", "pw");
        shell.advance(Duration::from_secs(1));
        shell.sign_out();
        assert!(!shell.is_authenticated());
    }
}
