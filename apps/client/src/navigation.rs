//! Routes, the navigator seam, and the guards that decide whether a view renders.

use std::fmt;
use std::sync::Mutex;

use tracing::debug;

use crate::models::user::User;
use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Profile,
    Analyses,
    AnalysisDetails(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/auth/login".to_string(),
            Route::Register => "/auth/register".to_string(),
            Route::Profile => "/profile".to_string(),
            Route::Analyses => "/analyses".to_string(),
            Route::AnalysisDetails(id) => format!("/analyses/{id}"),
        }
    }

    /// Requires an active session.
    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            Route::Profile | Route::Analyses | Route::AnalysisDetails(_)
        )
    }

    /// Only recruiters may stay on these.
    pub fn requires_recruiter(&self) -> bool {
        matches!(self, Route::Analyses | Route::AnalysisDetails(_))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Issues redirects. The gateway holds one to send users to the login screen.
pub trait Navigator: Send + Sync {
    fn navigate(&self, to: Route);
}

/// Records where the client currently is and how it got there.
#[derive(Default)]
pub struct History {
    trail: Mutex<Vec<Route>>,
}

impl History {
    fn trail(&self) -> std::sync::MutexGuard<'_, Vec<Route>> {
        self.trail.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn current(&self) -> Option<Route> {
        self.trail().last().cloned()
    }

    #[cfg(test)]
    pub fn visited(&self) -> Vec<Route> {
        self.trail().clone()
    }
}

impl Navigator for History {
    fn navigate(&self, to: Route) {
        debug!("Navigating to {to}");
        self.trail().push(to);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Render,
    Redirect(Route),
}

/// Protected routes redirect to the login screen while no session is active.
pub fn guard_session(session: &Session, route: &Route) -> Access {
    if route.is_protected() && !session.is_authenticated() {
        Access::Redirect(Route::Login)
    } else {
        Access::Render
    }
}

/// Once the user is known, non-recruiters are sent home from recruiter screens.
/// An unknown user (still loading) renders.
pub fn guard_recruiter(user: Option<&User>, route: &Route) -> Access {
    match user {
        Some(user) if route.requires_recruiter() && !user.is_recruiter => {
            Access::Redirect(Route::Home)
        }
        _ => Access::Render,
    }
}
