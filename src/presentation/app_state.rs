// Application state for HTTP handlers
use crate::application::generator_service::RenderedDashboard;

/// Dashboards rendered once at startup; the preview server never rebuilds them.
#[derive(Clone)]
pub struct AppState {
    pub dashboards: Vec<RenderedDashboard>,
}

impl AppState {
    pub fn find(&self, uid: &str) -> Option<&RenderedDashboard> {
        self.dashboards.iter().find(|dashboard| dashboard.uid == uid)
    }
}
