// Generator service - Builds, validates and renders the dashboard catalog
use crate::application::dashboards;
use crate::application::error::{GenerationError, Result};
use crate::application::shared::SharedDefinitions;
use crate::application::validation::{ensure_unique_uids, validate_dashboard};
use crate::domain::dashboard::Dashboard;
use crate::infrastructure::grafana_mapper::render_dashboard;
use serde::Serialize;
use tracing::{debug, info};

/// A dashboard serialized to its final JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedDashboard {
    pub uid: String,
    pub title: String,
    pub panels: usize,
    #[serde(skip)]
    pub json: String,
}

#[derive(Debug, Clone)]
pub struct GeneratorService {
    shared: SharedDefinitions,
}

impl GeneratorService {
    pub fn new(shared: SharedDefinitions) -> Self {
        Self { shared }
    }

    /// Build every dashboard and run all checks; nothing is rendered on failure.
    pub fn dashboards(&self) -> Result<Vec<Dashboard>> {
        let dashboards = dashboards::all(&self.shared);
        debug!("Built {} dashboards", dashboards.len());
        validate_all(&dashboards)?;
        Ok(dashboards)
    }

    pub fn render_all(&self) -> Result<Vec<RenderedDashboard>> {
        self.dashboards()?.iter().map(render).collect()
    }

    pub fn render_one(&self, uid: &str) -> Result<RenderedDashboard> {
        let dashboards = self.dashboards()?;
        let dashboard = dashboards
            .iter()
            .find(|dashboard| dashboard.uid == uid)
            .ok_or_else(|| GenerationError::UnknownDashboard(uid.to_string()))?;
        render(dashboard)
    }
}

pub fn validate_all(dashboards: &[Dashboard]) -> Result<()> {
    ensure_unique_uids(dashboards)?;
    for dashboard in dashboards {
        validate_dashboard(dashboard)?;
        debug!(
            "Dashboard {} passed validation ({} panels)",
            dashboard.uid,
            dashboard.all_panels().count()
        );
    }
    info!("Validated {} dashboards", dashboards.len());
    Ok(())
}

fn render(dashboard: &Dashboard) -> Result<RenderedDashboard> {
    let json = render_dashboard(dashboard)?;
    Ok(RenderedDashboard {
        uid: dashboard.uid.clone(),
        title: dashboard.title.clone(),
        panels: dashboard.all_panels().count(),
        json,
    })
}
