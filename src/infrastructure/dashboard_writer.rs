// Writes rendered dashboards to disk, one `<uid>.json` file each
use crate::application::error::{GenerationError, Result};
use crate::application::generator_service::RenderedDashboard;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub fn write_dashboards(directory: &Path, dashboards: &[RenderedDashboard]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(directory).map_err(|source| GenerationError::Io {
        path: directory.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(dashboards.len());
    for dashboard in dashboards {
        let path = directory.join(format!("{}.json", dashboard.uid));
        debug!("Writing {} bytes to {}", dashboard.json.len(), path.display());
        fs::write(&path, &dashboard.json).map_err(|source| GenerationError::Io {
            path: path.clone(),
            source,
        })?;
        info!(
            "Wrote dashboard {} ({} panels) to {}",
            dashboard.uid,
            dashboard.panels,
            path.display()
        );
        written.push(path);
    }

    Ok(written)
}
