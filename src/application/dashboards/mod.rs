// Dashboard definitions, one module per monitored subsystem
use crate::application::shared::SharedDefinitions;
use crate::domain::dashboard::Dashboard;

pub mod logging;
pub mod mk8s_logs;
pub mod monitoring;
pub mod object_storage;
pub mod observability;

type Builder = fn(&SharedDefinitions) -> Dashboard;

static CATALOG: &[Builder] = &[
    monitoring::build,
    object_storage::build,
    logging::build,
    observability::build,
    mk8s_logs::build,
];

/// Build every dashboard; each builder is independent of the others.
pub fn all(shared: &SharedDefinitions) -> Vec<Dashboard> {
    CATALOG.iter().map(|build| build(shared)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_uids() {
        let uids: Vec<String> = all(&SharedDefinitions::default())
            .into_iter()
            .map(|dashboard| dashboard.uid)
            .collect();
        assert_eq!(
            uids,
            vec![
                monitoring::UID,
                object_storage::UID,
                logging::UID,
                observability::UID,
                mk8s_logs::UID,
            ]
        );
    }

    #[test]
    fn test_builders_are_deterministic() {
        let shared = SharedDefinitions::default();
        assert_eq!(all(&shared), all(&shared));
    }
}
