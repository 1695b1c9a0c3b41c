// Infrastructure layer - Config loading, Grafana document mapping and file output
pub mod config;
pub mod dashboard_writer;
pub mod grafana_mapper;
pub mod grafana_schema;
