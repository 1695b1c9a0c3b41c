// Application layer - Dashboard definitions, shared building blocks and use cases
pub mod dashboards;
pub mod error;
pub mod generator_service;
pub mod overrides;
pub mod panel_factory;
pub mod query_builder;
pub mod shared;
pub mod validation;
