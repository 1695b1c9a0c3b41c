// Domain layer - Plain dashboard definitions, free of output format concerns
pub mod dashboard;
pub mod datasource;
pub mod override_rule;
pub mod panel;
pub mod query;
pub mod variable;
