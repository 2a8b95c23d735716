//! Query objects shared by the service and database layers

mod project_query;

pub use project_query::{
    ProjectFilter, ProjectPredicate, ProjectQuery, ProjectRecord, ProjectSummary,
};
