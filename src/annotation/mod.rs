//! Document annotations
//!
//! - [`AnnotationRegistry`]: warnings keyed by document kind
//! - [`DEPRECATION_RULES`]: the rule table that populates it per cluster
//! - [`Annotator`]: writes provenance and warnings onto documents

mod apply;
mod registry;
mod rules;

pub use apply::Annotator;
pub use registry::{AnnotationRegistry, AnnotationWarning};
pub use rules::{
    build_deprecation_warnings, build_deprecation_warnings_with, AnnotationRule, DEPRECATION_RULES,
};
