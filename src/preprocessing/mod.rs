pub mod validator;

pub use validator::{
    IssueKind, ScheduleFileValidator, ValidationIssue, ValidationResult,
};
