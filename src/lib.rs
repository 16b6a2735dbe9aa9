pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod presentation;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::Cli;

pub use crate::config::AppConfig;
pub use crate::core::controller::{FormController, FormState, FormView, SubmitOutcome};
pub use crate::core::submission::SubmissionClient;
pub use crate::core::validation::validate;
pub use crate::domain::model::{EmploymentStatus, Field, FieldErrors, FormInput, Registration};
pub use crate::utils::error::{AppError, Result, SubmissionError};
