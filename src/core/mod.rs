pub mod controller;
pub mod submission;
pub mod validation;

pub use crate::domain::model::{
    DocumentHandle, EmploymentStatus, Field, FieldErrors, FormInput, Registration,
    RegistrationDocument,
};
pub use crate::domain::ports::{Clock, DocumentStore, SystemClock};
