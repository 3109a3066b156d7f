pub mod calls;
pub mod clients;
pub mod errors;
pub mod landing_pages;
pub mod matching;
pub mod onboarding;
pub mod source;
pub mod table;

pub use errors::{ServiceError, ServiceResult};
