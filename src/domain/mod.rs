pub mod call;
pub mod client;
pub mod landing_page;
pub mod matching;
pub mod onboarding;
pub mod types;
