pub mod course_handlers;
pub mod health_handlers;
pub mod progress_handlers;
pub mod transaction_handlers;
pub mod user_clerk_handlers;
