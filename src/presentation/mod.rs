// Presentation layer - Dashboard view and HTTP surface
pub mod app_state;
pub mod dashboard;
pub mod handlers;
pub mod router;
