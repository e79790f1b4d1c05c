// Application state for HTTP handlers
use crate::application::dispatcher::NotificationDispatcher;
use crate::presentation::dashboard::DashboardView;

#[derive(Clone)]
pub struct AppState {
    pub dashboard: DashboardView,
    pub dispatcher: NotificationDispatcher,
}
