use nq_sources::DashboardManager;

pub struct AppState {
    pub manager: DashboardManager,
}
