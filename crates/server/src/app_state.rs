use dashboard::DashboardContext;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) dashboard: DashboardContext,
}
