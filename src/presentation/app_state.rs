// Application state for HTTP handlers
use crate::application::shell_service::ShellService;

#[derive(Clone)]
pub struct AppState {
    pub shell_service: ShellService,
}
