// Application state for HTTP handlers
use crate::application::dispatcher::RequestDispatcher;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: RequestDispatcher,
}
