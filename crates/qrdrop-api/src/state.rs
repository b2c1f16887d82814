//! Application state shared across handlers.

use qrdrop_core::Config;
use qrdrop_service::TransferService;

pub struct AppState {
    pub config: Config,
    pub transfer: TransferService,
}
