//! Alert adapter that emits alerts as log events.

use crate::ports::alert_port::AlertPort;
use tracing::{info, warn};

pub struct LogAlertAdapter {
    enabled: bool,
}

impl LogAlertAdapter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl AlertPort for LogAlertAdapter {
    fn send_alert(&self, text: &str) -> bool {
        if !self.enabled {
            warn!("alerts disabled, dropping alert");
            return false;
        }
        for line in text.lines() {
            info!(target: "algotrader::alert", "{line}");
        }
        true
    }
}
