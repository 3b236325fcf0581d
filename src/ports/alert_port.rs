//! Alert dispatch port trait.

pub trait AlertPort {
    /// Deliver one alert. Returns `false` when delivery failed; the
    /// implementation is responsible for reporting why.
    fn send_alert(&self, text: &str) -> bool;
}
