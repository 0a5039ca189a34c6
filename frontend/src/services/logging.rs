use log::Level;

/// Component-tagged logging.
///
/// Messages go through the `log` facade with the component as the target,
/// so `RUST_LOG=api=debug` narrows output to one part of the client.
pub struct Logger;

impl Logger {
    pub fn debug_with_component(component: &str, message: &str) {
        Self::log(Level::Debug, component, message);
    }

    pub fn info_with_component(component: &str, message: &str) {
        Self::log(Level::Info, component, message);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        Self::log(Level::Warn, component, message);
    }

    pub fn error_with_component(component: &str, message: &str) {
        Self::log(Level::Error, component, message);
    }

    fn log(level: Level, component: &str, message: &str) {
        log::log!(target: component, level, "{}", message);
    }
}
