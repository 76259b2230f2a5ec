#[cfg(target_arch = "wasm32")]
use gloo::console;

/// Console-backed logger with a component tag so related messages can be
/// filtered together in the browser devtools.
pub struct Logger;

#[cfg(target_arch = "wasm32")]
impl Logger {
    pub fn debug_with_component(component: &str, message: &str) {
        console::debug!(format!("[{}] {}", component, message));
    }

    pub fn info_with_component(component: &str, message: &str) {
        console::info!(format!("[{}] {}", component, message));
    }

    pub fn warn_with_component(component: &str, message: &str) {
        console::warn!(format!("[{}] {}", component, message));
    }

    pub fn error_with_component(component: &str, message: &str) {
        console::error!(format!("[{}] {}", component, message));
    }
}

// gloo's console macros abort on non-wasm targets, so native builds (the
// unit-test harness) log to stderr instead.
#[cfg(not(target_arch = "wasm32"))]
impl Logger {
    pub fn debug_with_component(component: &str, message: &str) {
        eprintln!("[{}] {}", component, message);
    }

    pub fn info_with_component(component: &str, message: &str) {
        eprintln!("[{}] {}", component, message);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        eprintln!("[{}] {}", component, message);
    }

    pub fn error_with_component(component: &str, message: &str) {
        eprintln!("[{}] {}", component, message);
    }
}
