use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard};

use super::WindowError;

/// Class names held by live windows, process-wide.
static CLASSES: Mutex<BTreeSet<String>> = Mutex::new(BTreeSet::new());

fn classes() -> MutexGuard<'static, BTreeSet<String>> {
    // Set contents stay valid even if a holder panicked.
    CLASSES.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Registration of a window class name. Unregisters on drop.
#[derive(Debug)]
pub struct WindowClass {
    name: String,
}

impl WindowClass {
    /// Claims `name`; fails while another live window holds it.
    pub fn register(name: &str) -> Result<Self, WindowError> {
        if !classes().insert(name.to_owned()) {
            return Err(WindowError::ClassRegistration {
                name: name.to_owned(),
            });
        }
        log::debug!("registered window class \"{name}\"");
        Ok(Self {
            name: name.to_owned(),
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for WindowClass {
    fn drop(&mut self) {
        classes().remove(&self.name);
        log::debug!("unregistered window class \"{}\"", self.name);
    }
}

/// Returns true while a live window holds `name`.
pub fn is_registered(name: &str) -> bool {
    classes().contains(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_exclusive_while_held() {
        let first = WindowClass::register("class-test-exclusive").unwrap();
        let err = WindowClass::register("class-test-exclusive").unwrap_err();
        assert!(matches!(err, WindowError::ClassRegistration { ref name } if name == "class-test-exclusive"));
        assert_eq!(first.name(), "class-test-exclusive");
    }

    #[test]
    fn drop_releases_name() {
        let class = WindowClass::register("class-test-release").unwrap();
        assert!(is_registered("class-test-release"));
        drop(class);
        assert!(!is_registered("class-test-release"));
        let _again = WindowClass::register("class-test-release").unwrap();
    }
}
