//! Presence integration that only writes to the log.

use log::{debug, info};
use std::sync::atomic::{AtomicBool, Ordering};

use jarview::{Presence, PresenceContext, PresenceError};

#[derive(Debug, Default)]
pub struct LogPresence {
    active: AtomicBool,
}

impl LogPresence {
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

impl Presence for LogPresence {
    fn init(&self) -> Result<(), PresenceError> {
        self.active.store(true, Ordering::SeqCst);
        info!("Presence started");
        Ok(())
    }

    fn update(&self, context: Option<&PresenceContext>) -> Result<(), PresenceError> {
        if !self.is_active() {
            return Err(PresenceError::Unavailable("not started".into()));
        }
        match context.and_then(|c| c.file_name.as_deref()) {
            Some(name) => debug!("Presence: viewing {name}"),
            None => debug!("Presence: idle"),
        }
        Ok(())
    }

    fn stop(&self) -> Result<(), PresenceError> {
        if self.active.swap(false, Ordering::SeqCst) {
            info!("Presence stopped");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_requires_init() {
        let presence = LogPresence::default();
        assert!(presence.update(None).is_err());

        presence.init().unwrap();
        assert!(presence.is_active());
        assert!(presence.update(None).is_ok());

        presence.stop().unwrap();
        assert!(!presence.is_active());
        assert!(presence.update(None).is_err());
    }
}
