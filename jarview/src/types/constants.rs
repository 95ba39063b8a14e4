//! Constants for the exclusivity endpoint and on-disk locations.

/// Loopback exclusivity endpoint.
pub mod endpoint {
    use std::net::Ipv4Addr;

    /// Address the exclusivity listener binds to.
    pub const LOOPBACK_ADDR: Ipv4Addr = Ipv4Addr::LOCALHOST;

    /// Port reserved for the running instance.
    pub const DEFAULT_PORT: u16 = 9988;
}

/// Directory and file names below the platform data/config dirs.
pub mod paths {
    pub const APP_DIR: &str = "jarview";
    pub const CONFIG_FILE: &str = "config.json";
    pub const LOCK_FILE: &str = "jarview.lock";
}

/// Error report defaults.
pub mod report {
    /// Where error reports ask users to file issues.
    pub const ISSUE_TRACKER: &str = "https://github.com/deathmarine/Luyten/issues";
}
