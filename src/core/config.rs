use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub storage_path: PathBuf,

    /// When true, the store skips sled's background flush and the explicit
    /// post-commit flush. Faster, but a crash can lose recent commits.
    pub no_sync: bool,

    /// Per-token posting-list cap applied at write time. 0 = uncapped.
    pub max_ids: u32,

    /// Bound on how long `Store::open` retries acquiring sled's exclusive
    /// open lock before surfacing `ErrorKind::StoreOpen`.
    pub open_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage_path: PathBuf::from("./data.idx"),
            no_sync: false,
            max_ids: 0,
            open_timeout: Duration::from_secs(1),
        }
    }
}
