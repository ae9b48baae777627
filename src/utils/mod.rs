pub mod config;
pub mod constants;
pub mod data_io;
pub mod env;
pub mod progress_bars;

/// Memory used by the system, in MB.
pub fn get_memory_usage() -> u64 {
    use sysinfo::System;
    let mut sys = System::new();
    sys.refresh_memory();
    sys.used_memory() / (1024 * 1024)
}
