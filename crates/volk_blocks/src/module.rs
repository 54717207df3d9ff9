//! Process-wide state: the kernel profile check and the shared block registry.
use std::path::PathBuf;

use crate::registry::BlockRegistry;

lazy_static::lazy_static! {
    static ref REGISTRY: BlockRegistry = build_registry();
}

fn build_registry() -> BlockRegistry {
    check_kernel_profile();
    match BlockRegistry::with_all_blocks() {
        Ok(r) => {
            log::debug!("Registered {} blocks", r.len());
            r
        }
        // The table is static, so this is a bug in the crate rather than something callers can handle.
        Err(e) => panic!("Built-in block table is invalid: {}", e),
    }
}

/// Look for the kernel profile, warning if there isn't one.
pub fn check_kernel_profile() -> Option<PathBuf> {
    let found = volk_kernels::profile::find_profile();
    match found.as_ref() {
        Some(path) => log::debug!("Using kernel profile {}", path.display()),
        None => log::warn!("No VOLK config file found. Run volk_profile for best performance."),
    }
    found
}

/// The registry of every block, built on first use.
pub fn registry() -> &'static BlockRegistry {
    &REGISTRY
}
