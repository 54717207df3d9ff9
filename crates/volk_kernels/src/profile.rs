//! Locating the kernel profile written by `volk_profile`.
//!
//! The profile records which implementation of each kernel is fastest on the current machine.  Its absence is not an
//! error, but it is worth telling the user about.
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const PROFILE_FILE_NAME: &str = "volk_config";

/// Where a profile may live, most preferred first, given a way to read environment variables.
pub fn candidate_paths_with(env: impl Fn(&str) -> Option<OsString>) -> Vec<PathBuf> {
    let mut ret = vec![];

    if let Some(dir) = env("VOLK_CONFIGPATH") {
        ret.push(Path::new(&dir).join("volk").join(PROFILE_FILE_NAME));
    }

    for home_var in ["HOME", "APPDATA"] {
        if let Some(dir) = env(home_var) {
            ret.push(Path::new(&dir).join(".volk").join(PROFILE_FILE_NAME));
        }
    }

    ret
}

/// Where a profile may live, according to the process environment.
pub fn candidate_paths() -> Vec<PathBuf> {
    candidate_paths_with(|name| std::env::var_os(name))
}

/// The profile which would be used, if any exists.
pub fn find_profile() -> Option<PathBuf> {
    first_existing(candidate_paths())
}

fn first_existing(candidates: Vec<PathBuf>) -> Option<PathBuf> {
    candidates.into_iter().find(|p| p.is_file())
}
