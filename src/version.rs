#![allow(clippy::doc_markdown)] // Generated file contains OPT_LEVEL without backticks
#![allow(dead_code)]

use std::sync::LazyLock;

include!(concat!(env!("OUT_DIR"), "/built.rs"));

/// Version string logged at startup: the package version, followed by the short git commit
/// hash when built from a repository and `-dirty` when that checkout had uncommitted changes.
pub static VERSION: LazyLock<String> = LazyLock::new(|| {
    let mut version = PKG_VERSION.to_string();
    if let Some(hash) = GIT_COMMIT_HASH_SHORT {
        version.push('-');
        version.push_str(hash);
        if GIT_DIRTY == Some(true) {
            version.push_str("-dirty");
        }
    }
    version
});
