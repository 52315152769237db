//! Commit and date stamped in by `build.rs`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `cardsharp <date> (<commit>)`, as printed by `--version`.
pub fn version_line() -> String {
    format!("cardsharp {} ({})", BUILD_DATE, BUILD_COMMIT)
}
