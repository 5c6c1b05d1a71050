//! Version information display
//!
//! Prints version and the phase catalog in human or JSON format.

use crate::cli::args::{OutputFormat, VersionArgs};
use crate::config::generate::SLOT_LETTERS;

/// Print version and build information.
pub fn run(args: &VersionArgs) {
    let name = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    match args.format {
        OutputFormat::Human => {
            println!("{name} {version}");
        }
        OutputFormat::Json => {
            let info = serde_json::json!({
                "name": name,
                "version": version,
                "phase_letters": SLOT_LETTERS,
            });
            println!("{info}");
        }
    }
}
