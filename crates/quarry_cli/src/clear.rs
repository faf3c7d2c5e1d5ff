//! `quarry clear` — remove the public artifact store.

use quarry_store::PublicStore;

use crate::build::resolve_project_dir;
use crate::GlobalArgs;

/// Runs the `quarry clear` command.
///
/// Removes every published artifact and the public root directory
/// itself. Returns exit code 0 on success, 1 on error.
pub fn run(global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project_dir = resolve_project_dir(global);
    let config = quarry_config::load_config(&project_dir)?;

    let public_root = project_dir.join(&config.assets.public_dir);
    let store = PublicStore::new(&public_root)?;
    store.clear()?;

    if !global.quiet {
        eprintln!("   Cleared {}", public_root.display());
    }

    Ok(0)
}
