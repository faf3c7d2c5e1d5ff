//! `quarry build` — build markup for an asset list.
//!
//! Loads `quarry.toml`, assembles the engine from the configured
//! collaborators, runs one build call, and prints the markup to stdout.
//! Progress goes to stderr so the markup stays pipeable.

use std::path::PathBuf;
use std::sync::Arc;

use quarry_config::{CacheBackend, QuarryConfig};
use quarry_engine::{AssetEngine, BuildOptions, BuildOverrides, DirectoryResolver};
use quarry_minify::BasicMinifier;
use quarry_store::{MemoryCache, NullCache, PublicStore, ResultCache};

use crate::{BuildArgs, GlobalArgs};

/// Runs the `quarry build` command.
///
/// Returns exit code 0 on success, 1 on error.
pub fn run(args: &BuildArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project_dir = resolve_project_dir(global);
    let config = quarry_config::load_config(&project_dir)?;

    let engine = make_engine(&project_dir, &config, args.assets_dir.as_deref())?;

    let overrides = BuildOverrides {
        minify: args.no_minify.then_some(false),
        inline: args.no_inline.then_some(false),
        name: args.name.clone(),
        url_base_path: args.base_url.clone(),
    };

    let assets: Vec<&str> = args.assets.iter().map(String::as_str).collect();
    let markup = engine.build(&assets, &overrides)?;

    println!("{markup}");

    if !global.quiet {
        eprintln!("   Built {} asset(s)", args.assets.len());
    }

    Ok(0)
}

/// Resolves the project directory from CLI flags, defaulting to the
/// current directory.
pub fn resolve_project_dir(global: &GlobalArgs) -> PathBuf {
    match &global.project_dir {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from("."),
    }
}

/// Assembles an engine from the loaded configuration.
///
/// Relative identifiers resolve against `assets_dir` when given,
/// otherwise against the project directory.
fn make_engine(
    project_dir: &std::path::Path,
    config: &QuarryConfig,
    assets_dir: Option<&str>,
) -> Result<AssetEngine, Box<dyn std::error::Error>> {
    let public_root = project_dir.join(&config.assets.public_dir);
    let store = PublicStore::with_file_mode(&public_root, config.assets.file_mode)?;

    let cache: Arc<dyn ResultCache> = match config.cache.backend {
        CacheBackend::Memory => Arc::new(MemoryCache::new()),
        CacheBackend::None => Arc::new(NullCache),
    };

    let resolver_root = match assets_dir {
        Some(dir) => project_dir.join(dir),
        None => project_dir.to_path_buf(),
    };

    let defaults = BuildOptions {
        minify: config.assets.minify,
        inline: config.assets.inline,
        name: config.assets.name.clone(),
        url_base_path: config.assets.url_base_path.clone(),
    };

    Ok(AssetEngine::new(
        Arc::new(DirectoryResolver::new(&resolver_root)),
        Arc::new(BasicMinifier),
        store,
        cache,
        defaults,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_config::load_config_from_str;

    fn project(config_toml: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("quarry.toml"), config_toml).unwrap();
        std::fs::create_dir_all(dir.path().join("public")).unwrap();
        dir
    }

    #[test]
    fn resolve_project_dir_default() {
        let global = GlobalArgs {
            quiet: false,
            project_dir: None,
        };
        assert_eq!(resolve_project_dir(&global), PathBuf::from("."));
    }

    #[test]
    fn resolve_project_dir_override() {
        let global = GlobalArgs {
            quiet: false,
            project_dir: Some("/srv/app".to_string()),
        };
        assert_eq!(resolve_project_dir(&global), PathBuf::from("/srv/app"));
    }

    #[test]
    fn engine_builds_from_config() {
        let dir = project("[assets]\npublic_dir = \"public\"\n");
        std::fs::write(dir.path().join("app.js"), "alert(1);").unwrap();

        let config = quarry_config::load_config(dir.path()).unwrap();
        let engine = make_engine(dir.path(), &config, None).unwrap();

        let markup = engine
            .build(
                &["app.js"],
                &BuildOverrides {
                    minify: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(markup, "<script>alert(1);</script>");
    }

    #[test]
    fn engine_resolves_against_assets_dir() {
        let dir = project("[assets]\npublic_dir = \"public\"\n");
        std::fs::create_dir_all(dir.path().join("assets")).unwrap();
        std::fs::write(dir.path().join("assets/app.js"), "alert(1);").unwrap();

        let config = quarry_config::load_config(dir.path()).unwrap();
        let engine = make_engine(dir.path(), &config, Some("assets")).unwrap();

        let markup = engine
            .build(
                &["app.js"],
                &BuildOverrides {
                    minify: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(markup, "<script>alert(1);</script>");
    }

    #[test]
    fn missing_public_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("quarry.toml"),
            "[assets]\npublic_dir = \"public\"\n",
        )
        .unwrap();

        let config = quarry_config::load_config(dir.path()).unwrap();
        assert!(make_engine(dir.path(), &config, None).is_err());
    }

    #[test]
    fn config_defaults_flow_into_engine() {
        // name and url_base_path from config shape the linked output.
        let toml = r#"
[assets]
public_dir = "public"
url_base_path = "/cache/"
inline = false
minify = false
name = "bundle"
"#;
        let dir = project(toml);
        std::fs::write(dir.path().join("app.js"), "alert(1);").unwrap();

        let config = load_config_from_str(toml).unwrap();
        let engine = make_engine(dir.path(), &config, None).unwrap();

        let markup = engine.build(&["app.js"], &BuildOverrides::none()).unwrap();
        assert!(markup.starts_with("<script src=\"/cache/"), "got: {markup}");
        assert!(markup.contains("/bundle."), "got: {markup}");
    }
}
