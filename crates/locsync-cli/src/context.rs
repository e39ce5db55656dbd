use std::path::{Path, PathBuf};

use color_eyre::eyre::Result;
use locsync_config::LocSyncConfig;
use locsync_core::ReconcileConfig;
use locsync_services::Naming;

/// Settings resolved once per run and shared by every command.
pub struct Context {
    pub config: LocSyncConfig,
    pub reconcile: ReconcileConfig,
    pub naming: Naming,
    pub use_color: bool,
}

impl Context {
    pub fn load(config_path: Option<&Path>, use_color: bool) -> Result<Self> {
        let config = locsync_config::load_config(config_path)?;
        let reconcile = config.to_reconcile_config();
        let (filename_prefix, filename_suffix, primary_extension, allowed_extensions) =
            config.naming_parts();
        Ok(Self {
            naming: Naming {
                filename_prefix,
                filename_suffix,
                primary_extension,
                allowed_extensions,
            },
            reconcile,
            config,
            use_color,
        })
    }

    /// CLI roots when given, otherwise the configured search directories.
    pub fn roots(&self, cli_roots: Vec<PathBuf>) -> Vec<PathBuf> {
        if cli_roots.is_empty() {
            self.config.search_dirs()
        } else {
            cli_roots
        }
    }

    pub fn discover(&self, cli_roots: Vec<PathBuf>) -> Vec<PathBuf> {
        locsync_services::discover_table_files(
            &self.roots(cli_roots),
            &self.naming,
            self.config.include_subdirectories(),
        )
    }
}
