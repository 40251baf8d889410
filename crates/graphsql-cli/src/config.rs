//! Loading [`StoreConfig`] for the CLI.
//!
//! Precedence, lowest to highest: built-in defaults, the `--config` TOML
//! file, the `--vertices-table` / `--edges-table` flags.

use std::path::Path;

use graphsql_storage::StoreConfig;

use crate::error::CliError;

/// Builds the store configuration from an optional TOML file plus flag
/// overrides. A config path that was given but cannot be read is an error.
pub fn load_store_config(
    path: Option<&Path>,
    vertices_table: Option<String>,
    edges_table: Option<String>,
) -> Result<StoreConfig, CliError> {
    let mut config = match path {
        Some(path) => {
            let contents =
                std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
                    path: path.to_path_buf(),
                    source,
                })?;
            toml::from_str(&contents).map_err(|source| CliError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?
        }
        None => StoreConfig::default(),
    };

    if let Some(name) = vertices_table {
        config.vertices_table = name;
    }
    if let Some(name) = edges_table {
        config.edges_table = name;
    }
    Ok(config)
}
