//! Subcommand definitions and their execution against a [`SqlStore`].
//!
//! Every command returns a JSON document; printing is left to `main`.

use clap::Subcommand;
use serde_json::{json, Value};

use graphsql_storage::{GraphStore, SqlStore};

use crate::error::CliError;

/// The store type the CLI works with: string keys, arbitrary JSON values.
pub type CliStore = SqlStore<String, Value>;

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the vertices and edges tables.
    Setup,

    /// Drop the edges and vertices tables, removing all data.
    Destroy,

    /// Print vertex and edge counts.
    Stats,

    /// List all vertex keys.
    Vertices,

    /// Show one vertex.
    Vertex {
        /// Vertex key.
        #[arg(short, long)]
        key: String,
    },

    /// List all edges.
    Edges,

    /// Show one edge.
    Edge {
        /// Source vertex key.
        #[arg(short, long)]
        source: String,

        /// Target vertex key.
        #[arg(short, long)]
        target: String,
    },
}

/// Runs one subcommand and returns its JSON output.
pub fn execute(store: &mut CliStore, command: &Commands) -> Result<Value, CliError> {
    let output = match command {
        Commands::Setup => {
            store.setup_tables()?;
            let config = store.config();
            json!({ "created": [config.vertices_table, config.edges_table] })
        }
        Commands::Destroy => {
            store.destroy_tables()?;
            let config = store.config();
            json!({ "dropped": [config.edges_table, config.vertices_table] })
        }
        Commands::Stats => json!({
            "vertices": store.vertex_count()?,
            "edges": store.edge_count()?,
        }),
        Commands::Vertices => json!(store.list_vertices()?),
        Commands::Vertex { key } => {
            let (value, properties) = store.vertex(key)?;
            json!({
                "key": key,
                "value": value,
                "weight": properties.weight,
                "attributes": properties.attributes,
            })
        }
        Commands::Edges => serde_json::to_value(store.list_edges()?)?,
        Commands::Edge { source, target } => serde_json::to_value(store.edge(source, target)?)?,
    };
    Ok(output)
}
