use digraph_graph::GraphError;
use digraph_storage::CodecError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("Diagram has no file name yet; save it under a new name first")]
    NoDocumentPath,
    #[error("Failed to access settings {}: {source}", path.display())]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid settings file {}: {source}", path.display())]
    SettingsFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
