use thiserror::Error;

/// Top-level error type for the Geoplan engine.
#[derive(Debug, Error)]
pub enum GeoplanError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Assembly(#[from] AssemblyError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors raised when an operation references walls or rooms that do not exist.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("wall not found: {0}")]
    WallNotFound(String),

    #[error("room not found: {0}")]
    RoomNotFound(String),
}

/// Errors related to engine operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Errors related to wall assemblies and their layers.
#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("unknown wall type: {0}")]
    UnknownWallType(String),

    #[error("unknown material: {0}")]
    UnknownMaterial(String),

    #[error("wall assembly has no core layer")]
    NoCoreLayer,

    #[error("the core layer cannot be removed")]
    CannotRemoveCore,

    #[error("layer index {index} is out of range for {len} layers")]
    LayerIndexOutOfRange { index: usize, len: usize },
}

/// Convenience type alias for results using [`GeoplanError`].
pub type Result<T> = std::result::Result<T, GeoplanError>;
