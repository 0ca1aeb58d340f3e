//! Wire format: the textual policy artifact (§6.1), the packed binary blob
//! (§6.2), and the loader that turns one into the other (§4.2).

pub mod artifact;
pub mod blob;
mod error;
pub mod loader;

pub use artifact::{CallSiteRecord, EdgeRecord, FunctionPolicy, PolicyArtifact};
pub use blob::{BlobEdge, BlobHeader};
pub use error::WireError;
pub use loader::{build_blob, select_function};
