//! molq-core — query dispatch and response interpretation for the PubChem
//! PUG REST API.
//!
//! # Architecture
//!
//! ```text
//! form inputs ──► Query ──► RequestDescriptor ──► transport (molq-client)
//!                                                       │
//! UI ◄── Artifact ◄── interpret(shape, RawResponse) ◄───┘
//! ```
//!
//! The transport crate executes descriptors; this crate owns every decision
//! about what to request and how to read the answer. The one piece of state
//! that survives across user actions, the similarity result store, also
//! lives here.

pub mod config;
pub mod error;
pub mod query;
pub mod response;
pub mod store;
pub mod types;

pub use error::ApiError;
pub use query::{structure_request, Query};
pub use response::{interpret, RawResponse};
pub use store::SimilarityStore;
pub use types::{
    Artifact, Cid, MassType, Method, RequestDescriptor, ResponseShape, StructureKind,
    STRUCTURE_SIZE,
};
