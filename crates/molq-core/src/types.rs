//! Core types for molq-core.
//!
//! This module defines the data structures shared across the query and
//! response layers: the [`Cid`] identifier, the request/response descriptors,
//! and the [`Artifact`] union handed to the UI for rendering.

/// A PubChem Compound Identifier — an opaque numeric-string token.
///
/// Carried verbatim; no validation beyond what the remote service applies.
/// Substance identifiers (SIDs) returned by cross-reference queries travel
/// through the same display paths as JSON and never become `Cid` values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cid(String);

impl Cid {
    pub fn new(token: impl Into<String>) -> Self {
        Cid(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Cid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Cid {
    fn from(s: &str) -> Self {
        Cid(s.to_string())
    }
}

/// Which mass property a mass search filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MassType {
    MolecularWeight,
    ExactMass,
    MonoisotopicMass,
}

impl MassType {
    /// The URL path segment the PUG REST API expects for this mass type.
    pub fn as_path(self) -> &'static str {
        match self {
            MassType::MolecularWeight => "molecular_weight",
            MassType::ExactMass => "exact_mass",
            MassType::MonoisotopicMass => "monoisotopic_mass",
        }
    }
}

impl std::fmt::Display for MassType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_path())
    }
}

/// Structural containment direction for a structure search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureKind {
    Substructure,
    Superstructure,
}

impl StructureKind {
    /// Lowercase name used in the `fast{kind}` endpoint path.
    pub fn as_path(self) -> &'static str {
        match self {
            StructureKind::Substructure => "substructure",
            StructureKind::Superstructure => "superstructure",
        }
    }
}

/// HTTP method of a [`RequestDescriptor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A fully-formed request, ready for the transport layer to execute.
///
/// Built fresh per user action by [`Query::request`](crate::query::Query::request)
/// and never mutated afterwards. `body` is empty for GET requests; for POST
/// requests it holds form parameters the transport form-encodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub method: Method,
    pub url: String,
    pub body: Vec<(String, String)>,
}

/// The response shape the interpreter should expect for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// Whitespace-separated CID/SID tokens (`.../cids/TXT`, `.../sids/TXT`).
    CidList,
    /// A JSON document (property tables, full records, xref SID lists).
    Json,
    /// A PNG rendering of a 2D structure.
    Png,
    /// An SDF chemical-table file, passed through untouched for download.
    Sdf,
}

/// Fixed edge length of the structure-image canvas, in pixels.
///
/// Both the `image_size` request parameter and the post-decode resize target
/// use this value; the UI is always handed a square bitmap of this size.
pub const STRUCTURE_SIZE: u32 = 600;

/// The display artifact produced by interpreting a response.
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
    /// One token per matched compound, in response order.
    Identifiers(Vec<Cid>),
    /// The response was well-formed but matched nothing. A valid outcome,
    /// deliberately distinct from the error taxonomy.
    NoMatches,
    /// A parsed JSON document (property record, full record, or SID list).
    Record(serde_json::Value),
    /// A decoded 2D structure, already resized to
    /// [`STRUCTURE_SIZE`]×[`STRUCTURE_SIZE`].
    Structure(image::RgbaImage),
    /// Raw bytes for user download (SDF).
    Document(Vec<u8>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cid_roundtrips_token() {
        let cid = Cid::from("2244");
        assert_eq!(cid.as_str(), "2244");
        assert_eq!(cid.to_string(), "2244");
    }

    #[test]
    fn cid_is_permissive() {
        // Malformed tokens are carried as-is; the remote service rejects them.
        let cid = Cid::new("not-a-number");
        assert_eq!(cid.as_str(), "not-a-number");
    }

    #[test]
    fn mass_type_paths() {
        assert_eq!(MassType::MolecularWeight.as_path(), "molecular_weight");
        assert_eq!(MassType::ExactMass.as_path(), "exact_mass");
        assert_eq!(MassType::MonoisotopicMass.as_path(), "monoisotopic_mass");
    }

    #[test]
    fn structure_kind_paths() {
        assert_eq!(StructureKind::Substructure.as_path(), "substructure");
        assert_eq!(StructureKind::Superstructure.as_path(), "superstructure");
    }
}
