//! Query dispatch — maps a search mode and its inputs onto the PUG REST
//! endpoint, method, and body that serve it.
//!
//! A [`Query`] is built from the form values of one user action and converted
//! into an immutable [`RequestDescriptor`] with [`Query::request`]. The
//! descriptor is fully determined by the query plus the base URL — nothing
//! else feeds into URL construction.
//!
//! User-supplied values embedded in a URL path are percent-encoded first.
//! Plain alphanumeric identifiers (every documented PubChem form) come out
//! byte-identical; SMILES strings with reserved characters such as `#` would
//! otherwise truncate the path at the transport layer.

use crate::types::{
    Cid, MassType, Method, RequestDescriptor, ResponseShape, StructureKind, STRUCTURE_SIZE,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything outside ALPHA / DIGIT / `-` / `.` / `_` / `~` is escaped when a
/// user value becomes a path segment.
const PATH_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn encode(component: &str) -> String {
    utf8_percent_encode(component, PATH_COMPONENT).to_string()
}

/// Render a mass bound the way the service's examples do: integral values
/// keep one fractional digit (`400.0`), others print their shortest form
/// (`400.05`).
fn fmt_mass(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// One search or retrieval action, with its mode-specific inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Property table (formula, weight, SMILES) for a single compound.
    ByCid { cid: Cid },
    /// Compounds matching a chemical name.
    ByName { name: String },
    /// Compounds matching a SMILES string exactly.
    BySmiles { smiles: String },
    /// Compounds matching a molecular formula.
    ByFormula { formula: String },
    /// Compounds whose mass property equals a value.
    ByMassEquals { mass_type: MassType, value: f64 },
    /// Compounds whose mass property falls within an inclusive range.
    ByMassRange {
        mass_type: MassType,
        min: f64,
        max: f64,
    },
    /// Substructure / superstructure containment search.
    ByStructure {
        kind: StructureKind,
        smiles: String,
    },
    /// 2D similarity search above a threshold (1–100).
    BySimilarity { smiles: String, threshold: u8 },
    /// Substances linked to an external cross-reference.
    ByCrossReference {
        xref_type: String,
        xref_value: String,
    },
    /// Full compound record as JSON.
    FullRecordJson { cid: Cid },
    /// Full compound record as an SDF file.
    FullRecordSdf { cid: Cid },
}

impl Query {
    /// Build the request descriptor for this query against `base_url`
    /// (no trailing slash).
    pub fn request(&self, base_url: &str) -> RequestDescriptor {
        match self {
            Query::ByCid { cid } => get(format!(
                "{base_url}/compound/cid/{}/property/MolecularFormula,MolecularWeight,SMILES/JSON",
                encode(cid.as_str())
            )),
            Query::ByName { name } => get(format!(
                "{base_url}/compound/name/{}/cids/TXT",
                encode(name)
            )),
            Query::BySmiles { smiles } => get(format!(
                "{base_url}/compound/smiles/{}/cids/TXT",
                encode(smiles)
            )),
            Query::ByFormula { formula } => get(format!(
                "{base_url}/compound/fastformula/{}/cids/TXT",
                encode(formula)
            )),
            Query::ByMassEquals { mass_type, value } => get(format!(
                "{base_url}/compound/{}/equals/{}/cids/TXT",
                mass_type.as_path(),
                fmt_mass(*value)
            )),
            Query::ByMassRange {
                mass_type,
                min,
                max,
            } => get(format!(
                "{base_url}/compound/{}/range/{}/{}/cids/TXT",
                mass_type.as_path(),
                fmt_mass(*min),
                fmt_mass(*max)
            )),
            Query::ByStructure { kind, smiles } => post(
                format!(
                    "{base_url}/compound/fast{}/smiles/cids/TXT",
                    kind.as_path()
                ),
                smiles,
            ),
            Query::BySimilarity { smiles, threshold } => post(
                format!(
                    "{base_url}/compound/fastsimilarity_2d/smiles/cids/TXT?Threshold={}",
                    (*threshold).clamp(1, 100)
                ),
                smiles,
            ),
            Query::ByCrossReference {
                xref_type,
                xref_value,
            } => get(format!(
                "{base_url}/substance/xref/{}/{}/sids/JSON",
                encode(xref_type),
                encode(xref_value)
            )),
            Query::FullRecordJson { cid } => get(format!(
                "{base_url}/compound/cid/{}/JSON",
                encode(cid.as_str())
            )),
            Query::FullRecordSdf { cid } => get(format!(
                "{base_url}/compound/cid/{}/SDF",
                encode(cid.as_str())
            )),
        }
    }

    /// The response shape the interpreter should expect for this query.
    pub fn shape(&self) -> ResponseShape {
        match self {
            Query::ByCid { .. }
            | Query::ByCrossReference { .. }
            | Query::FullRecordJson { .. } => ResponseShape::Json,
            Query::FullRecordSdf { .. } => ResponseShape::Sdf,
            _ => ResponseShape::CidList,
        }
    }
}

fn get(url: String) -> RequestDescriptor {
    RequestDescriptor {
        method: Method::Get,
        url,
        body: Vec::new(),
    }
}

fn post(url: String, smiles: &str) -> RequestDescriptor {
    RequestDescriptor {
        method: Method::Post,
        url,
        body: vec![("smiles".to_string(), smiles.to_string())],
    }
}

/// Request for the 2D structure rendering of one compound.
///
/// Used by the structure-display path rather than a search mode, so it lives
/// beside [`Query`] instead of inside it.
pub fn structure_request(base_url: &str, cid: &Cid) -> RequestDescriptor {
    get(format!(
        "{base_url}/compound/cid/{}/record/PNG?image_size={size}x{size}",
        encode(cid.as_str()),
        size = STRUCTURE_SIZE
    ))
}
