//! Error types for ASE conversion
//!
//! This module provides error handling for ASE read/write operations.
//! All errors include error codes for categorization and enough context to
//! point at the offending object, face, or byte offset.
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: I/O errors (file persistence helpers only)
//! - **E2xxx**: Text parsing errors
//! - **E3xxx**: Geometry/material validation errors
//!
//! Conditions with a safe recoverable default (out-of-range material
//! references, channel length mismatches) are not errors at all: they are
//! reported as [`ImportWarning`] values and logged, and conversion continues.

use std::io;
use thiserror::Error;

/// Result type for ASE operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when converting to or from ASE text
#[derive(Error, Debug)]
pub enum Error {
    /// IO error from the file persistence helpers
    ///
    /// **Error Code**: E1001
    ///
    /// The codec itself never touches the filesystem; this variant only
    /// arises from [`crate::persist`] convenience functions.
    #[error("[E1001] I/O error: {0}")]
    Io(#[from] io::Error),

    /// Structurally invalid ASE text
    ///
    /// **Error Code**: E2001
    ///
    /// **Common Causes**:
    /// - Truncated file (unterminated block)
    /// - A keyword where a value was expected
    #[error("[E2001] Syntax error: {0}")]
    Syntax(String),

    /// A token that should have been a number was not
    ///
    /// **Error Code**: E2002
    ///
    /// Carries the offending token and its byte offset in the input so the
    /// failure can be located in large files.
    #[error("[E2002] Malformed number '{token}' at byte offset {offset}")]
    MalformedNumber {
        /// The token that failed numeric conversion
        token: String,
        /// Byte offset of the token within the input text
        offset: usize,
    },

    /// The document contained no `*GEOMOBJECT` block
    ///
    /// **Error Code**: E2003
    ///
    /// **Common Causes**:
    /// - A materials-only or otherwise empty export
    /// - A file that is not ASE at all (the parser skips everything it does
    ///   not recognize, so foreign text parses to an empty scene)
    #[error("[E2003] No geometry object found in ASE document")]
    EmptyScene,

    /// A source polygon was not a triangle
    ///
    /// **Error Code**: E3001
    ///
    /// The codec never triangulates; callers must supply pre-triangulated
    /// meshes.
    #[error(
        "[E3001] Object \"{object}\" is not triangulated: polygon {polygon} has {corners} corners"
    )]
    NotTriangulated {
        /// Name of the offending object
        object: String,
        /// Index of the offending polygon
        polygon: usize,
        /// Number of corners the polygon actually has
        corners: usize,
    },

    /// An object has no usable material
    ///
    /// **Error Code**: E3002
    ///
    /// Every exported mesh must reference at least one material; the engine
    /// resolves shading exclusively through the material table.
    #[error("[E3002] Object \"{0}\" has no material assigned")]
    MissingMaterial(String),

    /// A source polygon referenced a vertex index past the position array
    ///
    /// **Error Code**: E3003
    #[error(
        "[E3003] Object \"{object}\": polygon {polygon} references vertex {index} but only {vertex_count} vertices exist"
    )]
    VertexIndexOutOfRange {
        /// Name of the offending object
        object: String,
        /// Index of the offending polygon
        polygon: usize,
        /// The out-of-range vertex index
        index: usize,
        /// Number of vertices actually present
        vertex_count: usize,
    },

    /// A per-corner attribute array does not cover every polygon corner
    ///
    /// **Error Code**: E3004
    #[error("[E3004] Object \"{object}\": {attribute} has {len} entries for {expected} corners")]
    CornerDataTooShort {
        /// Name of the offending object
        object: String,
        /// Which array fell short (UV channel, colors, normals)
        attribute: String,
        /// Entries actually present
        len: usize,
        /// Corner count the mesh requires
        expected: usize,
    },
}

impl Error {
    /// Create a Syntax error with keyword context
    pub fn syntax_at(keyword: &str, message: &str) -> Self {
        Error::Syntax(format!("{}: {}", keyword, message))
    }

    /// Create a Syntax error for unexpected end of input
    pub fn unexpected_eof(context: &str) -> Self {
        Error::Syntax(format!("unexpected end of input while reading {}", context))
    }
}

/// Recoverable conditions noticed while reconstructing a mesh from parsed data
///
/// Warnings never abort a conversion; the reconstructor substitutes a safe
/// default and records what happened. They are also emitted through the
/// `log` facade at warn level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportWarning {
    /// `MATERIAL_REF` pointed past the end of the material table; material 0
    /// was used instead
    MaterialRefOutOfRange {
        /// Name of the geometry object
        object: String,
        /// The out-of-range index from the file
        material_ref: usize,
        /// Number of materials actually present
        table_len: usize,
    },
    /// A UV channel's face list did not match the triangle count; the
    /// channel was skipped
    UvChannelLengthMismatch {
        /// Name of the geometry object
        object: String,
        /// Index of the UV channel (0 = primary)
        channel: usize,
        /// Entries in the channel's face list
        faces: usize,
        /// Triangles in the mesh
        expected: usize,
    },
    /// The vertex-color face list did not match the triangle count; colors
    /// were skipped
    ColorChannelLengthMismatch {
        /// Name of the geometry object
        object: String,
        /// Entries in the color face list
        faces: usize,
        /// Triangles in the mesh
        expected: usize,
    },
    /// The per-face normal list did not match the triangle count; custom
    /// normals were skipped
    NormalCountMismatch {
        /// Name of the geometry object
        object: String,
        /// Parsed per-face normal records
        normals: usize,
        /// Triangles in the mesh
        expected: usize,
    },
    /// A geometry object had no vertices or no faces and was skipped
    EmptyObject {
        /// Name of the geometry object
        object: String,
    },
}

impl std::fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportWarning::MaterialRefOutOfRange {
                object,
                material_ref,
                table_len,
            } => write!(
                f,
                "\"{}\": MATERIAL_REF {} out of range (table has {}), using material 0",
                object, material_ref, table_len
            ),
            ImportWarning::UvChannelLengthMismatch {
                object,
                channel,
                faces,
                expected,
            } => write!(
                f,
                "\"{}\": UV channel {} has {} face entries for {} triangles, channel skipped",
                object, channel, faces, expected
            ),
            ImportWarning::ColorChannelLengthMismatch {
                object,
                faces,
                expected,
            } => write!(
                f,
                "\"{}\": color channel has {} face entries for {} triangles, channel skipped",
                object, faces, expected
            ),
            ImportWarning::NormalCountMismatch {
                object,
                normals,
                expected,
            } => write!(
                f,
                "\"{}\": {} face normal records for {} triangles, custom normals skipped",
                object, normals, expected
            ),
            ImportWarning::EmptyObject { object } => {
                write!(f, "\"{}\": empty geometry, object skipped", object)
            }
        }
    }
}
