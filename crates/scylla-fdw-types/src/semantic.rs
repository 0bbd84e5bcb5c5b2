//! Host column types understood by the wrapper.

use std::fmt::{self, Display};

/// Semantic type of a host column, literal or expression.
///
/// The first group of variants maps one-to-one onto a remote CQL type. The
/// last three cover everything else the host can hand us; they are never
/// pushed down and the codec moves them as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SemanticType {
    // ===== Boolean =====
    Boolean,

    // ===== Integer Types =====
    /// 16-bit signed integer.
    Int2,
    /// 32-bit signed integer.
    Int4,
    /// 64-bit signed integer.
    Int8,

    // ===== Floating Point / Decimal =====
    /// IEEE 754 single precision.
    Float4,
    /// IEEE 754 double precision.
    Float8,
    /// Arbitrary-precision decimal.
    Numeric,

    // ===== String Types =====
    Text,
    /// `character varying`.
    Varchar,
    /// Blank-padded `character(n)`.
    Bpchar,

    // ===== Binary / Structured =====
    Bytea,
    Uuid,
    /// IP address (v4 or v6).
    Inet,

    // ===== Date/Time Types =====
    /// Microseconds since 2000-01-01, no zone.
    Timestamp,
    /// Microseconds since 2000-01-01 UTC.
    TimestampTz,
    /// Days since 2000-01-01.
    Date,
    /// Microseconds since midnight.
    Time,

    // ===== Never pushed down =====
    /// Array of some element type.
    Array(Box<SemanticType>),
    /// Row/composite type, by name.
    Composite(String),
    /// Any other host type, by name (domains, enums, extension types...).
    Other(String),
}

impl SemanticType {
    /// Returns true for the string family (`text`, `varchar`, `bpchar`).
    pub fn is_text_like(&self) -> bool {
        matches!(
            self,
            SemanticType::Text | SemanticType::Varchar | SemanticType::Bpchar
        )
    }

    /// Returns true for the integer, float and decimal types.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            SemanticType::Int2
                | SemanticType::Int4
                | SemanticType::Int8
                | SemanticType::Float4
                | SemanticType::Float8
                | SemanticType::Numeric
        )
    }

    /// Returns true if the type has a dedicated codec mapping.
    ///
    /// Unmapped types fall back to text round-tripping.
    pub fn is_mapped(&self) -> bool {
        !matches!(
            self,
            SemanticType::Array(_) | SemanticType::Composite(_) | SemanticType::Other(_)
        )
    }
}

impl Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticType::Boolean => write!(f, "boolean"),
            SemanticType::Int2 => write!(f, "smallint"),
            SemanticType::Int4 => write!(f, "integer"),
            SemanticType::Int8 => write!(f, "bigint"),
            SemanticType::Float4 => write!(f, "real"),
            SemanticType::Float8 => write!(f, "double precision"),
            SemanticType::Numeric => write!(f, "numeric"),
            SemanticType::Text => write!(f, "text"),
            SemanticType::Varchar => write!(f, "character varying"),
            SemanticType::Bpchar => write!(f, "character"),
            SemanticType::Bytea => write!(f, "bytea"),
            SemanticType::Uuid => write!(f, "uuid"),
            SemanticType::Inet => write!(f, "inet"),
            SemanticType::Timestamp => write!(f, "timestamp without time zone"),
            SemanticType::TimestampTz => write!(f, "timestamp with time zone"),
            SemanticType::Date => write!(f, "date"),
            SemanticType::Time => write!(f, "time without time zone"),
            SemanticType::Array(elem) => write!(f, "{elem}[]"),
            SemanticType::Composite(name) | SemanticType::Other(name) => write!(f, "{name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_family() {
        assert!(SemanticType::Varchar.is_text_like());
        assert!(SemanticType::Bpchar.is_text_like());
        assert!(!SemanticType::Bytea.is_text_like());
    }

    #[test]
    fn unmapped_types() {
        assert!(!SemanticType::Array(Box::new(SemanticType::Int4)).is_mapped());
        assert!(!SemanticType::Other("hstore".into()).is_mapped());
        assert!(SemanticType::Inet.is_mapped());
    }

    #[test]
    fn display_array() {
        let ty = SemanticType::Array(Box::new(SemanticType::Text));
        assert_eq!(ty.to_string(), "text[]");
    }
}
