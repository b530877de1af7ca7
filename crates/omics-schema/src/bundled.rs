//! Default schema shipped inside the crate.

/// Location identifier of the bundled GA4GH Phenopacket-style schema.
pub const BUNDLED_SCHEMA_ID: &str = "bundled:phenopacket";

/// Embedded schema text (JSON Schema Draft 7).
pub(crate) const BUNDLED_SCHEMA_TEXT: &str = include_str!("../schemas/phenopacket.schema.json");
