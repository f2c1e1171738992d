//! Composite-identifier codec.
//!
//! Multi-field primary keys travel over the wire as one delimited string,
//! joined in the entity's declared identifier-field order. The delimiter
//! is not escaped; identifier values must not contain it.

use crate::error::GridError;

/// Separator between identifier parts in the wire form.
pub const COMPOSITE_KEY_DELIMITER: char = '%';

/// Decoded composite identifier: `(field name, raw part)` pairs in
/// declaration order. Parts are untyped; coercion is the accessor's job.
pub type IdParts = Vec<(String, String)>;

/// Join identifier values into the wire form.
#[must_use]
pub fn encode<I, S>(values: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (i, value) in values.into_iter().enumerate() {
        if i > 0 {
            out.push(COMPOSITE_KEY_DELIMITER);
        }
        out.push_str(value.as_ref());
    }

    out
}

/// Split a wire identifier back into per-field parts.
///
/// Fails with [`GridError::MalformedIdentifier`] when the part count does
/// not match the declared identifier-field count.
pub fn decode(identifier_fields: &[String], id: &str) -> Result<IdParts, GridError> {
    let parts: Vec<&str> = id.split(COMPOSITE_KEY_DELIMITER).collect();
    if parts.len() != identifier_fields.len() {
        return Err(GridError::MalformedIdentifier {
            expected: identifier_fields.len(),
            found: parts.len(),
        });
    }

    Ok(identifier_fields
        .iter()
        .zip(parts)
        .map(|(name, part)| (name.clone(), part.to_string()))
        .collect())
}
