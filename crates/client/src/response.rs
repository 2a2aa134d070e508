//! Normalization of the service envelope.

use std::collections::HashMap;

use api_types::envelope::{Envelope, FieldDef};

use crate::error::{ClientError, Result};

/// Status value the service uses to signal success.
const STAT_OK: &str = "ok";
/// Fallback when the service reports a failure without `errormsg`.
const UNKNOWN_ERROR: &str = "Unknown server error";

/// Lookup from column display name to column number.
///
/// Every definition is inserted under two keys: the display name exactly as
/// sent ("First Name") and its whitespace-stripped variant ("FirstName").
/// When the name has no spaces the two keys collapse to one entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldSet(HashMap<String, i64>);

impl FieldSet {
    #[must_use]
    pub fn from_defs(defs: &[FieldDef]) -> Self {
        let mut map = HashMap::with_capacity(defs.len() * 2);
        for def in defs {
            map.insert(def.display_name.clone(), def.col_num);
            map.insert(def.display_name.replace(' ', ""), def.col_num);
        }
        Self(map)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<i64> {
        self.0.get(name).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Result of a successful call: the raw envelope plus the extracted pieces.
///
/// Constructed once per call and never mutated.
#[derive(Clone, Debug)]
pub struct NormalizedResult {
    /// The envelope exactly as decoded.
    pub raw: Envelope,
    pub data: Option<serde_json::Value>,
    pub field_set: FieldSet,
    pub transaction: Option<String>,
    pub view: Option<String>,
    pub sql: Option<String>,
}

impl NormalizedResult {
    /// Checks the envelope status and extracts the normalized shape.
    ///
    /// A `stat` other than `"ok"` becomes a [`ClientError::Service`]
    /// carrying the server message (or the generic fallback) and the full
    /// envelope.
    pub fn from_envelope(envelope: Envelope) -> Result<Self> {
        if envelope.rsp.stat != STAT_OK {
            let message = envelope
                .rsp
                .errormsg
                .clone()
                .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
            return Err(ClientError::Service { message, envelope });
        }

        let field_set = envelope
            .rsp
            .data_def
            .as_deref()
            .map(FieldSet::from_defs)
            .unwrap_or_default();

        Ok(NormalizedResult {
            data: envelope.rsp.data.clone(),
            field_set,
            transaction: envelope.rsp.transaction.clone(),
            view: envelope.rsp.curr_view_name.clone(),
            sql: envelope.rsp.sql.clone(),
            raw: envelope,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(json: &str) -> Envelope {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn field_set_indexes_both_spacing_variants() {
        let defs = [
            FieldDef {
                display_name: "First Name".to_string(),
                col_num: 3,
            },
            FieldDef {
                display_name: "Age".to_string(),
                col_num: 4,
            },
        ];
        let set = FieldSet::from_defs(&defs);
        assert_eq!(set.get("First Name"), Some(3));
        assert_eq!(set.get("FirstName"), Some(3));
        assert_eq!(set.get("Age"), Some(4));
        // "Age" has no spaces, so both keys collapse into one entry.
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn ok_without_datadef_yields_an_empty_field_set() {
        let env = envelope(r#"{"rsp":{"stat":"ok","Data":[["a","b"]]}}"#);
        let result = NormalizedResult::from_envelope(env).unwrap();
        assert!(result.field_set.is_empty());
        assert_eq!(result.data, Some(serde_json::json!([["a", "b"]])));
        assert_eq!(result.transaction, None);
        assert_eq!(result.view, None);
        assert_eq!(result.sql, None);
    }

    #[test]
    fn ok_without_data_yields_none() {
        let env = envelope(r#"{"rsp":{"stat":"ok"}}"#);
        let result = NormalizedResult::from_envelope(env).unwrap();
        assert_eq!(result.data, None);
    }

    #[test]
    fn ok_extracts_the_optional_envelope_fields() {
        let env = envelope(
            r#"{"rsp":{"stat":"ok","Transaction":"People","CurrViewName":"Default","SQL":"SELECT 1","DataDef":[{"DisplayName":"First Name","ColNum":3}]}}"#,
        );
        let result = NormalizedResult::from_envelope(env).unwrap();
        assert_eq!(result.transaction.as_deref(), Some("People"));
        assert_eq!(result.view.as_deref(), Some("Default"));
        assert_eq!(result.sql.as_deref(), Some("SELECT 1"));
        assert_eq!(result.field_set.get("FirstName"), Some(3));
        assert_eq!(result.raw.rsp.stat, "ok");
    }

    #[test]
    fn failure_uses_the_server_message_and_keeps_the_envelope() {
        let env = envelope(r#"{"rsp":{"stat":"fail","errormsg":"no such transaction"}}"#);
        match NormalizedResult::from_envelope(env) {
            Err(ClientError::Service { message, envelope }) => {
                assert_eq!(message, "no such transaction");
                assert_eq!(envelope.rsp.stat, "fail");
            }
            other => panic!("expected a service error, got {other:?}"),
        }
    }

    #[test]
    fn failure_without_a_message_falls_back_to_the_generic_one() {
        let env = envelope(r#"{"rsp":{"stat":"fail"}}"#);
        match NormalizedResult::from_envelope(env) {
            Err(ClientError::Service { message, .. }) => {
                assert_eq!(message, "Unknown server error");
            }
            other => panic!("expected a service error, got {other:?}"),
        }
    }
}
