//! The backend's filter dialect.
//!
//! Filters travel inside the form body as `param` + clause fragments joined
//! by a fixed AND delimiter. The delimiters are part of the wire contract
//! and must match the backend byte-for-byte; they are exported for advanced
//! callers that assemble fragments themselves.

/// Contains-style match, the default for a clause.
pub const FILTER_CONTAINS: &str = "|^;.C.|^;";
/// Exact match.
pub const FILTER_EXACT: &str = "|^;.IET.|^;";
/// Joins consecutive clauses.
pub const FILTER_AND: &str = "|$;";
/// Understood by the backend but never assembled by any public method.
pub const FILTER_OR: &str = "|#;";

/// How a single clause matches its field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchMode {
    #[default]
    Contains,
    Exact,
}

impl MatchMode {
    /// Maps the optional match tag of a clause triple.
    ///
    /// Only the literal tag `"exact"` selects [`MatchMode::Exact`]; any
    /// other tag, or no tag at all, keeps the contains-style match.
    #[must_use]
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("exact") => MatchMode::Exact,
            _ => MatchMode::Contains,
        }
    }

    /// Delimiter placed between field and value on the wire.
    #[must_use]
    pub const fn delimiter(self) -> &'static str {
        match self {
            MatchMode::Contains => FILTER_CONTAINS,
            MatchMode::Exact => FILTER_EXACT,
        }
    }
}

/// One `(field, value, mode)` filter condition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterClause {
    pub field: String,
    pub value: String,
    pub mode: MatchMode,
}

impl FilterClause {
    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            mode: MatchMode::Contains,
        }
    }

    pub fn exact(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            mode: MatchMode::Exact,
        }
    }

    fn render(&self, out: &mut String) {
        out.push_str(&self.field);
        out.push_str(self.mode.delimiter());
        out.push_str(&self.value);
    }
}

impl From<(&str, &str)> for FilterClause {
    fn from((field, value): (&str, &str)) -> Self {
        FilterClause::contains(field, value)
    }
}

impl From<(&str, &str, &str)> for FilterClause {
    /// The third element is the match tag; see [`MatchMode::from_tag`].
    fn from((field, value, tag): (&str, &str, &str)) -> Self {
        FilterClause {
            field: field.to_string(),
            value: value.to_string(),
            mode: MatchMode::from_tag(Some(tag)),
        }
    }
}

/// Renders `clauses` as a body fragment: the first clause is prefixed with
/// `param`, every following clause with the AND delimiter.
///
/// An empty sequence contributes nothing at all, not an empty-but-present
/// parameter.
pub fn filter_fragment(clauses: &[FilterClause], param: &str) -> String {
    let mut out = String::new();
    for (i, clause) in clauses.iter().enumerate() {
        if i == 0 {
            out.push_str(param);
        } else {
            out.push_str(FILTER_AND);
        }
        clause.render(&mut out);
    }
    out
}

/// Identifier of the record targeted by an edit.
///
/// A raw id is sent verbatim; a field/value pair is sent as
/// `field` + exact delimiter + `value`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordId {
    Raw(String),
    Pair(String, String),
}

impl RecordId {
    pub(crate) fn render(&self) -> String {
        match self {
            RecordId::Raw(id) => id.clone(),
            RecordId::Pair(field, value) => format!("{field}{FILTER_EXACT}{value}"),
        }
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId::Raw(id.to_string())
    }
}

impl From<(&str, &str)> for RecordId {
    fn from((field, value): (&str, &str)) -> Self {
        RecordId::Pair(field.to_string(), value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_tag_requires_the_literal_exact() {
        assert_eq!(MatchMode::from_tag(Some("exact")), MatchMode::Exact);
        assert_eq!(MatchMode::from_tag(Some("Exact")), MatchMode::Contains);
        assert_eq!(MatchMode::from_tag(Some("equals")), MatchMode::Contains);
        assert_eq!(MatchMode::from_tag(None), MatchMode::Contains);
    }

    #[test]
    fn single_clause_defaults_to_contains() {
        let clauses = [FilterClause::from(("Age", "30"))];
        assert_eq!(
            filter_fragment(&clauses, "&rtfilter="),
            "&rtfilter=Age|^;.C.|^;30"
        );
    }

    #[test]
    fn exact_tag_switches_the_delimiter() {
        let clauses = [FilterClause::from(("Age", "30", "exact"))];
        assert_eq!(
            filter_fragment(&clauses, "&rtfilter="),
            "&rtfilter=Age|^;.IET.|^;30"
        );
    }

    #[test]
    fn clauses_join_with_the_and_delimiter() {
        let clauses = [
            FilterClause::contains("Name", "Jo"),
            FilterClause::exact("Age", "30"),
        ];
        assert_eq!(
            filter_fragment(&clauses, "&eid="),
            "&eid=Name|^;.C.|^;Jo|$;Age|^;.IET.|^;30"
        );
    }

    #[test]
    fn empty_sequence_renders_nothing() {
        assert_eq!(filter_fragment(&[], "&rtfilter="), "");
    }

    #[test]
    fn record_id_raw_is_verbatim() {
        assert_eq!(RecordId::from("ROW5").render(), "ROW5");
    }

    #[test]
    fn record_id_pair_uses_the_exact_delimiter() {
        assert_eq!(RecordId::from(("Id", "5")).render(), "Id|^;.IET.|^;5");
    }
}
