//! Shared query parameter types and parsers for API handlers.
//!
//! Multi-value query parameters arrive as comma-separated strings
//! (`?ids=1,2,3`); the helpers here split and parse them.

use serde::Deserialize;
use std::str::FromStr;

use ewm_core::error::CoreError;
use ewm_core::pagination::Page;
use ewm_core::types::DbId;

/// Generic pagination parameters (`?from=&size=`), defaults 0/10.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub from: Option<i64>,
    pub size: Option<i64>,
}

impl PaginationParams {
    pub fn page(&self) -> Result<Page, CoreError> {
        Page::new(self.from, self.size)
    }
}

/// Parse a comma-separated list of IDs. `None` and the empty string both
/// mean "no filter".
pub fn parse_id_list(raw: Option<&str>) -> Result<Option<Vec<DbId>>, CoreError> {
    let Some(raw) = raw else { return Ok(None) };
    if raw.trim().is_empty() {
        return Ok(None);
    }
    raw.split(',')
        .map(|part| {
            part.trim()
                .parse::<DbId>()
                .map_err(|_| CoreError::Validation(format!("Invalid id value: {part}")))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Parse a comma-separated list into any `FromStr` type whose error is a
/// [`CoreError`] (event states, for example).
pub fn parse_enum_list<T>(raw: Option<&str>) -> Result<Option<Vec<T>>, CoreError>
where
    T: FromStr<Err = CoreError>,
{
    let Some(raw) = raw else { return Ok(None) };
    if raw.trim().is_empty() {
        return Ok(None);
    }
    raw.split(',')
        .map(|part| part.trim().parse::<T>())
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use ewm_core::event_state::EventState;

    #[test]
    fn id_list_splits_and_trims() {
        let ids = parse_id_list(Some("1, 2,3")).unwrap().unwrap();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn missing_or_empty_id_list_means_no_filter() {
        assert_eq!(parse_id_list(None).unwrap(), None);
        assert_eq!(parse_id_list(Some("")).unwrap(), None);
    }

    #[test]
    fn malformed_id_is_a_validation_error() {
        assert_matches!(parse_id_list(Some("1,x")), Err(CoreError::Validation(_)));
    }

    #[test]
    fn enum_list_parses_event_states() {
        let states: Vec<EventState> = parse_enum_list(Some("PENDING,PUBLISHED"))
            .unwrap()
            .unwrap();
        assert_eq!(states, vec![EventState::Pending, EventState::Published]);
        assert_matches!(
            parse_enum_list::<EventState>(Some("BOGUS")),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn pagination_defaults_apply() {
        let page = PaginationParams::default().page().unwrap();
        assert_eq!(page.offset, 0);
        assert_eq!(page.limit, 10);
    }

    #[test]
    fn pagination_rejects_empty_window() {
        let params = PaginationParams { from: Some(0), size: Some(0) };
        assert_matches!(params.page(), Err(CoreError::Validation(_)));
    }
}
