use crate::{
    error::{MigrationError, Result},
    tidal::TidalClient,
    types::{MatchResult, SearchResultsResponse},
};

/// Percent-encoded search path segment for a track.
///
/// Title and every artist are joined by single spaces. `/` always ends up as
/// `%2F` so the query stays a single path segment.
pub fn build_search_query(track_name: &str, artist_names: &[&str]) -> String {
    let mut query = track_name.to_string();
    for artist in artist_names {
        query.push(' ');
        query.push_str(artist);
    }
    urlencoding::encode(&query).replace('/', "%2F")
}

impl TidalClient {
    /// Looks a track up and returns the first track TIDAL ranks for it.
    ///
    /// # Arguments
    ///
    /// * `track_name` - Title of the source track
    /// * `artist_names` - All artists of the source track, in source order
    ///
    /// # Returns
    ///
    /// [`MatchResult::Matched`] with the first track id of the search result,
    /// or [`MatchResult::NotFound`] when the result holds no tracks.
    ///
    /// # Errors
    ///
    /// [`MigrationError::Search`] for any non-2xx status other than 429, and
    /// for a 2xx body that is empty or does not carry
    /// `data.relationships.tracks.data`. The caller aborts the run on it.
    pub async fn search_track(
        &self,
        track_name: &str,
        artist_names: &[&str],
    ) -> Result<MatchResult> {
        let query = build_search_query(track_name, artist_names);
        let url = format!("{}/searchResults/{}", self.api_url, query);

        let response = self
            .http
            .send(|client| {
                client.get(&url).bearer_auth(&self.token).query(&[
                    ("countryCode", self.country_code.as_str()),
                    ("explicitFilter", "include"),
                    ("include", "tracks"),
                ])
            })
            .await
            .map_err(|err| match err {
                MigrationError::Http { status, body, .. } => MigrationError::Search {
                    query: query.clone(),
                    reason: format!("status {}: {}", status, body),
                },
                other => other,
            })?;

        let body = response.text().await?;
        let results = parse_search_body(&query, &body)?;

        Ok(match results.first_track_id() {
            Some(id) => MatchResult::Matched {
                destination_track_id: id.to_string(),
            },
            None => MatchResult::NotFound,
        })
    }
}

fn parse_search_body(query: &str, body: &str) -> Result<SearchResultsResponse> {
    let search_error = |reason: String| MigrationError::Search {
        query: query.to_string(),
        reason,
    };

    if body.trim().is_empty() {
        return Err(search_error("no data returned".into()));
    }

    serde_json::from_str(body).map_err(|e| search_error(format!("unexpected response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_body_rejects_empty_documents() {
        for body in ["", "   ", "null", "{}", "[]", r#"{"data":null}"#, r#"{"data":{}}"#] {
            let err = parse_search_body("q", body).unwrap_err();
            assert!(matches!(err, MigrationError::Search { .. }), "{body:?}");
        }
    }

    #[test]
    fn test_parse_search_body_rejects_missing_track_list() {
        let body = r#"{"data":{"relationships":{"albums":{"data":[]}}}}"#;
        assert!(parse_search_body("q", body).is_err());
        let body = r#"{"data":{"relationships":{"tracks":{}}}}"#;
        assert!(parse_search_body("q", body).is_err());
    }

    #[test]
    fn test_parse_search_body_without_tracks_is_not_an_error() {
        let body = r#"{"data":{"id":"q","type":"searchResults","relationships":{"tracks":{"data":[]}}}}"#;
        let parsed = parse_search_body("q", body).unwrap();
        assert_eq!(parsed.first_track_id(), None);
    }

    #[test]
    fn test_parse_search_body_picks_first_track() {
        let body = r#"{"data":{"relationships":{"tracks":{"data":[{"id":"11","type":"tracks"},{"id":"22","type":"tracks"}]}}}}"#;
        let parsed = parse_search_body("q", body).unwrap();
        assert_eq!(parsed.first_track_id(), Some("11"));
    }
}
