use serde::{Deserialize, Serialize};

const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
const POSTER_PLACEHOLDER: &str = "/no-movie.png";
const OVERVIEW_PREVIEW_CHARS: usize = 100;

/// The subject of an availability resolution.
///
/// `id` is optional because callers may build a reference from partial data
/// (for example a title typed on the command line); a reference without an id
/// never has known availability.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieRef {
    pub id: Option<u64>,
    pub title: String,
}

impl MovieRef {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            title: title.into(),
        }
    }

    /// A reference with no catalog id
    pub fn untracked(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
        }
    }
}

/// A movie record as returned by catalog search and discover listings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub original_language: Option<String>,
}

impl Movie {
    pub fn movie_ref(&self) -> MovieRef {
        MovieRef::new(self.id, self.title.clone())
    }

    /// Year portion of the release date, or `N/A`
    pub fn release_year(&self) -> String {
        self.release_date
            .as_deref()
            .and_then(|date| date.split('-').next())
            .filter(|year| !year.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| "N/A".to_string())
    }

    /// Vote average with one decimal; a zero average means "not rated"
    pub fn rating_display(&self) -> String {
        match self.vote_average {
            Some(vote) if vote != 0.0 => format!("{:.1}", vote),
            _ => "N/A".to_string(),
        }
    }

    pub fn language_display(&self) -> String {
        self.original_language
            .as_deref()
            .filter(|lang| !lang.is_empty())
            .map(str::to_uppercase)
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn poster_url(&self) -> String {
        poster_url(self.poster_path.as_deref())
    }

    /// Overview cut to a card-sized preview
    pub fn short_overview(&self) -> Option<String> {
        let overview = self.overview.as_deref()?;
        if overview.chars().count() > OVERVIEW_PREVIEW_CHARS {
            let preview: String = overview.chars().take(OVERVIEW_PREVIEW_CHARS).collect();
            Some(format!("{}...", preview))
        } else {
            Some(overview.to_string())
        }
    }
}

/// Full poster URL for a catalog poster path, or the placeholder image
pub fn poster_url(poster_path: Option<&str>) -> String {
    match poster_path.map(|p| p.trim_start_matches('/')).filter(|p| !p.is_empty()) {
        Some(path) => format!("{}/{}", POSTER_BASE_URL, path),
        None => POSTER_PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie() -> Movie {
        Movie {
            id: 447365,
            title: "Guardians of the Galaxy Vol. 3".to_string(),
            overview: Some("Peter Quill must rally his team.".to_string()),
            poster_path: Some("/r2J02Z2OpNTctfOSN1Ydgii51I3.jpg".to_string()),
            release_date: Some("2023-05-03".to_string()),
            vote_average: Some(7.94),
            original_language: Some("en".to_string()),
        }
    }

    #[test]
    fn test_card_fields() {
        let movie = movie();
        assert_eq!(movie.release_year(), "2023");
        assert_eq!(movie.rating_display(), "7.9");
        assert_eq!(movie.language_display(), "EN");
        assert_eq!(
            movie.poster_url(),
            "https://image.tmdb.org/t/p/w500/r2J02Z2OpNTctfOSN1Ydgii51I3.jpg"
        );
    }

    #[test]
    fn test_card_fields_missing_data() {
        let movie = Movie {
            release_date: Some(String::new()),
            vote_average: Some(0.0),
            poster_path: None,
            original_language: None,
            ..movie()
        };
        assert_eq!(movie.release_year(), "N/A");
        assert_eq!(movie.rating_display(), "N/A");
        assert_eq!(movie.language_display(), "N/A");
        assert_eq!(movie.poster_url(), "/no-movie.png");
    }

    #[test]
    fn test_short_overview_truncates_long_text() {
        let long = Movie {
            overview: Some("a".repeat(150)),
            ..movie()
        };
        let preview = long.short_overview().unwrap();
        assert_eq!(preview.len(), 103);
        assert!(preview.ends_with("..."));

        let short = Movie {
            overview: Some("Short.".to_string()),
            ..movie()
        };
        assert_eq!(short.short_overview().as_deref(), Some("Short."));
    }

    #[test]
    fn test_deserialize_catalog_record_with_missing_fields() {
        let movie: Movie = serde_json::from_str(r#"{"id": 1, "title": "Untitled"}"#).unwrap();
        assert_eq!(movie.movie_ref(), MovieRef::new(1, "Untitled"));
        assert!(movie.overview.is_none());
    }
}
