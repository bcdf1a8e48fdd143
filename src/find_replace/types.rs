//! Value types shared by the find/replace control and its consumers.

use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// Errors raised when turning a search context into a matcher.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("invalid search pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// The query text plus the three search toggles, captured at one instant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SearchContext {
    pub query: String,
    pub match_case: bool,
    pub match_whole_word: bool,
    pub use_regex: bool,
}

impl SearchContext {
    /// Capture the current query and toggle states.
    pub fn build(
        query: impl Into<String>,
        match_case: bool,
        match_whole_word: bool,
        use_regex: bool,
    ) -> Self {
        Self {
            query: query.into(),
            match_case,
            match_whole_word,
            use_regex,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    /// Compile the context into a regex.
    ///
    /// Literal queries are escaped; whole-word matching wraps the pattern in
    /// word boundaries. Matching is case-insensitive unless `match_case`.
    pub fn to_regex(&self) -> Result<Regex, SearchError> {
        let body = if self.use_regex {
            self.query.clone()
        } else {
            regex::escape(&self.query)
        };
        let pattern = if self.match_whole_word {
            format!(r"\b(?:{})\b", body)
        } else {
            body
        };

        RegexBuilder::new(&pattern)
            .case_insensitive(!self.match_case)
            .build()
            .map_err(|source| SearchError::InvalidPattern {
                pattern: self.query.clone(),
                source,
            })
    }
}

/// Direction of a find or single replace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchDirection {
    Next,
    Previous,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FindAndReplaceMode {
    #[default]
    FindOnly,
    Replace,
    ReplaceAll,
}

/// A find or replace the user asked for.
///
/// Built only through [`find`](Self::find), [`replace`](Self::replace) and
/// [`replace_all`](Self::replace_all): find requests never carry replacement
/// text, replace requests always do, and only replace-all has no direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FindAndReplaceRequest {
    context: SearchContext,
    replacement: Option<String>,
    mode: FindAndReplaceMode,
    direction: Option<SearchDirection>,
}

impl FindAndReplaceRequest {
    pub fn find(context: SearchContext, direction: SearchDirection) -> Self {
        Self {
            context,
            replacement: None,
            mode: FindAndReplaceMode::FindOnly,
            direction: Some(direction),
        }
    }

    pub fn replace(
        context: SearchContext,
        replacement: impl Into<String>,
        direction: SearchDirection,
    ) -> Self {
        Self {
            context,
            replacement: Some(replacement.into()),
            mode: FindAndReplaceMode::Replace,
            direction: Some(direction),
        }
    }

    pub fn replace_all(context: SearchContext, replacement: impl Into<String>) -> Self {
        Self {
            context,
            replacement: Some(replacement.into()),
            mode: FindAndReplaceMode::ReplaceAll,
            direction: None,
        }
    }

    pub fn context(&self) -> &SearchContext {
        &self.context
    }

    pub fn replacement(&self) -> Option<&str> {
        self.replacement.as_deref()
    }

    pub fn mode(&self) -> FindAndReplaceMode {
        self.mode
    }

    /// `None` only for replace-all.
    pub fn direction(&self) -> Option<SearchDirection> {
        self.direction
    }
}
