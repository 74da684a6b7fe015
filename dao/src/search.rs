/// Worker free-text search, split on whitespace.
#[derive(Debug, PartialEq, Eq)]
pub enum WorkerSearch {
    /// No tokens: every non-admin worker.
    All,
    /// One token matched against first name, last name or position name.
    Keyword(String),
    /// Two tokens matched as first/last name in either order, optionally
    /// narrowed by a third token against the position name.
    NamePair {
        first: String,
        second: String,
        position: Option<String>,
    },
    /// More than three tokens never match.
    Nothing,
}

impl WorkerSearch {
    pub fn parse(query: &str) -> Self {
        let tokens: Vec<&str> = query.split_whitespace().collect();
        match tokens.as_slice() {
            [] => Self::All,
            [keyword] => Self::Keyword((*keyword).to_owned()),
            [first, second] => Self::NamePair {
                first: (*first).to_owned(),
                second: (*second).to_owned(),
                position: None,
            },
            [first, second, position] => Self::NamePair {
                first: (*first).to_owned(),
                second: (*second).to_owned(),
                position: Some((*position).to_owned()),
            },
            _ => Self::Nothing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::WorkerSearch;

    #[test]
    fn blank_query_lists_all() {
        assert_eq!(WorkerSearch::parse(""), WorkerSearch::All);
        assert_eq!(WorkerSearch::parse("   \t "), WorkerSearch::All);
    }

    #[test]
    fn single_token_is_keyword() {
        assert_eq!(
            WorkerSearch::parse("  Smith "),
            WorkerSearch::Keyword("Smith".to_owned())
        );
    }

    #[test]
    fn two_and_three_tokens_are_name_pairs() {
        assert_eq!(
            WorkerSearch::parse("Ann Smith"),
            WorkerSearch::NamePair {
                first: "Ann".to_owned(),
                second: "Smith".to_owned(),
                position: None,
            }
        );
        assert_eq!(
            WorkerSearch::parse("Ann  Smith   Developer"),
            WorkerSearch::NamePair {
                first: "Ann".to_owned(),
                second: "Smith".to_owned(),
                position: Some("Developer".to_owned()),
            }
        );
    }

    #[test]
    fn more_than_three_tokens_match_nothing() {
        assert_eq!(WorkerSearch::parse("a b c d"), WorkerSearch::Nothing);
        assert_eq!(WorkerSearch::parse("a b c d e f"), WorkerSearch::Nothing);
    }
}
