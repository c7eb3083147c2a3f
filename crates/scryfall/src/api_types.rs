use serde::Deserialize;

/// `GET /cards/search` list object. Only the fields we read.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub data: Vec<CardSummary>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CardSummary {
    pub name: String,
}
