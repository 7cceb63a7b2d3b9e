//! Stored shape of a book

use crate::types::BookId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Flat, serializable form of a [`crate::Book`]
///
/// Field names are camelCase in JSON. Records written before books carried
/// identifiers get a fresh id on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    #[serde(default)]
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub current_page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub target_page: Option<u32>,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub publish_year: Option<i32>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}
