//! Dropdown selection
//!
//! A duplicate-free list of site ids in the order the user picked them.
//! The order drives the chart title; membership drives the filter.

use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Selection(Vec<String>);

impl Selection {
    /// Build a selection, trimming ids and dropping blanks and repeats
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for id in ids {
            let id = id.as_ref().trim();
            if !id.is_empty() && !out.iter().any(|existing| existing == id) {
                out.push(id.to_string());
            }
        }
        Self(out)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn single(id: impl AsRef<str>) -> Self {
        Self::new([id])
    }

    /// Parse a comma-separated id list, e.g. `410001,410002`
    pub fn parse_list(list: &str) -> Self {
        Self::new(list.split(','))
    }

    pub fn ids(&self) -> &[String] {
        &self.0
    }

    pub fn id_set(&self) -> HashSet<&str> {
        self.0.iter().map(String::as_str).collect()
    }

    /// Ids joined for display
    pub fn joined(&self) -> String {
        self.0.join(", ")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Selection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
