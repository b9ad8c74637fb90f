use log::{debug, trace};
use rayon::prelude::*;

use crate::config::SearchOptions;
use crate::error::{Error, Result};
use crate::file::parse_str;
use crate::tree::child_pointer;
use crate::types::{LocatedMatch, Match, ResultSet};
use crate::value::JsonValue;

/// Every entry of `root` (at any depth) whose key equals `key`, in pre-order.
///
/// An object entry is recorded before anything nested under its value, so a
/// matched entry whose value contains the same key yields the outer match
/// first and the inner one after it. Array elements are visited in index
/// order. Scalars, including a scalar root, contribute nothing.
pub fn search(root: &JsonValue, key: &str) -> ResultSet {
    let mut results = Vec::new();
    search_recursive(root, key, &mut results);
    results
}

fn search_recursive(value: &JsonValue, key: &str, results: &mut ResultSet) {
    match value {
        JsonValue::Object(map) => {
            for (k, v) in map.iter() {
                if k == key {
                    results.push(Match::new(k.clone(), v.clone()));
                }
                if v.is_container() {
                    search_recursive(v, key, results);
                }
            }
        }
        JsonValue::Array(items) => {
            for item in items.iter().filter(|item| item.is_container()) {
                search_recursive(item, key, results);
            }
        }
        JsonValue::Null | JsonValue::Bool(_) | JsonValue::Number(_) | JsonValue::String(_) => {}
    }
}

/// Same traversal as [`search`], using the configured matcher and recording
/// where each match sits.
///
/// Fails with [`Error::DepthExceeded`] instead of descending into a
/// container nested deeper than `options.max_depth`.
pub fn search_with(root: &JsonValue, options: &SearchOptions) -> Result<Vec<LocatedMatch>> {
    let mut results = Vec::new();
    search_located(root, "", 0, options, &mut results)?;
    debug!(
        "search for {:?} found {} matches",
        options.matcher.describe(),
        results.len()
    );
    Ok(results)
}

fn search_located(
    value: &JsonValue,
    pointer: &str,
    depth: usize,
    options: &SearchOptions,
    results: &mut Vec<LocatedMatch>,
) -> Result<()> {
    if let Some(limit) = options.max_depth {
        if depth > limit && value.is_container() {
            return Err(Error::DepthExceeded { limit });
        }
    }

    match value {
        JsonValue::Object(map) => {
            for (k, v) in map.iter() {
                let matched = options.matcher.matches(k);
                if !matched && !v.is_container() {
                    continue;
                }
                let entry_pointer = child_pointer(pointer, k);
                if matched {
                    trace!("match at {}: {}", entry_pointer, v);
                    results.push(LocatedMatch {
                        pointer: entry_pointer.clone(),
                        depth,
                        entry: Match::new(k.clone(), v.clone()),
                    });
                }
                if v.is_container() {
                    search_located(v, &entry_pointer, depth + 1, options, results)?;
                }
            }
        }
        JsonValue::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                if item.is_container() {
                    let item_pointer = child_pointer(pointer, &index.to_string());
                    search_located(item, &item_pointer, depth + 1, options, results)?;
                }
            }
        }
        _ => {}
    }
    Ok(())
}

/// Searches each document independently on the rayon pool.
/// Result sets come back in the same order as `documents`.
pub fn search_all(documents: &[JsonValue], key: &str) -> Vec<ResultSet> {
    documents.par_iter().map(|doc| search(doc, key)).collect()
}

/// Parses `json` and searches it.
pub fn search_str(json: &str, key: &str) -> Result<ResultSet> {
    let root = parse_str(json)?;
    Ok(search(&root, key))
}

/// A reusable search over many documents with fixed options.
#[derive(Debug, Clone)]
pub struct KeyFinder {
    options: SearchOptions,
}

impl KeyFinder {
    /// Exact matching on `key`, no depth limit.
    pub fn new(key: impl Into<String>) -> Self {
        Self::with_options(SearchOptions::new(key))
    }

    pub fn with_options(options: SearchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn find(&self, root: &JsonValue) -> Result<ResultSet> {
        let located = self.find_located(root)?;
        Ok(located.into_iter().map(|l| l.entry).collect())
    }

    pub fn find_located(&self, root: &JsonValue) -> Result<Vec<LocatedMatch>> {
        search_with(root, &self.options)
    }

    /// Runs `find_located` over every document in parallel, keeping input order.
    /// Stops at the first failing document.
    pub fn find_all(&self, documents: &[JsonValue]) -> Result<Vec<Vec<LocatedMatch>>> {
        documents
            .par_iter()
            .map(|doc| self.find_located(doc))
            .collect()
    }
}
