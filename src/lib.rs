//! Find every occurrence of a key in a nested JSON document.
//!
//! ```
//! use keyfinder_lib::{search, JsonValue};
//!
//! let doc: JsonValue = serde_json::from_str(
//!     r#"{"response": [{"issueSummary": "Link down"}, {"issueSummary": "High CPU"}]}"#,
//! ).unwrap();
//! let found = search(&doc, "issueSummary");
//! assert_eq!(found.len(), 2);
//! assert_eq!(found[0].value.as_str(), Some("Link down"));
//! ```

pub mod config;
pub mod error;
pub mod file;
pub mod search;
pub mod tree;
pub mod types;
pub mod value;

pub use config::SearchOptions;
pub use error::{Error, Result};
pub use file::{load_file, load_files, load_reader, parse_str};
pub use search::{search, search_all, search_str, search_with, KeyFinder};
pub use tree::KeyMatcher;
pub use types::{LocatedMatch, Match, ResultSet};
pub use value::{JsonValue, Map};
