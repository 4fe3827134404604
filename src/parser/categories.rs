//! Category list parsing.
//!
//! Parses `cats.yml`, an ordered YAML sequence of category identities:
//!
//! ```yaml
//! - id: people
//!   name: Smileys & People
//! - id: nature
//!   name: Animals & Nature
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::{MojiError, Result};
use crate::types::CategoryDef;

#[derive(Debug, Deserialize)]
struct RawCategory {
    id: String,
    name: String,
}

/// Parse the category list, preserving declaration order.
///
/// Ids must be non-empty, unique, and usable as a file stem since each one
/// names its membership file.
pub fn parse_category_defs(source: &str, origin: &Path) -> Result<Vec<CategoryDef>> {
    let raw: Vec<RawCategory> = serde_yaml::from_str(source).map_err(|e| MojiError::MalformedSource {
        path: origin.to_path_buf(),
        message: format!("Invalid category list: {}", e),
        help: Some("Expected a YAML sequence of `id`/`name` mappings".to_string()),
    })?;

    let mut seen = HashSet::new();
    let mut defs = Vec::with_capacity(raw.len());

    for category in raw {
        let id = category.id.trim();
        if id.is_empty() {
            return Err(MojiError::malformed(origin, "category with an empty `id`"));
        }
        if id.contains(['/', '\\']) || id == "." || id == ".." {
            return Err(MojiError::MalformedSource {
                path: origin.to_path_buf(),
                message: format!("category id `{}` is not a valid file stem", id),
                help: Some("Use a plain identifier such as `people`".to_string()),
            });
        }
        if !seen.insert(id.to_string()) {
            return Err(MojiError::malformed(
                origin,
                format!("category `{}` is declared more than once", id),
            ));
        }
        defs.push(CategoryDef::new(id, category.name));
    }

    Ok(defs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Result<Vec<CategoryDef>> {
        parse_category_defs(source, Path::new("cats.yml"))
    }

    #[test]
    fn test_parse_in_declaration_order() {
        let defs = parse("- id: faces\n  name: Faces\n- id: symbols\n  name: Symbols\n").unwrap();
        assert_eq!(
            defs,
            vec![
                CategoryDef::new("faces", "Faces"),
                CategoryDef::new("symbols", "Symbols"),
            ]
        );
    }

    #[test]
    fn test_empty_list() {
        assert!(parse("[]").unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_id_is_malformed() {
        let err = parse("- id: faces\n  name: A\n- id: faces\n  name: B\n").unwrap_err();
        match err {
            MojiError::MalformedSource { message, .. } => assert!(message.contains("faces")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_name_is_malformed() {
        let err = parse("- id: faces\n").unwrap_err();
        assert!(matches!(err, MojiError::MalformedSource { .. }));
    }

    #[test]
    fn test_path_like_id_is_malformed() {
        let err = parse("- id: ../etc\n  name: Nope\n").unwrap_err();
        assert!(matches!(err, MojiError::MalformedSource { .. }));
    }
}
