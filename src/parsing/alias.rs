//! Parser for BLAST+ alias files (.nal/.pal).
//!
//! Alias files are plain text, one `KEY value` pair per line:
//!
//! ```text
//! # Alias file created 01/02/2024 10:00:00
//! TITLE Solenopsis invicta genome
//! DBLIST "sinvicta.00" "sinvicta.01"
//! NSEQ 13
//! LENGTH 402709
//! ```

use std::path::Path;

use crate::parsing::index_header::ParseError;
use crate::utils::validation::check_alias_file_size;

/// Fields of interest from an alias file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasFile {
    pub title: Option<String>,
    pub dblist: Vec<String>,
    pub sequence_count: Option<u64>,
    pub total_length: Option<u64>,
}

/// Parse an alias file on disk
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or
/// `ParseError::InvalidFormat` if it is too large or malformed.
pub fn parse_alias_file(path: &Path) -> Result<AliasFile, ParseError> {
    let size = std::fs::metadata(path)?.len();
    if let Some(msg) = check_alias_file_size(size) {
        return Err(ParseError::InvalidFormat(msg));
    }

    let bytes = std::fs::read(path)?;
    let text = String::from_utf8(bytes)
        .map_err(|_| ParseError::InvalidFormat("Alias file is not valid UTF-8".to_string()))?;
    parse_alias_text(&text)
}

/// Parse alias file contents
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a numeric field cannot be parsed or
/// the text contains none of the recognized keys.
pub fn parse_alias_text(text: &str) -> Result<AliasFile, ParseError> {
    let mut alias = AliasFile::default();
    let mut recognized = false;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (key, value) = match line.split_once(char::is_whitespace) {
            Some((key, value)) => (key, value.trim()),
            None => (line, ""),
        };

        match key {
            "TITLE" => {
                recognized = true;
                if !value.is_empty() {
                    alias.title = Some(value.to_string());
                }
            }
            "DBLIST" => {
                recognized = true;
                alias.dblist = value
                    .split_whitespace()
                    .map(|v| v.trim_matches('"').to_string())
                    .filter(|v| !v.is_empty())
                    .collect();
            }
            "NSEQ" => {
                recognized = true;
                alias.sequence_count = Some(parse_count(key, value)?);
            }
            "LENGTH" => {
                recognized = true;
                alias.total_length = Some(parse_count(key, value)?);
            }
            _ => {}
        }
    }

    if !recognized {
        return Err(ParseError::InvalidFormat(
            "No recognized keys in alias file".to_string(),
        ));
    }

    Ok(alias)
}

fn parse_count(key: &str, value: &str) -> Result<u64, ParseError> {
    value
        .parse()
        .map_err(|_| ParseError::InvalidFormat(format!("Invalid {key} value: '{value}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_alias_text() {
        let text = r#"#
# Alias file created 03/12/2024 11:48:31
#
TITLE Sinvicta 2-2-3 cDNA subset
DBLIST "Sinvicta2-2-3.00" "Sinvicta2-2-3.01"
NSEQ 13
LENGTH 402709
"#;

        let alias = parse_alias_text(text).unwrap();
        assert_eq!(alias.title.as_deref(), Some("Sinvicta 2-2-3 cDNA subset"));
        assert_eq!(alias.dblist, vec!["Sinvicta2-2-3.00", "Sinvicta2-2-3.01"]);
        assert_eq!(alias.sequence_count, Some(13));
        assert_eq!(alias.total_length, Some(402_709));
    }

    #[test]
    fn test_title_only() {
        let alias = parse_alias_text("TITLE ants\n").unwrap();
        assert_eq!(alias.title.as_deref(), Some("ants"));
        assert!(alias.sequence_count.is_none());
        assert!(alias.dblist.is_empty());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let alias = parse_alias_text("TITLE t\nMEMB_BIT 1\nOIDLIST x.msk\n").unwrap();
        assert_eq!(alias.title.as_deref(), Some("t"));
    }

    #[test]
    fn test_invalid_count() {
        let result = parse_alias_text("TITLE t\nNSEQ lots\n");
        assert!(matches!(result, Err(ParseError::InvalidFormat(_))));
    }

    #[test]
    fn test_empty_alias() {
        assert!(parse_alias_text("").is_err());
        assert!(parse_alias_text("# only a comment\n").is_err());
    }
}
