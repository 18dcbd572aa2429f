//! Resolution of the list of input image paths.

use std::fs;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Where the list of input images comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Comma separated image paths.
    List(String),
    /// A file with one image per line. Lines may carry extra comma separated
    /// fields before the path; only the last field is used.
    File(PathBuf),
}

impl InputSource {
    /// Resolve the source into image paths, in input order.
    ///
    /// # Errors
    ///
    /// Returns an error if the list file cannot be read.
    pub fn resolve(&self) -> Result<Vec<PathBuf>> {
        match self {
            Self::List(list) => Ok(parse_list(list)),
            Self::File(path) => {
                let contents = fs::read_to_string(path).map_err(|source| Error::InputList {
                    path: path.clone(),
                    source,
                })?;
                Ok(parse_list_file(&contents))
            }
        }
    }
}

fn parse_list(list: &str) -> Vec<PathBuf> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(PathBuf::from)
        .collect()
}

fn parse_list_file(contents: &str) -> Vec<PathBuf> {
    contents
        .lines()
        .filter_map(|line| line.rsplit(',').next())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(PathBuf::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        assert_eq!(
            parse_list("a.jpg,b/c.png, d.bmp"),
            vec![
                PathBuf::from("a.jpg"),
                PathBuf::from("b/c.png"),
                PathBuf::from("d.bmp")
            ]
        );
        assert!(parse_list("").is_empty());
    }

    #[test]
    fn test_parse_list_file_uses_last_field() {
        let contents = "0,cat,images/cat.jpg\nimages/dog.jpg\n\n1,bird,images/bird.png\r\n";
        assert_eq!(
            parse_list_file(contents),
            vec![
                PathBuf::from("images/cat.jpg"),
                PathBuf::from("images/dog.jpg"),
                PathBuf::from("images/bird.png"),
            ]
        );
    }

    #[test]
    fn test_resolve_file() {
        let dir = tempfile::tempdir().unwrap();
        let list = dir.path().join("images.txt");
        fs::write(&list, "x.png\ny.png\n").unwrap();

        let paths = InputSource::File(list).resolve().unwrap();
        assert_eq!(paths, vec![PathBuf::from("x.png"), PathBuf::from("y.png")]);
    }

    #[test]
    fn test_resolve_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = InputSource::File(dir.path().join("missing.txt"))
            .resolve()
            .unwrap_err();
        assert!(matches!(err, Error::InputList { .. }));
    }
}
