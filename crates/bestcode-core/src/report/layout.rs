use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::LayoutError;

/// Entries per group: five rows, five fingers per hand.
pub const GROUP_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Left,
    Right,
}

#[derive(Deserialize)]
struct LayoutFile {
    rows: Vec<String>,
    lefts: Vec<String>,
    rights: Vec<String>,
}

/// Physical keyboard layout: which row and which finger types each key.
///
/// Rows are number, top, home, bottom and thumb. Fingers are thumb, index,
/// middle, ring and pinky. A key belongs to at most one row and one finger.
#[derive(Debug, Clone)]
pub struct Layout {
    rows: HashMap<char, usize>,
    fingers: HashMap<char, (Hand, usize)>,
}

impl Layout {
    /// Build from the key strings of each row and each finger.
    pub fn new(rows: &[String], lefts: &[String], rights: &[String]) -> Result<Self, LayoutError> {
        check_len("rows", rows)?;
        check_len("lefts", lefts)?;
        check_len("rights", rights)?;

        let mut row_of = HashMap::new();
        for (i, keys) in rows.iter().enumerate() {
            for key in keys.chars() {
                if row_of.insert(key, i).is_some_and(|prev| prev != i) {
                    return Err(LayoutError::DuplicateKey { key, group: "rows" });
                }
            }
        }

        let mut finger_of = HashMap::new();
        let hands = [(Hand::Left, lefts), (Hand::Right, rights)];
        for (hand, fingers) in hands {
            for (i, keys) in fingers.iter().enumerate() {
                for key in keys.chars() {
                    if finger_of
                        .insert(key, (hand, i))
                        .is_some_and(|prev| prev != (hand, i))
                    {
                        return Err(LayoutError::DuplicateKey {
                            key,
                            group: "fingers",
                        });
                    }
                }
            }
        }

        Ok(Self {
            rows: row_of,
            fingers: finger_of,
        })
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, LayoutError> {
        let file: LayoutFile =
            toml::from_str(toml_str).map_err(|e| LayoutError::Parse(e.to_string()))?;
        Self::new(&file.rows, &file.lefts, &file.rights)
    }

    pub fn open(path: &Path) -> Result<Self, LayoutError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn row(&self, key: char) -> Option<usize> {
        self.rows.get(&key).copied()
    }

    pub fn finger(&self, key: char) -> Option<(Hand, usize)> {
        self.fingers.get(&key).copied()
    }

    pub fn hand(&self, key: char) -> Option<Hand> {
        self.finger(key).map(|(hand, _)| hand)
    }
}

fn check_len(group: &'static str, keys: &[String]) -> Result<(), LayoutError> {
    if keys.len() != GROUP_LEN {
        return Err(LayoutError::RowCount {
            group,
            found: keys.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const QWERTY: &str = r#"
rows = ["1234567890", "qwertyuiop", "asdfghjkl;", "zxcvbnm,./", " "]
lefts = [" ", "45rtfgvb", "3edc", "2wsx", "1qaz"]
rights = ["", "67yuhjnm", "8ik,", "9ol.", "0p;/"]
"#;

    #[test]
    fn test_parse_qwerty() {
        let layout = Layout::from_toml(QWERTY).unwrap();
        assert_eq!(layout.row('q'), Some(1));
        assert_eq!(layout.row(' '), Some(4));
        assert_eq!(layout.finger('f'), Some((Hand::Left, 1)));
        assert_eq!(layout.finger('p'), Some((Hand::Right, 4)));
        assert_eq!(layout.hand('j'), Some(Hand::Right));
        assert_eq!(layout.row('é'), None);
        assert_eq!(layout.finger('é'), None);
    }

    #[test]
    fn test_wrong_row_count() {
        let toml = QWERTY.replace(r#", " "]"#, "]");
        let err = Layout::from_toml(&toml).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::RowCount {
                group: "rows",
                found: 4
            }
        ));
    }

    #[test]
    fn test_key_in_two_rows() {
        let toml = QWERTY.replace("\"asdfghjkl;\"", "\"asdfghjklq\"");
        let err = Layout::from_toml(&toml).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::DuplicateKey {
                key: 'q',
                group: "rows"
            }
        ));
    }

    #[test]
    fn test_key_on_two_fingers() {
        let toml = QWERTY.replace("\"0p;/\"", "\"0p;/a\"");
        let err = Layout::from_toml(&toml).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::DuplicateKey {
                key: 'a',
                group: "fingers"
            }
        ));
    }

    #[test]
    fn test_repeated_key_within_one_group_is_allowed() {
        let toml = QWERTY.replace("\"1qaz\"", "\"1qazz\"");
        assert!(Layout::from_toml(&toml).is_ok());
    }

    #[test]
    fn test_malformed_toml() {
        let err = Layout::from_toml("rows = [").unwrap_err();
        assert!(matches!(err, LayoutError::Parse(_)));
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Layout::open(&dir.path().join("layout.toml")).unwrap_err();
        assert!(matches!(err, LayoutError::Io(_)));
    }
}
