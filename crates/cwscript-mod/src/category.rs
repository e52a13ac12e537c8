use std::path::Path;

/// UTF-8 byte order mark.
pub const BOM: &[u8] = b"\xEF\xBB\xBF";

/// How a mod file is encoded on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    /// Clausewitz script, plain UTF-8.
    Script,
    /// Localisation YAML; the game requires a BOM.
    Localisation,
}

impl FileCategory {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yml") => Self::Localisation,
            _ => Self::Script,
        }
    }

    /// Bytes to write for `text`.
    pub fn encode(self, text: &str) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(text.len() + BOM.len());
        if self == Self::Localisation {
            bytes.extend_from_slice(BOM);
        }
        bytes.extend_from_slice(text.as_bytes());
        bytes
    }
}

/// Decodes file bytes, dropping a leading BOM if present.
pub fn decode(bytes: Vec<u8>) -> Result<String, std::string::FromUtf8Error> {
    let bytes = match bytes.strip_prefix(BOM) {
        Some(rest) => rest.to_vec(),
        None => bytes,
    };
    String::from_utf8(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_from_extension() {
        assert_eq!(
            FileCategory::from_path("localisation/english/x_l_english.yml"),
            FileCategory::Localisation
        );
        assert_eq!(FileCategory::from_path("a/B.YML"), FileCategory::Localisation);
        assert_eq!(FileCategory::from_path("common/x.txt"), FileCategory::Script);
        assert_eq!(FileCategory::from_path("descriptor.mod"), FileCategory::Script);
    }

    #[test]
    fn localisation_gets_bom() {
        let bytes = FileCategory::Localisation.encode("l_english:\n");
        assert!(bytes.starts_with(BOM));
        assert_eq!(&bytes[3..], b"l_english:\n");
        assert_eq!(FileCategory::Script.encode("a = 1"), b"a = 1".to_vec());
    }

    #[test]
    fn decode_strips_bom() {
        let bytes = FileCategory::Localisation.encode("x");
        assert_eq!(decode(bytes).unwrap(), "x");
        assert_eq!(decode(b"plain".to_vec()).unwrap(), "plain");
        assert!(decode(vec![0xff, 0xfe]).is_err());
    }
}
