use crate::IngestError;
use std::fs;
use std::path::Path;

/// Declared character encoding of a source file. The groundwater export is
/// Latin-1; the other two sources are UTF-8. Bytes invalid under the
/// declared encoding are fatal, never replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    Utf8,
    Latin1,
}

pub fn read_decoded(path: &Path, encoding: SourceEncoding) -> Result<String, IngestError> {
    let bytes = fs::read(path)
        .map_err(|e| IngestError(format!("failed to read {}: {e}", path.display())))?;
    match encoding {
        SourceEncoding::Utf8 => String::from_utf8(bytes)
            .map_err(|_| IngestError(format!("{} is not valid UTF-8", path.display()))),
        SourceEncoding::Latin1 => Ok(decode_latin1(&bytes)),
    }
}

/// Latin-1 maps every byte to the Unicode scalar with the same value.
#[must_use]
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn latin1_bytes_decode_to_matching_scalars() {
        // 0xE9 is e-acute in Latin-1.
        assert_eq!(decode_latin1(b"Medchal\xE9"), "Medchal\u{e9}");
    }

    #[test]
    fn invalid_utf8_is_fatal() {
        let tmp = tempdir().expect("tempdir");
        let path = tmp.path().join("bad.csv");
        fs::write(&path, [0x66, 0x6f, 0xFF, 0xFE]).expect("write bytes");
        let err = read_decoded(&path, SourceEncoding::Utf8).expect_err("must fail");
        assert!(err.0.contains("not valid UTF-8"), "unexpected error: {}", err.0);
    }

    #[test]
    fn latin1_read_never_fails_on_high_bytes() {
        let tmp = tempdir().expect("tempdir");
        let path = tmp.path().join("latin1.csv");
        fs::write(&path, [0x66, 0x6f, 0xFF, 0xFE]).expect("write bytes");
        let decoded = read_decoded(&path, SourceEncoding::Latin1).expect("decode latin1");
        assert_eq!(decoded, "fo\u{ff}\u{fe}");
    }
}
