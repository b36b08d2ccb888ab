//! Content fingerprints for media files.
//!
//! Files are streamed through SHA-256 in fixed 4 KiB chunks, so memory use
//! does not grow with file size. The fingerprint is the lowercase hex digest.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Bytes read per chunk.
const CHUNK_SIZE: usize = 4096;

/// Compute the fingerprint of the file at `path`.
pub fn fingerprint(path: &Path) -> io::Result<String> {
    let file = File::open(path)?;
    fingerprint_reader(file)
}

/// Compute the fingerprint of everything readable from `reader`.
pub fn fingerprint_reader<R: Read>(mut reader: R) -> io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; CHUNK_SIZE];

    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_fingerprint_length() {
        let hash = fingerprint_reader(&b"test data"[..]).unwrap();
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_known_digest() {
        let hash = fingerprint_reader(&b""[..]).unwrap();
        assert_eq!(
            hash,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_identical_files_match() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.mkv");
        let b = dir.path().join("b.mkv");
        fs::write(&a, b"same bytes").unwrap();
        fs::write(&b, b"same bytes").unwrap();

        assert_eq!(fingerprint(&a).unwrap(), fingerprint(&b).unwrap());
    }

    #[test]
    fn test_single_byte_difference_detected() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.mkv");
        let b = dir.path().join("b.mkv");
        let mut data = vec![7u8; CHUNK_SIZE * 3 + 17];
        fs::write(&a, &data).unwrap();
        data[CHUNK_SIZE * 2 + 5] ^= 1;
        fs::write(&b, &data).unwrap();

        assert_ne!(fingerprint(&a).unwrap(), fingerprint(&b).unwrap());
    }

    #[test]
    fn test_chunking_matches_one_shot_digest() {
        let data: Vec<u8> = (0..(CHUNK_SIZE * 5 + 123)).map(|i| (i % 251) as u8).collect();
        let expected = hex::encode(Sha256::digest(&data));
        assert_eq!(fingerprint_reader(&data[..]).unwrap(), expected);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = fingerprint(Path::new("/nonexistent/file.mkv")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
