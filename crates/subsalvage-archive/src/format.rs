use std::io::Read;

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    Tar(TarCompress),
}

/// Compression codec wrapped around a tar stream (or around a single file).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TarCompress {
    None,
    Gzip,
    Xz,
    Zstd,
}

/// Output of [`TarCompress::decompress`].
#[derive(Debug)]
pub struct Decompressed {
    pub bytes: Vec<u8>,
    /// Original file name recorded by the codec (gzip `FNAME`), if any.
    pub original_name: Option<String>,
}

impl TarCompress {
    /// Inflate the whole payload into memory.
    pub fn decompress(self, data: &[u8]) -> Result<Decompressed> {
        match self {
            Self::None => Ok(Decompressed {
                bytes: data.to_vec(),
                original_name: None,
            }),
            #[cfg(feature = "tar")]
            Self::Gzip => {
                let mut decoder = flate2::read::GzDecoder::new(data);
                let mut bytes = Vec::new();
                decoder
                    .read_to_end(&mut bytes)
                    .map_err(|_| Error::Corrupted)?;
                let original_name = decoder
                    .header()
                    .and_then(|h| h.filename())
                    .map(|name| String::from_utf8_lossy(name).into_owned())
                    .filter(|name| !name.is_empty());
                Ok(Decompressed {
                    bytes,
                    original_name,
                })
            }
            #[cfg(not(feature = "tar"))]
            Self::Gzip => Err(Error::UnsupportedFormat),
            #[cfg(feature = "xz")]
            Self::Xz => {
                let mut bytes = Vec::new();
                xz2::read::XzDecoder::new(data)
                    .read_to_end(&mut bytes)
                    .map_err(|_| Error::Corrupted)?;
                Ok(Decompressed {
                    bytes,
                    original_name: None,
                })
            }
            #[cfg(not(feature = "xz"))]
            Self::Xz => Err(Error::UnsupportedFormat),
            #[cfg(feature = "zstd")]
            Self::Zstd => {
                let bytes = zstd::stream::decode_all(data).map_err(|_| Error::Corrupted)?;
                Ok(Decompressed {
                    bytes,
                    original_name: None,
                })
            }
            #[cfg(not(feature = "zstd"))]
            Self::Zstd => Err(Error::UnsupportedFormat),
        }
    }
}

pub fn detect_format(data: &[u8]) -> Option<ArchiveFormat> {
    match data {
        [0x50, 0x4B, 0x03, 0x04, ..] => Some(ArchiveFormat::Zip),
        // empty zip: end-of-central-directory record only
        [0x50, 0x4B, 0x05, 0x06, ..] => Some(ArchiveFormat::Zip),
        [0x1F, 0x8B, ..] => Some(ArchiveFormat::Tar(TarCompress::Gzip)),
        [0x28, 0xB5, 0x2F, 0xFD, ..] => Some(ArchiveFormat::Tar(TarCompress::Zstd)),
        [0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00, ..] => Some(ArchiveFormat::Tar(TarCompress::Xz)),
        _ => is_tar_header(data).then_some(ArchiveFormat::Tar(TarCompress::None)),
    }
}

/// POSIX (`ustar\0`) and old GNU (`ustar  \0`) headers both start with `ustar`.
pub fn is_tar_header(data: &[u8]) -> bool {
    data.len() >= 512 && data[257..262] == *b"ustar"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tar_block(magic: &[u8]) -> Vec<u8> {
        let mut block = vec![0u8; 512];
        block[257..257 + magic.len()].copy_from_slice(magic);
        block
    }

    #[test]
    fn magic_bytes() {
        let cases: [(Vec<u8>, Option<ArchiveFormat>); 9] = [
            (b"PK\x03\x04\x14\x00".to_vec(), Some(ArchiveFormat::Zip)),
            (b"PK\x05\x06\x00\x00".to_vec(), Some(ArchiveFormat::Zip)),
            (vec![0x1F, 0x8B, 0x08, 0x00], Some(ArchiveFormat::Tar(TarCompress::Gzip))),
            (vec![0x28, 0xB5, 0x2F, 0xFD, 0x00], Some(ArchiveFormat::Tar(TarCompress::Zstd))),
            (b"\xFD7zXZ\x00\x00".to_vec(), Some(ArchiveFormat::Tar(TarCompress::Xz))),
            (tar_block(b"ustar\0"), Some(ArchiveFormat::Tar(TarCompress::None))),
            (tar_block(b"ustar  \0"), Some(ArchiveFormat::Tar(TarCompress::None))),
            (b"1\n00:00:01,000 --> 00:00:02,000\nHi\n".to_vec(), None),
            (vec![0u8; 256], None),
        ];

        for (data, expected) in cases {
            assert_eq!(detect_format(&data), expected, "{:02x?}", &data[..data.len().min(8)]);
        }
    }

    #[test]
    fn passthrough_keeps_bytes() {
        let out = TarCompress::None.decompress(b"hello").unwrap();
        assert_eq!(out.bytes, b"hello");
        assert!(out.original_name.is_none());
    }

    #[test]
    fn gzip_decompress_reads_original_name() {
        use std::io::Write;

        let mut encoder = flate2::GzBuilder::new()
            .filename("movie.srt")
            .write(Vec::new(), flate2::Compression::default());
        encoder.write_all(b"subtitle body").unwrap();
        let gz = encoder.finish().unwrap();

        let out = TarCompress::Gzip.decompress(&gz).unwrap();
        assert_eq!(out.bytes, b"subtitle body");
        assert_eq!(out.original_name.as_deref(), Some("movie.srt"));
    }

    #[test]
    fn gzip_decompress_rejects_garbage() {
        let result = TarCompress::Gzip.decompress(&[0x1F, 0x8B, 0x08, 0x00, 0x01]);
        assert!(matches!(result, Err(Error::Corrupted)));
    }

    #[test]
    #[cfg(not(feature = "xz"))]
    fn xz_needs_feature() {
        assert!(matches!(TarCompress::Xz.decompress(&[]), Err(Error::UnsupportedFormat)));
    }
}
