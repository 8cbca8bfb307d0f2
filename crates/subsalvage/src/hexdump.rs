const ROW_LEN: usize = 16;

/// Classic hex dump of at most `limit` bytes: offset, hex pairs, printable ASCII.
///
/// ```text
/// 00000000  7b 31 7d 7b 32 7d 48 69                          |{1}{2}Hi|
/// ```
///
/// Empty input renders as an empty string.
pub fn hex_dump(bytes: &[u8], limit: usize) -> String {
    let bytes = &bytes[..bytes.len().min(limit)];
    let mut out = String::with_capacity(bytes.len().div_ceil(ROW_LEN) * 78);

    for (row, chunk) in bytes.chunks(ROW_LEN).enumerate() {
        let hex = chunk
            .iter()
            .map(|b| hex::encode([*b]))
            .collect::<Vec<_>>()
            .join(" ");
        let ascii: String = chunk
            .iter()
            .map(|&b| if b.is_ascii_graphic() || b == b' ' { char::from(b) } else { '.' })
            .collect();
        out.push_str(&format!("{:08x}  {hex:<47}  |{ascii}|\n", row * ROW_LEN));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty() {
        assert_eq!(hex_dump(b"", 512), "");
    }

    #[test]
    fn single_short_row() {
        assert_eq!(
            hex_dump(b"{1}{2}Hi", 512),
            "00000000  7b 31 7d 7b 32 7d 48 69                          |{1}{2}Hi|\n"
        );
    }

    #[test]
    fn rows_and_offsets() {
        let bytes: Vec<u8> = (0u8..40).collect();
        let dump = hex_dump(&bytes, 512);
        let rows: Vec<_> = dump.lines().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].starts_with("00000000  00 01 02"));
        assert!(rows[1].starts_with("00000010  10 11"));
        assert!(rows[2].starts_with("00000020  20 21 22 23 24 25 26 27"));
        assert!(rows[0].ends_with("|................|"));
        assert!(rows[2].ends_with("| !\"#$%&'|"));
    }

    #[test]
    fn respects_limit() {
        let bytes = vec![0x41; 1000];
        let dump = hex_dump(&bytes, 512);
        assert_eq!(dump.lines().count(), 32);
        assert_eq!(hex_dump(&bytes, 0), "");
    }
}
