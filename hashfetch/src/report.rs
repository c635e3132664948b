//! Rendering of collected results.

use std::io::{self, Write};

use crate::task::UrlDigest;

/// Write one `<url> <digest>` line per result, in the given order.
pub fn write_results<W: Write>(mut writer: W, results: &[UrlDigest]) -> io::Result<()> {
    for result in results {
        writeln!(writer, "{result}")?;
    }

    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_results() {
        let results = [
            UrlDigest {
                url: "http://example.com".into(),
                digest: "84238dfc8092e5d9c0dac8ef93371a07".into(),
            },
            UrlDigest {
                url: "https://example.org".into(),
                digest: "d41d8cd98f00b204e9800998ecf8427e".into(),
            },
        ];

        let mut out = vec![];
        write_results(&mut out, &results).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "http://example.com 84238dfc8092e5d9c0dac8ef93371a07\nhttps://example.org d41d8cd98f00b204e9800998ecf8427e\n"
        );
    }

    #[test]
    fn test_write_nothing() {
        let mut out = vec![];
        write_results(&mut out, &[]).unwrap();

        assert!(out.is_empty());
    }
}
