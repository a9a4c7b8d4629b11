use std::borrow::Cow;

/// Source encodings a bank export is expected to arrive in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    Utf8,
    Windows1252,
    Latin1,
}

impl SourceEncoding {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Windows1252 => "Windows-1252",
            Self::Latin1 => "ISO-8859-1",
        }
    }
}

// Windows-1252 code points for 0x80..=0x9F. Holes map to the C1 control
// character of the same value, matching the WHATWG decoder.
const CP1252_HIGH: [char; 32] = [
    '\u{20AC}', '\u{0081}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{008D}', '\u{017D}', '\u{008F}',
    '\u{0090}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{009D}', '\u{017E}', '\u{0178}',
];

const UNASSIGNED_CP1252: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

/// Pick the encoding of raw file bytes.
///
/// Valid UTF-8 wins. Otherwise bytes in 0x80..=0x9F that Windows-1252
/// assigns (e.g. `€` at 0x80) point to Windows-1252; anything else falls
/// back to ISO-8859-1, which accepts every byte.
pub fn detect(bytes: &[u8]) -> SourceEncoding {
    if std::str::from_utf8(bytes).is_ok() {
        return SourceEncoding::Utf8;
    }
    let uses_cp1252_range = bytes
        .iter()
        .any(|b| (0x80..=0x9F).contains(b) && !UNASSIGNED_CP1252.contains(b));
    if uses_cp1252_range {
        SourceEncoding::Windows1252
    } else {
        SourceEncoding::Latin1
    }
}

/// Transcode raw bytes to UTF-8 text, dropping a leading BOM.
pub fn decode(bytes: &[u8]) -> (Cow<'_, str>, SourceEncoding) {
    let encoding = detect(bytes);
    let text = match encoding {
        SourceEncoding::Utf8 => {
            let s = std::str::from_utf8(bytes).unwrap_or_default();
            Cow::Borrowed(s.strip_prefix('\u{FEFF}').unwrap_or(s))
        }
        SourceEncoding::Windows1252 => Cow::Owned(
            bytes
                .iter()
                .map(|&b| match b {
                    0x80..=0x9F => CP1252_HIGH[(b - 0x80) as usize],
                    _ => b as char,
                })
                .collect(),
        ),
        SourceEncoding::Latin1 => Cow::Owned(bytes.iter().map(|&b| b as char).collect()),
    };
    (text, encoding)
}
