use encoding_rs::Encoding;
use url::Url;

/// Character encoding a page was decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Utf8,
    Windows1252,
    ShiftJis,
    Gbk,
    Big5,
    /// Any other WHATWG encoding, by canonical name.
    Other(&'static str),
}

impl Charset {
    pub fn from_encoding(encoding: &'static Encoding) -> Self {
        if encoding == encoding_rs::UTF_8 {
            Self::Utf8
        } else if encoding == encoding_rs::WINDOWS_1252 {
            Self::Windows1252
        } else if encoding == encoding_rs::SHIFT_JIS {
            Self::ShiftJis
        } else if encoding == encoding_rs::GBK || encoding == encoding_rs::GB18030 {
            Self::Gbk
        } else if encoding == encoding_rs::BIG5 {
            Self::Big5
        } else {
            Self::Other(encoding.name())
        }
    }

    pub fn encoding(&self) -> &'static Encoding {
        match self {
            Self::Utf8 => encoding_rs::UTF_8,
            Self::Windows1252 => encoding_rs::WINDOWS_1252,
            Self::ShiftJis => encoding_rs::SHIFT_JIS,
            Self::Gbk => encoding_rs::GBK,
            Self::Big5 => encoding_rs::BIG5,
            Self::Other(name) => Encoding::for_label(name.as_bytes()).unwrap_or(encoding_rs::UTF_8),
        }
    }
}

/// A fetched page, decoded to UTF-8.
#[derive(Debug)]
pub struct PageResponse {
    /// Where the request ended up after redirects.
    pub url_final: Url,
    pub body_utf8: String,
    pub charset: Charset,
}
