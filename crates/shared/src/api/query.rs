use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters `encodeURIComponent` leaves alone: alphanumerics plus these marks.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Encode a SOQL statement for the `q` query parameter, form-style:
/// URI-component encoding with spaces written as `+`.
pub fn encode_soql(soql: &str) -> String {
    utf8_percent_encode(soql, URI_COMPONENT)
        .to_string()
        .replace("%20", "+")
}

/// Query resource URL for a SOQL statement under `data_path`.
pub fn query_url(data_path: &str, soql: &str) -> String {
    format!("{data_path}/query/?q={}", encode_soql(soql))
}
