//! URL encoding/decoding utilities

/// Encodes a string using URL encoding
///
/// # Arguments
/// * `input` - The string to encode
///
/// # Returns
/// * String containing the URL-encoded input
///
/// # Examples
/// ```
/// use trojan_go_fmt::utils::url::url_encode;
///
/// let encoded = url_encode("Hello World!");
/// assert_eq!(encoded, "Hello%20World%21");
/// ```
pub fn url_encode(input: &str) -> String {
    urlencoding::encode(input).into_owned()
}

/// Decodes a URL-encoded string
///
/// # Arguments
/// * `input` - The URL-encoded string to decode
///
/// # Returns
/// * String containing the decoded input
/// * Returns the original string if decoding fails
///
/// # Examples
/// ```
/// use trojan_go_fmt::utils::url::url_decode;
///
/// let decoded = url_decode("Hello%20World%21");
/// assert_eq!(decoded, "Hello World!");
/// ```
pub fn url_decode(input: &str) -> String {
    urlencoding::decode(input)
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| input.to_string())
}

/// Encodes `key=value` pairs as an `application/x-www-form-urlencoded` query
pub fn encode_query<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_decode_invalid_utf8() {
        assert_eq!(url_decode("%FF%FE"), "%FF%FE");
        assert_eq!(url_decode("%E4%BD%A0%E5%A5%BD"), "你好");
    }

    #[test]
    fn test_encode_query() {
        assert_eq!(
            encode_query(vec![("path", "/ws"), ("host", "a b.com")]),
            "path=%2Fws&host=a+b.com"
        );
        assert_eq!(encode_query(Vec::<(&str, &str)>::new()), "");
    }
}
