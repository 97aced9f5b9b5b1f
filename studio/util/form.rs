/// Decodes one `application/x-www-form-urlencoded` component: `+` becomes a
/// space and `%XX` a byte. Malformed escapes are kept literally.
fn decode_component(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' => {
                let hex = s.get(i + 1..i + 3).and_then(|h| u8::from_str_radix(h, 16).ok());
                if let Some(byte) = hex {
                    out.push(byte);
                    i += 3;
                    continue;
                }
                out.push(b'%');
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Parses `key=value&key2=value2` into decoded `(key, value)` pairs.
pub fn parse_form(body: &str) -> Vec<(String, String)> {
    body.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(k), decode_component(v))
        })
        .collect()
}

/// First value submitted under `key`.
pub fn form_get<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_jump_form() {
        let pairs = parse_form("step=12&note=a+b%21");
        assert_eq!(form_get(&pairs, "step"), Some("12"));
        assert_eq!(form_get(&pairs, "note"), Some("a b!"));
        assert_eq!(form_get(&pairs, "missing"), None);
    }

    #[test]
    fn tolerates_empty_and_broken_input() {
        assert!(parse_form("").is_empty());
        let pairs = parse_form("step&x=%zz%4");
        assert_eq!(form_get(&pairs, "step"), Some(""));
        assert_eq!(form_get(&pairs, "x"), Some("%zz%4"));
    }
}
