// Season exports come out of spreadsheets in whatever encoding the author had lying around.
// UTF-8 first, Latin-1 otherwise. Every byte is a valid Latin-1 code point so this never fails.
pub fn decode_field(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.trim().to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect::<String>().trim().to_string(),
    }
}

// Plain numbers only: "12", "12.5". Anything else is None.
pub fn parse_number(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok()
}

// Goals and assists also accept the European "12,5". Only for stat columns: elsewhere a comma is
// just as likely a thousands separator ("2,836" minutes).
pub fn parse_stat(raw: &str) -> Option<f64> {
    if let Some(v) = parse_number(raw) {
        return Some(v);
    }

    let raw = raw.trim();
    if raw.contains(',') && !raw.contains('.') {
        return raw.replace(',', ".").parse::<f64>().ok();
    }

    None
}
