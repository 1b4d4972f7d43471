//! ASCII sanitization for legacy thermal printer firmware
//!
//! The serial receipt printers this feeds cannot render multi-byte
//! encodings; anything outside single-byte ASCII is silently corrupted or
//! dropped by the device. This pass is a deliberate lossy transliteration,
//! not a general transcoder: Latin diacritics fold to their base letter,
//! CRLF folds to LF, and any other non-ASCII character becomes '?'.
//!
//! Bytes below 0x80 other than stripped CRs pass through untouched, which
//! keeps embedded ESC/POS command sequences intact.

/// Sanitize decoded receipt bytes for a single-byte-ASCII device
pub fn sanitize_receipt_text(bytes: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(bytes.len());
    let mut buffer: Vec<u8> = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        if b < 128 {
            flush_buffer(&mut buffer, &mut result);

            // CRLF -> LF; a lone CR passes through
            if b == b'\r' && bytes.get(i + 1) == Some(&b'\n') {
                i += 1;
                continue;
            }
            result.push(b);
        } else {
            // Part of a multi-byte UTF-8 sequence
            buffer.push(b);
        }
        i += 1;
    }

    flush_buffer(&mut buffer, &mut result);
    result
}

/// Flush buffered non-ASCII bytes, transliterating each character
fn flush_buffer(buffer: &mut Vec<u8>, result: &mut Vec<u8>) {
    if buffer.is_empty() {
        return;
    }

    let s = String::from_utf8_lossy(buffer);
    for c in s.chars() {
        result.push(fold_char(c) as u8);
    }
    buffer.clear();
}

/// Fold one non-ASCII character to its closest ASCII equivalent
fn fold_char(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        'ý' => 'y',
        'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => 'A',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' => 'O',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'Ñ' => 'N',
        'Ç' => 'C',
        '€' => 'E',
        '¡' => '!',
        '¿' => '?',
        _ => '?',
    }
}
