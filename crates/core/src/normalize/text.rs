//! Shared text folding for lexicon matching.
//!
//! Vietnamese retail text mixes diacritics freely ("Máy chủ", "máy chu",
//! "MAY CHU"). Matching happens on a folded form: lowercase with Vietnamese
//! diacritics stripped to their base letters.

/// Fold text to lowercase ASCII-ish form for keyword matching.
///
/// Only Vietnamese letters are folded; other characters pass through
/// lowercased and unchanged.
pub fn fold(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(fold_char)
        .collect()
}

fn fold_char(c: char) -> char {
    match c {
        'à' | 'á' | 'ả' | 'ã' | 'ạ' | 'ă' | 'ằ' | 'ắ' | 'ẳ' | 'ẵ' | 'ặ' | 'â' | 'ầ' | 'ấ'
        | 'ẩ' | 'ẫ' | 'ậ' => 'a',
        'è' | 'é' | 'ẻ' | 'ẽ' | 'ẹ' | 'ê' | 'ề' | 'ế' | 'ể' | 'ễ' | 'ệ' => 'e',
        'ì' | 'í' | 'ỉ' | 'ĩ' | 'ị' => 'i',
        'ò' | 'ó' | 'ỏ' | 'õ' | 'ọ' | 'ô' | 'ồ' | 'ố' | 'ổ' | 'ỗ' | 'ộ' | 'ơ' | 'ờ' | 'ớ'
        | 'ở' | 'ỡ' | 'ợ' => 'o',
        'ù' | 'ú' | 'ủ' | 'ũ' | 'ụ' | 'ư' | 'ừ' | 'ứ' | 'ử' | 'ữ' | 'ự' => 'u',
        'ỳ' | 'ý' | 'ỷ' | 'ỹ' | 'ỵ' => 'y',
        'đ' => 'd',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_vietnamese_phrases() {
        assert_eq!(fold("Máy chủ"), "may chu");
        assert_eq!(fold("Còn hàng"), "con hang");
        assert_eq!(fold("Hết hàng"), "het hang");
        assert_eq!(fold("Điện Máy Xanh"), "dien may xanh");
    }

    #[test]
    fn test_fold_is_lowercase() {
        assert_eq!(fold("LAPTOP Dell"), "laptop dell");
    }

    #[test]
    fn test_fold_leaves_ascii_unchanged() {
        assert_eq!(fold("ThinkPad T14s Gen 2"), "thinkpad t14s gen 2");
    }
}
