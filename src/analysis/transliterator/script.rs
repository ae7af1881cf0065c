//! Character-level script mappings used by the built-in transform steps.

use std::sync::LazyLock;

use deunicode::deunicode_char;
use opencc_fmmseg::OpenCC;

/// OpenCC converter with the bundled dictionaries, loaded on first use.
static OPENCC: LazyLock<OpenCC> = LazyLock::new(OpenCC::new);

const KATAKANA_TO_HIRAGANA: u32 = 0x60;

pub(crate) fn katakana_to_hiragana(c: char) -> char {
    match c {
        '\u{30A1}'..='\u{30F6}' | '\u{30FD}'..='\u{30FE}' => {
            char::from_u32(c as u32 - KATAKANA_TO_HIRAGANA).unwrap_or(c)
        }
        _ => c,
    }
}

pub(crate) fn hiragana_to_katakana(c: char) -> char {
    match c {
        '\u{3041}'..='\u{3096}' | '\u{309D}'..='\u{309E}' => {
            char::from_u32(c as u32 + KATAKANA_TO_HIRAGANA).unwrap_or(c)
        }
        _ => c,
    }
}

pub(crate) fn fullwidth_to_halfwidth(c: char) -> char {
    match c {
        '\u{FF01}'..='\u{FF5E}' => char::from_u32(c as u32 - 0xFEE0).unwrap_or(c),
        '\u{3000}' => ' ',
        _ => c,
    }
}

fn is_latin(c: char) -> bool {
    c.is_alphabetic()
        && matches!(c,
            '\u{00C0}'..='\u{024F}' | // Latin-1 Supplement, Extended-A/B
            '\u{0250}'..='\u{02FF}' | // IPA Extensions, Spacing Modifier Letters
            '\u{1E00}'..='\u{1EFF}' | // Latin Extended Additional
            '\u{2C60}'..='\u{2C7F}' | // Latin Extended-C
            '\u{A720}'..='\u{A7FF}' | // Latin Extended-D
            '\u{FB00}'..='\u{FB06}'   // Latin ligatures
        )
}

/// Replace Latin letters with their ASCII approximation.
///
/// Combining diacritics (U+0300..U+036F) are dropped; every other script is
/// left untouched, including combining marks such as the kana voicing mark.
pub(crate) fn latin_to_ascii(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if c.is_ascii() {
            out.push(c);
        } else if matches!(c, '\u{0300}'..='\u{036F}') {
            continue;
        } else if is_latin(c) {
            match deunicode_char(c) {
                Some(ascii) => out.push_str(ascii),
                None => out.push(c),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Apply a lowercase romanization table, carrying the case of the source letter.
pub(crate) fn romanize(input: &str, table: fn(char) -> Option<&'static str>) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        let lower = c.to_lowercase().next().unwrap_or(c);
        match table(lower) {
            Some(latin) if lower != c => {
                let mut chars = latin.chars();
                if let Some(first) = chars.next() {
                    out.extend(first.to_uppercase());
                    out.push_str(chars.as_str());
                }
            }
            Some(latin) => out.push_str(latin),
            None => out.push(c),
        }
    }
    out
}

/// ISO 9 romanization of Cyrillic.
pub(crate) fn cyrillic_latin(c: char) -> Option<&'static str> {
    let latin = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "ë",
        'ж' => "ž",
        'з' => "z",
        'и' => "i",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "c",
        'ч' => "č",
        'ш' => "š",
        'щ' => "ŝ",
        'ъ' => "ʺ",
        'ы' => "y",
        'ь' => "ʹ",
        'э' => "è",
        'ю' => "û",
        'я' => "â",
        'і' => "ì",
        'ї' => "ï",
        'є' => "ê",
        'ґ' => "g̀",
        'ў' => "ŭ",
        'ђ' => "đ",
        'ћ' => "ć",
        'џ' => "d̂",
        'љ' => "l̂",
        'њ' => "n̂",
        'ѓ' => "ǵ",
        'ќ' => "ḱ",
        'ѕ' => "ẑ",
        'ј' => "ǰ",
        _ => return None,
    };
    Some(latin)
}

pub(crate) fn greek_latin(c: char) -> Option<&'static str> {
    let latin = match c {
        'α' => "a",
        'β' => "b",
        'γ' => "g",
        'δ' => "d",
        'ε' => "e",
        'ζ' => "z",
        'η' => "ē",
        'θ' => "th",
        'ι' => "i",
        'κ' => "k",
        'λ' => "l",
        'μ' => "m",
        'ν' => "n",
        'ξ' => "x",
        'ο' => "o",
        'π' => "p",
        'ρ' => "r",
        'σ' | 'ς' => "s",
        'τ' => "t",
        'υ' => "y",
        'φ' => "ph",
        'χ' => "ch",
        'ψ' => "ps",
        'ω' => "ō",
        _ => return None,
    };
    Some(latin)
}

/// Arabic romanization, after DIN 31635.
///
/// Runs after decomposition, so hamza and madda arrive as combining marks.
/// Short vowel marks become vowels; shadda and sukun are dropped.
pub(crate) fn arabic_latin(c: char) -> Option<&'static str> {
    let latin = match c {
        'ا' => "ā",
        'ب' => "b",
        'ت' => "t",
        'ث' => "ṯ",
        'ج' => "ǧ",
        'ح' => "ḥ",
        'خ' => "ḫ",
        'د' => "d",
        'ذ' => "ḏ",
        'ر' => "r",
        'ز' => "z",
        'س' => "s",
        'ش' => "š",
        'ص' => "ṣ",
        'ض' => "ḍ",
        'ط' => "ṭ",
        'ظ' => "ẓ",
        'ع' => "ʿ",
        'غ' => "ġ",
        'ف' => "f",
        'ق' => "q",
        'ك' | 'ک' => "k",
        'ل' => "l",
        'م' => "m",
        'ن' => "n",
        'ه' => "h",
        'ة' => "h",
        'و' => "w",
        'ي' | 'ی' => "y",
        'ى' => "ā",
        'ء' | '\u{0654}' | '\u{0655}' => "ʾ",
        '\u{064B}' => "an",
        '\u{064C}' => "un",
        '\u{064D}' => "in",
        '\u{064E}' => "a",
        '\u{064F}' => "u",
        '\u{0650}' => "i",
        '\u{0651}' | '\u{0652}' | '\u{0653}' | 'ـ' => "",
        '٠' => "0",
        '١' => "1",
        '٢' => "2",
        '٣' => "3",
        '٤' => "4",
        '٥' => "5",
        '٦' => "6",
        '٧' => "7",
        '٨' => "8",
        '٩' => "9",
        '،' => ",",
        '؛' => ";",
        '؟' => "?",
        _ => return None,
    };
    Some(latin)
}

/// Hebrew romanization. Final letter forms map like their medial forms.
pub(crate) fn hebrew_latin(c: char) -> Option<&'static str> {
    let latin = match c {
        'א' => "ʾ",
        'ב' => "b",
        'ג' => "g",
        'ד' => "d",
        'ה' => "h",
        'ו' => "w",
        'ז' => "z",
        'ח' => "ḥ",
        'ט' => "ṭ",
        'י' => "y",
        'כ' | 'ך' => "k",
        'ל' => "l",
        'מ' | 'ם' => "m",
        'נ' | 'ן' => "n",
        'ס' => "s",
        'ע' => "ʿ",
        'פ' | 'ף' => "p",
        'צ' | 'ץ' => "ṣ",
        'ק' => "q",
        'ר' => "r",
        'ש' => "š",
        'ת' => "t",
        // Niqqud
        '\u{05B1}' | '\u{05B5}' | '\u{05B6}' => "e",
        '\u{05B2}' | '\u{05B7}' | '\u{05B8}' => "a",
        '\u{05B3}' | '\u{05B9}' | '\u{05BA}' => "o",
        '\u{05B4}' => "i",
        '\u{05BB}' => "u",
        '\u{05B0}' | '\u{05BC}' | '\u{05BD}' | '\u{05BF}' | '\u{05C1}' | '\u{05C2}' => "",
        '־' => "-",
        '׳' => "'",
        '״' => "\"",
        _ => return None,
    };
    Some(latin)
}

fn is_han(c: char) -> bool {
    matches!(c,
        '\u{3400}'..='\u{4DBF}' |
        '\u{4E00}'..='\u{9FFF}' |
        '\u{F900}'..='\u{FAFF}' |
        '\u{20000}'..='\u{2EBEF}'
    )
}

/// Convert Traditional Chinese to Simplified, phrase by phrase.
///
/// Text without Han characters is returned as is, so the dictionaries are
/// only loaded once Chinese text shows up.
pub(crate) fn traditional_to_simplified(input: &str) -> String {
    if !input.chars().any(is_han) {
        return input.to_string();
    }
    OPENCC.convert(input, "t2s", false)
}
