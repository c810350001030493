//! Spam heuristics for free-text contact messages
//!
//! The keyword lists and run thresholds are business rules carried over
//! unchanged from the public contact form.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::errors::{ValidationError, ValidationResult};

/// Minimum length of a run of one repeated character
pub const REPEATED_CHAR_RUN: usize = 5;

/// Minimum length of a run of exclamation marks
pub const EXCLAMATION_RUN: usize = 3;

/// Class of spam pattern that matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpamKind {
    Url,
    Promotional,
    Solicitation,
    RepeatedCharacter,
    ExclamationRun,
    MoneyMaking,
}

impl fmt::Display for SpamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SpamKind::Url => "url",
            SpamKind::Promotional => "promotional keyword",
            SpamKind::Solicitation => "solicitation keyword",
            SpamKind::RepeatedCharacter => "repeated character run",
            SpamKind::ExclamationRun => "exclamation run",
            SpamKind::MoneyMaking => "money-making keyword",
        };
        f.write_str(label)
    }
}

lazy_static! {
    static ref URL_RE: Regex = Regex::new(r"https?://").expect("valid url pattern");
    static ref PROMOTIONAL_RE: Regex =
        Regex::new("お得|限定|今すぐ|無料|格安").expect("valid promotional pattern");
    static ref SOLICITATION_RE: Regex =
        Regex::new("クリック|登録|詳細|確認").expect("valid solicitation pattern");
    static ref EXCLAMATION_RE: Regex =
        Regex::new(&format!("[！!]{{{},}}", EXCLAMATION_RUN)).expect("valid exclamation pattern");
    static ref MONEY_RE: Regex =
        Regex::new("副業|稼ぐ|儲ける|お金").expect("valid money pattern");
}

/// Characters a JavaScript-style `.` never matches
fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// True if some character repeats at least `min_run` times in a row
///
/// The `regex` crate has no backreferences, so the run is counted by hand.
pub fn has_repeated_run(s: &str, min_run: usize) -> bool {
    let mut previous: Option<char> = None;
    let mut run = 0usize;

    for c in s.chars() {
        if is_line_terminator(c) {
            previous = None;
            run = 0;
            continue;
        }
        if previous == Some(c) {
            run += 1;
        } else {
            previous = Some(c);
            run = 1;
        }
        if run >= min_run {
            return true;
        }
    }

    false
}

/// Return the first spam class that matches, in fixed order
pub fn detect_spam(s: &str) -> Option<SpamKind> {
    if URL_RE.is_match(s) {
        Some(SpamKind::Url)
    } else if PROMOTIONAL_RE.is_match(s) {
        Some(SpamKind::Promotional)
    } else if SOLICITATION_RE.is_match(s) {
        Some(SpamKind::Solicitation)
    } else if has_repeated_run(s, REPEATED_CHAR_RUN) {
        Some(SpamKind::RepeatedCharacter)
    } else if EXCLAMATION_RE.is_match(s) {
        Some(SpamKind::ExclamationRun)
    } else if MONEY_RE.is_match(s) {
        Some(SpamKind::MoneyMaking)
    } else {
        None
    }
}

/// Validate that a message carries none of the spam patterns
pub fn no_spam(s: &str) -> ValidationResult<()> {
    match detect_spam(s) {
        Some(kind) => {
            log::debug!("Spam heuristic matched: {}", kind);
            Err(ValidationError::Spam(kind))
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("詳しくは http://example.com をご覧ください", SpamKind::Url ; "http url")]
    #[test_case("see https://spam.example", SpamKind::Url ; "https url")]
    #[test_case("今なら限定価格でご案内します", SpamKind::Promotional ; "promotional")]
    #[test_case("無料でお試しいただけます", SpamKind::Promotional ; "free")]
    #[test_case("こちらをクリックしてください", SpamKind::Solicitation ; "click")]
    #[test_case("ご登録をお願いします", SpamKind::Solicitation ; "register")]
    #[test_case("よろしくおねがいしますううううう", SpamKind::RepeatedCharacter ; "repeated kana")]
    #[test_case("hellooooo there friend", SpamKind::RepeatedCharacter ; "repeated ascii")]
    #[test_case("ぜひお願いします！！！", SpamKind::ExclamationRun ; "full width exclamations")]
    #[test_case("please reply soon!!!", SpamKind::ExclamationRun ; "ascii exclamations")]
    #[test_case("副業に興味はありませんか", SpamKind::MoneyMaking ; "side job")]
    #[test_case("簡単に儲ける方法", SpamKind::MoneyMaking ; "earn money")]
    fn test_detects_spam(input: &str, expected: SpamKind) {
        assert_eq!(detect_spam(input), Some(expected));
        assert_eq!(no_spam(input), Err(ValidationError::Spam(expected)));
    }

    #[test_case("再生医療の申請サポートについて相談したいです。" ; "ordinary inquiry")]
    #[test_case("ありがとうございます！！" ; "two exclamations")]
    #[test_case("aaaa bbbb" ; "four repeated")]
    #[test_case("見積もりをお願いできますでしょうか。" ; "quote request")]
    fn test_accepts_clean_messages(input: &str) {
        assert_eq!(detect_spam(input), None);
        assert!(no_spam(input).is_ok());
    }

    #[test]
    fn test_repeated_run_threshold() {
        assert!(!has_repeated_run("xxxx", 5));
        assert!(has_repeated_run("xxxxx", 5));
        assert!(has_repeated_run("ab11111cd", 5));
    }

    #[test]
    fn test_line_breaks_do_not_count_as_repeats() {
        assert!(!has_repeated_run("a\n\n\n\n\n\nb", 5));
        assert!(!has_repeated_run("aa\naaa", 5));
    }

    #[test]
    fn test_first_matching_class_wins() {
        assert_eq!(detect_spam("無料！！！ https://x.example"), Some(SpamKind::Url));
    }
}
