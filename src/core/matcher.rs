use regex::Regex;

use crate::model::course::CourseCode;
use crate::model::item::MonitoredItem;

/// `!` trigger, department, number, optional level letters and campus digit.
const MENTION_PATTERN: &str = r"![a-zA-Z]{3}[0-9]{3}[hHyY]*1?";

const SUPPRESS_WORDS: [&str; 2] = ["grade", "mark"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MentionScan {
    None,
    Single(CourseCode),
    Ambiguous(usize),
    /// Title looks like a grade discussion.
    Suppressed,
}

pub struct Matcher {
    mention: Regex,
}

impl Matcher {
    pub fn new() -> Self {
        Matcher {
            mention: Regex::new(MENTION_PATTERN).unwrap(),
        }
    }

    /// All `!`-prefixed course codes in `text`, trigger included.
    pub fn mentions<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.mention.find_iter(text).map(|m| m.as_str()).collect()
    }

    pub fn scan_text(&self, text: &str) -> MentionScan {
        match self.mentions(text).as_slice() {
            [] => MentionScan::None,
            [single] => MentionScan::Single(CourseCode::new(&single[1..])),
            many => MentionScan::Ambiguous(many.len()),
        }
    }

    /// Scans the title of a submission, or the body of a comment.
    pub fn scan(&self, item: &MonitoredItem) -> MentionScan {
        if let Some(title) = item.title.as_deref() {
            if is_grade_talk(title) {
                return MentionScan::Suppressed;
            }
            return self.scan_text(title);
        }
        match item.body.as_deref() {
            Some(body) => self.scan_text(body),
            None => MentionScan::None,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new()
    }
}

fn is_grade_talk(title: &str) -> bool {
    let lower = title.to_lowercase();
    SUPPRESS_WORDS.iter().any(|word| lower.contains(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(code: &str) -> MentionScan {
        MentionScan::Single(CourseCode::new(code))
    }

    #[test]
    fn needs_the_trigger() {
        let matcher = Matcher::new();
        assert_eq!(matcher.scan_text("I took CSC108H1 last year"), MentionScan::None);
        assert_eq!(matcher.scan_text(""), MentionScan::None);
    }

    #[test]
    fn strips_the_trigger_from_a_single_mention() {
        let matcher = Matcher::new();
        assert_eq!(matcher.scan_text("Anyone taking !CSC108H1 this fall?"), single("CSC108H1"));
        assert_eq!(matcher.scan_text("!mat137y1"), single("mat137y1"));
        assert_eq!(matcher.scan_text("thoughts on !sta247?"), single("sta247"));
        assert_eq!(matcher.scan_text("!eco101hhH"), single("eco101hhH"));
    }

    #[test]
    fn campus_digit_is_only_a_one() {
        let matcher = Matcher::new();
        assert_eq!(matcher.scan_text("!csc108h5"), single("csc108h"));
        assert_eq!(matcher.scan_text("!csc108h11"), single("csc108h1"));
    }

    #[test]
    fn rejects_short_codes() {
        let matcher = Matcher::new();
        assert_eq!(matcher.scan_text("!cs108"), MentionScan::None);
        assert_eq!(matcher.scan_text("!csc10"), MentionScan::None);
    }

    #[test]
    fn multiple_mentions_are_ambiguous() {
        let matcher = Matcher::new();
        assert_eq!(
            matcher.scan_text("!CSC108H1 or !CSC148H1?"),
            MentionScan::Ambiguous(2)
        );
        assert_eq!(
            matcher.scan_text("!csc108 !csc108 !csc108"),
            MentionScan::Ambiguous(3)
        );
    }

    #[test]
    fn grade_titles_are_suppressed() {
        let matcher = Matcher::new();
        for title in [
            "What's a good grade in !CSC108H1?",
            "GRADES for !mat137",
            "Midterm Marks",
            "remarking !csc148 and !csc165",
        ] {
            let item = MonitoredItem::submission("s", title, "someone");
            assert_eq!(matcher.scan(&item), MentionScan::Suppressed, "{title}");
        }
    }

    #[test]
    fn grade_words_in_comment_bodies_do_not_suppress() {
        let matcher = Matcher::new();
        let item = MonitoredItem::comment("c", "good grade in !csc108h1", "someone");
        assert_eq!(matcher.scan(&item), single("csc108h1"));
    }

    #[test]
    fn submissions_scan_only_the_title() {
        let matcher = Matcher::new();
        let mut item = MonitoredItem::submission("s", "course question", "someone");
        item.body = Some("!csc108h1".to_string());
        assert_eq!(matcher.scan(&item), MentionScan::None);
    }
}
