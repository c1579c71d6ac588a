//! Line classification: noise versus candidate message lines.
//!
//! A line is noise when it is too short, carries a link, or matches the
//! system/event table. Lines with a URL are dropped wholesale rather than
//! redacted. False positives are acceptable here: the goal is clean recent
//! context, not a faithful transcript.

use chrono::NaiveDateTime;

use super::datetime::DateResolver;
use super::patterns::PatternTable;

/// Why a line was classified as noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseKind {
    /// Fewer than two characters after trimming.
    TooShort,
    /// Contains something that looks like a link.
    Url,
    /// Matches the system/event table.
    System,
}

/// Outcome of classifying a line in date-aware mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// A date-section header; the cursor should move to this value.
    DateHeader(NaiveDateTime),
    /// A noise line to drop.
    Noise(NoiseKind),
    /// A line worth handing to the message-line parser.
    Candidate,
}

/// Separates noise lines from candidate message lines.
///
/// The classifier owns its pattern tables; both are plain data and can be
/// replaced per chat client.
///
/// # Example
///
/// ```
/// use talkpack::parsing::LineClassifier;
///
/// let classifier = LineClassifier::kakao();
/// assert!(classifier.is_noise("철수님이 들어왔습니다"));
/// assert!(classifier.is_noise("김철수 오후 3:15 여기 봐요 https://example.com"));
/// assert!(!classifier.is_noise("김철수 오후 3:15 점심 드셨어요?"));
/// ```
#[derive(Debug, Clone)]
pub struct LineClassifier {
    system: PatternTable,
    urls: PatternTable,
}

impl LineClassifier {
    /// Creates a classifier from explicit tables.
    pub fn new(system: PatternTable, urls: PatternTable) -> Self {
        Self { system, urls }
    }

    /// The built-in KakaoTalk tables.
    pub fn kakao() -> Self {
        Self::new(PatternTable::kakao_system(), PatternTable::urls())
    }

    /// The system/event table.
    pub fn system_patterns(&self) -> &PatternTable {
        &self.system
    }

    /// The URL table.
    pub fn url_patterns(&self) -> &PatternTable {
        &self.urls
    }

    /// Returns `true` if `text` contains anything link-shaped.
    pub fn contains_url(&self, text: &str) -> bool {
        self.urls.is_match(text)
    }

    /// Returns `true` if the line is noise.
    ///
    /// Date headers are not recognized specially here; the built-in system
    /// table already drops the common separator shapes.
    pub fn is_noise(&self, line: &str) -> bool {
        self.noise_kind(line).is_some()
    }

    /// Returns why the line is noise, or `None` for a candidate line.
    pub fn noise_kind(&self, line: &str) -> Option<NoiseKind> {
        let line = line.trim();

        if line.chars().count() < 2 {
            return Some(NoiseKind::TooShort);
        }
        if self.contains_url(line) {
            return Some(NoiseKind::Url);
        }
        if self.system.is_match(line) {
            return Some(NoiseKind::System);
        }

        None
    }

    /// Source of the first table pattern that matches `line`, URL table first.
    pub fn matching_pattern(&self, line: &str) -> Option<&str> {
        let line = line.trim();
        self.urls
            .first_match(line)
            .or_else(|| self.system.first_match(line))
    }

    /// Classifies a line, recognizing date headers first.
    pub fn classify(&self, line: &str, dates: &DateResolver) -> LineKind {
        if let Some(at) = dates.parse_date_header(line) {
            return LineKind::DateHeader(at);
        }

        match self.noise_kind(line) {
            Some(kind) => LineKind::Noise(kind),
            None => LineKind::Candidate,
        }
    }

    /// Date-aware noise check: date headers count as noise too.
    pub fn is_noise_with_dates(&self, line: &str, dates: &DateResolver) -> bool {
        !matches!(self.classify(line, dates), LineKind::Candidate)
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::kakao()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn resolver() -> DateResolver {
        DateResolver::new(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap())
    }

    #[test]
    fn test_short_lines_are_noise() {
        let c = LineClassifier::kakao();
        assert_eq!(c.noise_kind(""), Some(NoiseKind::TooShort));
        assert_eq!(c.noise_kind("   "), Some(NoiseKind::TooShort));
        assert_eq!(c.noise_kind(" ㅋ "), Some(NoiseKind::TooShort));
        assert_eq!(c.noise_kind("ㅋㅋ"), None);
    }

    #[test]
    fn test_url_lines_are_noise() {
        let c = LineClassifier::kakao();
        assert_eq!(
            c.noise_kind("박민수 오후 3:15 이 링크 https://example.com"),
            Some(NoiseKind::Url)
        );
        assert_eq!(c.noise_kind("open.kakao.com/o/gAbC"), Some(NoiseKind::Url));
        assert_eq!(c.noise_kind("www.daum.net 가보세요"), Some(NoiseKind::Url));
    }

    #[test]
    fn test_system_lines_are_noise() {
        let c = LineClassifier::kakao();
        for line in [
            "철수님이 들어왔습니다",
            "읽음 3",
            "2024년 6월 1일",
            "사진을 저장했습니다",
            "영희님이 관리자로 지정되었습니다",
            "42",
        ] {
            assert_eq!(c.noise_kind(line), Some(NoiseKind::System), "{line}");
        }
    }

    #[test]
    fn test_candidate_lines() {
        let c = LineClassifier::kakao();
        assert!(!c.is_noise("김철수 오전 9:30 좋은 아침이에요!"));
        assert!(!c.is_noise("이영희: 네 좋아요"));
        assert!(!c.is_noise("ㅋㅋㅋㅋㅋㅋㅋ"));
    }

    #[test]
    fn test_classify_prefers_date_headers() {
        let c = LineClassifier::kakao();
        let r = resolver();
        let yesterday = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        assert_eq!(c.classify("어제", &r), LineKind::DateHeader(yesterday));
        assert_eq!(
            c.classify("철수님이 나갔습니다", &r),
            LineKind::Noise(NoiseKind::System)
        );
        assert_eq!(c.classify("김철수 오후 1:00 안녕하세요", &r), LineKind::Candidate);
        assert!(c.is_noise_with_dates("2024년1월15일", &r));
    }

    #[test]
    fn test_matching_pattern() {
        let c = LineClassifier::kakao();
        assert_eq!(c.matching_pattern("읽음 3"), Some(r"읽음\s*\d*"));
        assert_eq!(c.matching_pattern("see https://a.io"), Some(r"https?://\S+"));
        assert_eq!(c.matching_pattern("그냥 대화입니다"), None);
    }

    #[test]
    fn test_custom_tables() {
        let system = PatternTable::new([r"^\[bot\]"]).unwrap();
        let c = LineClassifier::new(system, PatternTable::empty());
        assert!(c.is_noise("[BOT] daily digest"));
        assert!(!c.is_noise("http://example.com is fine here"));
        assert!(!c.is_noise("철수님이 들어왔습니다"));
    }
}
