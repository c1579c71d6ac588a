//! Pattern tables for noise and URL detection.
//!
//! A [`PatternTable`] is an ordered list of regex sources compiled once into a
//! case-insensitive [`RegexSet`]. Matching is substring search (`is_match`),
//! never full-line equality, unless a pattern anchors itself.
//!
//! The default tables target the KakaoTalk desktop client. They are plain
//! data: swap or extend them for another client without touching the
//! classifier.
//!
//! ```
//! use talkpack::parsing::PatternTable;
//!
//! # fn main() -> talkpack::Result<()> {
//! let noise = PatternTable::kakao_system().with_pattern(r"봇이 응답했습니다")?;
//! assert!(noise.is_match("철수님이 들어왔습니다"));
//! assert!(noise.is_match("봇이 응답했습니다"));
//! assert!(!noise.is_match("점심 뭐 먹을까요"));
//! # Ok(())
//! # }
//! ```

use std::sync::LazyLock;

use regex::{RegexSet, RegexSetBuilder};

use crate::error::{Result, TalkpackError};

/// System and event phrases emitted by KakaoTalk, in match priority order.
pub const KAKAO_SYSTEM_PATTERNS: &[&str] = &[
    // join / leave
    r".+님이 들어왔습니다",
    r".+님이 나갔습니다",
    r"읽음\s*\d*",
    r"^\d+$",
    r"^$",
    r"카카오톡",
    r"채팅방",
    r"^\s*$",
    // invites and roles
    r".+님을 초대했습니다",
    r".+님이 초대되었습니다",
    r".+님을 내보냈습니다",
    r".+님이 방장으로 변경되었습니다",
    r".+님이 관리자로 지정되었습니다",
    r".+님의 관리자 권한이 해제되었습니다",
    // media saved
    r"사진을 저장했습니다",
    r"동영상을 저장했습니다",
    r"파일을 저장했습니다",
    r"음성메시지",
    r"음성 메시지",
    // stickers, payments, shares
    r"이모티콘",
    r"스티커",
    r"선물하기",
    r"송금하기",
    r"돈 보내기",
    r"위치 공유",
    r"연락처 공유",
    r"일정 공유",
    // notices and polls
    r"투표",
    r"공지사항",
    r"공지가 등록되었습니다",
    // moderation and deletion
    r"삭제된 메시지입니다",
    r"차단된 메시지입니다",
    r"신고된 메시지입니다",
    r"메시지가 삭제되었습니다",
    r"이 메시지는 삭제되었습니다",
    // room settings
    r"채팅방 이름이 변경되었습니다",
    r"채팅방 프로필이 변경되었습니다",
    r"채팅방 배경이 변경되었습니다",
    r"새로운 멤버가 추가되었습니다",
    r"멤버가 나갔습니다",
    // calls
    r"보이스톡",
    r"페이스톡",
    r"화상통화",
    r"통화 시작",
    r"통화 종료",
    r"통화 연결",
    // notifications, favourites, saved items
    r"알림 설정",
    r"알림 해제",
    r"즐겨찾기 추가",
    r"즐겨찾기 해제",
    r"대화 내용을 저장했습니다",
    r"대화 내용이 저장되었습니다",
    r"메모가 저장되었습니다",
    r"캘린더에 추가되었습니다",
    r"일정이 생성되었습니다",
    r"리마인더가 설정되었습니다",
    r"프로필이 업데이트되었습니다",
    r"상태메시지가 변경되었습니다",
    r"생일 알림",
    r"친구 추가",
    r"친구 삭제",
    r"차단 해제",
    r"숨김 해제",
    r"대화방 잠금",
    r"대화방 잠금 해제",
    // date separators
    r"^\d{4}년\s+\d{1,2}월\s+\d{1,2}일",
    r"^\d{1,2}월\s+\d{1,2}일",
    r"오늘",
    r"어제",
    r"그저께",
    // service notices
    r"새로운 기능",
    r"업데이트",
    r"버전",
    r"점검",
    r"서비스",
    r"서버",
    r"네트워크",
    r"연결",
    r"동기화",
    // advertising
    r"광고",
    r"홍보",
    r"이벤트 참여",
    r"쿠폰",
    r"할인",
    r"무료 체험",
    r"당첨",
    r"추첨",
];

/// Link shapes: full URLs, bare domains, shorteners and chat-platform links.
pub const URL_PATTERNS: &[&str] = &[
    r"https?://\S+",
    r"www\.\S+",
    r"[a-zA-Z0-9][\w.-]*\.[a-zA-Z]{2,}(?:/\S*)?",
    r"bit\.ly/\S+",
    r"tinyurl\.com/\S+",
    r"goo\.gl/\S+",
    r"t\.co/\S+",
    r"youtu\.be/\S+",
    r"youtube\.com/\S+",
    r"naver\.me/\S+",
    r"open\.kakao\.com/\S+",
    r"talk\.kakao\.com/\S+",
    r"pf\.kakao\.com/\S+",
];

static KAKAO_SYSTEM_TABLE: LazyLock<PatternTable> = LazyLock::new(|| {
    PatternTable::new(KAKAO_SYSTEM_PATTERNS.iter().copied())
        .expect("built-in system patterns are valid")
});

static URL_TABLE: LazyLock<PatternTable> = LazyLock::new(|| {
    PatternTable::new(URL_PATTERNS.iter().copied()).expect("built-in URL patterns are valid")
});

/// An ordered, case-insensitive table of regex patterns.
///
/// The compiled set is shared between clones.
#[derive(Debug, Clone)]
pub struct PatternTable {
    sources: Vec<String>,
    set: RegexSet,
}

impl PatternTable {
    /// Compiles a table from pattern sources, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns [`TalkpackError::InvalidPattern`] naming the first pattern
    /// that does not compile.
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sources: Vec<String> = patterns
            .into_iter()
            .map(|p| p.as_ref().to_string())
            .collect();

        let set = RegexSetBuilder::new(&sources)
            .case_insensitive(true)
            .build()
            .map_err(|e| {
                let culprit = sources
                    .iter()
                    .find(|p| regex::Regex::new(p).is_err())
                    .cloned()
                    .unwrap_or_default();
                TalkpackError::invalid_pattern(culprit, e)
            })?;

        Ok(Self { sources, set })
    }

    /// The built-in KakaoTalk system/event table.
    pub fn kakao_system() -> Self {
        KAKAO_SYSTEM_TABLE.clone()
    }

    /// The built-in URL table.
    pub fn urls() -> Self {
        URL_TABLE.clone()
    }

    /// An empty table that matches nothing.
    pub fn empty() -> Self {
        Self {
            sources: Vec::new(),
            set: RegexSet::empty(),
        }
    }

    /// Returns a new table with `pattern` appended at lowest priority.
    pub fn with_pattern(self, pattern: impl AsRef<str>) -> Result<Self> {
        let mut sources = self.sources;
        sources.push(pattern.as_ref().to_string());
        Self::new(sources)
    }

    /// Returns `true` if any pattern matches anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.set.is_match(text)
    }

    /// Returns the highest-priority pattern matching `text`.
    pub fn first_match(&self, text: &str) -> Option<&str> {
        self.set
            .matches(text)
            .iter()
            .next()
            .map(|i| self.sources[i].as_str())
    }

    /// The pattern sources, in priority order.
    pub fn patterns(&self) -> &[String] {
        &self.sources
    }

    /// Number of patterns in the table.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Returns `true` if the table has no patterns.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Default for PatternTable {
    fn default() -> Self {
        Self::empty()
    }
}
