//! # 줄 단위 unified diff 엔진
//!
//! 두 텍스트를 줄 단위로 비교하여 unified diff 형식의 줄 목록을 만듭니다.
//! 편집 스크립트는 `similar`의 Myers 구현으로 계산하고,
//! hunk 묶음은 `similar::group_diff_ops`(difflib과 같은 규칙)로 나눕니다.
//!
//! 출력 예 (context = 0):
//! ```text
//! --- version 1
//! +++ version 2
//! @@ -1 +1 @@
//! -a b c
//! +a b c d
//! ```
//!
//! 각 줄은 `DiffLine`으로 종류 태그와 함께 반환됩니다.
//! 원본 텍스트 목록이 필요하면 같은 결과에서 `text`만 꺼내 쓰면 되므로,
//! 두 표현이 서로 달라질 일이 없습니다.
//!
//! 줄 구분은 `split_lines`를 따릅니다 (`\r` 단독 줄바꿈 포함).
//!
//! 이동(move)을 따로 인식하지 않습니다. 순서만 바뀐 줄은 삭제 1 + 추가 1로 셉니다.

use serde::Serialize;
use similar::{Algorithm, DiffOp, DiffTag};
use std::ops::Range;

use crate::models::ChangesSummary;

/// diff 한 줄의 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffLineKind {
    /// `--- from` / `+++ to` 파일 헤더
    FileHeader,
    /// `@@ -a,b +c,d @@`
    HunkHeader,
    Addition,
    Deletion,
    Context,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffLine {
    pub kind: DiffLineKind,
    pub text: String,
}

impl DiffLine {
    fn new(kind: DiffLineKind, text: String) -> Self {
        Self { kind, text }
    }
}

/// `old`에서 `new`로의 unified diff를 계산합니다.
///
/// - `from_label` / `to_label`: 파일 헤더(`---`/`+++`)에 붙는 이름
/// - `context`: 변경된 줄 앞뒤로 남길 문맥 줄 수 (0이면 변경 hunk만)
///
/// 두 텍스트가 줄 단위로 같으면 빈 목록을 반환합니다 (헤더도 없음).
pub fn unified_diff(
    old: &str,
    new: &str,
    from_label: &str,
    to_label: &str,
    context: usize,
) -> Vec<DiffLine> {
    let old_lines = split_lines(old);
    let new_lines = split_lines(new);

    let ops = similar::capture_diff_slices(Algorithm::Myers, &old_lines, &new_lines);
    let groups = similar::group_diff_ops(ops, context);
    if groups.is_empty() {
        return Vec::new();
    }

    let mut lines = vec![
        DiffLine::new(DiffLineKind::FileHeader, format!("--- {}", from_label)),
        DiffLine::new(DiffLineKind::FileHeader, format!("+++ {}", to_label)),
    ];

    for group in &groups {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };
        lines.push(DiffLine::new(
            DiffLineKind::HunkHeader,
            hunk_header(first, last),
        ));

        for op in group {
            let (tag, old_range, new_range) = op.as_tag_tuple();
            match tag {
                DiffTag::Equal => {
                    push_lines(&mut lines, DiffLineKind::Context, ' ', &old_lines, old_range)
                }
                DiffTag::Delete => {
                    push_lines(&mut lines, DiffLineKind::Deletion, '-', &old_lines, old_range)
                }
                DiffTag::Insert => {
                    push_lines(&mut lines, DiffLineKind::Addition, '+', &new_lines, new_range)
                }
                DiffTag::Replace => {
                    push_lines(&mut lines, DiffLineKind::Deletion, '-', &old_lines, old_range);
                    push_lines(&mut lines, DiffLineKind::Addition, '+', &new_lines, new_range);
                }
            }
        }
    }

    lines
}

/// 문맥 없는(context = 0) diff에서 추가/삭제된 줄 수를 셉니다.
pub fn line_changes(old: &str, new: &str) -> ChangesSummary {
    count_changes(&unified_diff(old, new, "", "", 0))
}

/// diff 결과에서 추가/삭제 줄 수를 셉니다. 파일 헤더는 세지 않습니다.
pub fn count_changes(lines: &[DiffLine]) -> ChangesSummary {
    lines
        .iter()
        .fold(ChangesSummary::default(), |mut acc, line| {
            match line.kind {
                DiffLineKind::Addition => acc.added_lines += 1,
                DiffLineKind::Deletion => acc.removed_lines += 1,
                _ => {}
            }
            acc
        })
}

/// 텍스트를 줄로 나눕니다. 줄 끝 문자는 결과에 포함되지 않습니다.
///
/// `\n`, `\r\n` 외에 단독 `\r`(옛 Mac 줄바꿈)과 유니코드 줄 구분자도 줄 끝으로 봅니다.
/// 마지막 줄 끝 뒤에는 빈 줄을 만들지 않습니다.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines()
        .flat_map(|line| {
            let mut parts: Vec<&str> = line.split(is_line_break).collect();
            if parts.len() > 1 && parts.last() == Some(&"") {
                parts.pop();
            }
            parts
        })
        .collect()
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

fn push_lines(
    out: &mut Vec<DiffLine>,
    kind: DiffLineKind,
    marker: char,
    source: &[&str],
    range: Range<usize>,
) {
    out.extend(
        source[range]
            .iter()
            .map(|line| DiffLine::new(kind, format!("{}{}", marker, line))),
    );
}

fn hunk_header(first: &DiffOp, last: &DiffOp) -> String {
    format!(
        "@@ -{} +{} @@",
        format_range(first.old_range().start, last.old_range().end),
        format_range(first.new_range().start, last.new_range().end),
    )
}

/// hunk 범위 표기: 길이가 1이면 시작 줄만, 0이면 직전 줄 번호와 `,0`.
fn format_range(start: usize, end: usize) -> String {
    let len = end.saturating_sub(start);
    match len {
        1 => format!("{}", start + 1),
        0 => format!("{},0", start),
        _ => format!("{},{}", start + 1, len),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(lines: &[DiffLine]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn identical_texts_produce_no_diff() {
        assert!(unified_diff("a\nb", "a\nb", "x", "y", 0).is_empty());
        assert!(unified_diff("", "", "x", "y", 3).is_empty());
    }

    #[test]
    fn single_line_edit_is_one_removal_and_one_addition() {
        let lines = unified_diff("a b c", "a b c d", "version 1", "version 2", 0);
        assert_eq!(
            texts(&lines),
            vec!["--- version 1", "+++ version 2", "@@ -1 +1 @@", "-a b c", "+a b c d"]
        );
        assert_eq!(
            lines.iter().map(|l| l.kind).collect::<Vec<_>>(),
            vec![
                DiffLineKind::FileHeader,
                DiffLineKind::FileHeader,
                DiffLineKind::HunkHeader,
                DiffLineKind::Deletion,
                DiffLineKind::Addition,
            ]
        );
    }

    #[test]
    fn appended_line_uses_zero_length_old_range() {
        let lines = unified_diff("a\nb", "a\nb\nc", "old", "new", 0);
        assert_eq!(texts(&lines), vec!["--- old", "+++ new", "@@ -2,0 +3 @@", "+c"]);
    }

    #[test]
    fn separated_changes_form_separate_hunks_without_context() {
        let lines = unified_diff("a\nb\nc", "x\nb\ny", "old", "new", 0);
        assert_eq!(
            texts(&lines),
            vec![
                "--- old",
                "+++ new",
                "@@ -1 +1 @@",
                "-a",
                "+x",
                "@@ -3 +3 @@",
                "-c",
                "+y",
            ]
        );
    }

    #[test]
    fn context_window_keeps_surrounding_lines() {
        let lines = unified_diff("a\nb\nc", "a\nB\nc", "old", "new", 1);
        assert_eq!(
            texts(&lines),
            vec!["--- old", "+++ new", "@@ -1,3 +1,3 @@", " a", "-b", "+B", " c"]
        );
        assert_eq!(lines[3].kind, DiffLineKind::Context);
    }

    #[test]
    fn empty_old_text_is_all_additions() {
        let lines = unified_diff("", "one\ntwo", "old", "new", 0);
        assert_eq!(
            texts(&lines),
            vec!["--- old", "+++ new", "@@ -0,0 +1,2 @@", "+one", "+two"]
        );
    }

    #[test]
    fn reordered_lines_count_as_removal_and_addition() {
        let summary = line_changes("a\nb", "b\na");
        assert_eq!(summary.added_lines, 1);
        assert_eq!(summary.removed_lines, 1);
    }

    #[test]
    fn file_headers_are_not_counted_as_changes() {
        // 본문 줄이 '++'로 시작해도 추가 줄로 셉니다
        let summary = line_changes("x", "x\n++y");
        assert_eq!(
            summary,
            ChangesSummary {
                added_lines: 1,
                removed_lines: 0
            }
        );
    }

    #[test]
    fn reversed_diff_swaps_counts() {
        let a = "intro\nbody one\nbody two\noutro";
        let b = "intro\nbody 1\nextra\noutro\nappendix";
        let forward = line_changes(a, b);
        let backward = line_changes(b, a);
        assert_eq!(forward.added_lines, backward.removed_lines);
        assert_eq!(forward.removed_lines, backward.added_lines);
    }

    #[test]
    fn crlf_line_endings_compare_equal_to_lf() {
        assert!(unified_diff("a\r\nb\r\n", "a\nb\n", "old", "new", 0).is_empty());
    }

    #[test]
    fn lone_carriage_returns_split_lines() {
        assert_eq!(split_lines("a\rb\r\rc\r"), vec!["a", "b", "", "c"]);
        assert_eq!(split_lines("one\n\ntwo"), vec!["one", "", "two"]);
        assert_eq!(split_lines("\r"), vec![""]);
        assert!(split_lines("").is_empty());
        assert_eq!(split_lines("x\u{2028}y"), vec!["x", "y"]);

        // 옛 Mac 줄바꿈 문서도 바뀐 줄만 셉니다
        let summary = line_changes("a\rb\rc", "a\rB\rc");
        assert_eq!(
            summary,
            ChangesSummary {
                added_lines: 1,
                removed_lines: 1
            }
        );
        assert!(unified_diff("a\rb", "a\nb", "old", "new", 0).is_empty());
    }
}
