// crates/livewall-ui/src/helpers/format.rs
//
// Display-only string fitting. Seconds formatting lives in
// livewall_core::helpers::time; this is purely about pixel budgets.

/// 11px proportional text averages about 6.5 px per character.
const AVG_CHAR_PX: f32 = 6.5;
const ELLIPSIS: char = '…';

fn budget(max_px: f32) -> usize {
    (max_px / AVG_CHAR_PX).max(0.0) as usize
}

/// Truncates `text` from the end to fit `max_px`, appending "…".
/// Avoids egui font measurement, which needs `&mut Fonts`.
pub fn fit_label(text: &str, max_px: f32) -> String {
    let max_chars = budget(max_px);
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max_chars - 1).collect();
    out.push(ELLIPSIS);
    out
}

/// Like `fit_label` but keeps the tail, where the interesting part of a
/// filesystem path is.
pub fn fit_path(path: &str, max_px: f32) -> String {
    let max_chars = budget(max_px);
    let count = path.chars().count();
    if count <= max_chars {
        return path.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let keep = max_chars - 1;
    std::iter::once(ELLIPSIS)
        .chain(path.chars().skip(count - keep))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_unchanged() {
        assert_eq!(fit_label("clip.mp4", 200.0), "clip.mp4");
        assert_eq!(fit_path("/a/b", 200.0), "/a/b");
    }

    #[test]
    fn zero_budget_returns_empty() {
        assert_eq!(fit_label("hello", 0.0), "");
        assert_eq!(fit_path("/hello", 0.0), "");
    }

    #[test]
    fn label_keeps_head() {
        // 32px → 4 chars: 3 kept + ellipsis.
        assert_eq!(fit_label("wallpaper.mp4", 32.0), "wal…");
    }

    #[test]
    fn path_keeps_tail() {
        let p = "/home/me/.config/com.operasoftware.Opera/themes";
        let fitted = fit_path(p, 65.0);
        assert_eq!(fitted.chars().count(), 10);
        assert!(fitted.starts_with('…'));
        assert!(fitted.ends_with("/themes"));
    }

    #[test]
    fn multibyte_is_counted_by_char() {
        assert_eq!(fit_label("ééééé", 20.0), "éé…");
    }
}
