use storyreel_core::{AppViewModel, LikeCountView, PreviewView, RING_CIRCUMFERENCE};

const BAR_SLOTS: usize = 20;

/// Renders the view model as terminal lines.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(preview_line(&view.preview));
    if let Some(url) = &view.preview.video_url {
        lines.push(format!("video ready: {url}"));
    }
    if let Some(notice) = &view.notice {
        lines.push(format!("! {notice}"));
    }
    if !view.likes.is_empty() {
        lines.push(likes_line(&view.likes));
    }
    lines
}

fn preview_line(preview: &PreviewView) -> String {
    let marker = if preview.generating {
        "~"
    } else if preview.error {
        "x"
    } else {
        " "
    };
    format!(
        "[{bar}] {percent:>4} {marker} {status}",
        bar = ring_bar(preview.ring_offset),
        percent = preview.percent_text,
        marker = marker,
        status = preview.status_text
    )
}

/// Text stand-in for the SVG ring: filled slots grow as the stroke
/// offset shrinks.
fn ring_bar(ring_offset: f64) -> String {
    let revealed = 1.0 - (ring_offset / RING_CIRCUMFERENCE).clamp(0.0, 1.0);
    let filled = (revealed * BAR_SLOTS as f64).round() as usize;
    let mut bar = String::with_capacity(BAR_SLOTS);
    for slot in 0..BAR_SLOTS {
        bar.push(if slot < filled { '#' } else { '.' });
    }
    bar
}

fn likes_line(likes: &[LikeCountView]) -> String {
    let parts: Vec<String> = likes
        .iter()
        .map(|entry| format!("story #{}: {} likes", entry.story_id, entry.likes))
        .collect();
    parts.join(" | ")
}
