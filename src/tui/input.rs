use crate::model::Commit;

pub fn copy_to_clipboard(text: &str) -> Result<(), arboard::Error> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text.to_string())
}

/// Newline-separated ids of the brushed commits.
pub fn selection_clipboard_text(selected: &[&Commit]) -> String {
    selected
        .iter()
        .map(|c| c.id.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
