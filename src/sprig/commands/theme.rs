use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::prefs::{load_theme, save_theme};
use crate::store::StorageBackend;
use crate::themes::ThemeId;

pub fn show<B: StorageBackend>(backend: &B) -> Result<CmdResult> {
    Ok(CmdResult::default().with_theme(load_theme(backend)?))
}

pub fn set<B: StorageBackend>(backend: &B, theme: ThemeId) -> Result<CmdResult> {
    save_theme(backend, theme)?;
    let mut result = CmdResult::default().with_theme(theme);
    result.add_message(CmdMessage::success(format!(
        "Theme set to {}",
        theme.display_name()
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn defaults_to_green_then_persists_choice() {
        let backend = MemBackend::new();
        assert_eq!(show(&backend).unwrap().theme, Some(ThemeId::Green));

        set(&backend, ThemeId::Blue).unwrap();
        assert_eq!(show(&backend).unwrap().theme, Some(ThemeId::Blue));
    }
}
