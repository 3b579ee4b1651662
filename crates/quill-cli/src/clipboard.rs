use anyhow::Result;

pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<()>;
}

/// The desktop clipboard, opened per copy
#[derive(Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.set_text(text.to_owned())?;
        Ok(())
    }
}

/// Copy `text`, logging instead of failing. Returns whether it worked.
pub fn copy_or_log(clipboard: &mut dyn Clipboard, text: &str) -> bool {
    match clipboard.copy(text) {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(error = %e, "failed to copy to clipboard");
            false
        }
    }
}
