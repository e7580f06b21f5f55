//! Clipboard providers used by copy, cut and paste.

/// Text clipboard the engine reads from and writes to
pub trait Clipboard {
    fn get_text(&mut self) -> Option<String>;
    fn set_text(&mut self, text: &str);
}

/// Process-local clipboard, for tests and hosts without a system clipboard
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    text: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn get_text(&mut self) -> Option<String> {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = Some(text.to_string());
    }
}

/// The OS clipboard via arboard. Failures are logged and otherwise ignored.
#[cfg(feature = "system-clipboard")]
#[derive(Debug, Default)]
pub struct SystemClipboard;

#[cfg(feature = "system-clipboard")]
impl Clipboard for SystemClipboard {
    fn get_text(&mut self) -> Option<String> {
        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.get_text()) {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::debug!("Clipboard read failed: {}", e);
                None
            }
        }
    }

    fn set_text(&mut self, text: &str) {
        if let Err(e) = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text))
        {
            tracing::warn!("Clipboard write failed: {}", e);
        }
    }
}
