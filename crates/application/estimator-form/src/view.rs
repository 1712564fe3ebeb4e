//! Result and error regions

/// A page region that can be shown or hidden. Hiding keeps the last text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Region {
    visible: bool,
    text: String,
}

impl Region {
    pub fn show(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text when visible
    pub fn shown(&self) -> Option<&str> {
        self.visible.then_some(self.text.as_str())
    }
}

/// The predicted-price result region and the error region shared by both handlers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageView {
    pub result: Region,
    pub error: Region,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_show_hide() {
        let mut region = Region::default();
        assert_eq!(region.shown(), None);

        region.show("Precio estimado: 1 $");
        assert_eq!(region.shown(), Some("Precio estimado: 1 $"));

        region.hide();
        assert!(!region.is_visible());
        assert_eq!(region.text(), "Precio estimado: 1 $");
    }
}
