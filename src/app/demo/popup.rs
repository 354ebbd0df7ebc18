use crate::app::services::OptionsPanel;
use crate::track::{SheetRef, Track};

/// Options sheet shown as a popup over the list.
#[derive(Debug, Default)]
pub struct OptionsPopup {
    open: Option<(Track, Option<SheetRef>)>,
}

impl OptionsPopup {
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn current(&self) -> Option<(&Track, Option<&SheetRef>)> {
        self.open
            .as_ref()
            .map(|(track, sheet)| (track, sheet.as_ref()))
    }

    pub fn close(&mut self) {
        if self.open.take().is_some() {
            log::debug!("Options popup closed");
        }
    }
}

impl OptionsPanel for OptionsPopup {
    fn show_track_options(&mut self, track: &Track, sheet: Option<&SheetRef>) {
        log::debug!("Options popup opened for {}", track.row_key());
        self.open = Some((track.clone(), sheet.cloned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_and_close() {
        let mut popup = OptionsPopup::default();
        let sheet = SheetRef {
            platform: "qq".to_string(),
            id: "7".to_string(),
            title: "Daily".to_string(),
        };
        popup.show_track_options(&Track::new("qq", "1", "T", "A"), Some(&sheet));
        let (track, shown_sheet) = popup.current().unwrap();
        assert_eq!(track.id, "1");
        assert_eq!(shown_sheet.map(|s| s.title.as_str()), Some("Daily"));

        popup.close();
        assert!(!popup.is_open());
    }
}
