use std::path::Path;

use super::{EditorApp, settings};

impl EditorApp {
    pub(super) fn save_to_path(&mut self) {
        let path = self.settings.file_path.clone();
        match self.editor.save(Path::new(&path)) {
            Ok(()) => self.status = Some(format!("Saved {path}")),
            Err(e) => {
                log::warn!("save to {path} failed: {e}");
                self.status = Some(format!("Save failed: {e}"));
            }
        }
    }

    pub(super) fn save_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name(&self.settings.file_path)
            .add_filter("Drawing", &["txt"])
            .save_file()
        {
            self.settings.file_path = path.display().to_string();
            self.persist_settings();
            self.save_to_path();
        }
    }

    pub(super) fn open_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Drawing", &["txt"])
            .pick_file()
        {
            let path_str = path.display().to_string();
            match self.editor.load(&path) {
                Ok(()) => {
                    self.settings.file_path = path_str.clone();
                    self.persist_settings();
                    self.status = Some(format!(
                        "Loaded {} object(s) from {path_str}",
                        self.editor.document().len()
                    ));
                }
                Err(e) => {
                    log::warn!("load from {path_str} failed: {e}");
                    self.status = Some(format!("Load failed: {e}"));
                }
            }
        }
    }

    pub(super) fn export_svg_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name(&self.settings.svg_path)
            .add_filter("SVG", &["svg"])
            .save_file()
        {
            let path_str = path.display().to_string();
            let (w, h) = (self.settings.svg_width, self.settings.svg_height);
            match self.editor.export_svg_to(&path, w, h) {
                Ok(()) => {
                    self.settings.svg_path = path_str.clone();
                    self.persist_settings();
                    self.status = Some(format!("Exported {path_str}"));
                }
                Err(e) => {
                    log::warn!("SVG export to {path_str} failed: {e}");
                    self.status = Some(format!("SVG export failed: {e}"));
                }
            }
        }
    }

    fn persist_settings(&mut self) {
        if let Err(e) = settings::save_settings(&self.settings_path, &self.settings) {
            log::warn!("writing {} failed: {e}", self.settings_path);
            self.status = Some(format!("Settings save failed: {e}"));
        }
    }
}
