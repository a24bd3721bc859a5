//! DOM side of the interface: start overlay, mode button and caption panel.
//!
//! Every function is a silent no-op when its element is missing.

use luxtree_core::{Caption, SceneMode};
use web_sys as web;

pub const START_OVERLAY_ID: &str = "start-overlay";
pub const MODE_TOGGLE_ID: &str = "mode-toggle";
pub const CAPTION_ID: &str = "caption";
pub const CAPTION_TEXT_ID: &str = "caption-text";
pub const CAPTION_AUTHOR_ID: &str = "caption-author";

#[inline]
pub fn hide_start(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(START_OVERLAY_ID) {
        let _ = el.set_attribute("style", "display:none");
    }
}

/// The mode button names the mode it would switch to. Hidden until start.
pub fn sync_mode_button(document: &web::Document, mode: SceneMode, started: bool) {
    if let Some(el) = document.get_element_by_id(MODE_TOGGLE_ID) {
        el.set_text_content(Some(mode.toggle_label()));
        let style = if started { "" } else { "display:none" };
        let _ = el.set_attribute("style", style);
    }
}

pub fn show_caption(document: &web::Document, caption: &Caption) {
    if let Some(el) = document.get_element_by_id(CAPTION_TEXT_ID) {
        el.set_text_content(Some(caption.text));
    }
    if let Some(el) = document.get_element_by_id(CAPTION_AUTHOR_ID) {
        el.set_text_content(Some(caption.author));
    }
    if let Some(el) = document.get_element_by_id(CAPTION_ID) {
        let _ = el.class_list().add_1("visible");
    }
}

pub fn hide_caption(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(CAPTION_ID) {
        let _ = el.class_list().remove_1("visible");
    }
}

#[inline]
pub fn sync_caption(document: &web::Document, caption: Option<&Caption>) {
    match caption {
        Some(c) => show_caption(document, c),
        None => hide_caption(document),
    }
}
