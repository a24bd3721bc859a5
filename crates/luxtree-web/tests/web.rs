// Browser tests for the DOM overlay and the audio fallback path.
#![cfg(target_arch = "wasm32")]

use luxtree_core::{caption_for_index, SceneMode, ToneSink};
use luxtree_web::audio::ToneSynthesizer;
use luxtree_web::overlay;
use wasm_bindgen_test::*;
use web_sys as web;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web::Document {
    web::window().unwrap().document().unwrap()
}

fn mount(doc: &web::Document, id: &str) -> web::Element {
    let el = doc.create_element("div").unwrap();
    el.set_id(id);
    doc.body().unwrap().append_child(&el).unwrap();
    el
}

#[wasm_bindgen_test]
fn detached_synth_is_a_silent_sink() {
    let mut synth = ToneSynthesizer::detached();
    assert!(!synth.is_active());
    synth.play_feedback(1.2);
    synth.play_confirmation();
    synth.release();
    assert!(!synth.is_active());
}

#[wasm_bindgen_test]
fn overlay_calls_without_elements_do_nothing() {
    let doc = document();
    overlay::hide_start(&doc);
    overlay::sync_mode_button(&doc, SceneMode::Scattered, true);
    overlay::sync_caption(&doc, Some(&caption_for_index(0)));
    overlay::sync_caption(&doc, None);
    assert!(doc.get_element_by_id(overlay::START_OVERLAY_ID).is_none());
}

#[wasm_bindgen_test]
fn mode_button_names_the_next_mode_and_hides_before_start() {
    let doc = document();
    let button = mount(&doc, overlay::MODE_TOGGLE_ID);

    overlay::sync_mode_button(&doc, SceneMode::Scattered, false);
    assert_eq!(button.text_content().as_deref(), Some("ASSEMBLE"));
    assert_eq!(button.get_attribute("style").as_deref(), Some("display:none"));

    overlay::sync_mode_button(&doc, SceneMode::Assembled, true);
    assert_eq!(button.text_content().as_deref(), Some("DISPERSE"));
    assert_eq!(button.get_attribute("style").as_deref(), Some(""));

    button.remove();
}

#[wasm_bindgen_test]
fn caption_panel_shows_and_hides() {
    let doc = document();
    let panel = mount(&doc, overlay::CAPTION_ID);
    let text = mount(&doc, overlay::CAPTION_TEXT_ID);
    let author = mount(&doc, overlay::CAPTION_AUTHOR_ID);
    let caption = caption_for_index(3);

    overlay::sync_caption(&doc, Some(&caption));
    assert!(panel.class_list().contains("visible"));
    assert_eq!(text.text_content().as_deref(), Some(caption.text));
    assert_eq!(author.text_content().as_deref(), Some(caption.author));

    overlay::sync_caption(&doc, None);
    assert!(!panel.class_list().contains("visible"));

    for el in [panel, text, author] {
        el.remove();
    }
}

#[wasm_bindgen_test]
fn hide_start_collapses_the_overlay() {
    let doc = document();
    let start = mount(&doc, overlay::START_OVERLAY_ID);
    assert_eq!(start.get_attribute("style"), None);
    overlay::hide_start(&doc);
    assert_eq!(start.get_attribute("style").as_deref(), Some("display:none"));
    start.remove();
}

#[wasm_bindgen_test]
fn acquired_synth_plays_and_releases() {
    // without a user gesture the context starts suspended, so play resumes first
    let mut synth = ToneSynthesizer::acquire();
    let active = synth.is_active();
    synth.play_feedback(0.8);
    synth.play_confirmation();
    assert_eq!(synth.is_active(), active);
    synth.release();
    assert!(!synth.is_active());
}
