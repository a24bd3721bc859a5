#![cfg(target_arch = "wasm32")]
use instant::Instant;
use luxtree_core::{HoverTracker, OrbitCamera, Scene, SceneConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub mod audio;
mod constants;
mod dom;
mod events;
mod frame;
pub mod overlay;
mod render;

/// Everything input handlers and the frame loop share.
pub struct AppState {
    pub scene: Scene,
    pub camera: OrbitCamera,
    pub synth: audio::ToneSynthesizer,
    pub hover: HoverTracker,
    pub pointer: events::PointerState,
    pub clock: Instant,
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("luxtree-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    dom::wire_canvas_resize(&canvas);

    let mut rng = StdRng::from_entropy();
    let scene = Scene::new(&SceneConfig::default(), &mut rng)?;
    overlay::sync_mode_button(&document, scene.mode(), scene.is_started());
    overlay::hide_caption(&document);

    let state = Rc::new(RefCell::new(AppState {
        scene,
        camera: OrbitCamera::default(),
        synth: audio::ToneSynthesizer::detached(),
        hover: HoverTracker::default(),
        pointer: events::PointerState::default(),
        clock: Instant::now(),
    }));

    // Start: needs a user gesture for the AudioContext
    {
        let state = state.clone();
        let doc = document.clone();
        dom::add_click_listener(&document, overlay::START_OVERLAY_ID, move || {
            let mut st = state.borrow_mut();
            if st.scene.is_started() {
                return;
            }
            st.synth = audio::ToneSynthesizer::acquire();
            st.scene.start();
            overlay::hide_start(&doc);
            overlay::sync_mode_button(&doc, st.scene.mode(), true);
        });
    }
    {
        let state = state.clone();
        let doc = document.clone();
        dom::add_click_listener(&document, overlay::MODE_TOGGLE_ID, move || {
            events::toggle_mode(&state, &doc);
        });
    }
    events::wire_global_keydown(state.clone(), document.clone());
    events::wire_input_handlers(state.clone(), canvas.clone());

    let gpu = frame::init_gpu(&canvas).await;
    if gpu.is_none() {
        log::warn!("[gpu] running without a renderer; scene logic stays live");
    }
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        state,
        document,
        canvas,
        gpu,
        last_instant: Instant::now(),
        caption_revision: 0,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
