//! Browser entry point (wasm32)
//!
//! The page's requestAnimationFrame callback calls `frame()` once per
//! refresh and draws the returned snapshot JSON.

use wasm_bindgen::prelude::*;

use crate::game::Game;
use crate::persistence::web::LocalStorageStore;
use crate::platform::{InputLatch, Key};
use crate::settings::Settings;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game<LocalStorageStore>,
    latch: InputLatch,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u64>) -> WebGame {
        let seed = seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        log::info!("Dino Dash starting with seed {}", seed);
        let settings = Settings::load();
        WebGame {
            game: Game::new(seed, LocalStorageStore::new()).with_settings(&settings),
            latch: InputLatch::new(),
        }
    }

    pub fn jump(&mut self) {
        self.game.jump();
    }

    pub fn begin_or_restart(&mut self) {
        self.game.begin_or_restart();
    }

    /// Feed a `KeyboardEvent.code`. Returns true if the key is bound, so the
    /// page can call `preventDefault`.
    pub fn key_down(&mut self, code: &str) -> bool {
        match Key::from_code(code) {
            Some(key) => {
                self.latch.key_down(key, self.game.phase());
                true
            }
            None => false,
        }
    }

    pub fn key_up(&mut self, code: &str) {
        if let Some(key) = Key::from_code(code) {
            self.latch.key_up(key);
        }
    }

    pub fn tap(&mut self) {
        self.latch.tap(self.game.phase());
    }

    /// Tab hidden or window blurred
    pub fn pause(&mut self) {
        self.latch.release_all();
        self.latch.take();
        self.game.pause();
    }

    pub fn resume(&mut self) {
        self.game.resume();
    }

    pub fn is_running(&self) -> bool {
        self.game.is_running()
    }

    /// Advance one tick and return the snapshot as JSON
    pub fn frame(&mut self) -> Result<String, JsValue> {
        self.game.queue(self.latch.take());
        self.game.frame();
        serde_json::to_string(&self.game.snapshot()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
