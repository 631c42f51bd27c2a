//! `#[wasm_bindgen]` surface used by the panel's page scripts.
//!
//! ```js
//! const helpers = new Helpers({ api: { prefix: "/api" } });
//! helpers.setThemeMode();
//! helpers.api("/deliveries/pause", { code }, (resp) => render(resp));
//! await helpers.fadeOut(spinner);
//! ```
//!
//! ERROR HANDLING
//! ==============
//! `api` keeps the fire-and-forget contract (its promise never rejects);
//! `request` rejects with the error text. Exceptions thrown by page callbacks
//! are logged and never propagate back into Rust.

use std::rc::Rc;

use js_sys::{Function, Promise};
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::HtmlElement;

use crate::config::HelpersConfig;
use crate::logging;
use crate::net::api::{ApiClient, SuccessHandler};
use crate::net::form::Payload;
use crate::net::transport::BrowserTransport;
use crate::util::fade::{self, BrowserTimer, FadeConfig, FadeQueue};
use crate::util::theme::{BrowserDocument, ThemeConfig, apply_preferred_theme};

#[wasm_bindgen(start)]
pub fn start() {
    logging::init(log::Level::Info);
}

#[wasm_bindgen]
pub struct Helpers {
    api: Rc<ApiClient<BrowserTransport>>,
    theme: ThemeConfig,
    fade: Rc<FadeConfig>,
    fades: Rc<FadeQueue<HtmlElement>>,
}

#[wasm_bindgen]
impl Helpers {
    /// Build helpers from a config object; `undefined` selects all defaults.
    ///
    /// # Errors
    ///
    /// Throws if the config has the wrong shape or fails validation.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<Helpers, JsError> {
        let config: HelpersConfig = if config.is_undefined() || config.is_null() {
            HelpersConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        config.validate()?;
        logging::init(config.log_level);
        Ok(Self {
            api: Rc::new(ApiClient::new(config.api, BrowserTransport)),
            theme: config.theme,
            fade: Rc::new(config.fade),
            fades: Rc::new(FadeQueue::new()),
        })
    }

    /// POST `data` to `path`; `onSuccess` receives the parsed JSON.
    /// The returned promise never rejects: it resolves with the same JSON on
    /// success and with `undefined` on failure.
    ///
    /// # Errors
    ///
    /// Throws synchronously if `data` is not a plain object.
    pub fn api(&self, path: String, data: JsValue, on_success: Option<Function>) -> Result<Promise, JsError> {
        let payload = payload_from_js(data)?;
        let api = Rc::clone(&self.api);
        let handler = on_success.map(|callback| -> SuccessHandler {
            Box::new(move |value: Value| call_with_json(&callback, &value))
        });
        Ok(future_to_promise(async move {
            match api.post_ignoring_errors(&path, &payload, handler).await {
                Some(value) => to_js(&value).map_err(JsValue::from),
                None => Ok(JsValue::UNDEFINED),
            }
        }))
    }

    /// POST `data` to `path`. Resolves with the parsed JSON, rejects with
    /// the error message.
    ///
    /// # Errors
    ///
    /// Throws synchronously if `data` is not a plain object.
    pub fn request(&self, path: String, data: JsValue) -> Result<Promise, JsError> {
        let payload = payload_from_js(data)?;
        let api = Rc::clone(&self.api);
        Ok(future_to_promise(async move {
            let value = api
                .post(&path, &payload)
                .await
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            to_js(&value).map_err(JsValue::from)
        }))
    }

    /// Apply `dark`/`light` from the browser preference; returns the mode.
    ///
    /// # Errors
    ///
    /// Throws if the document root cannot be updated.
    #[wasm_bindgen(js_name = setThemeMode)]
    pub fn set_theme_mode(&self) -> Result<String, JsError> {
        let document = BrowserDocument::current()?;
        let mode = apply_preferred_theme(&document, &self.theme)?;
        Ok(mode.as_str().to_owned())
    }

    /// Reveal `element`, then call `done`. Waits for earlier fades on the
    /// same element; the promise resolves after `done`.
    #[wasm_bindgen(js_name = fadeIn)]
    pub fn fade_in(&self, element: HtmlElement, done: Option<Function>) -> Promise {
        let config = Rc::clone(&self.fade);
        let fades = Rc::clone(&self.fades);
        future_to_promise(async move {
            let queued = fade::fade_in_then(&element, &BrowserTimer, &config, || call_done(done.as_ref()));
            fades
                .run(&element, queued)
                .await
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            Ok(JsValue::UNDEFINED)
        })
    }

    /// Hide `element`, then call `done`. Waits for earlier fades on the
    /// same element; the promise resolves after `done`.
    #[wasm_bindgen(js_name = fadeOut)]
    pub fn fade_out(&self, element: HtmlElement, done: Option<Function>) -> Promise {
        let config = Rc::clone(&self.fade);
        let fades = Rc::clone(&self.fades);
        future_to_promise(async move {
            let queued = fade::fade_out_then(&element, &BrowserTimer, &config, || call_done(done.as_ref()));
            fades
                .run(&element, queued)
                .await
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            Ok(JsValue::UNDEFINED)
        })
    }
}

fn payload_from_js(data: JsValue) -> Result<Payload, serde_wasm_bindgen::Error> {
    if data.is_undefined() || data.is_null() {
        return Ok(Payload::new());
    }
    serde_wasm_bindgen::from_value(data)
}

fn to_js(value: &Value) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}

fn call_with_json(callback: &Function, value: &Value) {
    match to_js(value) {
        Ok(arg) => {
            if let Err(e) = callback.call1(&JsValue::NULL, &arg) {
                log::warn!("onSuccess callback threw: {e:?}");
            }
        }
        Err(e) => log::warn!("response not convertible for onSuccess: {e}"),
    }
}

fn call_done(done: Option<&Function>) {
    if let Some(callback) = done {
        if let Err(e) = callback.call0(&JsValue::NULL) {
            log::warn!("fade completion callback threw: {e:?}");
        }
    }
}
