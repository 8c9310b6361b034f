use crate::constants::SECURE_PROTOCOL;
use crate::dom;
use crate::events::pointer::CardEngine;
use js_sys::{Function, Promise, Reflect};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tilt_core::{OrientationPermission, OrientationReading};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Per-card `deviceorientation` subscription.
#[derive(Default)]
pub struct OrientationListener {
    requested: Cell<bool>,
    closure: RefCell<Option<Closure<dyn FnMut(web::DeviceOrientationEvent)>>>,
}

/// Ask for orientation access once per mount. Runs from a click handler since
/// iOS only shows the prompt in response to a user gesture.
pub fn request_permission(engine: &Rc<CardEngine>, listener: &Rc<OrientationListener>) {
    if !engine.config().enable_orientation_tilt || listener.requested.replace(true) {
        return;
    }
    let Some(window) = web::window() else {
        return;
    };
    if !dom::is_secure_page(&window, SECURE_PROTOCOL) {
        log::debug!("[orientation] skipped on insecure page");
        return;
    }

    match permission_prompt(&window) {
        Prompt::Pending(promise) => {
            let engine = engine.clone();
            let listener = listener.clone();
            spawn_local(async move {
                let permission = match JsFuture::from(promise).await {
                    Ok(state) => match state.as_string() {
                        Some(s) => OrientationPermission::from_state(&s),
                        None => OrientationPermission::Denied(format!("{:?}", state)),
                    },
                    Err(e) => OrientationPermission::Denied(format!("{:?}", e)),
                };
                attach(&engine, &listener, permission);
            });
        }
        Prompt::Failed(reason) => {
            attach(engine, listener, OrientationPermission::Denied(reason));
        }
        Prompt::NotRequired => {
            let permission = if has_global(&window, "DeviceOrientationEvent") {
                OrientationPermission::Granted
            } else {
                OrientationPermission::Unsupported
            };
            attach(engine, listener, permission);
        }
    }
}

pub fn detach(listener: &OrientationListener) {
    if let Some(closure) = listener.closure.borrow_mut().take() {
        if let Some(window) = web::window() {
            dom::remove_listener(&window, "deviceorientation", &closure);
        }
    }
}

fn attach(engine: &Rc<CardEngine>, listener: &OrientationListener, permission: OrientationPermission) {
    // engine logs the reason when it refuses
    if !engine.attach_orientation(permission) {
        return;
    }
    let Some(window) = web::window() else {
        return;
    };
    let e = engine.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::DeviceOrientationEvent| {
        e.on_device_orientation(OrientationReading {
            beta: ev.beta(),
            gamma: ev.gamma(),
        });
    }) as Box<dyn FnMut(_)>);
    dom::add_listener(&window, "deviceorientation", &closure);
    detach(listener);
    *listener.closure.borrow_mut() = Some(closure);
}

enum Prompt {
    NotRequired,
    Pending(Promise),
    Failed(String),
}

/// `DeviceMotionEvent.requestPermission()` where the platform gates sensors
/// behind a prompt.
fn permission_prompt(window: &web::Window) -> Prompt {
    let Ok(motion) = Reflect::get(window, &JsValue::from_str("DeviceMotionEvent")) else {
        return Prompt::NotRequired;
    };
    if motion.is_undefined() {
        return Prompt::NotRequired;
    }
    let Some(request) = Reflect::get(&motion, &JsValue::from_str("requestPermission"))
        .ok()
        .and_then(|f| f.dyn_into::<Function>().ok())
    else {
        return Prompt::NotRequired;
    };
    match request.call0(&motion).map(|v| v.dyn_into::<Promise>()) {
        Ok(Ok(promise)) => Prompt::Pending(promise),
        Ok(Err(value)) => Prompt::Failed(format!("unexpected result {:?}", value)),
        Err(e) => Prompt::Failed(format!("{:?}", e)),
    }
}

fn has_global(window: &web::Window, name: &str) -> bool {
    Reflect::get(window, &JsValue::from_str(name))
        .map(|v| !v.is_undefined())
        .unwrap_or(false)
}
