//! Browser entry point
//!
//! Recognises the page it is loaded into, builds a [`MapController`] over
//! Mapbox GL and the DOM, and forwards DOM events to
//! [`MapController::dispatch`].

use crate::{
    core::{
        config::{ControllerOptions, PageProfile},
        constants::OPTIONS_SCRIPT_ID,
    },
    data::prediction::ImageUpload,
    input::events::{EventHandled, UiEvent},
    ui::{
        dom::DomSurface,
        elements::{parse_suggestion_index, SUGGESTION_INDEX_ATTR, SUGGESTION_ITEM_CLASS},
        mapbox::{js_error, MapboxWidget},
        traits::MapWidget,
        widget::HeadlessMap,
    },
    MapController, MapError, Result,
};
use js_sys::{Reflect, Uint8Array};
use std::rc::Rc;
use wasm_bindgen::{prelude::*, JsCast};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    Document, Element, Event, EventTarget, File, HtmlInputElement, KeyboardEvent, Window,
};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = log)]
    fn console_log(s: &str);
}

type PageController<M> = Rc<MapController<M, DomSurface>>;

/// Main WASM entry point
#[wasm_bindgen(start)]
pub fn start() -> std::result::Result<(), JsValue> {
    console_error_panic_hook::set_once();
    mount().map_err(|e| JsValue::from_str(&e.to_string()))
}

fn mount() -> Result<()> {
    let window = web_sys::window().ok_or_else(|| MapError::Config("no window".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| MapError::Config("no document available".to_string()))?;

    let Some(profile) = page_profile(&document)? else {
        console_log("firemap: no map or form on this page");
        return Ok(());
    };
    let options = page_options(&window, profile)?;
    console_log(&format!("firemap: mounting with {:?}", options.features));

    if options.features.has_map() {
        let token = options.endpoints.token().unwrap_or_default();
        let map = MapboxWidget::new(&options.map, &token)?;
        let ctrl = Rc::new(MapController::with_http(map, DomSurface::new()?, options)?);

        let drag_end = {
            let ctrl = Rc::clone(&ctrl);
            Closure::<dyn FnMut()>::new(move || spawn_dispatch(&ctrl, UiEvent::MarkerDragEnd))
        };
        ctrl.with_map(|map| map.on_drag_end(&drag_end));
        drag_end.forget();
        bind(&ctrl, &document)
    } else {
        let map = HeadlessMap::new(&options.map);
        let ctrl = Rc::new(MapController::with_http(map, DomSurface::new()?, options)?);
        bind(&ctrl, &document)
    }
}

fn page_profile(document: &Document) -> Result<Option<PageProfile>> {
    if let Some(script) = document.get_element_by_id(OPTIONS_SCRIPT_ID) {
        let json = script.text_content().unwrap_or_default();
        return Ok(Some(PageProfile::Custom(ControllerOptions::from_json(&json)?)));
    }
    Ok(PageProfile::detect(|id| document.get_element_by_id(id).is_some()))
}

fn page_options(window: &Window, profile: PageProfile) -> Result<ControllerOptions> {
    let custom = matches!(profile, PageProfile::Custom(_));
    let mut options = profile.resolve();
    if !custom {
        // Presets talk to the server that served the page
        let origin = window.location().origin().map_err(js_error)?;
        options = options.with_backend_url(origin);
    }
    if options.endpoints.mapbox_token.is_none() {
        if let Some(token) = page_access_token() {
            options = options.with_token(token);
        }
    }
    Ok(options)
}

/// `mapboxgl.accessToken` as set by the page script
fn page_access_token() -> Option<String> {
    let mapboxgl = Reflect::get(&js_sys::global(), &JsValue::from_str("mapboxgl")).ok()?;
    Reflect::get(&mapboxgl, &JsValue::from_str("accessToken"))
        .ok()?
        .as_string()
        .filter(|token| !token.is_empty())
}

fn bind<M: MapWidget + 'static>(ctrl: &PageController<M>, document: &Document) -> Result<()> {
    let ids = ctrl.options().elements.clone();
    let features = ctrl.options().features;

    if features.search {
        if let Some(input) = input_element(document, &ids.search_input) {
            let typed = input.clone();
            listen(ctrl, &input, "input", move |_| {
                Some(UiEvent::SearchInput {
                    query: typed.value(),
                })
            })?;

            let typed = input.clone();
            listen(ctrl, &input, "keypress", move |event| {
                if event.dyn_ref::<KeyboardEvent>()?.key() != "Enter" {
                    return None;
                }
                event.prevent_default();
                Some(UiEvent::SearchSubmit {
                    query: typed.value(),
                })
            })?;

            if let Some(button) = document.get_element_by_id(&ids.search_button) {
                listen(ctrl, &button, "click", move |_| {
                    Some(UiEvent::SearchSubmit {
                        query: input.value(),
                    })
                })?;
            }
        }

        if let Some(list) = document.get_element_by_id(&ids.suggestions) {
            let item_selector = format!(".{}", SUGGESTION_ITEM_CLASS);
            listen(ctrl, &list, "click", move |event| {
                let target = event.target()?.dyn_into::<Element>().ok()?;
                let item = target.closest(&item_selector).ok()??;
                let index = parse_suggestion_index(&item.get_attribute(SUGGESTION_INDEX_ATTR)?)?;
                Some(UiEvent::SuggestionClicked { index })
            })?;
        }
    }

    if features.satellite {
        if let Some(button) = document.get_element_by_id(&ids.predict_button) {
            listen(ctrl, &button, "click", |_| Some(UiEvent::PredictClicked))?;
        }
    }

    if features.alert {
        if let (Some(form), Some(email)) = (
            document.get_element_by_id(&ids.alert_form),
            input_element(document, &ids.email_input),
        ) {
            listen(ctrl, &form, "submit", move |event| {
                event.prevent_default();
                Some(UiEvent::AlertSubmitted {
                    email: email.value(),
                })
            })?;
        }
    }

    // One button cannot trigger both forms
    let shared_button = features.satellite && ids.camera_button == ids.predict_button;
    if features.camera && !shared_button {
        if let (Some(button), Some(input)) = (
            document.get_element_by_id(&ids.camera_button),
            input_element(document, &ids.image_input),
        ) {
            let ctrl = Rc::clone(ctrl);
            on(&button, "click", move |_| {
                let file = input.files().and_then(|files| files.get(0));
                let ctrl = Rc::clone(&ctrl);
                spawn_local(async move {
                    let image = match file {
                        Some(file) => read_image(&file).await,
                        None => Ok(ImageUpload::new("", "", Vec::new())),
                    };
                    match image {
                        Ok(image) => {
                            report(ctrl.dispatch(UiEvent::ImageSubmitted { image }).await)
                        }
                        Err(e) => log::warn!("Could not read the selected image: {}", e),
                    }
                });
            })?;
        }
    }

    Ok(())
}

fn input_element(document: &Document, id: &str) -> Option<HtmlInputElement> {
    document.get_element_by_id(id)?.dyn_into().ok()
}

/// Dispatches the event `to_event` derives from each DOM event of `kind`
fn listen<M, F>(
    ctrl: &PageController<M>,
    target: &EventTarget,
    kind: &str,
    mut to_event: F,
) -> Result<()>
where
    M: MapWidget + 'static,
    F: FnMut(&Event) -> Option<UiEvent> + 'static,
{
    let ctrl = Rc::clone(ctrl);
    on(target, kind, move |event| {
        if let Some(ui_event) = to_event(&event) {
            spawn_dispatch(&ctrl, ui_event);
        }
    })
}

fn on(target: &EventTarget, kind: &str, handler: impl FnMut(Event) + 'static) -> Result<()> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
        .map_err(js_error)?;
    // Listeners stay for the lifetime of the page
    closure.forget();
    Ok(())
}

fn spawn_dispatch<M: MapWidget + 'static>(ctrl: &PageController<M>, event: UiEvent) {
    let ctrl = Rc::clone(ctrl);
    spawn_local(async move { report(ctrl.dispatch(event).await) });
}

fn report(outcome: Result<EventHandled>) {
    // Failures are already rendered on the page
    if let Err(e) = outcome {
        log::debug!("Event failed: {}", e);
    }
}

async fn read_image(file: &File) -> Result<ImageUpload> {
    let buffer = JsFuture::from(file.array_buffer()).await.map_err(js_error)?;
    let bytes = Uint8Array::new(&buffer).to_vec();
    Ok(ImageUpload::new(file.name(), file.type_(), bytes))
}
