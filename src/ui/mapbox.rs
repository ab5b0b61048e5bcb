//! `MapWidget` over Mapbox GL JS
//!
//! Expects the `mapboxgl` global to be loaded by the page.

use crate::{
    core::{config::MapViewConfig, geo::Coordinate},
    ui::traits::MapWidget,
    MapError, Result,
};
use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = mapboxgl, js_name = Map)]
    type JsMap;

    #[wasm_bindgen(constructor, js_namespace = mapboxgl, js_class = "Map")]
    fn new(options: &Object) -> JsMap;

    #[wasm_bindgen(method, js_name = setCenter)]
    fn set_center(this: &JsMap, center: &Array);

    #[wasm_bindgen(method, js_name = getCenter)]
    fn get_center(this: &JsMap) -> JsValue;

    #[wasm_bindgen(method, js_name = setZoom)]
    fn set_zoom(this: &JsMap, zoom: f64);

    #[wasm_bindgen(method, js_name = getZoom)]
    fn get_zoom(this: &JsMap) -> f64;

    #[wasm_bindgen(js_namespace = mapboxgl, js_name = Marker)]
    type JsMarker;

    #[wasm_bindgen(constructor, js_namespace = mapboxgl, js_class = "Marker")]
    fn new(options: &Object) -> JsMarker;

    #[wasm_bindgen(method, js_name = setLngLat)]
    fn set_lng_lat(this: &JsMarker, lng_lat: &Array);

    #[wasm_bindgen(method, js_name = getLngLat)]
    fn get_lng_lat(this: &JsMarker) -> JsValue;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &JsMarker, map: &JsMap);

    #[wasm_bindgen(method)]
    fn on(this: &JsMarker, event: &str, callback: &Closure<dyn FnMut()>);
}

pub struct MapboxWidget {
    map: JsMap,
    marker: JsMarker,
}

impl MapboxWidget {
    /// Renders the map into `config.container` with a draggable marker at the default center
    pub fn new(config: &MapViewConfig, access_token: &str) -> Result<Self> {
        let mapboxgl = Reflect::get(&js_sys::global(), &JsValue::from_str("mapboxgl"))
            .map_err(js_error)?;
        if mapboxgl.is_undefined() {
            return Err(MapError::Config("mapboxgl is not loaded".to_string()));
        }
        Reflect::set(
            &mapboxgl,
            &JsValue::from_str("accessToken"),
            &JsValue::from_str(access_token),
        )
        .map_err(js_error)?;

        let options = Object::new();
        set_option(&options, "container", &JsValue::from_str(&config.container))?;
        set_option(&options, "style", &JsValue::from_str(&config.style))?;
        set_option(&options, "center", &lng_lat_array(config.default_center))?;
        set_option(&options, "zoom", &JsValue::from_f64(config.default_zoom))?;
        let map = JsMap::new(&options);

        let marker_options = Object::new();
        set_option(&marker_options, "draggable", &JsValue::TRUE)?;
        let marker = JsMarker::new(&marker_options);
        marker.set_lng_lat(&lng_lat_array(config.default_center));
        marker.add_to(&map);

        Ok(Self { map, marker })
    }

    /// Registers the `dragend` handler; the closure must outlive the marker
    pub fn on_drag_end(&self, callback: &Closure<dyn FnMut()>) {
        self.marker.on("dragend", callback);
    }
}

impl MapWidget for MapboxWidget {
    fn center(&self) -> Coordinate {
        read_lng_lat(&self.map.get_center())
    }

    fn zoom(&self) -> f64 {
        self.map.get_zoom()
    }

    fn set_center(&mut self, center: Coordinate) {
        self.map.set_center(&lng_lat_array(center));
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.map.set_zoom(zoom);
    }

    fn marker_position(&self) -> Coordinate {
        read_lng_lat(&self.marker.get_lng_lat())
    }

    fn set_marker_position(&mut self, position: Coordinate) {
        self.marker.set_lng_lat(&lng_lat_array(position));
    }
}

fn lng_lat_array(coord: Coordinate) -> Array {
    Array::of2(&JsValue::from_f64(coord.lng), &JsValue::from_f64(coord.lat))
}

fn read_lng_lat(value: &JsValue) -> Coordinate {
    let field = |name: &str| {
        Reflect::get(value, &JsValue::from_str(name))
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    };
    Coordinate::new(field("lng"), field("lat"))
}

fn set_option(options: &Object, key: &str, value: &JsValue) -> Result<()> {
    Reflect::set(options, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(js_error)
}

pub(crate) fn js_error(value: JsValue) -> MapError {
    MapError::Config(format!("{:?}", value))
}
