//! `UiSurface` over the browser DOM

use crate::{
    data::geocoding::Suggestion,
    ui::{
        elements::{BarStyle, MessageTone, SUGGESTION_INDEX_ATTR, SUGGESTION_ITEM_CLASS},
        traits::UiSurface,
    },
    MapError, Result,
};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

pub struct DomSurface {
    document: Document,
}

impl DomSurface {
    pub fn new() -> Result<Self> {
        web_sys::window()
            .and_then(|window| window.document())
            .map(|document| Self { document })
            .ok_or_else(|| MapError::Config("no document available".to_string()))
    }

    fn element(&self, id: &str) -> Option<Element> {
        let element = self.document.get_element_by_id(id);
        if element.is_none() {
            log::warn!("element #{} not found", id);
        }
        element
    }

    fn html_element(&self, id: &str) -> Option<HtmlElement> {
        self.element(id)?.dyn_into::<HtmlElement>().ok()
    }
}

impl UiSurface for DomSurface {
    fn set_input_value(&mut self, element_id: &str, value: &str) {
        if let Some(input) = self
            .element(element_id)
            .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
        {
            input.set_value(value);
        }
    }

    fn show_suggestions(&mut self, element_id: &str, suggestions: &[Suggestion]) {
        let Some(container) = self.element(element_id) else {
            return;
        };
        container.set_inner_html("");
        for (index, suggestion) in suggestions.iter().enumerate() {
            let Ok(item) = self.document.create_element("div") else {
                continue;
            };
            item.set_class_name(SUGGESTION_ITEM_CLASS);
            item.set_text_content(Some(&suggestion.label));
            let _ = item.set_attribute(SUGGESTION_INDEX_ATTR, &index.to_string());
            let _ = container.append_child(&item);
        }
    }

    fn set_text(&mut self, element_id: &str, text: &str) {
        if let Some(element) = self.element(element_id) {
            element.set_text_content(Some(text));
        }
    }

    fn set_bar(&mut self, element_id: &str, percent: f64, style: BarStyle) {
        let Some(bar) = self.html_element(element_id) else {
            return;
        };
        let _ = bar.style().set_property("width", &format!("{}%", percent));
        let classes = bar.class_list();
        let [positive, negative] = BarStyle::all_css_classes();
        let _ = classes.remove_2(positive, negative);
        let _ = classes.add_1(style.css_class());
    }

    fn set_message(&mut self, element_id: &str, text: &str, tone: MessageTone) {
        let Some(element) = self.element(element_id) else {
            return;
        };
        element.set_text_content(Some(text));
        let classes = element.class_list();
        let _ = classes.remove_2("text-green-500", "text-red-500");
        if let Some(class) = tone.css_class() {
            let _ = classes.add_1(class);
        }
    }
}
