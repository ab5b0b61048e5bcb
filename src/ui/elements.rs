use crate::{
    data::{geocoding::Suggestion, prediction::Channel},
    ui::traits::UiSurface,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

/// Fill of a confidence bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarStyle {
    /// A wildfire was detected
    Positive,
    Negative,
}

impl BarStyle {
    pub fn from_status(status: bool) -> Self {
        if status {
            BarStyle::Positive
        } else {
            BarStyle::Negative
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            BarStyle::Positive => "bg-red-500",
            BarStyle::Negative => "bg-green-500",
        }
    }

    pub fn all_css_classes() -> [&'static str; 2] {
        [
            BarStyle::Positive.css_class(),
            BarStyle::Negative.css_class(),
        ]
    }
}

/// Tone of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageTone {
    Positive,
    Negative,
    Neutral,
}

impl MessageTone {
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            MessageTone::Positive => Some("text-green-500"),
            MessageTone::Negative => Some("text-red-500"),
            MessageTone::Neutral => None,
        }
    }
}

/// Element ids of one channel's verdict, bar and confidence text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelElements {
    pub result: String,
    pub bar: String,
    pub text: String,
}

impl ChannelElements {
    pub fn new(result: &str, bar: &str, text: &str) -> Self {
        Self {
            result: result.to_string(),
            bar: bar.to_string(),
            text: text.to_string(),
        }
    }

    fn prefixed(prefix: &str) -> Self {
        Self::new(
            &format!("{}PredictionResult", prefix),
            &format!("{}ConfidenceBar", prefix),
            &format!("{}ConfidenceText", prefix),
        )
    }
}

/// Ids of every element the controller touches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub search_input: String,
    pub search_button: String,
    pub suggestions: String,
    pub message: String,
    /// Satellite/weather prediction trigger
    pub predict_button: String,
    pub alert_form: String,
    pub email_input: String,
    /// File input and trigger of the camera form
    pub image_input: String,
    pub camera_button: String,
    pub camera: ChannelElements,
    pub satellite: ChannelElements,
    pub weather: ChannelElements,
    pub combined: ChannelElements,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            search_input: "search".to_string(),
            search_button: "searchBtn".to_string(),
            suggestions: "suggestions".to_string(),
            message: "message".to_string(),
            predict_button: "predictBtn".to_string(),
            alert_form: "alertForm".to_string(),
            email_input: "email".to_string(),
            image_input: "imageInput".to_string(),
            camera_button: "predictBtn".to_string(),
            camera: ChannelElements::new("predictionResult", "confidenceBar", "confidenceText"),
            satellite: ChannelElements::prefixed("satellite"),
            weather: ChannelElements::prefixed("weather"),
            combined: ChannelElements::prefixed("combined"),
        }
    }
}

/// Class given to each rendered suggestion
pub const SUGGESTION_ITEM_CLASS: &str = "suggestion-item";

/// Attribute carrying the suggestion index for `UiEvent::SuggestionClicked`
pub const SUGGESTION_INDEX_ATTR: &str = "data-index";

/// Index stored in a suggestion item's [`SUGGESTION_INDEX_ATTR`]
pub fn parse_suggestion_index(value: &str) -> Option<usize> {
    value.trim().parse().ok()
}

impl ElementIds {
    pub fn channel(&self, channel: Channel) -> &ChannelElements {
        match channel {
            Channel::Camera => &self.camera,
            Channel::Satellite => &self.satellite,
            Channel::Weather => &self.weather,
            Channel::Combined => &self.combined,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarState {
    pub width_percent: f64,
    pub style: BarStyle,
}

/// In-memory page used by tests and the terminal app
#[derive(Debug, Clone, Default)]
pub struct HeadlessUi {
    inputs: BTreeMap<String, String>,
    suggestions: BTreeMap<String, Vec<String>>,
    texts: BTreeMap<String, String>,
    bars: BTreeMap<String, BarState>,
    messages: BTreeMap<String, (String, MessageTone)>,
}

impl HeadlessUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self, element_id: &str) -> Option<&str> {
        self.inputs.get(element_id).map(String::as_str)
    }

    /// Labels currently listed, empty when the list is cleared
    pub fn suggestions(&self, element_id: &str) -> &[String] {
        self.suggestions
            .get(element_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn text(&self, element_id: &str) -> Option<&str> {
        self.texts.get(element_id).map(String::as_str)
    }

    pub fn bar(&self, element_id: &str) -> Option<BarState> {
        self.bars.get(element_id).copied()
    }

    pub fn message(&self, element_id: &str) -> Option<(&str, MessageTone)> {
        self.messages
            .get(element_id)
            .map(|(text, tone)| (text.as_str(), *tone))
    }
}

impl UiSurface for HeadlessUi {
    fn set_input_value(&mut self, element_id: &str, value: &str) {
        self.inputs.insert(element_id.to_string(), value.to_string());
    }

    fn show_suggestions(&mut self, element_id: &str, suggestions: &[Suggestion]) {
        self.suggestions.insert(
            element_id.to_string(),
            suggestions.iter().map(|s| s.label.clone()).collect(),
        );
    }

    fn set_text(&mut self, element_id: &str, text: &str) {
        self.texts.insert(element_id.to_string(), text.to_string());
    }

    fn set_bar(&mut self, element_id: &str, percent: f64, style: BarStyle) {
        self.bars.insert(
            element_id.to_string(),
            BarState {
                width_percent: percent,
                style,
            },
        );
    }

    fn set_message(&mut self, element_id: &str, text: &str, tone: MessageTone) {
        self.messages
            .insert(element_id.to_string(), (text.to_string(), tone));
    }
}

impl fmt::Display for HeadlessUi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, value) in &self.inputs {
            writeln!(f, "[{}] \"{}\"", id, value)?;
        }
        for (id, labels) in &self.suggestions {
            for (index, label) in labels.iter().enumerate() {
                writeln!(f, "[{}] {}: {}", id, index, label)?;
            }
        }
        for (id, text) in &self.texts {
            writeln!(f, "[{}] {}", id, text)?;
        }
        for (id, bar) in &self.bars {
            writeln!(
                f,
                "[{}] {:>3.0}% {}",
                id,
                bar.width_percent,
                bar.style.css_class()
            )?;
        }
        for (id, (text, tone)) in &self.messages {
            writeln!(f, "[{}] ({:?}) {}", id, tone, text)?;
        }
        Ok(())
    }
}
