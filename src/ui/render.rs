//! Turning prediction results into verdict text, bar width and confidence text

use crate::{
    core::constants::{VERDICT_NO_WILDFIRE, VERDICT_WILDFIRE},
    data::prediction::{Channel, PredictionReport, PredictionResult},
    ui::{
        elements::{BarStyle, ElementIds},
        traits::UiSurface,
    },
};

pub fn verdict_text(channel: Channel, status: bool) -> String {
    let verdict = if status {
        VERDICT_WILDFIRE
    } else {
        VERDICT_NO_WILDFIRE
    };
    match channel.label() {
        Some(label) => format!("{} ({})", verdict, label),
        None => verdict.to_string(),
    }
}

pub fn confidence_text(percent: f64) -> String {
    format!("Confidence: {}%", percent)
}

pub fn render_channel<U>(ui: &mut U, ids: &ElementIds, channel: Channel, result: &PredictionResult)
where
    U: UiSurface + ?Sized,
{
    let elements = ids.channel(channel);
    ui.set_text(&elements.result, &verdict_text(channel, result.status));
    ui.set_bar(
        &elements.bar,
        result.clamped_percent(),
        BarStyle::from_status(result.status),
    );
    ui.set_text(&elements.text, &confidence_text(result.probability_percent));
}

pub fn render_report<U>(ui: &mut U, ids: &ElementIds, report: &PredictionReport)
where
    U: UiSurface + ?Sized,
{
    for (channel, result) in report.iter() {
        render_channel(ui, ids, channel, result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::elements::HeadlessUi;

    #[test]
    fn test_verdicts() {
        assert_eq!(
            verdict_text(Channel::Combined, true),
            "THERE IS A WILDFIRE (COMBINED)"
        );
        assert_eq!(
            verdict_text(Channel::Satellite, false),
            "THERE IS NO WILDFIRE (SATELLITE)"
        );
        assert_eq!(verdict_text(Channel::Camera, true), "THERE IS A WILDFIRE");
    }

    #[test]
    fn test_confidence_text_drops_integral_fraction() {
        assert_eq!(confidence_text(87.0), "Confidence: 87%");
        assert_eq!(confidence_text(66.5), "Confidence: 66.5%");
    }

    #[test]
    fn test_render_report_touches_each_channel() {
        let mut ui = HeadlessUi::new();
        let ids = ElementIds::default();
        let mut report = PredictionReport::new();
        report.insert(Channel::Weather, PredictionResult::new(false, 58.0));
        report.insert(Channel::Combined, PredictionResult::new(true, 120.0));

        render_report(&mut ui, &ids, &report);

        assert_eq!(
            ui.text("weatherPredictionResult"),
            Some("THERE IS NO WILDFIRE (WEATHER)")
        );
        assert_eq!(ui.text("weatherConfidenceText"), Some("Confidence: 58%"));
        let bar = ui.bar("combinedConfidenceBar").unwrap();
        assert_eq!(bar.width_percent, 100.0);
        assert_eq!(bar.style, BarStyle::Positive);
        assert_eq!(ui.text("satellitePredictionResult"), None);
    }
}
