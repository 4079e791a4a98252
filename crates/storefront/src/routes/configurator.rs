//! Sofa configurator route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::Query, response::IntoResponse};
use serde::Deserialize;
use tracing::instrument;

use crate::middleware::Nav;
use crate::services::configurator::{
    BASE_IMAGE, COLOR_LAYER_IMAGE, COLOR_PRESETS, LEG_VARIANTS, SofaConfig,
};

/// Selection from the query string. Values are taken as loose strings so
/// a garbled link still renders the defaults.
#[derive(Debug, Deserialize)]
pub struct ConfiguratorQuery {
    pub leg: Option<String>,
    pub color: Option<String>,
}

#[derive(Clone)]
pub struct LegChoiceView {
    pub variant: u8,
    pub href: String,
    pub selected: bool,
}

#[derive(Clone)]
pub struct ColorChoiceView {
    pub name: String,
    pub href: String,
    pub selected: bool,
    /// Filter applied to the swatch.
    pub filter: String,
}

/// Configurator page template.
#[derive(Template, WebTemplate)]
#[template(path = "configurator/show.html")]
pub struct ConfiguratorTemplate {
    pub nav: Nav,
    pub base_image: &'static str,
    pub color_layer_image: &'static str,
    pub legs_image: String,
    pub leg: u8,
    pub color_name: String,
    pub show_color_layer: bool,
    pub color_filter: String,
    pub legs: Vec<LegChoiceView>,
    pub colors: Vec<ColorChoiceView>,
    pub reset_href: String,
}

fn parse_number(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|v| v.trim().parse().ok())
}

/// Display the sofa configurator.
#[instrument(skip(nav))]
pub async fn show(nav: Nav, Query(query): Query<ConfiguratorQuery>) -> impl IntoResponse {
    let config = SofaConfig::new(
        parse_number(query.leg.as_deref()),
        parse_number(query.color.as_deref()),
    );
    let color = config.color();

    ConfiguratorTemplate {
        nav,
        base_image: BASE_IMAGE,
        color_layer_image: COLOR_LAYER_IMAGE,
        legs_image: config.legs_image(),
        leg: config.leg(),
        color_name: color.name.to_string(),
        show_color_layer: config.shows_color_layer(),
        color_filter: color.css_filter(),
        legs: LEG_VARIANTS
            .map(|variant| LegChoiceView {
                variant,
                href: config.with_leg(variant).href(),
                selected: variant == config.leg(),
            })
            .collect(),
        colors: COLOR_PRESETS
            .iter()
            .enumerate()
            .map(|(index, preset)| ColorChoiceView {
                name: preset.name.to_string(),
                href: config.with_color(index).href(),
                selected: index == config.color_index(),
                filter: preset.css_filter(),
            })
            .collect(),
        reset_href: SofaConfig::default().href(),
    }
}
