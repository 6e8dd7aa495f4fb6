//! Askama filters used by the base template.

use std::fmt::Display;

/// Year shown in the footer copyright line: `{{ ""|current_year }}`.
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Stylesheet content hash from `build.rs`, used to build the
/// `/static/css/derived/main.{hash}.css` URL: `{{ ""|css_hash }}`.
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn css_hash(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(env!("CSS_HASH"))
}
