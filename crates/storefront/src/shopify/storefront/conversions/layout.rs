//! Layout metaobject normalization.
//!
//! The `main-layout` metaobject arrives as a list of typed fields. This module
//! flattens it into [`Layout`]: known keys are required to carry the shape
//! their type implies, unknown keys and unknown inner field types are skipped.

use std::collections::BTreeMap;

use tracing::debug;

use crate::shopify::ShopifyError;
use crate::shopify::types::{FieldValue, Image, Layout, NavLink};

use super::super::queries::get_layout::{
    FieldReference, Metaobject, MetaobjectField, NestedMetaobject, ReferenceNode,
};

const SINGLE_LINE_TEXT_FIELD: &str = "single_line_text_field";
const FILE_REFERENCE: &str = "file_reference";

/// Normalize the layout metaobject into a flat record.
///
/// # Errors
///
/// Returns `ShopifyError::MalformedResponse` naming the offending key when a
/// known field lacks its media reference or its references list.
pub fn normalize_layout(layout: Metaobject) -> Result<Layout, ShopifyError> {
    let mut normalized = Layout::default();

    for field in layout.fields {
        match field.key.as_str() {
            "background_image" => {
                normalized.background_image =
                    Some(media_image(field.reference, &field.key)?);
            }
            "logo" => normalized.logo = Some(media_image(field.reference, &field.key)?),
            "nav_links" => normalized.nav_links = nav_links(field)?,
            other => debug!(
                key = other,
                field_type = %field.field_type,
                "Skipping unknown layout field"
            ),
        }
    }

    Ok(normalized)
}

fn media_image(reference: Option<FieldReference>, key: &str) -> Result<Image, ShopifyError> {
    match reference {
        Some(FieldReference::MediaImage { image: Some(image) }) => Ok(image),
        Some(FieldReference::MediaImage { image: None }) => Err(ShopifyError::MalformedResponse(
            format!("layout field '{key}' references a media image without an image"),
        )),
        Some(FieldReference::Other) => Err(ShopifyError::MalformedResponse(format!(
            "layout field '{key}' does not reference a media image"
        ))),
        None => Err(ShopifyError::MalformedResponse(format!(
            "layout field '{key}' has no reference"
        ))),
    }
}

fn nav_links(field: MetaobjectField) -> Result<Vec<NavLink>, ShopifyError> {
    let references = field.references.ok_or_else(|| {
        ShopifyError::MalformedResponse(format!("layout field '{}' has no references", field.key))
    })?;

    references
        .nodes
        .into_iter()
        .map(|node| match node {
            ReferenceNode::Metaobject(metaobject) => nav_link(metaobject),
            ReferenceNode::Other => Err(ShopifyError::MalformedResponse(format!(
                "layout field '{}' references a non-metaobject node",
                field.key
            ))),
        })
        .collect()
}

fn nav_link(metaobject: NestedMetaobject) -> Result<NavLink, ShopifyError> {
    let mut fields = BTreeMap::new();

    for f in metaobject.fields {
        let value = match f.field_type.as_str() {
            SINGLE_LINE_TEXT_FIELD => {
                let text = f.value.ok_or_else(|| {
                    ShopifyError::MalformedResponse(format!(
                        "nav link '{}' field '{}' has no value",
                        metaobject.handle, f.key
                    ))
                })?;
                FieldValue::Text(text)
            }
            FILE_REFERENCE => FieldValue::Image(media_image(
                f.reference,
                &format!("{}.{}", metaobject.handle, f.key),
            )?),
            other => {
                debug!(
                    handle = %metaobject.handle,
                    metaobject_type = %metaobject.metaobject_type,
                    key = %f.key,
                    field_type = other,
                    "Skipping unsupported nav link field"
                );
                continue;
            }
        };
        fields.insert(f.key, value);
    }

    Ok(NavLink::new(fields))
}
