// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Parsing of OSC color specifications.
//!
//! OSC 4 / 10-19 carry colors in XParseColor syntax. The forms clients
//! actually send: `rgb:RR/GG/BB` (1-4 hex digits per component),
//! `#RGB`/`#RRGGBB`/`#RRRRGGGGBBBB`, and `rgbi:r/g/b` with floats in 0..=1.
//! Malformed specs are reported as a typed error; callers log and drop them
//! — a bad color never aborts the sequence that carried it.

use thiserror::Error;

use crate::Rgb;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorSpecError {
    #[error("empty color spec")]
    Empty,
    #[error("unrecognized color spec format: {0:?}")]
    UnknownFormat(String),
    #[error("bad hex component in color spec: {0:?}")]
    BadComponent(String),
}

/// Parse one XParseColor-style spec.
pub fn parse_color_spec(spec: &str) -> Result<Rgb, ColorSpecError> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Err(ColorSpecError::Empty);
    }
    if let Some(hex) = spec.strip_prefix('#') {
        return parse_sharp_form(hex, spec);
    }
    if let Some(body) = spec.strip_prefix("rgb:") {
        return parse_rgb_form(body, spec);
    }
    if let Some(body) = spec.strip_prefix("rgbi:") {
        return parse_rgbi_form(body, spec);
    }
    Err(ColorSpecError::UnknownFormat(spec.to_string()))
}

/// `#RGB`, `#RRGGBB`, `#RRRGGGBBB`, `#RRRRGGGGBBBB`: equal-width hex
/// components, most significant digits first.
fn parse_sharp_form(hex: &str, full: &str) -> Result<Rgb, ColorSpecError> {
    let len = hex.len();
    if len == 0 || len % 3 != 0 || len > 12 {
        return Err(ColorSpecError::UnknownFormat(full.to_string()));
    }
    let digits = len / 3;
    let component = |slice: &str| scale_component(slice, full);
    Ok(Rgb::new(
        component(&hex[0..digits])?,
        component(&hex[digits..2 * digits])?,
        component(&hex[2 * digits..])?,
    ))
}

fn parse_rgb_form(body: &str, full: &str) -> Result<Rgb, ColorSpecError> {
    let mut parts = body.split('/');
    let (Some(red), Some(green), Some(blue), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(ColorSpecError::UnknownFormat(full.to_string()));
    };
    Ok(Rgb::new(
        scale_component(red, full)?,
        scale_component(green, full)?,
        scale_component(blue, full)?,
    ))
}

fn parse_rgbi_form(body: &str, full: &str) -> Result<Rgb, ColorSpecError> {
    let mut parts = body.split('/');
    let (Some(red), Some(green), Some(blue), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(ColorSpecError::UnknownFormat(full.to_string()));
    };
    let component = |text: &str| -> Result<u8, ColorSpecError> {
        let value: f64 = text
            .parse()
            .map_err(|_| ColorSpecError::BadComponent(full.to_string()))?;
        if !(0.0..=1.0).contains(&value) {
            return Err(ColorSpecError::BadComponent(full.to_string()));
        }
        Ok((value * 255.0).round() as u8)
    };
    Ok(Rgb::new(component(red)?, component(green)?, component(blue)?))
}

/// Scale a 1-4 digit hex component to 8 bits, keeping the most significant
/// bits as XParseColor does.
fn scale_component(text: &str, full: &str) -> Result<u8, ColorSpecError> {
    if text.is_empty() || text.len() > 4 {
        return Err(ColorSpecError::BadComponent(full.to_string()));
    }
    let value = u16::from_str_radix(text, 16)
        .map_err(|_| ColorSpecError::BadComponent(full.to_string()))?;
    let bits = 4 * text.len() as u32;
    Ok(if bits <= 8 {
        (u32::from(value) << (8 - bits)) as u8
    } else {
        (u32::from(value) >> (bits - 8)) as u8
    })
}
