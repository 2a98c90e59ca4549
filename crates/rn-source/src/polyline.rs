//! Text encodings of road polylines and segment lengths.
//!
//! # Geometry
//!
//! | Form                 | Example                                        |
//! |----------------------|------------------------------------------------|
//! | WKT                  | `LINESTRING(96.19 16.86, 96.20 16.87)`         |
//! | WKT with SRID        | `SRID=4326;LINESTRING(96.19 16.86, 96.20 16.87)` |
//! | Coordinate list      | `96.19,16.86;96.20,16.87` (`;` or newlines)    |
//!
//! Coordinates are always longitude first.  A vertex that is not two
//! numbers rejects the whole polyline; dropping it would silently reshape
//! the road.
//!
//! # Lengths
//!
//! Metres per segment, separated by `;` or `,`, optionally wrapped in `{}`
//! or `[]` (database array literals).  Blank text means "not provided".

use rn_core::Coordinate;

use crate::{SourceError, SourceResult};

/// Parse WKT `LINESTRING` or `lon,lat;lon,lat` text.
pub fn parse_polyline(text: &str) -> SourceResult<Vec<Coordinate>> {
    let text = text.trim();
    let text = match text.split_once(';') {
        Some((prefix, rest)) if prefix.trim().to_ascii_uppercase().starts_with("SRID=") => rest.trim(),
        _ => text,
    };

    if text.get(..10).is_some_and(|tag| tag.eq_ignore_ascii_case("LINESTRING")) {
        return parse_wkt_body(&text[10..]);
    }

    text.split(|ch| ch == ';' || ch == '\n')
        .map(str::trim)
        .filter(|vertex| !vertex.is_empty())
        .map(|vertex| {
            let mut parts = vertex.split(',').map(str::trim);
            match (parts.next(), parts.next(), parts.next()) {
                (Some(lon), Some(lat), None) => parse_pair(lon, lat, vertex),
                _ => Err(geometry_error(format!("expected \"lon,lat\", got {vertex:?}"))),
            }
        })
        .collect()
}

fn parse_wkt_body(body: &str) -> SourceResult<Vec<Coordinate>> {
    let inner = body
        .trim()
        .strip_prefix('(')
        .and_then(|b| b.strip_suffix(')'))
        .ok_or_else(|| geometry_error(format!("malformed LINESTRING body {body:?}")))?;

    if inner.trim().is_empty() || inner.trim().eq_ignore_ascii_case("EMPTY") {
        return Ok(Vec::new());
    }

    inner
        .split(',')
        .map(|vertex| {
            let mut parts = vertex.split_whitespace();
            match (parts.next(), parts.next(), parts.next()) {
                (Some(lon), Some(lat), None) => parse_pair(lon, lat, vertex),
                _ => Err(geometry_error(format!("expected \"lon lat\", got {:?}", vertex.trim()))),
            }
        })
        .collect()
}

fn parse_pair(lon: &str, lat: &str, vertex: &str) -> SourceResult<Coordinate> {
    match (lon.parse::<f64>(), lat.parse::<f64>()) {
        (Ok(lon), Ok(lat)) if lon.is_finite() && lat.is_finite() => Ok(Coordinate::new(lon, lat)),
        _ => Err(geometry_error(format!("non-numeric vertex {:?}", vertex.trim()))),
    }
}

/// Parse per-segment lengths; `Ok(None)` for blank text.
pub fn parse_lengths(text: &str) -> SourceResult<Option<Vec<f64>>> {
    let trimmed = text.trim();
    let inner = trimmed
        .strip_prefix('{')
        .and_then(|t| t.strip_suffix('}'))
        .or_else(|| trimmed.strip_prefix('[').and_then(|t| t.strip_suffix(']')))
        .unwrap_or(trimmed);

    if inner.trim().is_empty() {
        return Ok(None);
    }

    inner
        .split(|ch| ch == ';' || ch == ',')
        .map(|value| {
            value
                .trim()
                .parse::<f64>()
                .map_err(|_| geometry_error(format!("invalid segment length {:?}", value.trim())))
        })
        .collect::<SourceResult<Vec<f64>>>()
        .map(Some)
}

/// Parse a one-way flag.  Blank text means two-way.
pub fn parse_oneway(text: &str) -> SourceResult<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "f" | "no" | "n" | "off" => Ok(false),
        "1" | "true" | "t" | "yes" | "y" | "on" => Ok(true),
        other => Err(geometry_error(format!("invalid one-way flag {other:?}"))),
    }
}

/// Render `coords` as WKT `LINESTRING(lon lat, …)`.
pub fn to_wkt(coords: &[Coordinate]) -> String {
    let body: Vec<String> = coords.iter().map(|c| format!("{} {}", c.lon, c.lat)).collect();
    format!("LINESTRING({})", body.join(", "))
}

/// Render lengths as `;`-separated text.
pub fn lengths_to_text(lengths: &[f64]) -> String {
    let parts: Vec<String> = lengths.iter().map(f64::to_string).collect();
    parts.join(";")
}

fn geometry_error(msg: String) -> SourceError {
    SourceError::Geometry(msg)
}
