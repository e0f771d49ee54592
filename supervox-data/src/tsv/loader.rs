//! Cluster TSV reader

use super::FIELD_COUNT;
use crate::error::{DataError, Result};
use crate::types::Cluster;
use glam::{Vec2, Vec3};
use std::io::BufRead;
use tracing::debug;

/// Parse records written by [`write_clusters_tsv`](super::write_clusters_tsv).
///
/// Blank lines are skipped. Any other malformed line is an error carrying its
/// 1-based line number.
pub fn read_clusters_tsv<R: BufRead>(reader: R) -> Result<Vec<Cluster>> {
    let mut clusters = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;
        if line.trim().is_empty() {
            continue;
        }
        clusters.push(parse_record(&line, line_no)?);
    }
    debug!("Parsed {} cluster records", clusters.len());
    Ok(clusters)
}

fn parse_record(line: &str, line_no: usize) -> Result<Cluster> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != FIELD_COUNT {
        return Err(DataError::Parse {
            line: line_no,
            message: format!("expected {} fields, found {}", FIELD_COUNT, fields.len()),
        });
    }

    let parse_err = |name: &str, value: &str| DataError::Parse {
        line: line_no,
        message: format!("invalid {}: '{}'", name, value),
    };

    let time: i64 = fields[0].parse().map_err(|_| parse_err("time", fields[0]))?;
    let id: usize = fields[1].parse().map_err(|_| parse_err("id", fields[1]))?;
    let valid = match fields[2] {
        "1" => true,
        "0" => false,
        other => return Err(parse_err("valid flag", other)),
    };

    let mut floats = [0.0f32; FIELD_COUNT - 3];
    for (slot, value) in floats.iter_mut().zip(&fields[3..]) {
        *slot = value.parse().map_err(|_| parse_err("number", value))?;
    }

    Ok(Cluster::from_record(
        id,
        time,
        valid,
        Vec2::new(floats[1], floats[2]),
        Vec3::new(floats[3], floats[4], floats[5]),
        Vec3::new(floats[6], floats[7], floats[8]),
        Vec3::new(floats[9], floats[10], floats[11]),
        floats[0],
    ))
}
