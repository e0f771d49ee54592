//! Cluster TSV writer

use super::format::format_general;
use crate::error::Result;
use crate::types::Cluster;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

/// Write one tab-separated record per cluster.
pub fn write_clusters_tsv<W: Write>(mut writer: W, clusters: &[Cluster]) -> Result<()> {
    for c in clusters {
        let fields = [
            c.cluster_radius_px,
            c.pixel.x,
            c.pixel.y,
            c.color.x,
            c.color.y,
            c.color.z,
            c.position.x,
            c.position.y,
            c.position.z,
            c.normal.x,
            c.normal.y,
            c.normal.z,
        ];
        write!(
            writer,
            "{}\t{}\t{}",
            c.time(),
            c.id(),
            if c.is_valid() { 1 } else { 0 }
        )?;
        for v in fields {
            write!(writer, "\t{}", format_general(v))?;
        }
        writeln!(writer)?;
    }
    writer.flush()?;
    debug!("Wrote {} cluster records", clusters.len());
    Ok(())
}

/// Write the cluster TSV to a file, replacing it if present.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn save_clusters_tsv<P: AsRef<Path>>(path: P, clusters: &[Cluster]) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_clusters_tsv(BufWriter::new(file), clusters)?;
    info!("Saved {} clusters", clusters.len());
    Ok(())
}
