use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::features::FeatureTable;

/// Write the feature table as CSV plus a `<stem>.duration.txt` sidecar
/// holding the track duration in seconds.
pub fn write_feature_csv(table: &FeatureTable, bands_out: usize, out: &Path) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let file = File::create(out).with_context(|| format!("Failed to create {}", out.display()))?;
    let mut writer = BufWriter::new(file);
    write_table(&mut writer, table, bands_out)?;
    writer.flush()?;

    let duration_path = duration_sidecar(out);
    std::fs::write(&duration_path, format!("{:.6}", table.duration))
        .with_context(|| format!("Failed to write {}", duration_path.display()))?;

    Ok(())
}

/// Serialize the table: `frame,t,level,kick,s0..s{bands_out-1}`, six decimal
/// places for every float column.
pub fn write_table<W: Write>(w: &mut W, table: &FeatureTable, bands_out: usize) -> Result<()> {
    write!(w, "frame,t,level,kick")?;
    for i in 0..bands_out {
        write!(w, ",s{i}")?;
    }
    writeln!(w)?;

    for frame in &table.frames {
        write!(
            w,
            "{},{:.6},{:.6},{:.6}",
            frame.frame, frame.time, frame.level, frame.kick
        )?;
        for &band in &frame.bands {
            write!(w, ",{band:.6}")?;
        }
        writeln!(w)?;
    }
    Ok(())
}

fn duration_sidecar(out: &Path) -> PathBuf {
    out.with_extension("duration.txt")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureFrame;

    fn sample_table() -> FeatureTable {
        FeatureTable {
            frames: vec![
                FeatureFrame {
                    frame: 0,
                    time: 0.0,
                    level: 0.5,
                    kick: 0.0,
                    bands: vec![0.1, 0.2],
                },
                FeatureFrame {
                    frame: 1,
                    time: 1.0 / 60.0,
                    level: 1.0,
                    kick: 0.25,
                    bands: vec![0.0, 1.0],
                },
            ],
            duration: 2.5,
        }
    }

    #[test]
    fn header_and_rows_use_six_decimals() {
        let mut buf = Vec::new();
        write_table(&mut buf, &sample_table(), 2).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "frame,t,level,kick,s0,s1");
        assert_eq!(lines[1], "0,0.000000,0.500000,0.000000,0.100000,0.200000");
        assert_eq!(lines[2], "1,0.016667,1.000000,0.250000,0.000000,1.000000");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn empty_table_writes_header_only() {
        let table = FeatureTable {
            frames: Vec::new(),
            duration: 0.0,
        };
        let mut buf = Vec::new();
        write_table(&mut buf, &table, 6).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("frame,t,level,kick,s0,"));
    }

    #[test]
    fn sidecar_path_replaces_csv_extension() {
        let path = duration_sidecar(Path::new("out/features.csv"));
        assert_eq!(path, Path::new("out/features.duration.txt"));
    }
}
