//! CSV and JSON output for [`Report`].

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::ResultsResult;
use crate::types::Report;

/// Write the station table (when a profile is present), the segment table and
/// the total, each section followed by a blank line.
pub fn write_csv<W: Write>(writer: &mut W, report: &Report) -> ResultsResult<()> {
    if !report.profile_m.is_empty() {
        writeln!(writer, "station,elevation(m)")?;
        for (i, z) in report.profile_m.iter().enumerate() {
            writeln!(writer, "{},{:.4}", i + 1, z)?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "segment,L(m),D(m),Q(m3/s),V(m/s),Re,f,hf(m)")?;
    for s in &report.segments {
        writeln!(
            writer,
            "{},{:.4},{:.4},{:.6},{:.4},{:.0},{:.6},{:.6}",
            s.position,
            s.length_m,
            s.diameter_m,
            s.flow_m3s,
            s.velocity_mps,
            s.reynolds,
            s.friction_factor,
            s.head_loss_m
        )?;
    }
    writeln!(writer)?;
    writeln!(writer, "total_head_loss(m),{:.6}", report.total_head_loss_m)?;
    Ok(())
}

pub fn save_csv(path: &Path, report: &Report) -> ResultsResult<()> {
    let mut buf = Vec::new();
    write_csv(&mut buf, report)?;
    fs::write(path, buf)?;
    Ok(())
}

pub fn save_json(path: &Path, report: &Report) -> ResultsResult<()> {
    let content = serde_json::to_string_pretty(report)?;
    fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ResultsResult<Report> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SegmentRecord;
    use hl_components::FrictionMethod;

    fn report(profile_m: Vec<f64>) -> Report {
        Report {
            name: "csv".to_string(),
            method: FrictionMethod::Colebrook,
            segments: vec![SegmentRecord {
                position: 1,
                length_m: 100.0,
                diameter_m: 0.1,
                flow_m3s: 0.01,
                roughness_m: 1.5e-6,
                material: Some("pvc".to_string()),
                velocity_mps: 1.2732395,
                reynolds: 127323.95,
                friction_factor: 0.0172083,
                iterations: 5,
                head_loss_m: 1.4218612,
            }],
            total_head_loss_m: 1.4218612,
            profile_m,
            net_elevation_change_m: None,
            warnings: vec![],
        }
    }

    fn render(report: &Report) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, report).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn segment_table_precisions() {
        let text = render(&report(vec![]));
        let expected = "segment,L(m),D(m),Q(m3/s),V(m/s),Re,f,hf(m)\n\
                        1,100.0000,0.1000,0.010000,1.2732,127324,0.017208,1.421861\n\
                        \n\
                        total_head_loss(m),1.421861\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn station_section_comes_first() {
        let text = render(&report(vec![100.0, 98.25]));
        assert!(text.starts_with("station,elevation(m)\n1,100.0000\n2,98.2500\n\nsegment,"));
    }
}
