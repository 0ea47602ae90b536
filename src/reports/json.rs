use crate::Result;
use crate::reports::ScoreReport;
use core::fmt::Write;
use ohno::IntoAppError;

pub fn generate<W: Write>(report: &ScoreReport, writer: &mut W) -> Result<()> {
    let rendered = serde_json::to_string_pretty(report).into_app_err("could not serialize score report")?;
    writeln!(writer, "{rendered}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricResult;

    #[test]
    fn test_json_report_shape() {
        let report = ScoreReport::new(
            "https://huggingface.co/org/model",
            "org/model",
            vec![("bus_factor", MetricResult::new(0.5, "some notes"))],
        );

        let mut output = String::new();
        generate(&report, &mut output).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["model_id"], "org/model");
        assert_eq!(parsed["overall_score"], 0.5);
        assert_eq!(parsed["entries"][0]["name"], "bus_factor");
        assert_eq!(parsed["entries"][0]["notes"], "some notes");
    }
}
