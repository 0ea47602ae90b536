use crate::Result;
use crate::config::Config;
use crate::reports::{ColorMode, ScoreReport};
use core::fmt::{self, Write};
use owo_colors::OwoColorize;
use std::io::{IsTerminal, stdout};

const SEPARATOR_WIDTH: usize = 40;
const COLUMN_GAP: usize = 2;
const SCORE_WIDTH: usize = 5;

pub fn generate<W: Write>(report: &ScoreReport, config: &Config, color: ColorMode, writer: &mut W) -> Result<()> {
    ConsoleReporter::new(writer, config, color).generate_report(report)
}

struct ConsoleReporter<'a, W: Write> {
    writer: &'a mut W,
    colors: ColorScheme<'a>,
    metric_width: usize,
}

impl<'a, W: Write> ConsoleReporter<'a, W> {
    fn new(writer: &'a mut W, config: &'a Config, color_mode: ColorMode) -> Self {
        Self {
            writer,
            colors: ColorScheme::new(config, color_mode),
            metric_width: 0,
        }
    }

    fn generate_report(&mut self, report: &ScoreReport) -> Result<()> {
        self.metric_width = report.entries.iter().map(|e| e.name.len()).max().unwrap_or(0).max("Metric".len());

        self.write_header(report)?;
        self.write_metrics_table(report)?;
        Ok(())
    }

    fn write_header(&mut self, report: &ScoreReport) -> Result<()> {
        writeln!(self.writer, "Model        : {}", report.model_id)?;
        if report.model_url != report.model_id {
            writeln!(self.writer, "URL          : {}", report.model_url)?;
        }

        write!(self.writer, "Overall Score: ")?;
        self.colors.write_colorized_score(self.writer, report.overall_score, None)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_metrics_table(&mut self, report: &ScoreReport) -> Result<()> {
        writeln!(self.writer)?;
        self.colors
            .write_styled_line(self.writer, "─", SEPARATOR_WIDTH, TextStyle::Dimmed)?;
        writeln!(self.writer)?;

        self.colors.write_styled_text(self.writer, "Metric", TextStyle::Bold)?;
        write!(self.writer, "{:width$}", "", width = self.metric_width - "Metric".len() + COLUMN_GAP)?;
        self.colors.write_styled_text(self.writer, "Score", TextStyle::Bold)?;
        write!(self.writer, "{:COLUMN_GAP$}", "")?;
        self.colors.write_styled_text(self.writer, "Notes", TextStyle::Bold)?;
        writeln!(self.writer)?;

        self.colors
            .write_styled_line(self.writer, "─", SEPARATOR_WIDTH, TextStyle::Dimmed)?;
        writeln!(self.writer)?;

        for entry in &report.entries {
            let metric_width = self.metric_width;
            write!(self.writer, "{:<metric_width$}{:COLUMN_GAP$}", entry.name, "")?;
            self.colors.write_colorized_score(self.writer, entry.score, Some(SCORE_WIDTH))?;
            writeln!(self.writer, "{:COLUMN_GAP$}{}", "", entry.notes)?;
        }
        Ok(())
    }
}

#[derive(Copy, Clone)]
enum TextStyle {
    Bold,
    Dimmed,
}

struct ColorScheme<'a> {
    config: &'a Config,
    enabled: bool,
}

impl<'a> ColorScheme<'a> {
    fn new(config: &'a Config, color_mode: ColorMode) -> Self {
        let enabled = matches!(color_mode, ColorMode::Always) || (matches!(color_mode, ColorMode::Auto) && stdout().is_terminal());
        Self { config, enabled }
    }

    fn write_styled_text<W: Write>(&self, writer: &mut W, text: &str, style: TextStyle) -> fmt::Result {
        if !self.enabled {
            return write!(writer, "{text}");
        }
        match style {
            TextStyle::Bold => write!(writer, "{}", text.bold()),
            TextStyle::Dimmed => write!(writer, "{}", text.dimmed()),
        }
    }

    fn write_styled_line<W: Write>(&self, writer: &mut W, ch: &str, width: usize, style: TextStyle) -> fmt::Result {
        if !self.enabled {
            return write!(writer, "{}", ch.repeat(width));
        }
        match style {
            TextStyle::Bold => write!(writer, "{}", ch.repeat(width).bold()),
            TextStyle::Dimmed => write!(writer, "{}", ch.repeat(width).dimmed()),
        }
    }

    fn write_colorized_score<W: Write>(&self, writer: &mut W, score: f64, padding: Option<usize>) -> fmt::Result {
        let rendered = match padding {
            Some(width) => format!("{score:>width$.2}"),
            None => format!("{score:.2}"),
        };

        if !self.enabled {
            return write!(writer, "{rendered}");
        }

        match self.config.band_for_score(score) {
            0 => write!(writer, "{}", rendered.red()),
            1 => write!(writer, "{}", rendered.yellow()),
            _ => write!(writer, "{}", rendered.green()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricResult;

    fn sample_report() -> ScoreReport {
        ScoreReport::new(
            "https://huggingface.co/org/model",
            "org/model",
            vec![
                ("bus_factor", MetricResult::new(0.9, "healthy repository")),
                ("ramp_up_time", MetricResult::new(0.2, "no readme")),
            ],
        )
    }

    #[test]
    fn test_report_without_color() {
        let mut output = String::new();
        generate(&sample_report(), &Config::default(), ColorMode::Never, &mut output).unwrap();

        assert!(output.contains("Model        : org/model"));
        assert!(output.contains("URL          : https://huggingface.co/org/model"));
        assert!(output.contains("Overall Score: 0.55"));
        assert!(output.contains("bus_factor"));
        assert!(output.contains("0.90"));
        assert!(output.contains("healthy repository"));
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_report_with_color_emits_ansi() {
        let mut output = String::new();
        generate(&sample_report(), &Config::default(), ColorMode::Always, &mut output).unwrap();
        assert!(output.contains('\u{1b}'));
    }

    #[test]
    fn test_bare_model_id_omits_url_line() {
        let report = ScoreReport::new("org/model", "org/model", vec![]);
        let mut output = String::new();
        generate(&report, &Config::default(), ColorMode::Never, &mut output).unwrap();
        assert!(!output.contains("URL"));
    }
}
