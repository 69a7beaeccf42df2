//! Text report formatter

use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::select::Order;
use crate::summary::Summary;
use crate::tree::{FileEntry, format_size};

use super::Report;
use super::config::OutputConfig;

/// Writes the summary, the top consumers and optionally every file.
pub struct ReportFormatter<W: WriteColor> {
    config: OutputConfig,
    out: W,
}

impl ReportFormatter<StandardStream> {
    pub fn stdout(config: OutputConfig) -> Self {
        let choice = if config.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self::new(config, StandardStream::stdout(choice))
    }
}

impl<W: WriteColor> ReportFormatter<W> {
    pub fn new(config: OutputConfig, out: W) -> Self {
        Self { config, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn write_report(&mut self, report: &Report) -> io::Result<()> {
        self.write_summary(&report.summary)?;
        writeln!(self.out)?;
        self.write_top(&report.top, report.order, report.limit)?;
        if self.config.list_files {
            if let Some(files) = &report.files {
                writeln!(self.out)?;
                self.write_listing(files)?;
            }
        }
        Ok(())
    }

    pub fn write_summary(&mut self, summary: &Summary) -> io::Result<()> {
        self.header("Summary Report")?;
        writeln!(self.out, "--------------")?;
        writeln!(self.out, "Total Files:       {}", summary.files)?;
        writeln!(self.out, "Total Directories: {}", summary.directories)?;
        writeln!(self.out, "Total Size:        {}", format_size(summary.total_size))?;
        Ok(())
    }

    pub fn write_top(
        &mut self,
        entries: &[FileEntry],
        order: Order,
        limit: Option<usize>,
    ) -> io::Result<()> {
        let title = match limit {
            Some(n) => format!("Top {} {} files:", n, order.label()),
            None => format!("All files, {} first:", order.label()),
        };
        self.header(&title)?;

        if entries.is_empty() {
            writeln!(self.out, "  (no files)")?;
            return Ok(());
        }
        for (i, entry) in entries.iter().enumerate() {
            write!(self.out, "{:>3}. {}: ", i + 1, entry.path.display())?;
            self.size(entry.size, 0)?;
            writeln!(self.out)?;
        }
        Ok(())
    }

    pub fn write_listing(&mut self, files: &[FileEntry]) -> io::Result<()> {
        self.header("Files:")?;
        for entry in files {
            write!(self.out, "  ")?;
            self.size(entry.size, 8)?;
            writeln!(self.out, "  {}", entry.path.display())?;
        }
        Ok(())
    }

    fn header(&mut self, text: &str) -> io::Result<()> {
        let mut bold = ColorSpec::new();
        bold.set_bold(true);
        self.out.set_color(&bold)?;
        writeln!(self.out, "{}", text)?;
        self.out.reset()
    }

    fn size(&mut self, bytes: u64, width: usize) -> io::Result<()> {
        let mut cyan = ColorSpec::new();
        cyan.set_fg(Some(Color::Cyan));
        self.out.set_color(&cyan)?;
        write!(self.out, "{:>width$}", format_size(bytes))?;
        self.out.reset()
    }
}

/// Print the text report to stdout.
pub fn print_report(report: &Report, config: OutputConfig) -> io::Result<()> {
    let mut formatter = ReportFormatter::stdout(config);
    formatter.write_report(report)?;
    formatter.out.flush()
}
