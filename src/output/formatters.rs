//! Output formatting functionality
//!
//! This module provides formatters for different output formats.

use crate::error::{ReqwalkerError, Result};
use crate::models::{AnalysisReport, AnalysisSummary, Requirement, ResolutionSource};
use ansi_term::Colour::{Blue, Cyan, Green, Red, Yellow};
use ansi_term::Style;

fn paint_source(source: ResolutionSource, use_colors: bool) -> String {
    if !use_colors {
        return source.to_string();
    }
    match source {
        ResolutionSource::Installed => Green.paint("installed").to_string(),
        ResolutionSource::Index => Cyan.paint("index").to_string(),
        ResolutionSource::Unresolved => Yellow.paint("unresolved").to_string(),
    }
}

fn heading(text: &str, use_colors: bool) -> String {
    if use_colors {
        Blue.bold().paint(text).to_string()
    } else {
        text.to_string()
    }
}

/// Format one requirement line
pub fn format_requirement_text(requirement: &Requirement, use_colors: bool, verbose: bool) -> String {
    let line = requirement.to_string();
    let line = match (use_colors, requirement.is_pinned()) {
        (true, true) => Style::new().bold().paint(line).to_string(),
        (true, false) => Yellow.paint(line).to_string(),
        (false, _) => line,
    };

    if verbose {
        let import_note = if requirement.import_name != requirement.package {
            format!(", import {}", requirement.import_name)
        } else {
            String::new()
        };
        format!(
            "  {} ({}{})\n",
            line,
            paint_source(requirement.source, use_colors),
            import_note
        )
    } else {
        format!("  {}\n", line)
    }
}

/// Format the analysis report as text
pub fn format_report_text(report: &AnalysisReport, use_colors: bool, verbose: bool) -> String {
    let mut output = String::new();
    let summary = &report.summary;

    output.push_str(&format!("{}\n\n", heading("Requirements Analysis Summary", use_colors)));

    output.push_str(&format!("Project: {}\n", report.project_root.display()));
    output.push_str(&format!(
        "Python files: {} ({} parsed, {} skipped)\n",
        summary.files_discovered, summary.files_parsed, summary.files_skipped
    ));
    output.push_str(&format!("Local imports: {}\n", summary.local_edges));
    output.push_str(&format!(
        "External modules: {} ({} standard library)\n",
        summary.external_modules, summary.stdlib_modules
    ));
    output.push_str(&format!(
        "Requirements: {} ({} installed, {} from index, {} unresolved)\n",
        summary.requirements, summary.pinned_installed, summary.pinned_index, summary.unresolved
    ));
    output.push_str(&format!(
        "Scan duration: {}\n",
        AnalysisSummary::format_duration(summary.scan_duration)
    ));
    output.push_str(&format!(
        "Resolve duration: {}\n",
        AnalysisSummary::format_duration(summary.resolve_duration)
    ));

    output.push_str(&format!("\n{}\n", heading("Requirements:", use_colors)));
    if report.requirements.is_empty() {
        output.push_str("  (none)\n");
    }
    for requirement in &report.requirements {
        output.push_str(&format_requirement_text(requirement, use_colors, verbose));
    }

    if !report.unresolved.is_empty() {
        let title = format!("Unresolved imports: {}", report.unresolved.len());
        if use_colors {
            output.push_str(&format!("\n{}\n", Yellow.bold().paint(title)));
        } else {
            output.push_str(&format!("\n{}\n", title));
        }
        for name in &report.unresolved {
            output.push_str(&format!("  {}\n", name));
        }
    }

    if !report.skipped_files.is_empty() {
        let title = format!("Skipped files: {}", report.skipped_files.len());
        if use_colors {
            output.push_str(&format!("\n{}\n", Red.bold().paint(title)));
        } else {
            output.push_str(&format!("\n{}\n", title));
        }
        for skipped in &report.skipped_files {
            if verbose {
                output.push_str(&format!("  {}: {}\n", skipped.file, skipped.reason));
            } else {
                output.push_str(&format!("  {}\n", skipped.file));
            }
        }
    }

    if verbose {
        output.push_str(&format!("\n{}\n", heading("Local Dependencies:", use_colors)));
        for (file, edges) in &report.dependencies {
            if edges.is_empty() {
                output.push_str(&format!("  {}\n", file));
            } else {
                output.push_str(&format!("  {} -> {}\n", file, edges.join(", ")));
            }
        }

        output.push_str(&format!("\n{}\n", heading("External Modules:", use_colors)));
        for module in &report.external_modules {
            output.push_str(&format!("  {}\n", module));
        }
    }

    output
}

/// Format the analysis report as JSON
pub fn format_report_json(report: &AnalysisReport, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    };
    json.map_err(|e| ReqwalkerError::JsonSerialize { source: e })
}

/// Format the resolved requirements as CSV, one row per requirement
pub fn format_report_csv(report: &AnalysisReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);

    writer.write_record(["Import", "Package", "Version", "Source", "Requirement"])?;

    for requirement in &report.requirements {
        let source = requirement.source.to_string();
        let line = requirement.to_string();
        writer.write_record([
            requirement.import_name.as_str(),
            requirement.package.as_str(),
            requirement.version.as_deref().unwrap_or(""),
            source.as_str(),
            line.as_str(),
        ])?;
    }

    let data = String::from_utf8(writer.into_inner().map_err(|e| ReqwalkerError::io_error(e.into_error()))?)
        .map_err(|e| ReqwalkerError::CsvSerialize { source: e })?;

    Ok(data)
}
