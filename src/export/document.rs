//! PDF export of the visitor list

use chrono::{DateTime, Local};
use genpdf::{elements, style, Element};

use crate::{
    config::ExportConfig,
    error::{AppError, AppResult},
};

use super::{ExportRow, HEADERS};

/// Relative column widths, matching `HEADERS`
const COLUMN_WEIGHTS: [usize; 8] = [3, 2, 2, 2, 3, 1, 2, 2];

#[derive(Debug, Clone)]
pub struct DocumentExporter {
    font_dir: String,
    font_family: String,
    title: String,
}

impl DocumentExporter {
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            font_dir: config.font_dir.clone(),
            font_family: config.font_family.clone(),
            title: config.title.clone(),
        }
    }

    /// Render the rows as a titled table
    pub fn render(&self, rows: &[ExportRow], generated_at: DateTime<Local>) -> AppResult<Vec<u8>> {
        let font_family = genpdf::fonts::from_files(&self.font_dir, &self.font_family, None)
            .map_err(|e| {
                AppError::Export(format!(
                    "font family {} not found in {}: {}",
                    self.font_family, self.font_dir, e
                ))
            })?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(self.title.clone());
        doc.set_font_size(9);
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        doc.push(
            elements::Paragraph::new(self.title.clone())
                .styled(style::Style::new().bold().with_font_size(16)),
        );
        doc.push(elements::Paragraph::new(format!(
            "Generado: {}   Registros: {}",
            generated_at.format("%d/%m/%Y %H:%M"),
            rows.len()
        )));
        doc.push(elements::Break::new(1.5));

        let mut table = elements::TableLayout::new(COLUMN_WEIGHTS.to_vec());
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let bold = style::Style::new().bold();
        let mut header = table.row();
        for title in HEADERS {
            header.push_element(elements::Paragraph::new(title).styled(bold));
        }
        header
            .push()
            .map_err(|e| AppError::Export(format!("table header: {}", e)))?;

        for row in rows {
            let mut line = table.row();
            for cell in &row.cells {
                line.push_element(elements::Paragraph::new(cell.as_str()).padded(1));
            }
            line.push()
                .map_err(|e| AppError::Export(format!("table row: {}", e)))?;
        }

        doc.push(table);

        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::Export(format!("render: {}", e)))?;

        tracing::debug!("Rendered visitor PDF with {} rows ({} bytes)", rows.len(), buffer.len());
        Ok(buffer)
    }
}
