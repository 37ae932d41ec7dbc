//! Spreadsheet I/O.
//!
//! Only the first worksheet of a workbook is used and its first row is the
//! header. The format is chosen from the file extension.

use crate::error::{Result, VocabError};
use crate::types::Cell;
use std::path::Path;

/// Raw tabular content of one resource.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// Supported file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Xlsx,
    Csv,
}

impl SheetFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "xlsx" | "xlsm" => Some(Self::Xlsx),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// Reads and writes sheets at a path.
pub trait SheetStore {
    fn read(&self, path: &Path) -> Result<Sheet>;

    fn write(&self, path: &Path, sheet: &Sheet) -> Result<()>;
}

/// Filesystem store that dispatches on the file extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStore;

impl SheetStore for FileStore {
    fn read(&self, path: &Path) -> Result<Sheet> {
        match SheetFormat::from_path(path) {
            Some(SheetFormat::Xlsx) => read_xlsx(path),
            Some(SheetFormat::Csv) => read_csv(path),
            None => Err(VocabError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    fn write(&self, path: &Path, sheet: &Sheet) -> Result<()> {
        match SheetFormat::from_path(path) {
            Some(SheetFormat::Xlsx) => write_xlsx(path, sheet),
            Some(SheetFormat::Csv) => write_csv(path, sheet),
            None => Err(VocabError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

fn header_name(raw: &str, index: usize) -> String {
    let name = raw.trim();
    if name.is_empty() {
        format!("Unnamed: {}", index)
    } else {
        name.to_string()
    }
}

fn push_row(rows: &mut Vec<Vec<Cell>>, row: Vec<Cell>) {
    // blank lines carry no entry
    if row.iter().any(|c| !c.is_empty()) {
        rows.push(row);
    }
}

fn read_xlsx(path: &Path) -> Result<Sheet> {
    let book = umya_spreadsheet::reader::xlsx::read(path).map_err(|e| VocabError::sheet(path, e))?;
    let worksheet = book
        .get_sheet(&0)
        .ok_or_else(|| VocabError::sheet(path, "workbook has no worksheets"))?;

    let (max_col, max_row) = worksheet.get_highest_column_and_row();
    let columns = (1..=max_col)
        .map(|col| header_name(&worksheet.get_value((col, 1)), (col - 1) as usize))
        .collect();

    let mut rows = Vec::new();
    for row in 2..=max_row {
        let cells = (1..=max_col)
            .map(|col| xlsx_cell(worksheet.get_cell((col, row))))
            .collect();
        push_row(&mut rows, cells);
    }

    Ok(Sheet { columns, rows })
}

/// Keep the stored type: numeric cells become numbers, everything else text.
fn xlsx_cell(cell: Option<&umya_spreadsheet::Cell>) -> Cell {
    let Some(cell) = cell else {
        return Cell::Empty;
    };
    match cell.get_value_number() {
        Some(n) if n.is_nan() => Cell::Empty,
        Some(n) => Cell::Number(n),
        None => {
            let text = cell.get_value();
            if text.trim().is_empty() {
                Cell::Empty
            } else {
                Cell::Text(text.to_string())
            }
        }
    }
}

fn write_xlsx(path: &Path, sheet: &Sheet) -> Result<()> {
    let mut book = umya_spreadsheet::new_file();
    let worksheet = book
        .get_sheet_mut(&0)
        .ok_or_else(|| VocabError::sheet(path, "new workbook has no worksheet"))?;

    for (idx, column) in sheet.columns.iter().enumerate() {
        worksheet
            .get_cell_mut(((idx + 1) as u32, 1))
            .set_value_string(column.clone());
    }

    for (row_idx, row) in sheet.rows.iter().enumerate() {
        let row_num = (row_idx + 2) as u32;
        for (col_idx, cell) in row.iter().enumerate() {
            let coordinate = ((col_idx + 1) as u32, row_num);
            match cell {
                Cell::Empty => {}
                Cell::Number(n) => {
                    worksheet.get_cell_mut(coordinate).set_value_number(*n);
                }
                Cell::Text(s) => {
                    worksheet.get_cell_mut(coordinate).set_value_string(s.clone());
                }
            }
        }
    }

    umya_spreadsheet::writer::xlsx::write(&book, path).map_err(|e| VocabError::sheet(path, e))
}

fn read_csv(path: &Path) -> Result<Sheet> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| VocabError::sheet(path, e))?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| VocabError::sheet(path, e))?
        .iter()
        .enumerate()
        .map(|(idx, name)| header_name(name, idx))
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| VocabError::sheet(path, e))?;
        let cells = (0..columns.len())
            .map(|idx| Cell::parse(record.get(idx).unwrap_or("")))
            .collect();
        push_row(&mut rows, cells);
    }

    Ok(Sheet { columns, rows })
}

fn write_csv(path: &Path, sheet: &Sheet) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| VocabError::sheet(path, e))?;
    writer
        .write_record(&sheet.columns)
        .map_err(|e| VocabError::sheet(path, e))?;
    for row in &sheet.rows {
        let record: Vec<String> = (0..sheet.columns.len())
            .map(|idx| row.get(idx).map(Cell::to_string).unwrap_or_default())
            .collect();
        writer
            .write_record(&record)
            .map_err(|e| VocabError::sheet(path, e))?;
    }
    writer.flush()?;
    Ok(())
}
