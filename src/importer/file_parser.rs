// ==========================================
// Sistema BI Educativo - Analizador de archivos
// ==========================================
// Decodifica CSV y hojas de cálculo a filas crudas (RawRow).
// El índice de fila es 1-based sobre las filas de datos, igual
// que el rowIndex que asigna el cliente al subir JSON.
// ==========================================

use crate::domain::import::RawRow;
use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook, Reader, Xlsx};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;

// ==========================================
// CSV
// ==========================================
pub struct CsvParser;

impl CsvParser {
    pub fn parse(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        if let Some(ext) = file_path.extension() {
            if ext != "csv" {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // tolera filas de distinta longitud
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        let mut row_index = 0usize;
        for resultado in reader.records() {
            let record = resultado?;

            // omite filas completamente en blanco
            if record.iter().all(|v| v.trim().is_empty()) {
                continue;
            }

            row_index += 1;
            let mut row = RawRow::new(row_index);
            for (col, valor) in record.iter().enumerate() {
                if let Some(header) = headers.get(col) {
                    row = row.with_cell(header, valor.trim());
                }
            }
            rows.push(row);
        }

        Ok(rows)
    }
}

// ==========================================
// Excel
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    pub fn parse(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext.to_string()));
        }

        let mut workbook: Xlsx<_> = open_workbook(file_path)
            .map_err(|e: calamine::XlsxError| ImportError::ExcelParseError(e.to_string()))?;

        let sheet_names = workbook.sheet_names();
        if sheet_names.is_empty() {
            return Err(ImportError::ExcelParseError(
                "el archivo no tiene hojas".to_string(),
            ));
        }

        let sheet_name = sheet_names[0].clone();
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        let mut filas = range.rows();
        let encabezado = filas
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("el archivo no tiene filas".to_string()))?;

        let headers: Vec<String> = encabezado
            .iter()
            .map(|celda| celda.to_string().trim().to_string())
            .collect();

        let mut rows = Vec::new();
        let mut row_index = 0usize;
        for fila in filas {
            let valores: Vec<String> = fila
                .iter()
                .map(|celda| celda.to_string().trim().to_string())
                .collect();

            if valores.iter().all(|v| v.is_empty()) {
                continue;
            }

            row_index += 1;
            let mut row = RawRow::new(row_index);
            for (col, valor) in valores.iter().enumerate() {
                if let Some(header) = headers.get(col) {
                    row = row.with_cell(header, valor.as_str());
                }
            }
            rows.push(row);
        }

        Ok(rows)
    }
}

// ==========================================
// Selección automática por extensión
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Vec<RawRow>> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse(path),
            "xlsx" | "xls" => ExcelParser.parse(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
