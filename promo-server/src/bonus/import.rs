//! Bonus rule CSV parsing
//!
//! Expected header:
//! `network_code,product_sku_or_name,memory_gb,base_bonus,plan_min,plan_max,over_bonus`
//!
//! Blank optional fields stay absent; a blank `memory_gb` means a wildcard
//! bonus row, distinct from `memory_gb = 0`. Fields may be double-quoted to
//! carry commas. Reconciliation against the database happens in
//! [`super::engine::BonusEngine::apply_import`].

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::utils::{AppError, AppResult};

const HEADER: [&str; 7] = [
    "network_code",
    "product_sku_or_name",
    "memory_gb",
    "base_bonus",
    "plan_min",
    "plan_max",
    "over_bonus",
];

/// One parsed CSV row
#[derive(Debug, Clone, PartialEq)]
pub struct ImportItem {
    pub network_code: String,
    pub product_identifier: String,
    pub memory_gb: Option<i64>,
    pub base_bonus: Decimal,
    pub plan_min: Option<f64>,
    pub plan_max: Option<f64>,
    pub over_bonus: Option<Decimal>,
}

/// Row ids touched by an import run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportSummary {
    pub created: Vec<String>,
    pub updated: Vec<String>,
    pub dry_run: bool,
}

/// Split one line on commas, honoring double-quoted fields. A doubled quote
/// inside a quoted field is a literal quote.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if current.trim().is_empty() => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }
    fields.push(current);
    fields
}

fn field(fields: &[String], idx: usize) -> Option<&str> {
    fields
        .get(idx)
        .map(|f| f.trim())
        .filter(|f| !f.is_empty())
}

fn parse_i64(value: &str, line: usize, column: &str) -> AppResult<i64> {
    value
        .parse()
        .map_err(|_| AppError::validation(format!("Line {line}: invalid {column}: '{value}'")))
}

fn parse_f64(value: &str, line: usize, column: &str) -> AppResult<f64> {
    value
        .parse()
        .map_err(|_| AppError::validation(format!("Line {line}: invalid {column}: '{value}'")))
}

fn parse_decimal(value: &str, line: usize, column: &str) -> AppResult<Decimal> {
    Decimal::from_str(value)
        .map_err(|_| AppError::validation(format!("Line {line}: invalid {column}: '{value}'")))
}

/// Parse CSV content into import items. Rejects a wrong header and any row
/// missing the required columns.
pub fn parse_csv(content: &str) -> AppResult<Vec<ImportItem>> {
    let mut lines = content.lines().enumerate();

    let (_, header) = lines
        .next()
        .ok_or_else(|| AppError::validation("Empty import file"))?;
    let columns: Vec<&str> = header.split(',').map(|c| c.trim()).collect();
    if columns != HEADER {
        return Err(AppError::validation(format!(
            "Unexpected header, want: {}",
            HEADER.join(",")
        )));
    }

    let mut items = Vec::new();
    for (idx, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = idx + 1;
        let fields = split_fields(line);

        let network_code = field(&fields, 0)
            .ok_or_else(|| AppError::validation(format!("Line {line_no}: missing network_code")))?;
        let product_identifier = field(&fields, 1).ok_or_else(|| {
            AppError::validation(format!("Line {line_no}: missing product_sku_or_name"))
        })?;
        let base_bonus = field(&fields, 3)
            .ok_or_else(|| AppError::validation(format!("Line {line_no}: missing base_bonus")))
            .and_then(|v| parse_decimal(v, line_no, "base_bonus"))?;

        let memory_gb = field(&fields, 2)
            .map(|v| parse_i64(v, line_no, "memory_gb"))
            .transpose()?;
        let plan_min = field(&fields, 4)
            .map(|v| parse_f64(v, line_no, "plan_min"))
            .transpose()?;
        let plan_max = field(&fields, 5)
            .map(|v| parse_f64(v, line_no, "plan_max"))
            .transpose()?;
        let over_bonus = field(&fields, 6)
            .map(|v| parse_decimal(v, line_no, "over_bonus"))
            .transpose()?;

        items.push(ImportItem {
            network_code: network_code.to_string(),
            product_identifier: product_identifier.to_string(),
            memory_gb,
            base_bonus,
            plan_min,
            plan_max,
            over_bonus,
        });
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER_LINE: &str =
        "network_code,product_sku_or_name,memory_gb,base_bonus,plan_min,plan_max,over_bonus";

    #[test]
    fn parses_full_and_sparse_rows() {
        let csv = format!(
            "{HEADER_LINE}\nMTS,SKU-123,128,9000,101,110,20000\nBEELINE,Galaxy S25,,5000,,,\n"
        );
        let items = parse_csv(&csv).unwrap();
        assert_eq!(items.len(), 2);

        assert_eq!(items[0].network_code, "MTS");
        assert_eq!(items[0].memory_gb, Some(128));
        assert_eq!(items[0].plan_min, Some(101.0));
        assert_eq!(items[0].plan_max, Some(110.0));
        assert_eq!(items[0].over_bonus, Some(Decimal::from(20000)));

        // blank memory stays absent, it is not zero
        assert_eq!(items[1].memory_gb, None);
        assert_eq!(items[1].over_bonus, None);
    }

    #[test]
    fn open_ended_tier_has_min_without_max() {
        let csv = format!("{HEADER_LINE}\nMTS,SKU-123,64,7000,120,,50000\n");
        let items = parse_csv(&csv).unwrap();
        assert_eq!(items[0].plan_min, Some(120.0));
        assert_eq!(items[0].plan_max, None);
    }

    #[test]
    fn quoted_product_name_may_contain_commas() {
        let csv = format!("{HEADER_LINE}\nMTS,\"Galaxy S25, Ultra\",128,9000,,,\n");
        let items = parse_csv(&csv).unwrap();
        assert_eq!(items[0].product_identifier, "Galaxy S25, Ultra");
        assert_eq!(items[0].memory_gb, Some(128));
    }

    #[test]
    fn doubled_quote_inside_quoted_field_is_literal() {
        let csv = format!("{HEADER_LINE}\nMTS,\"Phone \"\"Pro\"\"\",64,7000,,,\n");
        let items = parse_csv(&csv).unwrap();
        assert_eq!(items[0].product_identifier, "Phone \"Pro\"");
    }

    #[test]
    fn rejects_wrong_header() {
        assert!(parse_csv("foo,bar\nMTS,x").is_err());
    }

    #[test]
    fn rejects_missing_base_bonus() {
        let csv = format!("{HEADER_LINE}\nMTS,SKU-123,128,,,,\n");
        assert!(parse_csv(&csv).is_err());
    }

    #[test]
    fn rejects_garbage_numbers() {
        let csv = format!("{HEADER_LINE}\nMTS,SKU-123,lots,9000,,,\n");
        assert!(parse_csv(&csv).is_err());
    }

    #[test]
    fn skips_blank_lines() {
        let csv = format!("{HEADER_LINE}\n\nMTS,SKU-123,128,9000,,,\n\n");
        assert_eq!(parse_csv(&csv).unwrap().len(), 1);
    }
}
