//! Programme table rendering.

use ptn_types::RowRecord;

use crate::view::{TableRow, View};

/// Cells for one record: programme, capacity (or `not_available`), fee as sent
pub fn table_row(record: &RowRecord, not_available: &str) -> TableRow {
    let capacity = match &record.capacity {
        Some(value) if !value.is_blank() => value.to_string(),
        _ => not_available.to_string(),
    };
    let fee = record
        .fee
        .as_ref()
        .map(|value| value.to_string())
        .unwrap_or_default();
    [record.category.clone(), capacity, fee]
}

/// Replace the table body with one row per record, in server order
pub fn update_table<V: View + ?Sized>(view: &mut V, records: &[RowRecord], not_available: &str) {
    view.clear_table();
    for record in records {
        view.append_row(&table_row(record, not_available));
    }
    tracing::debug!(rows = records.len(), "table updated");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingView;
    use ptn_types::CellValue;

    fn record(name: &str, capacity: Option<CellValue>, fee: &str) -> RowRecord {
        RowRecord::new(name, capacity, Some(CellValue::from(fee)))
    }

    fn cells(name: &str, capacity: &str, fee: &str) -> TableRow {
        [name.to_string(), capacity.to_string(), fee.to_string()]
    }

    #[test]
    fn test_rows_keep_input_order() {
        let mut view = RecordingView::with_cards(&[]);
        let records = vec![
            record("Kedokteran", Some(CellValue::Number(40.0)), "Rp25.000.000"),
            record("Akuntansi", Some(CellValue::Number(60.0)), "Rp12.000.000"),
            record("Hukum", Some(CellValue::from("35")), "Rp10.500.000"),
        ];

        update_table(&mut view, &records, "N/A");

        assert_eq!(
            view.rows,
            vec![
                cells("Kedokteran", "40", "Rp25.000.000"),
                cells("Akuntansi", "60", "Rp12.000.000"),
                cells("Hukum", "35", "Rp10.500.000"),
            ]
        );
    }

    #[test]
    fn test_blank_capacity_is_not_available() {
        for capacity in [
            None,
            Some(CellValue::Number(0.0)),
            Some(CellValue::from("")),
        ] {
            let row = table_row(&record("Farmasi", capacity, "Rp9.000.000"), "N/A");
            assert_eq!(row[1], "N/A");
        }
    }

    #[test]
    fn test_fee_shown_as_provided() {
        let row = table_row(
            &RowRecord::new("Teknik Sipil", None, Some(CellValue::Number(7500000.0))),
            "N/A",
        );
        assert_eq!(row[2], "7500000");

        let row = table_row(&RowRecord::new("Teknik Sipil", None, None), "N/A");
        assert_eq!(row[2], "");
    }

    #[test]
    fn test_empty_input_clears_body() {
        let mut view = RecordingView::with_cards(&[]);
        view.rows.push(cells("old", "1", "Rp1"));

        update_table(&mut view, &[], "N/A");

        assert!(view.rows.is_empty());
        assert_eq!(view.table_clears, 1);
    }
}
