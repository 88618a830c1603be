//! Terminal QR rendering of display items

use qrcode::render::unicode;
use qrcode::{EcLevel, QrCode};

use crate::display::DisplayItem;
use crate::error::{EnsQrError, Result};

/// Error correction used for every item; survives a partly obscured code
pub const QR_EC_LEVEL: EcLevel = EcLevel::H;

/// Encode the payload of `item` as a QR code
pub fn encode_item(item: &DisplayItem) -> Result<QrCode> {
    QrCode::with_error_correction_level(item.payload.as_bytes(), QR_EC_LEVEL)
        .map_err(|e| EnsQrError::QrCode(format!("{} ({}): {}", item.label, item.payload, e)))
}

/// Render `item` as half-block unicode art, two modules per character row
pub fn render_item(item: &DisplayItem) -> Result<String> {
    let code = encode_item(item)?;
    Ok(code
        .render::<unicode::Dense1x2>()
        .dark_color(unicode::Dense1x2::Light)
        .light_color(unicode::Dense1x2::Dark)
        .quiet_zone(true)
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::derive_items;
    use crate::records::{FieldValue, RecordSet};

    fn full_record_set() -> RecordSet {
        RecordSet::new(
            "vitalik.eth",
            [
                FieldValue::Found("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045".to_string()),
                FieldValue::Found("VitalikButerin".to_string()),
                FieldValue::Found("vitalik".to_string()),
                FieldValue::Found("vbuterin".to_string()),
                FieldValue::Found("v@example.org".to_string()),
                FieldValue::Found("https://vitalik.ca".to_string()),
            ],
            Some("https://vitalik.eth.limo".to_string()),
        )
    }

    #[test]
    fn test_every_item_encodes_at_level_h() {
        let items = derive_items(&full_record_set());
        assert_eq!(items.len(), 7);

        for item in items.iter() {
            let code = encode_item(item).unwrap();
            assert_eq!(code.error_correction_level(), EcLevel::H);
            assert!(code.width() >= 21);
        }
    }

    #[test]
    fn test_rendered_code_is_square_block() {
        let items = derive_items(&full_record_set());
        let item = items.get(0).unwrap();
        let code = encode_item(item).unwrap();
        let rendered = render_item(item).unwrap();

        let lines: Vec<&str> = rendered.lines().collect();
        // Two modules share one text row, so rows are about half the columns.
        let columns = lines[0].chars().count();
        assert!(columns >= code.width());
        assert!(lines.len() >= code.width() / 2);
        assert!(lines.iter().all(|line| line.chars().count() == columns));
    }

    #[test]
    fn test_oversized_payload_is_an_error() {
        let item = DisplayItem {
            label: "URL",
            payload: "x".repeat(4000),
            field: crate::records::Field::Url,
        };
        assert!(matches!(encode_item(&item), Err(EnsQrError::QrCode(_))));
    }
}
