//! # Flat-File Record Codec
//!
//! Encodes a [`Product`] as one line of the inventory file and back.
//!
//! ## Line Format
//! ```text
//! name,quantity,unit_price,total_price\n
//!
//! iphone,2,1350,2700
//! dell xps,1,2100,2100
//! ```
//!
//! No header, no quoting. A comma inside a name produces a line with too many
//! fields, which [`decode_line`] rejects.

use crate::error::{CoreError, CoreResult};
use crate::types::Product;
use crate::FIELD_SEPARATOR;

const FIELD_COUNT: usize = 4;

/// Encodes a product as a newline-terminated line.
pub fn encode_line(product: &Product) -> String {
    format!(
        "{name}{sep}{quantity}{sep}{unit_price}{sep}{total}\n",
        name = product.name,
        quantity = product.quantity,
        unit_price = product.unit_price,
        total = product.total_price,
        sep = FIELD_SEPARATOR,
    )
}

/// Decodes one line (with or without its trailing newline).
///
/// The stored `total_price` is kept as read, even if it disagrees with
/// `quantity * unit_price`.
pub fn decode_line(line: &str) -> CoreResult<Product> {
    let trimmed = line.trim_end_matches(&['\r', '\n'][..]);
    let fields: Vec<&str> = trimmed.split(FIELD_SEPARATOR).collect();

    if fields.len() != FIELD_COUNT {
        return Err(CoreError::malformed(
            trimmed,
            format!("expected {} fields, found {}", FIELD_COUNT, fields.len()),
        ));
    }

    if fields[0].is_empty() {
        return Err(CoreError::malformed(trimmed, "empty name"));
    }

    let number = |index: usize, field: &str| -> CoreResult<i64> {
        fields[index]
            .trim()
            .parse::<i64>()
            .map_err(|_| CoreError::malformed(trimmed, format!("{} is not an integer", field)))
    };

    Ok(Product {
        name: fields[0].to_string(),
        quantity: number(1, "quantity")?,
        unit_price: number(2, "unit_price")?,
        total_price: number(3, "total_price")?,
    })
}

/// Encodes a full sequence of products as file contents.
pub fn encode_all(products: &[Product]) -> String {
    products.iter().map(encode_line).collect()
}

/// Splits raw file contents into decoded products.
///
/// Blank lines are ignored. Each malformed line, including one that is not
/// valid UTF-8, is returned as an `Err` in place so the caller decides
/// whether to skip or fail.
pub fn decode_all(contents: &[u8]) -> Vec<CoreResult<Product>> {
    contents
        .split(|&byte| byte == b'\n')
        .filter(|line| !line.iter().all(u8::is_ascii_whitespace))
        .map(|line| match std::str::from_utf8(line) {
            Ok(line) => decode_line(line),
            Err(_) => Err(CoreError::malformed(
                String::from_utf8_lossy(line),
                "not valid UTF-8",
            )),
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
