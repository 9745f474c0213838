use serde::{Deserialize, Serialize};

use crate::models::stock::StockField;

/// One column of the stock table, as the user arranged it.
/// Saved as a JSON array in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPref {
    pub field: StockField,

    #[serde(default = "default_visible")]
    pub visible: bool,

    /// Pixel width, when the user has resized the column.
    #[serde(default)]
    pub width: Option<u16>,
}

fn default_visible() -> bool {
    true
}

impl ColumnPref {
    pub fn new(field: StockField) -> Self {
        Self {
            field,
            visible: true,
            width: None,
        }
    }
}

/// The out-of-the-box layout: every field visible, in display order.
#[must_use]
pub fn default_layout() -> Vec<ColumnPref> {
    StockField::ALL.iter().copied().map(ColumnPref::new).collect()
}
