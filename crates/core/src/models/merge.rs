use serde::{Deserialize, Serialize};

use crate::models::stock::{FieldValue, Stock, StockField, StockUpdate};

/// What a proposed ticker change turns out to mean.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TickerResolution {
    /// No other stock holds the ticker; a plain rename is enough.
    SimpleRename { stock_id: i64, new_ticker: String },

    /// Exactly one other stock already holds it; the two records merge.
    Merge(MergePlan),
}

impl TickerResolution {
    #[must_use]
    pub fn is_merge(&self) -> bool {
        matches!(self, TickerResolution::Merge(_))
    }
}

/// Completeness evaluation of one stock, used to pick the merge survivor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeCandidate {
    pub stock: Stock,
    /// How many editable fields hold real data.
    pub filled_count: usize,
    /// The fields still empty on this record.
    pub empty_fields: Vec<StockField>,
}

impl MergeCandidate {
    #[must_use]
    pub fn evaluate(stock: &Stock) -> Self {
        let empty_fields: Vec<StockField> = StockField::ALL
            .iter()
            .copied()
            .filter(|f| !f.is_filled_in(stock))
            .collect();
        Self {
            filled_count: StockField::ALL.len() - empty_fields.len(),
            stock: stock.clone(),
            empty_fields,
        }
    }
}

/// One field copied from the record being deleted to the survivor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldTransfer {
    pub field: StockField,
    pub value: FieldValue,
}

/// The full plan for merging two stocks that share a ticker.
///
/// `target` survives and receives `new_ticker` plus every transfer;
/// `source` is deleted afterwards. The plan itself has no side effects,
/// so the UI can show it on a confirmation screen before anything runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergePlan {
    /// The surviving record, with its pre-merge data.
    pub target: Stock,
    /// The record that will be deleted.
    pub source: Stock,
    /// Ticker the survivor receives, in the caller's casing.
    pub new_ticker: String,
    /// Fields to copy from `source`, target-empty and source-filled only.
    pub transfers: Vec<FieldTransfer>,
}

impl MergePlan {
    /// The single batched update for the target: new ticker plus every
    /// transferred field.
    #[must_use]
    pub fn to_update(&self) -> StockUpdate {
        let mut update = StockUpdate::new().with_ticker(self.new_ticker.clone());
        for transfer in &self.transfers {
            update.set(transfer.field, transfer.value.clone());
        }
        update
    }

    /// What the target will look like once the merge has been applied.
    #[must_use]
    pub fn preview(&self) -> Stock {
        let mut merged = self.target.clone();
        merged.ticker = self.new_ticker.clone();
        for transfer in &self.transfers {
            merged.set_field(transfer.field, Some(transfer.value.clone()));
        }
        merged
    }

    /// Audit reason recorded when the source record is deleted,
    /// e.g. `Merged into AAPL (Apple Inc.)`.
    #[must_use]
    pub fn deletion_reason(&self) -> String {
        let merged = self.preview();
        match merged.company_name.as_deref() {
            Some(name) if !name.is_empty() => {
                format!("Merged into {} ({})", self.new_ticker, name)
            }
            _ => format!("Merged into {}", self.new_ticker),
        }
    }
}
