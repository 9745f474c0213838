use crate::models::merge::{FieldTransfer, MergeCandidate, MergePlan, TickerResolution};
use crate::models::stock::Stock;

/// Resolves what a proposed ticker change means for the stock list.
///
/// Pure business logic — no I/O, no API calls. Easy to test.
pub struct MergeService;

impl MergeService {
    pub fn new() -> Self {
        Self
    }

    /// Decide whether renaming `current` to `proposed` is a plain rename or
    /// a merge with the one other stock already holding that ticker.
    ///
    /// Tickers compare case-insensitively; the survivor still receives
    /// `proposed` in the caller's casing. Renaming a stock to its own
    /// ticker (any casing) is always a simple rename. Malformed records
    /// never error, they just score as empty.
    pub fn resolve(
        &self,
        proposed: &str,
        current: &Stock,
        all_stocks: &[Stock],
    ) -> TickerResolution {
        let wanted = proposed.to_uppercase();

        if current.ticker.to_uppercase() == wanted {
            return TickerResolution::SimpleRename {
                stock_id: current.id,
                new_ticker: proposed.to_string(),
            };
        }

        // Should the list already hold several records with this ticker,
        // the first one in list order wins the comparison.
        let existing = all_stocks
            .iter()
            .find(|s| s.id != current.id && s.ticker.to_uppercase() == wanted);

        match existing {
            None => TickerResolution::SimpleRename {
                stock_id: current.id,
                new_ticker: proposed.to_string(),
            },
            Some(other) => TickerResolution::Merge(self.plan_merge(proposed, current, other)),
        }
    }

    /// Build the merge plan for two stocks that will share `proposed`.
    ///
    /// The record with strictly more filled fields survives; on a tie the
    /// record being edited does. Every field empty on the survivor and
    /// filled on the other record is scheduled for transfer.
    fn plan_merge(&self, proposed: &str, edited: &Stock, existing: &Stock) -> MergePlan {
        let edited = MergeCandidate::evaluate(edited);
        let existing = MergeCandidate::evaluate(existing);

        let (target, source) = if existing.filled_count > edited.filled_count {
            (existing, edited)
        } else {
            (edited, existing)
        };

        let transfers: Vec<FieldTransfer> = target
            .empty_fields
            .iter()
            .filter(|field| field.is_filled_in(&source.stock))
            .filter_map(|field| {
                field.value_of(&source.stock).map(|value| FieldTransfer {
                    field: *field,
                    value,
                })
            })
            .collect();

        MergePlan {
            target: target.stock,
            source: source.stock,
            new_ticker: proposed.to_string(),
            transfers,
        }
    }
}

impl Default for MergeService {
    fn default() -> Self {
        Self::new()
    }
}
