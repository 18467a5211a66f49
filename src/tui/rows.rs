use crate::model::ItemId;
use crate::ops::MAX_ITEMS;

/// Trailing non-filled rows shown past the last item (input + empties)
pub const VISIBLE_SLOTS: usize = 3;

/// Opacity tier of a placeholder row, by distance from the last row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeLevel {
    /// Two or more rows from the end (brightest of the three)
    Near,
    Mid,
    /// The very last row
    Far,
}

impl FadeLevel {
    pub fn from_end(from_end: usize) -> Self {
        match from_end {
            0 => FadeLevel::Far,
            1 => FadeLevel::Mid,
            _ => FadeLevel::Near,
        }
    }

    /// Fade for the row at `index` in a list of `row_count` rows
    pub fn at(index: usize, row_count: usize) -> Self {
        Self::from_end(row_count.saturating_sub(1).saturating_sub(index))
    }
}

/// One display slot, derived from the list and never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Filled(ItemId),
    /// Where the next item is typed
    Input,
    Empty(FadeLevel),
}

impl Row {
    pub fn is_editable(&self) -> bool {
        matches!(self, Row::Filled(_) | Row::Input)
    }

    pub fn item_id(&self) -> Option<ItemId> {
        match self {
            Row::Filled(id) => Some(*id),
            _ => None,
        }
    }
}

/// Number of visible rows for a list of `item_count` items
pub fn row_count(item_count: usize) -> usize {
    (item_count + VISIBLE_SLOTS).min(MAX_ITEMS)
}

/// Derive the row sequence: one `Filled` row per item, the `Input` row while
/// the list has room, then fading `Empty` rows up to the visible cap.
pub fn derive_rows(ids: &[ItemId]) -> Vec<Row> {
    let n = ids.len();
    let count = row_count(n);
    let mut rows: Vec<Row> = ids.iter().copied().map(Row::Filled).collect();
    if n < MAX_ITEMS {
        rows.push(Row::Input);
    }
    rows.extend((rows.len()..count).map(|i| Row::Empty(FadeLevel::at(i, count))));
    rows.truncate(count);
    rows
}

/// Keep a selection inside `[0, row_count - 1]`
pub fn clamp_selection(selected: usize, row_count: usize) -> usize {
    selected.min(row_count.saturating_sub(1))
}
