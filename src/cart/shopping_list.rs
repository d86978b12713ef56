use std::collections::BTreeMap;

use crate::cart::repo::CartIngredientRow;
use crate::config::ShoppingListOrder;

/// A single aggregated requirement: everything the cart needs of one
/// ingredient in one measurement unit. Never persisted; recomputed per
/// request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListLine {
    pub name: String,
    pub measurement_unit: String,
    pub total_amount: i64,
}

/// Collapses raw (name, unit, amount) requirements into one line per
/// `(name, unit)` pair, summing amounts in 64 bits. Lines sharing a name
/// but not a unit stay separate.
///
/// The ordered map already yields ascending `(name, unit)` order, which
/// is the default contract; the amount policy re-sorts by descending
/// total with name as tie-break.
pub fn aggregate(rows: Vec<CartIngredientRow>, order: ShoppingListOrder) -> Vec<ShoppingListLine> {
    let mut totals: BTreeMap<(String, String), i64> = BTreeMap::new();
    for row in rows {
        *totals
            .entry((row.name, row.measurement_unit))
            .or_insert(0) += i64::from(row.amount);
    }

    let mut lines: Vec<ShoppingListLine> = totals
        .into_iter()
        .map(|((name, measurement_unit), total_amount)| ShoppingListLine {
            name,
            measurement_unit,
            total_amount,
        })
        .collect();

    if order == ShoppingListOrder::Amount {
        lines.sort_by(|a, b| {
            b.total_amount
                .cmp(&a.total_amount)
                .then_with(|| a.name.cmp(&b.name))
        });
    }

    lines
}

/// Renders the downloadable document body: one `"<name> (<unit>) - <total>"`
/// row per line, newline-joined, no header or trailer. An empty list
/// renders as an empty string.
pub fn render(lines: &[ShoppingListLine]) -> String {
    lines
        .iter()
        .map(|line| {
            format!(
                "{} ({}) - {}",
                line.name, line.measurement_unit, line.total_amount
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, unit: &str, amount: i32) -> CartIngredientRow {
        CartIngredientRow {
            name: name.into(),
            measurement_unit: unit.into(),
            amount,
        }
    }

    #[test]
    fn sums_identical_name_and_unit_across_recipes() {
        let lines = aggregate(
            vec![row("Flour", "g", 200), row("Flour", "g", 100)],
            ShoppingListOrder::Name,
        );
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].name, "Flour");
        assert_eq!(lines[0].total_amount, 300);
    }

    #[test]
    fn same_name_different_unit_stays_separate() {
        let lines = aggregate(
            vec![row("Salt", "g", 10), row("Salt", "ml", 5)],
            ShoppingListOrder::Name,
        );
        assert_eq!(lines.len(), 2);
        assert_eq!(
            (lines[0].measurement_unit.as_str(), lines[0].total_amount),
            ("g", 10)
        );
        assert_eq!(
            (lines[1].measurement_unit.as_str(), lines[1].total_amount),
            ("ml", 5)
        );
    }

    #[test]
    fn empty_cart_yields_empty_list_and_body() {
        let lines = aggregate(vec![], ShoppingListOrder::Name);
        assert!(lines.is_empty());
        assert_eq!(render(&lines), "");
    }

    #[test]
    fn two_recipe_cart_aggregates_and_orders_by_name() {
        // Recipe A: Flour 200 g, Egg 2 pcs. Recipe B: Flour 100 g, Milk 150 ml.
        let rows = vec![
            row("Flour", "g", 200),
            row("Egg", "pcs", 2),
            row("Flour", "g", 100),
            row("Milk", "ml", 150),
        ];
        let lines = aggregate(rows, ShoppingListOrder::Name);
        assert_eq!(
            render(&lines),
            "Egg (pcs) - 2\nFlour (g) - 300\nMilk (ml) - 150"
        );
    }

    #[test]
    fn aggregation_is_deterministic_across_calls() {
        let rows = || {
            vec![
                row("Onion", "pcs", 1),
                row("Butter", "g", 50),
                row("Onion", "pcs", 2),
                row("Apple", "pcs", 4),
            ]
        };
        let first = aggregate(rows(), ShoppingListOrder::Name);
        for _ in 0..10 {
            assert_eq!(aggregate(rows(), ShoppingListOrder::Name), first);
        }
    }

    #[test]
    fn amount_policy_orders_by_descending_total_then_name() {
        let rows = vec![
            row("Egg", "pcs", 2),
            row("Flour", "g", 300),
            row("Milk", "ml", 150),
            row("Butter", "g", 150),
        ];
        let lines = aggregate(rows, ShoppingListOrder::Amount);
        let names: Vec<&str> = lines.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Flour", "Butter", "Milk", "Egg"]);
    }

    #[test]
    fn accumulates_past_the_32_bit_range() {
        let rows = vec![
            row("Water", "ml", i32::MAX),
            row("Water", "ml", i32::MAX),
            row("Water", "ml", i32::MAX),
        ];
        let lines = aggregate(rows, ShoppingListOrder::Name);
        assert_eq!(lines[0].total_amount, i64::from(i32::MAX) * 3);
    }

    #[test]
    fn render_matches_wire_format() {
        let lines = vec![ShoppingListLine {
            name: "Sugar".into(),
            measurement_unit: "g".into(),
            total_amount: 75,
        }];
        assert_eq!(render(&lines), "Sugar (g) - 75");
    }
}
