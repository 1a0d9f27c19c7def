//! Routine request prompt.

use crate::catalog::Product;
use crate::error::{PickerError, Result};
use crate::selection::SelectionSet;

/// Instruction that opens every routine request.
pub const ROUTINE_INSTRUCTION: &str = "Create a personalized routine using only the following products. \
Explain the order to use them in and when to use each one.";

/// Builds the user message asking for a routine over the selected products.
///
/// Each resolvable id contributes a `name (brand): description` block, in
/// selection order, separated from the instruction and from each other by a
/// blank line. Ids with no matching product are skipped. A selection with no
/// resolvable product, empty or all dangling, is rejected so that no
/// empty-product request is ever relayed.
pub fn build_routine_prompt(selection: &SelectionSet, products: &[Product]) -> Result<String> {
    let resolved = selection.resolve(products);
    if resolved.is_empty() {
        return Err(PickerError::EmptySelection);
    }

    let mut blocks = vec![ROUTINE_INSTRUCTION.to_string()];
    blocks.extend(
        resolved
            .into_iter()
            .map(|product| format!("{} ({}): {}", product.name, product.brand, product.description)),
    );

    Ok(blocks.join("\n\n"))
}
