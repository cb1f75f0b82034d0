//! Input validation shared by both catalog sources.
//!
//! Both upstream APIs reject the same malformed inputs, so the checks live
//! here once. An input that was never provided and an input that collapses
//! to nothing after normalization produce distinct messages.

use offerlens_core::{CoreError, ListInput, Operation, OperationInput};

/// Checks an input against its operation's requirements.
pub fn validate_input(input: &OperationInput) -> Result<(), CoreError> {
    match input.operation() {
        Operation::GetItems => require_ids(
            input.item_ids.as_ref(),
            "Item IDs are required",
            "At least one valid Item ID is required",
        ),
        Operation::SearchItems => {
            if input.trimmed_keywords().is_none() {
                return Err(CoreError::Validation("Keywords are required".to_string()));
            }
            Ok(())
        }
        Operation::GetBrowseNodes => require_ids(
            input.browse_node_ids.as_ref(),
            "Browse Node IDs are required",
            "At least one valid Browse Node ID is required",
        ),
    }
}

/// An id list must be provided, non-blank, and contain at least one entry
/// that survives normalization.
fn require_ids(
    list: Option<&ListInput>,
    required_message: &str,
    invalid_message: &str,
) -> Result<(), CoreError> {
    let Some(list) = list else {
        return Err(CoreError::Validation(required_message.to_string()));
    };

    let blank = match list {
        ListInput::Csv(value) => value.trim().is_empty(),
        ListInput::Items(values) => values.is_empty(),
    };
    if blank {
        return Err(CoreError::Validation(required_message.to_string()));
    }

    if list.normalize().is_empty() {
        return Err(CoreError::Validation(invalid_message.to_string()));
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn message(input: &OperationInput) -> String {
        validate_input(input).unwrap_err().to_string()
    }

    #[test]
    fn test_get_items_requires_ids() {
        let mut input = OperationInput::new(Operation::GetItems);
        assert_eq!(message(&input), "Item IDs are required");

        input.item_ids = Some(ListInput::from("   "));
        assert_eq!(message(&input), "Item IDs are required");

        // Non-blank input that normalizes to nothing is a different error.
        input.item_ids = Some(ListInput::from(", ,"));
        assert_eq!(message(&input), "At least one valid Item ID is required");

        input.item_ids = Some(ListInput::from("B08N5WRWNW"));
        assert!(validate_input(&input).is_ok());
    }

    #[test]
    fn test_get_items_array_form() {
        let mut input = OperationInput::new(Operation::GetItems);
        input.item_ids = Some(ListInput::Items(vec![]));
        assert_eq!(message(&input), "Item IDs are required");

        input.item_ids = Some(ListInput::Items(vec![" ".to_string()]));
        assert_eq!(message(&input), "At least one valid Item ID is required");
    }

    #[test]
    fn test_search_items_requires_keywords() {
        let mut input = OperationInput::new(Operation::SearchItems);
        assert_eq!(message(&input), "Keywords are required");

        input.keywords = Some("   ".to_string());
        assert_eq!(message(&input), "Keywords are required");

        input.keywords = Some("wireless headphones".to_string());
        assert!(validate_input(&input).is_ok());
    }

    #[test]
    fn test_get_browse_nodes_requires_ids() {
        let mut input = OperationInput::new(Operation::GetBrowseNodes);
        assert_eq!(message(&input), "Browse Node IDs are required");

        input.browse_node_ids = Some(ListInput::from(",,"));
        assert_eq!(message(&input), "At least one valid Browse Node ID is required");

        input.browse_node_ids = Some(ListInput::from("283155,1000"));
        assert!(validate_input(&input).is_ok());
    }
}
