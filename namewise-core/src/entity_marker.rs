//! Removal of semantically empty "Entity"/"Model" markers from identifiers.

use crate::case_model::{is_word_end, is_word_start, match_leading_case, rematch_case_at, CaseMode};
use crate::markers::{entity_markers, split_field_prefix, Marker};
use crate::pluralizer::make_plural;

/// Find the first entity marker standing as a whole word in `name`.
///
/// Returns the byte offset in `name` and the marker. The marker may start
/// lower-case only where the identifier itself starts (after a field prefix).
fn find_marker(name: &str) -> Option<(usize, &'static Marker)> {
    let (prefix, rest) = split_field_prefix(name);

    for (index, _) in rest.char_indices() {
        if !is_word_start(rest, index) {
            continue;
        }
        let mode = if index == 0 || rest.as_bytes()[index - 1] == b'_' {
            CaseMode::OrdinalIgnoreCase
        } else {
            CaseMode::Ordinal
        };
        let tail = &rest[index..];
        let found = entity_markers().iter().find(|marker| {
            mode.starts_with(tail, &marker.text) && is_word_end(rest, index + marker.text.len())
        });
        if let Some(marker) = found {
            return Some((prefix.len() + index, marker));
        }
    }

    None
}

pub fn has_marker(name: &str) -> bool {
    find_marker(name).is_some()
}

/// Strip entity markers from `name`, keeping its field prefix and casing.
///
/// A name that is nothing but a marker becomes the generic replacement word
/// ("Model" gives "Entity", "models" gives "entities"); with a field prefix the
/// replacement is lower-case ("m_Model" gives "m_entity").
pub fn strip_entity_marker(name: &str) -> String {
    if name.trim().is_empty() {
        return name.to_string();
    }

    let (prefix, rest) = split_field_prefix(name);
    if let Some(replacement) = lone_marker_replacement(rest) {
        return if prefix.is_empty() {
            match_leading_case(replacement, rest)
        } else {
            format!("{prefix}{}", replacement.to_lowercase())
        };
    }

    let mut current = name.to_string();
    let mut plural = false;
    while let Some((index, marker)) = find_marker(&current) {
        let end = index + marker.text.len();
        let candidate = format!("{}{}", &current[..index], &current[end..]);

        // Never strip down to nothing; what is left is a lone marker
        if candidate.len() == prefix.len() {
            break;
        }

        // A trailing plural marker leaves the plural on the remaining noun
        if end == current.len() && marker.replacement.as_deref() == Some("Entities") {
            plural = true;
        }
        current = rematch_case_at(&current, &candidate, index);
    }

    // "m_ModelEntity" ends up as a prefixed lone marker
    if current != name && lone_marker_replacement(&current[prefix.len()..]).is_some() {
        return strip_entity_marker(&current);
    }

    if plural {
        return make_plural(&current);
    }
    current
}

fn lone_marker_replacement(rest: &str) -> Option<&'static str> {
    entity_markers()
        .find_exact(rest, CaseMode::OrdinalIgnoreCase)
        .map(|marker| marker.replacement.as_deref().unwrap_or("Entity"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_marker() {
        assert!(has_marker("CustomerEntity"));
        assert!(has_marker("customerModel"));
        assert!(has_marker("modelName"));
        assert!(has_marker("m_entityCache"));
        assert!(has_marker("Entity"));
        assert!(!has_marker("Remodel"));
        assert!(!has_marker("Modeled"));
        assert!(!has_marker("Customer"));
        assert!(!has_marker(""));
    }

    #[test]
    fn test_marker_alone_returns_case_matched_replacement() {
        assert_eq!(strip_entity_marker("Entity"), "Entity");
        assert_eq!(strip_entity_marker("entity"), "entity");
        assert_eq!(strip_entity_marker("Model"), "Entity");
        assert_eq!(strip_entity_marker("model"), "entity");
        assert_eq!(strip_entity_marker("Models"), "Entities");
    }

    #[test]
    fn test_prefix_plus_marker_returns_prefix_and_lowercase_replacement() {
        assert_eq!(strip_entity_marker("_entity"), "_entity");
        assert_eq!(strip_entity_marker("_Entity"), "_entity");
        assert_eq!(strip_entity_marker("m_model"), "m_entity");
        assert_eq!(strip_entity_marker("s_Models"), "s_entities");
    }

    #[test]
    fn test_suffix_marker_removed() {
        assert_eq!(strip_entity_marker("CustomerEntity"), "Customer");
        assert_eq!(strip_entity_marker("customerModel"), "customer");
        assert_eq!(strip_entity_marker("OrderModels"), "Orders");
        assert_eq!(strip_entity_marker("CustomerEntities"), "Customers");
        assert_eq!(strip_entity_marker("m_orderModels"), "m_orders");
        assert_eq!(strip_entity_marker("CategoryModels"), "Categories");
        assert_eq!(strip_entity_marker("_customerEntity"), "_customer");
    }

    #[test]
    fn test_infix_marker_removed() {
        assert_eq!(strip_entity_marker("CustomerModelId"), "CustomerId");
        assert_eq!(strip_entity_marker("UserEntityCache"), "UserCache");
    }

    #[test]
    fn test_leading_marker_rematches_case() {
        assert_eq!(strip_entity_marker("EntityCustomer"), "Customer");
        assert_eq!(strip_entity_marker("modelCustomer"), "customer");
        assert_eq!(strip_entity_marker("_modelName"), "_name");
        assert_eq!(strip_entity_marker("m_EntityName"), "m_Name");
    }

    #[test]
    fn test_multiple_markers() {
        assert_eq!(strip_entity_marker("ModelEntity"), "Entity");
        assert_eq!(strip_entity_marker("CustomerModelEntity"), "Customer");
    }

    #[test]
    fn test_non_marker_names_unchanged() {
        assert_eq!(strip_entity_marker("Remodel"), "Remodel");
        assert_eq!(strip_entity_marker("Modeled"), "Modeled");
        assert_eq!(strip_entity_marker(""), "");
        assert_eq!(strip_entity_marker("   "), "   ");
    }
}
