//! Script emission.

use super::compilers::StatementGroup;

/// Concatenate statement groups into a single script.
///
/// Groups are ordered by kind (table creation, column addition, trigger
/// definition) whatever order they are passed in; groups of the same kind keep
/// their relative order. Statements within a group are newline-separated, groups
/// are separated by one blank line and the script ends with a newline. Empty
/// groups are skipped.
pub fn emit(groups: &[StatementGroup]) -> String {
    let mut ordered: Vec<&StatementGroup> = groups.iter().filter(|g| !g.is_empty()).collect();
    ordered.sort_by_key(|g| g.kind);

    let mut script = ordered
        .iter()
        .map(|g| g.statements.join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n");
    script.push('\n');
    script
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::compilers::GroupKind;

    fn group(kind: GroupKind, statements: &[&str]) -> StatementGroup {
        StatementGroup {
            kind,
            statements: statements.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_emit_orders_groups_by_kind() {
        let groups = vec![
            group(GroupKind::TriggerDefinition, &["-- trigger"]),
            group(GroupKind::TableCreation, &["-- table a", "-- table b"]),
            group(GroupKind::ColumnAddition, &["-- column"]),
        ];

        assert_eq!(
            emit(&groups),
            "-- table a\n-- table b\n\n-- column\n\n-- trigger\n"
        );
    }

    #[test]
    fn test_emit_skips_empty_groups() {
        let groups = vec![
            group(GroupKind::TableCreation, &["-- table"]),
            group(GroupKind::ColumnAddition, &[]),
            group(GroupKind::TriggerDefinition, &["-- trigger"]),
        ];

        assert_eq!(emit(&groups), "-- table\n\n-- trigger\n");
    }

    #[test]
    fn test_emit_nothing() {
        assert_eq!(emit(&[]), "\n");
    }

    #[test]
    fn test_emit_keeps_order_within_kind() {
        let groups = vec![
            group(GroupKind::TableCreation, &["-- first"]),
            group(GroupKind::TableCreation, &["-- second"]),
        ];

        assert_eq!(emit(&groups), "-- first\n\n-- second\n");
    }
}
