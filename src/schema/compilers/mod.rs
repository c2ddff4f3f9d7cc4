//! Schema compilers.
//!
//! Generates SQL DDL from schema descriptions. Each compile step returns its own
//! `StatementGroup`; groups are only combined by `emit`.

pub mod postgres;

pub use postgres::PostgresCompiler;

/// Kind of statements held by a group.
///
/// Variant order is emission order: tables must exist before columns are added to
/// them or triggers are attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupKind {
    TableCreation,
    ColumnAddition,
    TriggerDefinition,
}

/// An ordered run of generated statements of a single kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementGroup {
    pub kind: GroupKind,
    pub statements: Vec<String>,
}

impl StatementGroup {
    pub fn new(kind: GroupKind) -> Self {
        Self {
            kind,
            statements: Vec::new(),
        }
    }

    pub fn push(&mut self, statement: String) {
        self.statements.push(statement);
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_kind_order() {
        let mut kinds = vec![
            GroupKind::TriggerDefinition,
            GroupKind::TableCreation,
            GroupKind::ColumnAddition,
        ];
        kinds.sort();
        assert_eq!(
            kinds,
            vec![
                GroupKind::TableCreation,
                GroupKind::ColumnAddition,
                GroupKind::TriggerDefinition,
            ]
        );
    }

    #[test]
    fn test_statement_group_push() {
        let mut group = StatementGroup::new(GroupKind::ColumnAddition);
        assert!(group.is_empty());
        group.push("ALTER TABLE user ADD COLUMN user_created TIMESTAMP;".to_string());
        assert_eq!(group.len(), 1);
    }
}
